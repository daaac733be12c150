//! 3D scene state
//!
//! Rendering-side state that lives between frames: dice animation, flag
//! wave, special checkers, cached view parameters. Animation code outside
//! this crate mutates it between frames; drawing only reads it.

use glam::{Vec2, Vec3};

use crate::scene::camera::ViewVolume;

/// Placement of one die. Which face points where follows from the rolled
/// value and the view, see `passes::dice::resting_faces`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DieState {
    /// Centre of the die in board space.
    pub position: Vec3,
    /// Spin about the vertical axis, in degrees.
    pub rotation: f32,
}

/// A checker flying between points during a move animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingPiece {
    pub position: Vec3,
    /// Quarter turns of roll-over while the checker enters a bear-off tray.
    pub roll_over: u8,
}

/// Result of sizing the background plane against the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BackgroundRect {
    pub origin: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    /// Dice are in the middle of a shake animation.
    pub shaking_dice: bool,
    pub dice: [DieState; 2],

    /// Wave phase of the resignation flag, in `[0, 1)`.
    pub flag_wave: f32,

    pub moving: Option<MovingPiece>,
    /// Where the dragged checker is drawn (see the projector).
    pub drag_pos: Vec3,
    /// Spin applied to animated and dragged checkers, in degrees.
    pub moving_piece_rotation: f32,

    /// Shadow volumes need recomputing before the next frame.
    pub shadows_out_of_date: bool,
    /// Frames are drawn to a back buffer and swapped.
    pub back_buffered: bool,

    pub view: ViewVolume,
    pub background: BackgroundRect,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            shaking_dice: false,
            dice: [DieState::default(); 2],
            flag_wave: 0.0,
            moving: None,
            drag_pos: Vec3::ZERO,
            moving_piece_rotation: 0.0,
            shadows_out_of_date: true,
            back_buffered: true,
            view: ViewVolume::default(),
            background: BackgroundRect::default(),
        }
    }
}

impl SceneState {
    /// Flags shadows for recomputation after the board changed.
    pub fn update_shadows(&mut self) {
        self.shadows_out_of_date = true;
    }

    /// Advances the flag wave phase, wrapping at one full wave.
    pub fn advance_flag(&mut self, delta: f32) {
        self.flag_wave = (self.flag_wave + delta).rem_euclid(1.0);
    }
}
