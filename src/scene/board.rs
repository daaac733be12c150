//! Logical board state, as seen by the renderer.
//!
//! Owned by the game layer; read-only while a frame is drawn.

use crate::errors::{Board3dError, Result};

/// Number of checker slots: 24 points, two bars (0 and 25), two bear-off
/// trays (26 and 27).
pub const BOARD_SLOTS: usize = 28;

/// Most checkers one side can have on any slot.
pub const MAX_CHECKERS: i32 = 15;

/// Number of drag-target highlight slots.
pub const DRAG_TARGET_SLOTS: usize = 4;

/// Snapshot of the game position and interaction state.
///
/// `points[i] < 0` holds checkers of the negative side (material 0),
/// `points[i] > 0` those of the positive side (material 1).
#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    pub points: [i32; BOARD_SLOTS],
    /// Rolled dice; `0` means not rolled.
    pub dice: [u8; 2],
    /// `1` or `-1` for the side to move, `0` when no game is running.
    pub turn: i32,
    /// Whether the game is in progress; an inactive board is drawn grayed.
    pub game_active: bool,
    /// Dice are on the board and must be drawn.
    pub dice_showing: bool,
    pub cube_use: bool,
    pub crawford_game: bool,
    pub cube_value: u32,
    /// `0` centred, `1` or `-1` owning side.
    pub cube_owner: i32,
    /// Resignation level offered (1, 2 or 3), signed by side; `0` for none.
    pub resigned: i32,
    /// Point a checker is being dragged from.
    pub drag_point: Option<usize>,
    /// Side of the dragged checker.
    pub drag_colour: i32,
    /// Highlight legal target points while dragging.
    pub drag_target_help: bool,
    pub drag_targets: [Option<usize>; DRAG_TARGET_SLOTS],
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            points: [0; BOARD_SLOTS],
            dice: [0; 2],
            turn: 1,
            game_active: true,
            dice_showing: false,
            cube_use: true,
            crawford_game: false,
            cube_value: 1,
            cube_owner: 0,
            resigned: 0,
            drag_point: None,
            drag_colour: 1,
            drag_target_help: false,
            drag_targets: [None; DRAG_TARGET_SLOTS],
        }
    }
}

impl BoardState {
    /// Standard opening position.
    #[must_use]
    pub fn starting_position() -> Self {
        let mut board = Self::default();
        for (point, count) in [(24, 2), (13, 5), (8, 3), (6, 5)] {
            board.points[point] = count;
            board.points[25 - point] = -count;
        }
        board
    }

    /// Checks every slot against the per-side checker limit.
    pub fn validate(&self) -> Result<()> {
        match self
            .points
            .iter()
            .position(|count| count.abs() > MAX_CHECKERS)
        {
            Some(point) => Err(Board3dError::PointCountOutOfRange {
                point,
                count: self.points[point],
            }),
            None => Ok(()),
        }
    }

    /// Number of checkers on `point`, regardless of side.
    #[inline]
    #[must_use]
    pub fn checker_count(&self, point: usize) -> usize {
        self.points.get(point).map_or(0, |c| c.unsigned_abs() as usize)
    }

    /// Whether the doubling cube takes part in this frame.
    #[inline]
    #[must_use]
    pub fn shows_cube(&self) -> bool {
        self.cube_use && !self.crawford_game
    }

    /// Value shown on the die `index`, falling back to `index + 1` when the
    /// dice have not been rolled yet.
    #[must_use]
    pub fn die_value(&self, index: usize) -> u8 {
        match self.dice.get(index).copied().unwrap_or(0) {
            0 => index as u8 + 1,
            value => value.min(6),
        }
    }

    /// Drag targets currently set.
    pub fn active_drag_targets(&self) -> impl Iterator<Item = usize> + '_ {
        self.drag_targets.iter().filter_map(|t| *t)
    }
}
