//! Board Layout
//!
//! Every board dimension used by the drawing code lives in [`BoardLayout`].
//! The struct is built once, never mutated during a frame, and passed by
//! reference to each component, so alternate board proportions can be drawn
//! (and tested) without touching any drawing code.
//!
//! Coordinates: `x` runs left to right across the open board, `y` from the
//! near (bottom) frame edge to the far one, `z` up out of the table.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Base dimensions of the board. Everything else is derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardLayout {
    /// Width of one point, and the slot a checker sits in.
    pub piece_hole: f32,
    /// Thickness of a checker.
    pub piece_depth: f32,
    /// Width of the frame walls around trays and board halves.
    pub edge_width: f32,
    /// Depth (along `y`) of the near and far frame rails.
    pub edge_height: f32,
    /// Height of the playing surface above the table.
    pub base_depth: f32,
    /// Height of the frame rails above the playing surface.
    pub edge_depth: f32,
    /// Length of a point triangle.
    pub point_height: f32,
    /// Free band between the two rows of points where dice land.
    pub dice_area_height: f32,
    /// Width of the bar between the two board halves.
    pub bar_width: f32,
    /// Gap in the middle of each bear-off tray wall.
    pub mid_side_gap_height: f32,
    /// Small offset used to lift overlays off the surface they decorate.
    pub lift_off: f32,
    /// Fraction of the point width used by rounded point ends.
    pub taki_width: f32,
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            piece_hole: 3.0,
            piece_depth: 0.5,
            edge_width: 0.5,
            edge_height: 1.5,
            base_depth: 3.0,
            edge_depth: 0.5,
            point_height: 15.0,
            dice_area_height: 6.0,
            bar_width: 4.0,
            mid_side_gap_height: 4.0,
            lift_off: 0.1,
            taki_width: 0.67,
        }
    }
}

impl BoardLayout {
    /// Width of one board half (six points).
    #[inline]
    #[must_use]
    pub fn board_width(&self) -> f32 {
        self.piece_hole * 6.0
    }

    /// Width of a bear-off tray including its walls.
    #[inline]
    #[must_use]
    pub fn tray_width(&self) -> f32 {
        self.edge_width * 2.0 + self.piece_hole
    }

    #[inline]
    #[must_use]
    pub fn total_width(&self) -> f32 {
        (self.tray_width() + self.board_width()) * 2.0 + self.bar_width
    }

    #[inline]
    #[must_use]
    pub fn total_height(&self) -> f32 {
        self.edge_height * 2.0 + self.point_height * 2.0 + self.dice_area_height
    }

    /// Height of one bear-off tray (half the board minus the wall gap).
    #[inline]
    #[must_use]
    pub fn tray_height(&self) -> f32 {
        (self.total_height() - self.mid_side_gap_height) / 2.0
    }

    /// Radius of the fillet on rounded frame edges.
    #[inline]
    #[must_use]
    pub fn board_fillet(&self) -> f32 {
        self.edge_width / 2.0
    }

    #[inline]
    #[must_use]
    pub fn doublecube_size(&self) -> f32 {
        self.piece_hole * 0.9
    }

    /// Unit of the move indicator arrow outline.
    #[inline]
    #[must_use]
    pub fn arrow_unit(&self) -> f32 {
        self.edge_height * 0.8 / 4.0
    }

    /// World-to-texture scale; divided by a texture's pixel width it gives
    /// resolution-independent texture coordinates.
    #[inline]
    #[must_use]
    pub fn texture_scale(&self) -> f32 {
        1000.0 / self.total_width()
    }

    /// Height of the plane dragged checkers move in.
    #[inline]
    #[must_use]
    pub fn piece_drag_depth(&self) -> f32 {
        self.base_depth + self.edge_depth + self.doublecube_size() + self.lift_off * 3.0
    }

    /// Centre of a point's checker column along `x`, for points 1..=24.
    #[must_use]
    pub fn point_center_x(&self, point: usize) -> f32 {
        let hole = self.piece_hole;
        let half = hole / 2.0;
        let right_board = self.total_width() - self.tray_width() - self.board_width();
        let p = point as f32;
        match point {
            1..=6 => self.total_width() - self.tray_width() - hole * p + half,
            7..=12 => self.tray_width() + hole * (12.0 - p) + half,
            13..=18 => self.tray_width() + hole * (p - 13.0) + half,
            _ => right_board + hole * (p - 19.0) + half,
        }
    }

    /// Position of the `pos`-th checker (1-based) on `point`.
    ///
    /// Points 1..=24 stack five checkers per layer, the bar (0 and 25) three
    /// per layer, and the bear-off trays (26 and 27) hold checkers on edge.
    #[must_use]
    pub fn piece_position(&self, point: usize, pos: usize) -> Vec3 {
        let pos = pos.max(1);
        let hole = self.piece_hole;

        match point {
            0 | 25 => {
                let layer = ((pos - 1) / 3) as f32;
                let slot = ((pos - 1) % 3 + 1) as f32;
                let offset = self.dice_area_height / 2.0 + hole * (slot - 0.5);
                let y = if point == 25 {
                    self.total_height() / 2.0 - offset
                } else {
                    self.total_height() / 2.0 + offset
                };
                Vec3::new(
                    self.total_width() / 2.0,
                    y,
                    self.base_depth + self.edge_depth + layer * self.piece_depth,
                )
            }
            26 | 27 => {
                let x = self.total_width() - self.edge_width - self.tray_width() / 2.0;
                let step = self.piece_depth * 1.2 * (pos - 1) as f32;
                let y = if point == 26 {
                    self.edge_height + step
                } else {
                    self.total_height() - self.edge_height - self.piece_depth - step
                };
                Vec3::new(x, y, self.base_depth)
            }
            _ => {
                let layer = ((pos - 1) / 5) as f32;
                let slot = ((pos - 1) % 5) as f32;
                let along = hole * slot + hole / 2.0;
                let y = if point <= 12 {
                    self.edge_height + along
                } else {
                    self.total_height() - self.edge_height - along
                };
                Vec3::new(
                    self.point_center_x(point),
                    y,
                    self.base_depth + layer * self.piece_depth,
                )
            }
        }
    }

    /// Resting place of the doubling cube: centred on the bar, or against
    /// the owner's rail.
    #[must_use]
    pub fn cube_position(&self, owner: i32) -> Vec3 {
        let size = self.doublecube_size();
        let travel = self.total_height() / 2.0 - self.edge_height - size / 2.0;
        let y = self.total_height() / 2.0 - travel * owner.signum() as f32;
        Vec3::new(
            self.total_width() / 2.0,
            y,
            self.base_depth + self.edge_depth + size / 2.0,
        )
    }

    /// Where the move indicator arrow sits for the side to move.
    #[must_use]
    pub fn move_indicator_position(&self, turn: i32) -> Vec3 {
        let offset = self.mid_side_gap_height / 4.0;
        let y = if turn >= 0 {
            self.total_height() / 2.0 - offset
        } else {
            self.total_height() / 2.0 + offset
        };
        Vec3::new(
            self.total_width() - self.tray_width() / 2.0,
            y,
            self.base_depth + self.edge_depth + self.lift_off,
        )
    }

    /// Foot of the resignation flag pole, on the resigning side's half.
    #[must_use]
    pub fn flag_position(&self, turn: i32) -> Vec3 {
        let half = self.tray_width() + self.board_width() / 2.0;
        let x = if turn >= 0 {
            self.total_width() - half
        } else {
            half
        };
        Vec3::new(x, self.total_height() / 2.0, self.base_depth)
    }
}
