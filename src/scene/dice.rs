//! Die Face Configuration
//!
//! Describes which face of one die currently points where.
//!
//! Faces are indexed `0..6`, face `f` carrying `f + 1` dots. Opposite faces
//! always sum to seven dots, so the face opposite `f` is `5 - f`.
//!
//! The four side faces are kept in cyclic order around the vertical axis:
//! `side[i]` is opposite `side[(i + 2) % 4]`. `side[0]` and `side[1]` are the
//! two faces turned towards the viewer.

use crate::errors::{Board3dError, Result};

/// Number of faces on a die.
pub const DIE_FACES: usize = 6;

/// Index of the face opposite `face`.
#[inline]
#[must_use]
pub const fn opposite_face(face: u8) -> u8 {
    5 - face
}

/// Face walked at step `step` of the dot-drawing walk.
///
/// The walk covers faces 0, 1, 2 and then their opposites in reverse order
/// (5, 4, 3), alternating a quarter turn about `y` and `x` between faces.
#[inline]
#[must_use]
pub const fn walk_face(step: usize) -> u8 {
    if step < 3 {
        step as u8
    } else {
        (8 - step) as u8
    }
}

/// Which pass of dot drawing a visibility query is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DotPass {
    /// Dots on the faces turned towards the camera.
    Front,
    /// Dots seen through a translucent die body.
    Back,
}

/// Orientation of one die, as face indices (`0..6`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DieFaceConfig {
    pub top: u8,
    pub bottom: u8,
    pub side: [u8; 4],
}

impl Default for DieFaceConfig {
    fn default() -> Self {
        Self::showing(1)
    }
}

impl DieFaceConfig {
    /// Builds and validates a configuration from face indices.
    pub fn new(top: u8, bottom: u8, side: [u8; 4]) -> Result<Self> {
        let config = Self { top, bottom, side };
        config.validate()?;
        Ok(config)
    }

    /// Builds a configuration from dot values (`1..=6`) rather than indices.
    pub fn from_values(top: u8, bottom: u8, side: [u8; 4]) -> Result<Self> {
        let to_index = |value: u8| {
            if (1..=6).contains(&value) {
                Ok(value - 1)
            } else {
                Err(Board3dError::InvalidDieFaces(format!(
                    "dot value {value} outside 1..=6"
                )))
            }
        };
        Self::new(
            to_index(top)?,
            to_index(bottom)?,
            [
                to_index(side[0])?,
                to_index(side[1])?,
                to_index(side[2])?,
                to_index(side[3])?,
            ],
        )
    }

    /// Canonical resting orientation with `value` (1..=6) on top.
    ///
    /// Values outside the range are clamped.
    #[must_use]
    pub fn showing(value: u8) -> Self {
        const SIDES: [[u8; 4]; 6] = [
            [1, 2, 4, 3],
            [0, 3, 5, 2],
            [0, 1, 5, 4],
            [0, 4, 5, 1],
            [0, 2, 5, 3],
            [1, 3, 4, 2],
        ];
        let top = value.clamp(1, 6) - 1;
        Self {
            top,
            bottom: opposite_face(top),
            side: SIDES[top as usize],
        }
    }

    /// Checks that every face appears once and that opposite slots hold
    /// opposite faces.
    pub fn validate(&self) -> Result<()> {
        let faces = [
            self.top,
            self.bottom,
            self.side[0],
            self.side[1],
            self.side[2],
            self.side[3],
        ];
        let mut seen = [false; DIE_FACES];
        for face in faces {
            let slot = seen.get_mut(face as usize).ok_or_else(|| {
                Board3dError::InvalidDieFaces(format!("face index {face} outside 0..6"))
            })?;
            if *slot {
                return Err(Board3dError::InvalidDieFaces(format!(
                    "face {face} appears twice"
                )));
            }
            *slot = true;
        }

        let pairs = [
            (self.top, self.bottom),
            (self.side[0], self.side[2]),
            (self.side[1], self.side[3]),
        ];
        for (a, b) in pairs {
            if opposite_face(a) != b {
                return Err(Board3dError::InvalidDieFaces(format!(
                    "faces {a} and {b} are not opposite"
                )));
            }
        }
        Ok(())
    }

    /// Quarter turn about the `x` axis: the top rolls towards `side[0]`.
    #[must_use]
    pub fn rolled_x(self) -> Self {
        Self {
            top: self.side[2],
            bottom: self.side[0],
            side: [self.top, self.side[1], self.bottom, self.side[3]],
        }
    }

    /// Quarter turn about the `y` axis: the top rolls towards `side[1]`.
    #[must_use]
    pub fn rolled_y(self) -> Self {
        Self {
            top: self.side[3],
            bottom: self.side[1],
            side: [self.side[0], self.top, self.side[2], self.bottom],
        }
    }

    /// Quarter turn about the vertical axis.
    #[must_use]
    pub fn spun_z(self) -> Self {
        Self {
            top: self.top,
            bottom: self.bottom,
            side: [self.side[3], self.side[0], self.side[1], self.side[2]],
        }
    }

    /// Whether `face` is one of the two sides turned towards the viewer.
    #[must_use]
    pub fn is_side_visible(&self, face: u8) -> bool {
        face == self.side[0] || face == self.side[1]
    }

    /// Whether dots on `face` must be drawn during `pass`.
    ///
    /// A shaking die turns too fast to cull reliably, so every face is drawn.
    #[must_use]
    pub fn draws_face(&self, face: u8, pass: DotPass, shaking: bool) -> bool {
        if shaking {
            return true;
        }
        let front = face == self.top || self.is_side_visible(face);
        match pass {
            DotPass::Front => front,
            DotPass::Back => !front,
        }
    }
}
