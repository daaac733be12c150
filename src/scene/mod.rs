//! Scene inputs
//!
//! Everything a frame is drawn from:
//! - [`BoardState`]: the logical game position (owned by the game layer)
//! - [`SceneState`]: 3D animation and view state (owned by the renderer's host)
//! - [`BoardLayout`]: immutable board dimensions
//!
//! The renderer takes these as separate read-only inputs per frame; none of
//! them refers back to another.

pub mod board;
pub mod camera;
pub mod dice;
pub mod layout;
pub mod state;

pub use board::BoardState;
pub use camera::{FrustumBounds, ProjectionType, ViewVolume};
pub use dice::{DieFaceConfig, DotPass};
pub use layout::BoardLayout;
pub use state::{BackgroundRect, DieState, MovingPiece, SceneState};
