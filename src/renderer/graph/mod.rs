//! Scene graph
//!
//! A frame is an ordered list of named passes ([`ScenePass`]) run by a single
//! orchestrator ([`SceneRenderer`]).

pub mod frame;
pub mod pass;
pub mod passes;

pub use frame::{FrameInputs, SceneRenderer};
pub use pass::ScenePass;
