//! Scene passes, one module per step of the frame.

pub mod cube;
pub mod dice;
pub mod edges;
pub mod flag;
pub mod indicator;
pub mod labels;
pub mod pieces;
pub mod table;
