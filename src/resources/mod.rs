//! Resources consumed by the renderer: materials and per-frame configuration.

pub mod config;
pub mod material;

pub use config::{EdgeSmoothing, PieceTextureType, PieceType, RenderConfig};
pub use material::{Material, TextureRef};
