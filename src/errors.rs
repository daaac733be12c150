//! Error Types
//!
//! This module defines the error types used throughout the board renderer.
//!
//! # Overview
//!
//! The main error type [`Board3dError`] covers the failure modes of the core:
//! - Unprojection against a degenerate camera transform
//! - Board / die state that violates its invariants
//! - Tiled export setup, readback and cancellation
//!
//! Nothing here is fatal to the process. A frame drawn from degraded state is
//! always preferred over aborting, so most drawing entry points do not return
//! a `Result` at all; only validation and export do.
//!
//! ```rust,ignore
//! use board3d::errors::{Board3dError, Result};
//!
//! fn export() -> Result<()> {
//!     // Operations that may fail return Result
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the board renderer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Board3dError {
    // ========================================================================
    // Projection Errors
    // ========================================================================
    /// The model-view-projection transform could not be inverted, or the
    /// unprojected ray never reaches the requested depth.
    #[error("Unprojection failed: {0}")]
    Unprojection(&'static str),

    // ========================================================================
    // Board State Errors
    // ========================================================================
    /// A point holds more checkers than a side owns.
    #[error("Point {point} holds {count} checkers (limit is 15 per side)")]
    PointCountOutOfRange {
        /// Index of the offending point (0..28)
        point: usize,
        /// The stored signed count
        count: i32,
    },

    /// A die face description breaks the opposite-pair rule.
    #[error("Invalid die face configuration: {0}")]
    InvalidDieFaces(String),

    // ========================================================================
    // Export Errors
    // ========================================================================
    /// Tile dimensions leave no drawable area once the border is removed.
    #[error("Invalid tile size {width}x{height} with border {border}")]
    InvalidTileSize {
        /// Tile width in pixels (border included)
        width: u32,
        /// Tile height in pixels (border included)
        height: u32,
        /// Border on each side in pixels
        border: u32,
    },

    /// Output buffer dimensions do not match the requested image.
    #[error("Output buffer is {actual:?}, expected {expected:?}")]
    BufferSizeMismatch {
        /// Requested (width, height)
        expected: (u32, u32),
        /// Buffer (width, height)
        actual: (u32, u32),
    },

    /// The device could not read back the rendered tile.
    #[error("Pixel readback failed: {0}")]
    ReadPixels(String),

    /// The caller stopped the export between tiles. The output buffer is only
    /// partially written and must be discarded.
    #[error("Export cancelled after {tiles_done} tile(s)")]
    ExportCancelled {
        /// Number of tiles copied before cancellation
        tiles_done: usize,
    },
}

/// Alias for `Result<T, Board3dError>`.
pub type Result<T> = std::result::Result<T, Board3dError>;
