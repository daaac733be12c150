//! Renderer
//!
//! - [`context`]: matrices, pipeline state and material threaded through
//!   every draw call
//! - [`device`]: the immediate-mode pipeline seam ([`RenderDevice`])
//! - [`graph`]: the ordered scene passes and their orchestrator
//! - [`tiles`]: tiled off-screen export
//! - [`projector`]: screen-to-board unprojection
//!
//! The remaining modules hold the procedural pieces the passes share:
//! point geometry, dice dots and the smoothed edge overlays.

pub mod aa;
pub mod context;
pub mod device;
pub mod dots;
pub mod graph;
pub mod pipeline_key;
pub mod points;
pub mod projector;
pub mod recorder;
pub mod tiles;

pub use context::{BlendFunc, DrawState, PipelineState, RenderContext, Viewport};
pub use device::{ClearFlags, ModelKind, PixelRect, Primitive, RenderDevice, TextRequest};
pub use graph::{FrameInputs, ScenePass, SceneRenderer};
pub use projector::Projector;
pub use recorder::CommandRecorder;
pub use tiles::{RowOrder, TileRenderer, Tiler, TILE_BORDER};
