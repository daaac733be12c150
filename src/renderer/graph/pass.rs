//! Scene Pass List
//!
//! Every step of a frame is a named [`ScenePass`]. [`ScenePass::ORDER`] is the
//! only place the draw order is written down: each pass relies on the depth
//! and colour buffers left by the ones before it, so the list must not be
//! reordered.

use crate::renderer::context::RenderContext;
use crate::renderer::device::RenderDevice;
use crate::renderer::graph::frame::FrameInputs;
use crate::renderer::graph::passes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenePass {
    /// Base, points and frame; grayed when no game is active.
    Table,
    PointLabels,
    /// Smoothed frame edges (overlay edge smoothing only).
    EdgeOverlay,
    DoublingCube,
    MoveIndicator,
    /// Static checkers, far halves first when translucent.
    Checkers,
    DragTargets,
    Dice,
    /// Dragged and animated checkers.
    SpecialCheckers,
    Flag,
}

impl ScenePass {
    pub const ORDER: [ScenePass; 10] = [
        Self::Table,
        Self::PointLabels,
        Self::EdgeOverlay,
        Self::DoublingCube,
        Self::MoveIndicator,
        Self::Checkers,
        Self::DragTargets,
        Self::Dice,
        Self::SpecialCheckers,
        Self::Flag,
    ];

    /// Debug group label.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::PointLabels => "point-labels",
            Self::EdgeOverlay => "edge-overlay",
            Self::DoublingCube => "doubling-cube",
            Self::MoveIndicator => "move-indicator",
            Self::Checkers => "checkers",
            Self::DragTargets => "drag-targets",
            Self::Dice => "dice",
            Self::SpecialCheckers => "special-checkers",
            Self::Flag => "flag",
        }
    }

    /// Whether the pass has anything to draw this frame.
    #[must_use]
    pub fn is_active(self, frame: &FrameInputs<'_>) -> bool {
        let board = frame.board;
        let config = frame.config;
        match self {
            Self::Table | Self::Checkers => true,
            Self::PointLabels => config.labels,
            Self::EdgeOverlay => config.edge_smoothing.uses_overlay(),
            Self::DoublingCube => board.shows_cube(),
            Self::MoveIndicator => config.show_move_indicator,
            Self::DragTargets => board.drag_target_help,
            Self::Dice => board.dice_showing,
            Self::SpecialCheckers => frame.scene.moving.is_some() || board.drag_point.is_some(),
            Self::Flag => board.resigned != 0,
        }
    }

    pub fn run(
        self,
        device: &mut dyn RenderDevice,
        ctx: &mut RenderContext,
        frame: &FrameInputs<'_>,
    ) {
        match self {
            Self::Table => passes::table::run(device, ctx, frame),
            Self::PointLabels => passes::labels::run(device, ctx, frame),
            Self::EdgeOverlay => passes::edges::run(device, ctx, frame),
            Self::DoublingCube => passes::cube::run(device, ctx, frame),
            Self::MoveIndicator => passes::indicator::run(device, ctx, frame),
            Self::Checkers => passes::pieces::run_checkers(device, ctx, frame),
            Self::DragTargets => passes::pieces::run_drag_targets(device, ctx, frame),
            Self::Dice => passes::dice::run(device, ctx, frame),
            Self::SpecialCheckers => passes::pieces::run_special_checkers(device, ctx, frame),
            Self::Flag => passes::flag::run(device, ctx, frame),
        }
    }
}
