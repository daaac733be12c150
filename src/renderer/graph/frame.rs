//! Frame orchestration
//!
//! [`SceneRenderer`] walks [`ScenePass::ORDER`] once per frame. Each pass
//! gets its own matrix scope and debug group; pipeline state a pass changes
//! is reset by the pass itself, except for blending left on by the dice
//! back faces, which the following passes expect.

use log::trace;

use crate::renderer::context::{RenderContext, Viewport};
use crate::renderer::device::{ClearFlags, RenderDevice};
use crate::renderer::graph::pass::ScenePass;
use crate::resources::config::RenderConfig;
use crate::scene::board::BoardState;
use crate::scene::layout::BoardLayout;
use crate::scene::state::SceneState;

/// Read-only inputs of one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameInputs<'a> {
    pub board: &'a BoardState,
    pub scene: &'a SceneState,
    pub config: &'a RenderConfig,
    pub layout: &'a BoardLayout,
}

impl<'a> FrameInputs<'a> {
    #[must_use]
    pub fn new(
        board: &'a BoardState,
        scene: &'a SceneState,
        config: &'a RenderConfig,
        layout: &'a BoardLayout,
    ) -> Self {
        Self {
            board,
            scene,
            config,
            layout,
        }
    }

    /// Passes with something to draw, in draw order.
    pub fn active_passes(self) -> impl Iterator<Item = ScenePass> + 'a {
        ScenePass::ORDER.into_iter().filter(move |pass| pass.is_active(&self))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SceneRenderer;

impl SceneRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Draws the board into the current target with the projection and
    /// model-view already installed in `ctx`.
    pub fn draw_board(
        &self,
        device: &mut dyn RenderDevice,
        ctx: &mut RenderContext,
        frame: &FrameInputs<'_>,
    ) {
        for pass in frame.active_passes() {
            trace!("scene pass: {}", pass.name());
            device.push_debug_group(pass.name());
            ctx.with_matrix(|ctx| pass.run(device, ctx, frame));
            device.pop_debug_group();
        }
    }

    /// A full displayed frame: installs the live view for `viewport`, clears
    /// colour and depth, then draws the board.
    pub fn render_frame(
        &self,
        device: &mut dyn RenderDevice,
        ctx: &mut RenderContext,
        frame: &FrameInputs<'_>,
        viewport: Viewport,
    ) {
        frame.scene.view.install(ctx, viewport);
        device.clear(ClearFlags::COLOR | ClearFlags::DEPTH);
        self.draw_board(device, ctx, frame);
    }
}
