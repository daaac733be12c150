//! Smoothed frame edges.

use crate::renderer::aa;
use crate::renderer::context::RenderContext;
use crate::renderer::device::RenderDevice;
use crate::renderer::graph::frame::FrameInputs;

pub fn run(device: &mut dyn RenderDevice, ctx: &mut RenderContext, frame: &FrameInputs<'_>) {
    ctx.set_material(&frame.config.box_material);
    aa::tidy_edges(device, ctx, frame.layout, frame.config.rounded_edges);
}
