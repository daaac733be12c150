//! Table pass.
//!
//! The base and the flat points are drawn with depth compare `Always`: they
//! are coplanar and must simply paint over each other in order. The frame and
//! hinges then go in with normal depth testing.

use glam::Vec3;

use crate::renderer::context::{DepthFunc, RenderContext};
use crate::renderer::device::{ClearFlags, ModelKind, RenderDevice};
use crate::renderer::graph::frame::FrameInputs;
use crate::renderer::points::PointRenderer;
use crate::resources::config::RenderConfig;
use crate::resources::material::Material;

fn draw_hinges(
    device: &mut dyn RenderDevice,
    ctx: &mut RenderContext,
    frame: &FrameInputs<'_>,
    config: &RenderConfig,
) {
    let layout = frame.layout;
    ctx.set_material(&config.hinge_material);
    for y in [layout.total_height() / 4.0, layout.total_height() * 3.0 / 4.0] {
        ctx.with_matrix(|ctx| {
            ctx.translate(Vec3::new(
                layout.total_width() / 2.0,
                y,
                layout.base_depth + layout.edge_depth,
            ));
            device.draw_model(ModelKind::Hinge, Some(&config.hinge_material), &ctx.draw_state());
        });
    }
}

/// Draws the table with `config`'s materials.
pub fn draw_table(
    device: &mut dyn RenderDevice,
    ctx: &mut RenderContext,
    frame: &FrameInputs<'_>,
    config: &RenderConfig,
) {
    device.clear(ClearFlags::DEPTH);

    ctx.set_depth_func(DepthFunc::Always);
    ctx.set_material(&config.base_material);
    device.draw_model(ModelKind::TableBase, Some(&config.base_material), &ctx.draw_state());

    let points = PointRenderer::new(frame.layout, config);
    points.draw(device, ctx, false);
    if config.edge_smoothing.uses_overlay() {
        points.draw_outlines(device, ctx);
    }
    ctx.set_depth_func(DepthFunc::LessEqual);

    ctx.set_material(&config.box_material);
    device.draw_model(ModelKind::Table, Some(&config.box_material), &ctx.draw_state());

    if config.hinges {
        let gap = Material {
            color: config.gap_color,
            ..Material::default()
        }
        .matte();
        ctx.set_depth_func(DepthFunc::Always);
        ctx.set_material(&gap);
        device.draw_model(ModelKind::HingeGap, Some(&gap), &ctx.draw_state());
        ctx.set_depth_func(DepthFunc::LessEqual);

        draw_hinges(device, ctx, frame, config);
    }
}

/// Table in the frame's own colours, or desaturated when no game is on.
pub fn run(device: &mut dyn RenderDevice, ctx: &mut RenderContext, frame: &FrameInputs<'_>) {
    if frame.board.game_active {
        draw_table(device, ctx, frame, frame.config);
    } else {
        let grayed = frame.config.grayed();
        draw_table(device, ctx, frame, &grayed);
    }
}
