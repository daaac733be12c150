//! Move indicator arrow, pointing along the direction of play of the side to
//! move. Drawn without depth testing so nothing can hide it.

use glam::Vec3;

use crate::renderer::aa;
use crate::renderer::context::RenderContext;
use crate::renderer::device::{Primitive, RenderDevice, Topology};
use crate::renderer::graph::frame::FrameInputs;

/// Filled arrow: a shaft quad and a head triangle.
#[must_use]
pub fn arrow_fill(unit: f32) -> [Primitive; 2] {
    let shaft = Primitive::from_points(
        Topology::TriangleStrip,
        [
            Vec3::new(-unit * 2.0, -unit, 0.0),
            Vec3::new(0.0, -unit, 0.0),
            Vec3::new(-unit * 2.0, unit, 0.0),
            Vec3::new(0.0, unit, 0.0),
        ],
    );
    let head = Primitive::from_points(
        Topology::Triangles,
        [
            Vec3::new(0.0, -unit * 2.0, 0.0),
            Vec3::new(unit * 2.0, 0.0, 0.0),
            Vec3::new(0.0, unit * 2.0, 0.0),
        ],
    );
    [shaft, head]
}

pub fn run(device: &mut dyn RenderDevice, ctx: &mut RenderContext, frame: &FrameInputs<'_>) {
    let layout = frame.layout;
    let turn = frame.board.turn;
    let unit = layout.arrow_unit();

    ctx.set_depth_test(false);
    ctx.with_matrix(|ctx| {
        ctx.translate(layout.move_indicator_position(turn));
        if turn == -1 {
            ctx.rotate_deg(180.0, Vec3::Z);
        }
        let side = usize::from(turn == 1);
        ctx.set_material(&frame.config.checker_materials[side]);
        let state = ctx.draw_state();
        for part in &arrow_fill(unit) {
            device.draw_primitive(part, &state);
        }
        if frame.config.edge_smoothing.uses_overlay() {
            aa::arrow_outline(device, ctx, unit);
        }
    });
    ctx.set_depth_test(true);
}
