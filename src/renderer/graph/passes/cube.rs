//! Doubling cube.
//!
//! The cube model carries the six numerals 2..64 on its faces; the face
//! showing the current value is turned up, with the value repeated as a
//! numeral overlay on top.

use glam::Vec3;

use crate::renderer::context::RenderContext;
use crate::renderer::device::{FontKind, ModelKind, RenderDevice, TextRequest, TextStyle};
use crate::renderer::graph::frame::FrameInputs;
use crate::renderer::graph::passes::dice::orient_die;

/// Face (0..6, as `log2` of its numeral) turned up for a cube at `value`
/// owned by `owner`. A centred cube shows 64.
#[must_use]
pub fn cube_face(value: u32, owner: i32) -> u8 {
    if owner == 0 || value <= 1 {
        6
    } else {
        value.ilog2().min(6) as u8
    }
}

/// Numeral for the face index from [`cube_face`].
#[must_use]
pub fn cube_numeral(face: u8) -> String {
    (1u32 << face.min(6)).to_string()
}

pub fn run(device: &mut dyn RenderDevice, ctx: &mut RenderContext, frame: &FrameInputs<'_>) {
    let board = frame.board;
    let config = frame.config;
    let layout = frame.layout;
    let face = cube_face(board.cube_value, board.cube_owner);

    ctx.with_matrix(|ctx| {
        ctx.translate(layout.cube_position(board.cube_owner));
        ctx.with_matrix(|ctx| {
            // Faces 1..=6 (2..64) reuse the die orientations of values 1..=6.
            orient_die(ctx, face.max(1));
            ctx.set_material(&config.cube_material);
            device.draw_model(
                ModelKind::DoubleCube,
                Some(&config.cube_material),
                &ctx.draw_state(),
            );
        });

        ctx.translate(Vec3::new(0.0, 0.0, layout.doublecube_size() / 2.0 + layout.lift_off));
        ctx.set_material(&config.cube_number_material);
        let request = TextRequest::new(FontKind::Cube, cube_numeral(face), 1.0, TextStyle::Solid);
        device.draw_text(&request, &ctx.draw_state());
    });
}
