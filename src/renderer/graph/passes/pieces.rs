//! Checker passes.
//!
//! Static checkers are drawn by point occupancy, all of one side's checkers
//! under that side's material. Translucent checker materials need the far
//! half of every checker drawn first (front faces culled) so it shows
//! through the near half drawn afterwards. The same two-pass rule applies to
//! the special checkers: the one being dragged and the one in flight.

use glam::{Vec3, Vec4};

use crate::renderer::aa;
use crate::renderer::context::{CullFace, PolygonMode, RenderContext};
use crate::renderer::device::{ModelKind, RenderDevice};
use crate::renderer::graph::frame::FrameInputs;
use crate::scene::layout::BoardLayout;

/// Colour of the drag-target silhouettes.
const HIGHLIGHT_GREEN: Vec4 = Vec4::new(0.0, 1.0, 0.0, 0.0);

/// Draws a checker at the model-view origin with the bound material.
///
/// With a top-only checker texture the top is drawn textured and the body
/// plain.
pub fn render_piece(device: &mut dyn RenderDevice, ctx: &mut RenderContext, separate_top: bool) {
    let material = ctx.material().copied();
    let body = if separate_top {
        ctx.set_texture(true);
        device.draw_model(ModelKind::PieceTop, material.as_ref(), &ctx.draw_state());
        ctx.set_texture(false);
        None
    } else {
        material
    };
    device.draw_model(ModelKind::Piece, body.as_ref(), &ctx.draw_state());
}

/// Moves the model-view to checker number `pos` (1-based) of `point`.
pub fn place_piece(ctx: &mut RenderContext, layout: &BoardLayout, point: usize, pos: usize) {
    ctx.translate(layout.piece_position(point, pos));
    // Borne-off checkers stand on edge in the trays.
    match point {
        26 => ctx.rotate_deg(-90.0, Vec3::X),
        27 => ctx.rotate_deg(90.0, Vec3::X),
        _ => {}
    }
}

/// Draws checker number `pos` (1-based) of `point`.
pub fn draw_piece(
    device: &mut dyn RenderDevice,
    ctx: &mut RenderContext,
    frame: &FrameInputs<'_>,
    point: usize,
    pos: usize,
) {
    ctx.with_matrix(|ctx| {
        place_piece(ctx, frame.layout, point, pos);
        finish_piece(device, ctx, frame);
    });
}

/// Checker body plus, when smoothing by overlay, its rim outlines.
fn finish_piece(device: &mut dyn RenderDevice, ctx: &mut RenderContext, frame: &FrameInputs<'_>) {
    let config = frame.config;
    render_piece(device, ctx, config.separate_top());
    if config.edge_smoothing.uses_overlay() && !config.quick_draw {
        aa::piece_outline(
            device,
            ctx,
            frame.layout,
            config.rounded_pieces(),
            config.curve_segments(),
        );
    }
}

/// Every checker on the board: the negative side first, then the positive.
pub fn draw_pieces(
    device: &mut dyn RenderDevice,
    ctx: &mut RenderContext,
    frame: &FrameInputs<'_>,
) {
    for (material, negative) in frame.config.checker_materials.iter().zip([true, false]) {
        ctx.set_material(material);
        for (point, &count) in frame.board.points.iter().enumerate() {
            if (negative && count < 0) || (!negative && count > 0) {
                for pos in 1..=count.unsigned_abs() as usize {
                    draw_piece(device, ctx, frame, point, pos);
                }
            }
        }
    }
}

/// Runs `draw` once, or for translucent checkers once with front faces
/// culled and then again normally, blending throughout.
fn two_pass(
    ctx: &mut RenderContext,
    transparent: bool,
    mut draw: impl FnMut(&mut RenderContext),
) {
    if transparent {
        ctx.set_cull_face(CullFace::Front);
        ctx.set_blend(true);
        draw(ctx);
        ctx.set_cull_face(CullFace::Back);
        ctx.set_blend(true);
    }
    draw(ctx);
    if transparent {
        ctx.set_blend(false);
    }
}

/// Static checkers.
pub fn run_checkers(
    device: &mut dyn RenderDevice,
    ctx: &mut RenderContext,
    frame: &FrameInputs<'_>,
) {
    two_pass(ctx, frame.config.transparent_pieces(), |ctx| {
        draw_pieces(device, ctx, frame);
    });
}

/// Wireframe checkers on the points a dragged checker may land on.
pub fn run_drag_targets(
    device: &mut dyn RenderDevice,
    ctx: &mut RenderContext,
    frame: &FrameInputs<'_>,
) {
    let config = frame.config;
    ctx.with_state(|ctx| {
        ctx.set_polygon_mode(PolygonMode::Line);
        ctx.set_color(HIGHLIGHT_GREEN);
        for target in frame.board.active_drag_targets() {
            if config.checker_materials[0].texture.is_some() {
                ctx.set_texture(false);
            }
            let pos = frame.board.checker_count(target) + 1;
            ctx.with_matrix(|ctx| {
                place_piece(ctx, frame.layout, target, pos);
                render_piece(device, ctx, config.separate_top());
            });
        }
    });
}

/// The dragged checker and the checker in flight.
fn render_special_pieces(
    device: &mut dyn RenderDevice,
    ctx: &mut RenderContext,
    frame: &FrameInputs<'_>,
) {
    let scene = frame.scene;
    let config = frame.config;

    if frame.board.drag_point.is_some() {
        ctx.with_matrix(|ctx| {
            ctx.translate(scene.drag_pos);
            ctx.rotate_deg(scene.moving_piece_rotation, Vec3::Z);
            let side = usize::from(frame.board.drag_colour == 1);
            ctx.set_material(&config.checker_materials[side]);
            finish_piece(device, ctx, frame);
        });
    }

    if let Some(moving) = scene.moving {
        ctx.with_matrix(|ctx| {
            ctx.translate(moving.position);
            ctx.rotate_deg(scene.moving_piece_rotation, Vec3::Z);
            if moving.roll_over > 0 {
                let turns = f32::from(moving.roll_over) * frame.board.turn as f32;
                ctx.rotate_deg(-90.0 * turns, Vec3::X);
            }
            let side = usize::from(frame.board.turn == 1);
            ctx.set_material(&config.checker_materials[side]);
            finish_piece(device, ctx, frame);
        });
    }
}

/// Animated and dragged checkers, drawn after the dice.
pub fn run_special_checkers(
    device: &mut dyn RenderDevice,
    ctx: &mut RenderContext,
    frame: &FrameInputs<'_>,
) {
    two_pass(ctx, frame.config.transparent_pieces(), |ctx| {
        render_special_pieces(device, ctx, frame);
    });
}
