//! Anti-aliased edge overlays.
//!
//! Filled geometry is drawn first; these passes then trace its silhouette
//! with smoothed, blended lines to soften the stair-stepping. They only run
//! when edge smoothing is done by overlay (see
//! [`EdgeSmoothing`](crate::resources::config::EdgeSmoothing)).

use std::f32::consts::TAU;

use glam::{Vec3, Vec4};

use crate::renderer::context::RenderContext;
use crate::renderer::device::{Primitive, RenderDevice, Topology, Vertex};
use crate::scene::layout::BoardLayout;

/// Line width used for outlines traced over flat geometry.
pub const THIN_LINE: f32 = 0.5;
/// Line width used for silhouette edges.
pub const EDGE_LINE: f32 = 1.0;

const OUTLINE_BLACK: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);

/// Enables line smoothing and blending at `width`.
pub fn start_aa(ctx: &mut RenderContext, width: f32) {
    ctx.set_line_width(width);
    ctx.set_line_smooth(true);
    ctx.set_blend(true);
}

pub fn end_aa(ctx: &mut RenderContext) {
    ctx.set_line_smooth(false);
    ctx.set_blend(false);
}

/// Runs `f` with smoothing on and, if `keep_depth` is false, depth writes
/// off. All state is put back afterwards, including a blend mode that was
/// already enabled on entry.
pub fn with_aa<R>(
    ctx: &mut RenderContext,
    width: f32,
    keep_depth: bool,
    f: impl FnOnce(&mut RenderContext) -> R,
) -> R {
    ctx.with_state(|ctx| {
        start_aa(ctx, width);
        if !keep_depth {
            ctx.set_depth_write(false);
        }
        f(ctx)
    })
}

/// Closed ring of `segments` vertices at height `z`, normals pointing out.
#[must_use]
pub fn circle_loop(radius: f32, z: f32, segments: u32) -> Primitive {
    let segments = segments.max(3);
    let step = TAU / segments as f32;
    let mut ring = Primitive::new(Topology::LineLoop);
    for i in 0..segments {
        let angle = step * i as f32;
        let (s, c) = angle.sin_cos();
        ring.push(
            Vertex::new(Vec3::new(s * radius, c * radius, z)).with_normal(Vec3::new(s, c, 0.0)),
        );
    }
    ring
}

/// Silhouette of the frame rails, bar and bear-off tray walls.
#[must_use]
pub fn tidy_edge_lines(layout: &BoardLayout, rounded_edges: bool) -> Primitive {
    let l = layout;
    let tw = l.tray_width();
    let bw = l.board_width();
    let ew = l.edge_width;
    let eh = l.edge_height;
    let th = l.total_height();
    let tot_w = l.total_width();
    let tray_h = l.tray_height();
    let gap = l.mid_side_gap_height;
    let lift = l.lift_off;

    let mut segments: Vec<(Vec3, Vec3)> = Vec::with_capacity(16);
    let mut seg = |x0: f32, y0: f32, x1: f32, y1: f32, z: f32| {
        segments.push((Vec3::new(x0, y0, z), Vec3::new(x1, y1, z)));
    };

    if rounded_edges {
        let fillet = l.board_fillet();
        let z = l.base_depth + l.edge_depth - fillet;
        // Bar.
        seg(tw + bw, eh, tw + bw, th - eh, z);
        seg(tw + bw + l.bar_width, eh, tw + bw + l.bar_width, th - eh, z);
        // Left tray.
        seg(0.0, fillet, 0.0, th - fillet, z);
        seg(tw - ew, eh, tw - ew, tray_h, z);
        seg(tw - ew, tray_h + gap, tw - ew, th - eh, z);
        // Right tray.
        seg(tot_w, fillet, tot_w, th - fillet, z);
        seg(tot_w - tw + ew, eh, tot_w - tw + ew, tray_h, z);
        seg(tot_w - tw + ew, tray_h + gap, tot_w - tw + ew, th - eh, z);
    } else {
        let z = l.base_depth + l.edge_depth;
        seg(tw + bw, eh, tw + bw, th - eh, z);
        seg(tw + bw + l.bar_width, eh, tw + bw + l.bar_width, th - eh, z);

        seg(0.0, 0.0, 0.0, th, z);
        for x in [ew, tw - ew] {
            seg(x, eh, x, tray_h, z);
            seg(x, tray_h + gap, x, th - eh, z);
        }
        seg(tw, eh, tw, th - eh, z);

        seg(tot_w, 0.0, tot_w, th, z);
        for x in [tot_w - ew, tot_w - tw + ew] {
            seg(x, eh, x, tray_h, z);
            seg(x, tray_h + gap, x, th - eh, z);
        }
        seg(tot_w - tw, eh, tot_w - tw, th - eh, z);
    }

    // Inner side edges, lifted clear of the playing surface.
    let z = l.base_depth + lift;
    for x in [ew + lift, tw + lift, tot_w - ew + lift, tot_w - tw + lift] {
        seg(x, eh, x, th - eh, z);
    }

    Primitive::from_points(
        Topology::Lines,
        segments.into_iter().flat_map(|(a, b)| [a, b]),
    )
}

/// Traces the board frame edges with the box material.
pub fn tidy_edges(
    device: &mut dyn RenderDevice,
    ctx: &mut RenderContext,
    layout: &BoardLayout,
    rounded_edges: bool,
) {
    let lines = tidy_edge_lines(layout, rounded_edges);
    with_aa(ctx, EDGE_LINE, false, |ctx| {
        device.draw_primitive(&lines, &ctx.draw_state());
    });
}

/// Outline of the move indicator arrow, in the arrow's local frame.
#[must_use]
pub fn arrow_outline_loop(unit: f32) -> Primitive {
    Primitive::from_points(
        Topology::LineLoop,
        [
            (-unit * 2.0, -unit),
            (-unit * 2.0, unit),
            (0.0, unit),
            (0.0, unit * 2.0),
            (unit * 2.0, 0.0),
            (0.0, -unit * 2.0),
            (0.0, -unit),
        ]
        .into_iter()
        .map(|(x, y)| Vec3::new(x, y, 0.0)),
    )
}

/// Black smoothed outline around the move indicator arrow.
pub fn arrow_outline(device: &mut dyn RenderDevice, ctx: &mut RenderContext, unit: f32) {
    let outline = arrow_outline_loop(unit);
    with_aa(ctx, THIN_LINE, true, |ctx| {
        ctx.set_color(OUTLINE_BLACK);
        device.draw_primitive(&outline, &ctx.draw_state());
    });
}

/// Top and bottom rim of a checker. Texturing is suspended while the rims
/// are drawn.
pub fn piece_outline(
    device: &mut dyn RenderDevice,
    ctx: &mut RenderContext,
    layout: &BoardLayout,
    rounded: bool,
    segments: u32,
) {
    let radius = layout.piece_hole / 2.0;
    let disc_radius = radius * 0.8;
    let lip = if rounded { radius - disc_radius } else { 0.0 };

    let top = circle_loop(radius, layout.piece_depth - lip, segments);
    let bottom = circle_loop(radius, lip, segments);
    with_aa(ctx, EDGE_LINE, false, |ctx| {
        ctx.set_texture(false);
        let state = ctx.draw_state();
        device.draw_primitive(&top, &state);
        device.draw_primitive(&bottom, &state);
    });
}

/// Face edges of a die of edge length `size`, one ring per face.
pub fn die_outline(
    device: &mut dyn RenderDevice,
    ctx: &mut RenderContext,
    size: f32,
    lift_off: f32,
    segments: u32,
) {
    let radius = size / 2.0;
    let ring = circle_loop(radius, radius + lift_off, segments);
    with_aa(ctx, EDGE_LINE, false, |ctx| {
        ctx.with_matrix(|ctx| {
            for face in 0..6 {
                device.draw_primitive(&ring, &ctx.draw_state());
                if face % 2 == 0 {
                    ctx.rotate_deg(-90.0, Vec3::Y);
                } else {
                    ctx.rotate_deg(90.0, Vec3::X);
                }
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_has_seven_corners() {
        assert_eq!(arrow_outline_loop(1.0).len(), 7);
    }

    #[test]
    fn tidy_edges_are_line_pairs() {
        let layout = BoardLayout::default();
        for rounded in [false, true] {
            let lines = tidy_edge_lines(&layout, rounded);
            assert_eq!(lines.topology, Topology::Lines);
            assert_eq!(lines.len() % 2, 0);
        }
    }

    #[test]
    fn with_aa_preserves_enabled_blend() {
        let mut ctx = RenderContext::default();
        ctx.set_blend(true);
        with_aa(&mut ctx, EDGE_LINE, false, end_aa);
        assert!(ctx.state().blend);
        assert!(ctx.state().depth_write);
    }
}
