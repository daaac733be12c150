//! Point number labels along the near and far rails.

use glam::Vec3;

use crate::renderer::aa::{self, THIN_LINE};
use crate::renderer::context::RenderContext;
use crate::renderer::device::{FontKind, RenderDevice, TextRequest, TextStyle};
use crate::renderer::graph::frame::FrameInputs;

/// Label shown beside `point` (1..=24). Numbering flips to the other side's
/// point of view when `swap` is set.
#[must_use]
pub fn label_for(point: usize, swap: bool) -> usize {
    if swap {
        25 - point
    } else {
        point
    }
}

/// Rail position of the label for `point`.
fn label_position(frame: &FrameInputs<'_>, point: usize) -> Vec3 {
    let layout = frame.layout;
    let y = if point <= 12 {
        layout.edge_height / 2.0
    } else {
        layout.total_height() - layout.edge_height / 2.0
    };
    Vec3::new(
        layout.point_center_x(point),
        y,
        layout.base_depth + layout.edge_depth + layout.lift_off,
    )
}

/// Draws all 24 labels in `style`. Depth testing is off: the labels sit on
/// top of the rail and testing would only alias them.
pub fn draw_labels(
    device: &mut dyn RenderDevice,
    ctx: &mut RenderContext,
    frame: &FrameInputs<'_>,
    style: TextStyle,
) {
    let swap = frame.board.turn == -1 && frame.config.dynamic_labels;
    ctx.with_state(|ctx| {
        ctx.set_depth_test(false);
        ctx.set_material(&frame.config.point_number_material);
        for point in 1..=24 {
            let request = TextRequest::new(
                FontKind::PointNumbers,
                label_for(point, swap).to_string(),
                1.0,
                style,
            );
            ctx.with_matrix(|ctx| {
                ctx.translate(label_position(frame, point));
                device.draw_text(&request, &ctx.draw_state());
            });
        }
    });
}

pub fn run(device: &mut dyn RenderDevice, ctx: &mut RenderContext, frame: &FrameInputs<'_>) {
    draw_labels(device, ctx, frame, TextStyle::Solid);
    if frame.config.edge_smoothing.uses_overlay() {
        aa::with_aa(ctx, THIN_LINE, true, |ctx| {
            draw_labels(device, ctx, frame, TextStyle::Outline);
        });
    }
}
