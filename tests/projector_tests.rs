//! Projector Tests
//!
//! Tests for:
//! - Drag position determinism and plane height
//! - Degenerate transforms
//! - Background plane sizing

use glam::{Mat4, Vec2, Vec3, Vec4};

use board3d::errors::Board3dError;
use board3d::renderer::context::{RenderContext, Viewport};
use board3d::renderer::projector::Projector;
use board3d::scene::camera::ViewVolume;
use board3d::scene::BoardLayout;

const EPSILON: f32 = 1e-3;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn live_projector(view: &ViewVolume, viewport: Viewport) -> Projector {
    let mut ctx = RenderContext::new(viewport);
    view.install(&mut ctx, viewport);
    Projector::from_context(&ctx)
}

// ============================================================================
// Drag Position Tests
// ============================================================================

#[test]
fn drag_position_is_deterministic() {
    let layout = BoardLayout::default();
    let projector = live_projector(&ViewVolume::default(), Viewport::sized(800, 600));

    let a = projector.piece_drag_pos(&layout, 312.0, 207.0);
    let b = projector.piece_drag_pos(&layout, 312.0, 207.0);
    assert_eq!(a, b);
}

#[test]
fn drag_position_lies_on_the_drag_plane() {
    let layout = BoardLayout::default();
    let projector = live_projector(&ViewVolume::default(), Viewport::sized(800, 600));

    for (x, y) in [(400.0, 300.0), (10.0, 590.0), (700.0, 40.0)] {
        let pos = projector.piece_drag_pos(&layout, x, y);
        assert!(
            (pos.z - layout.piece_drag_depth()).abs() < 1e-2,
            "({x}, {y}) -> {pos}"
        );
    }
}

#[test]
fn plan_view_maps_pixels_linearly() {
    let layout = BoardLayout::default();
    let view = ViewVolume::plan(layout.total_width(), layout.total_height());
    let projector = live_projector(&view, Viewport::sized(480, 390));

    let centre = projector.projected_pos(240.0, 195.0, 0.0).unwrap();
    assert!(approx(centre.x, 24.0));
    assert!(approx(centre.y, 19.5));

    let corner = projector.projected_pos(480.0, 390.0, 0.0).unwrap();
    assert!(approx(corner.x, 48.0));
    assert!(approx(corner.y, 39.0));
}

// ============================================================================
// Degenerate Transform Tests
// ============================================================================

#[test]
fn singular_transform_yields_zero() {
    let layout = BoardLayout::default();
    let projector = Projector::new(Mat4::ZERO, Mat4::IDENTITY, Viewport::sized(800, 600));

    assert!(matches!(
        projector.projected_pos(100.0, 100.0, 1.0),
        Err(Board3dError::Unprojection(_))
    ));
    assert_eq!(projector.piece_drag_pos(&layout, 100.0, 100.0), Vec3::ZERO);
}

#[test]
fn ray_parallel_to_plane_yields_zero() {
    // Swapping y and z turns every view ray sideways: its near and far
    // points share the same height.
    let view = Mat4::from_cols(Vec4::X, Vec4::Z, Vec4::Y, Vec4::W);
    let projector = Projector::new(view, Mat4::IDENTITY, Viewport::sized(100, 100));
    assert_eq!(projector.projected_pos_or_zero(50.0, 50.0, 2.0), Vec3::ZERO);
}

// ============================================================================
// Background Tests
// ============================================================================

#[test]
fn background_covers_plan_view() {
    let layout = BoardLayout::default();
    let view = ViewVolume::plan(layout.total_width(), layout.total_height());
    let projector = live_projector(&view, Viewport::sized(480, 390));

    let rect = projector.background_rect();
    assert!((rect.origin - Vec2::ZERO).length() < EPSILON);
    assert!((rect.size - Vec2::new(48.0, 39.0)).length() < EPSILON);
}
