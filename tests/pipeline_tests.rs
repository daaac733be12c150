//! Pipeline Translation Tests
//!
//! Tests for:
//! - Primitive topology lowering
//! - Vertex layout
//! - Distinct pipelines needed to replay a frame
//! - Scene state helpers

use glam::Vec3;

use board3d::renderer::context::{BlendFunc, CullFace, PipelineState, RenderContext, Viewport};
use board3d::renderer::device::{Primitive, Topology, Vertex};
use board3d::renderer::graph::{FrameInputs, SceneRenderer};
use board3d::renderer::pipeline_key::PipelineStateKey;
use board3d::renderer::recorder::CommandRecorder;
use board3d::resources::config::RenderConfig;
use board3d::scene::{BoardLayout, BoardState, SceneState};

const EPSILON: f32 = 1e-6;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

// ============================================================================
// Topology Tests
// ============================================================================

#[test]
fn fan_lowers_to_triangle_list() {
    let fan = Primitive::from_points(
        Topology::TriangleFan,
        [Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y],
    );
    let list = fan.to_list();
    assert_eq!(list.topology, Topology::Triangles);
    assert_eq!(list.len(), 6);
    assert_eq!(list.vertices[3].pos(), Vec3::ZERO);
}

#[test]
fn loop_is_closed_into_strip() {
    let ring = Primitive::from_points(Topology::LineLoop, [Vec3::ZERO, Vec3::X, Vec3::Y]);
    let strip = ring.to_list();
    assert_eq!(strip.topology, Topology::LineStrip);
    assert_eq!(strip.len(), 4);
    assert_eq!(strip.vertices[3], strip.vertices[0]);
}

#[test]
fn vertices_cast_to_bytes() {
    let vertices = [Vertex::new(Vec3::new(1.0, 2.0, 3.0)), Vertex::new(Vec3::ONE)];
    let bytes: &[u8] = bytemuck::cast_slice(&vertices);
    assert_eq!(bytes.len(), std::mem::size_of::<Vertex>() * 2);
    let floats: &[f32] = bytemuck::cast_slice(&vertices);
    assert!(approx(floats[0], 1.0));
    assert!(approx(floats[2], 3.0));
}

// ============================================================================
// Pipeline Tests
// ============================================================================

#[test]
fn primitive_state_carries_cull_and_topology() {
    let state = PipelineState {
        cull_face: CullFace::Front,
        ..PipelineState::default()
    };
    let primitive = PipelineStateKey::new(&state, Topology::TriangleStrip).primitive_state();
    assert_eq!(primitive.topology, wgpu::PrimitiveTopology::TriangleStrip);
    assert_eq!(primitive.cull_mode, Some(wgpu::Face::Front));
}

#[test]
fn dice_compositing_needs_its_own_pipelines() {
    let layout = BoardLayout::default();
    let config = RenderConfig::default();
    let scene = SceneState::default();
    let viewport = Viewport::sized(640, 480);

    let render = |board: &BoardState| {
        let mut device = CommandRecorder::new();
        let mut ctx = RenderContext::new(viewport);
        let frame = FrameInputs::new(board, &scene, &config, &layout);
        SceneRenderer::new().render_frame(&mut device, &mut ctx, &frame, viewport);
        device
    };

    let without = render(&BoardState::starting_position());
    let mut board = BoardState::starting_position();
    board.dice_showing = true;
    let with = render(&board);

    assert!(!with.primitives_with_blend(BlendFunc::MASK).is_empty());
    // Mask and additive fills are at least two pipelines the rest of the
    // frame never uses.
    assert!(with.distinct_pipelines() >= without.distinct_pipelines() + 2);
}

// ============================================================================
// Scene State Tests
// ============================================================================

#[test]
fn flag_wave_wraps() {
    let mut scene = SceneState::default();
    scene.advance_flag(0.75);
    scene.advance_flag(0.5);
    assert!(approx(scene.flag_wave, 0.25));
}

#[test]
fn shadows_are_flagged_for_update() {
    let mut scene = SceneState {
        shadows_out_of_date: false,
        ..SceneState::default()
    };
    scene.update_shadows();
    assert!(scene.shadows_out_of_date);
}
