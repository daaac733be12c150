//! Scene Rendering Tests
//!
//! Tests for:
//! - Pass order and pass activation
//! - Back-faces-first drawing of translucent checkers
//! - Checker, drag-target and label submissions
//! - Pipeline state left behind by a frame

use board3d::renderer::context::{BlendFunc, CullFace, PolygonMode, RenderContext, Viewport};
use board3d::renderer::device::{FontKind, ModelKind, TextStyle};
use board3d::renderer::graph::{FrameInputs, ScenePass, SceneRenderer};
use board3d::renderer::recorder::{Command, CommandRecorder};
use board3d::resources::config::{EdgeSmoothing, RenderConfig};
use board3d::resources::material::Material;
use board3d::scene::state::MovingPiece;
use board3d::scene::{BoardLayout, BoardState, SceneState};
use glam::Vec3;

const VIEWPORT: Viewport = Viewport::sized(800, 600);

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn render_with(
    board: &BoardState,
    scene: &SceneState,
    config: &RenderConfig,
) -> (CommandRecorder, RenderContext) {
    init_logger();
    let layout = BoardLayout::default();
    let mut device = CommandRecorder::new();
    let mut ctx = RenderContext::new(VIEWPORT);
    let frame = FrameInputs::new(board, scene, config, &layout);
    SceneRenderer::new().render_frame(&mut device, &mut ctx, &frame, VIEWPORT);
    (device, ctx)
}

fn render(board: &BoardState, scene: &SceneState, config: &RenderConfig) -> CommandRecorder {
    render_with(board, scene, config).0
}

fn translucent_config() -> RenderConfig {
    let mut config = RenderConfig::default();
    config.checker_materials[1] = Material::translucent(0.9, 0.9, 0.9, 0.5);
    config
}

/// Kinds of the model submissions in `commands`, with their cull face.
fn piece_culls(commands: &[&Command]) -> Vec<CullFace> {
    commands
        .iter()
        .filter_map(|c| match c {
            Command::Model {
                kind: ModelKind::Piece,
                state,
                ..
            } => Some(state.pipeline.cull_face),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Pass Order Tests
// ============================================================================

#[test]
fn every_pass_runs_in_fixed_order() {
    let mut board = BoardState::starting_position();
    board.dice_showing = true;
    board.resigned = 1;
    board.drag_target_help = true;
    board.drag_targets[0] = Some(5);
    let scene = SceneState {
        moving: Some(MovingPiece {
            position: Vec3::new(10.0, 10.0, 5.0),
            roll_over: 0,
        }),
        ..SceneState::default()
    };

    let device = render(&board, &scene, &RenderConfig::default());
    let expected: Vec<&str> = ScenePass::ORDER.iter().map(|p| p.name()).collect();
    assert_eq!(device.top_level_groups(), expected);
}

#[test]
fn inactive_passes_are_skipped() {
    let mut board = BoardState::starting_position();
    board.crawford_game = true;
    let config = RenderConfig {
        labels: false,
        show_move_indicator: false,
        edge_smoothing: EdgeSmoothing::Multisample,
        ..RenderConfig::default()
    };

    let device = render(&board, &SceneState::default(), &config);
    assert_eq!(device.top_level_groups(), vec!["table", "checkers"]);
}

#[test]
fn table_clears_depth_before_anything_else() {
    let device = render(&BoardState::default(), &SceneState::default(), &RenderConfig::default());
    let table = device.group("table");
    assert!(matches!(table.first(), Some(Command::Clear(_))));
}

// ============================================================================
// Checker Tests
// ============================================================================

#[test]
fn single_opaque_checker_is_drawn_once() {
    let mut board = BoardState::default();
    board.points[3] = 1;

    let device = render(&board, &SceneState::default(), &RenderConfig::default());
    assert_eq!(device.count_models(ModelKind::Piece), 1);
    assert_eq!(device.back_face_draws(ModelKind::Piece), 0);
}

#[test]
fn starting_position_draws_thirty_checkers() {
    let device = render(
        &BoardState::starting_position(),
        &SceneState::default(),
        &RenderConfig::default(),
    );
    assert_eq!(device.count_models(ModelKind::Piece), 30);
}

#[test]
fn translucent_checkers_draw_back_faces_first() {
    let board = BoardState::starting_position();
    let device = render(&board, &SceneState::default(), &translucent_config());

    let culls = piece_culls(&device.group("checkers"));
    assert_eq!(culls.len(), 60);
    assert!(culls[..30].iter().all(|c| *c == CullFace::Front));
    assert!(culls[30..].iter().all(|c| *c == CullFace::Back));
}

#[test]
fn translucent_special_checkers_draw_back_faces_first() {
    let mut board = BoardState::default();
    board.drag_point = Some(6);
    let scene = SceneState {
        moving: Some(MovingPiece {
            position: Vec3::new(20.0, 20.0, 6.0),
            roll_over: 1,
        }),
        ..SceneState::default()
    };

    let device = render(&board, &scene, &translucent_config());
    let culls = piece_culls(&device.group("special-checkers"));
    assert_eq!(
        culls,
        vec![CullFace::Front, CullFace::Front, CullFace::Back, CullFace::Back]
    );
}

#[test]
fn opaque_special_checkers_are_single_pass() {
    let mut board = BoardState::default();
    board.drag_point = Some(6);

    let device = render(&board, &SceneState::default(), &RenderConfig::default());
    assert_eq!(piece_culls(&device.group("special-checkers")), vec![CullFace::Back]);
}

#[test]
fn drag_targets_are_wireframe_checkers() {
    let mut board = BoardState::starting_position();
    board.drag_target_help = true;
    board.drag_targets = [Some(6), None, Some(9), None];

    let device = render(&board, &SceneState::default(), &RenderConfig::default());
    let targets = device.group("drag-targets");
    let wire: Vec<_> = targets
        .iter()
        .filter_map(|c| c.state())
        .filter(|s| s.pipeline.polygon_mode == PolygonMode::Line)
        .collect();
    assert_eq!(wire.len(), 2);
    // Point 6 holds five checkers; the silhouette sits on the sixth slot.
    let view = SceneState::default().view.view_matrix();
    let sixth = view.transform_point3(BoardLayout::default().piece_position(6, 6));
    assert!(wire.iter().any(|s| (s.eye_origin() - sixth).length() < 1e-3));
}

#[test]
fn tray_drag_target_stands_on_edge_like_borne_off_checkers() {
    let mut board = BoardState::default();
    board.drag_target_help = true;
    board.drag_targets[0] = Some(26);

    let device = render(&board, &SceneState::default(), &RenderConfig::default());
    let wire: Vec<_> = device
        .group("drag-targets")
        .into_iter()
        .filter_map(|c| c.state())
        .filter(|s| s.pipeline.polygon_mode == PolygonMode::Line)
        .collect();
    assert_eq!(wire.len(), 1);

    let view = SceneState::default().view.view_matrix();
    let to_board = view.inverse() * wire[0].model_view;
    let origin = to_board.transform_point3(Vec3::ZERO);
    let axis = to_board.transform_vector3(Vec3::Z).normalize();
    assert!((origin - BoardLayout::default().piece_position(26, 1)).length() < 1e-3);
    // The checker's own axis lies along the tray.
    assert!((axis - Vec3::Y).length() < 1e-4, "axis {axis}");
}

// ============================================================================
// Label and Dice Tests
// ============================================================================

#[test]
fn labels_get_an_outline_pass_only_in_overlay_mode() {
    let board = BoardState::default();
    let overlay = render(&board, &SceneState::default(), &RenderConfig::default());
    let labels: Vec<_> = overlay
        .texts()
        .into_iter()
        .filter(|t| t.font == FontKind::PointNumbers)
        .collect();
    let count = |style| labels.iter().filter(|t| t.style == style).count();
    assert_eq!(count(TextStyle::Solid), 24);
    assert_eq!(count(TextStyle::Outline), 24);

    let config = RenderConfig {
        edge_smoothing: EdgeSmoothing::Multisample,
        ..RenderConfig::default()
    };
    let msaa = render(&board, &SceneState::default(), &config);
    assert!(msaa.texts().iter().all(|t| t.style == TextStyle::Solid));
}

#[test]
fn dice_dots_are_masked_then_filled() {
    let mut board = BoardState::default();
    board.dice_showing = true;
    board.dice = [3, 5];

    let device = render(&board, &SceneState::default(), &RenderConfig::default());
    let masked = device.primitives_with_blend(BlendFunc::MASK).len();
    let filled = device.primitives_with_blend(BlendFunc::ADDITIVE).len();
    assert!(masked > 0);
    assert_eq!(masked, filled);
}

// ============================================================================
// State Hygiene Tests
// ============================================================================

#[test]
fn frame_leaves_default_depth_and_culling() {
    let mut board = BoardState::starting_position();
    board.dice_showing = true;
    board.resigned = -2;

    let (_, ctx) = render_with(&board, &SceneState::default(), &translucent_config());
    assert_eq!(ctx.matrix_depth(), 0);
    assert!(ctx.state().depth_test);
    assert_eq!(ctx.state().cull_face, CullFace::Back);
    assert!(!ctx.state().stencil);
    assert_eq!(ctx.state().polygon_mode, PolygonMode::Fill);
}

#[test]
fn inactive_game_grays_the_table() {
    let mut board = BoardState::default();
    board.game_active = false;
    let config = RenderConfig::default();

    let device = render(&board, &SceneState::default(), &config);
    let tables = device.group("table");
    let box_material = tables.iter().find_map(|c| match c {
        Command::Model {
            kind: ModelKind::Table,
            material,
            ..
        } => *material,
        _ => None,
    });
    assert_eq!(box_material, Some(config.box_material.grayed()));
}
