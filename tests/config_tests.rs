//! Configuration and State Tests
//!
//! Tests for:
//! - RenderConfig / BoardLayout serialization
//! - Material helpers
//! - Board state validation

use board3d::errors::Board3dError;
use board3d::resources::config::{EdgeSmoothing, PieceTextureType, RenderConfig};
use board3d::resources::material::{Material, TextureRef};
use board3d::scene::{BoardLayout, BoardState};

const EPSILON: f32 = 1e-6;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

// ============================================================================
// Serialization Tests
// ============================================================================

#[test]
fn render_config_survives_json() -> anyhow::Result<()> {
    let mut config = RenderConfig::default();
    config.checker_materials[0] =
        Material::translucent(0.2, 0.3, 0.4, 0.6).with_texture(TextureRef {
            id: 7,
            width: 256,
            height: 256,
        });
    config.edge_smoothing = EdgeSmoothing::Multisample;

    let json = serde_json::to_string(&config)?;
    let back: RenderConfig = serde_json::from_str(&json)?;
    assert_eq!(back, config);
    Ok(())
}

#[test]
fn partial_config_falls_back_to_defaults() -> anyhow::Result<()> {
    let config: RenderConfig =
        serde_json::from_str(r#"{ "labels": false, "curve_accuracy": 12 }"#)?;
    assert!(!config.labels);
    assert_eq!(config.curve_accuracy, 12);
    assert_eq!(config.box_material, RenderConfig::default().box_material);
    Ok(())
}

#[test]
fn layout_survives_json() -> anyhow::Result<()> {
    let layout = BoardLayout {
        piece_hole: 3.5,
        ..BoardLayout::default()
    };
    let back: BoardLayout = serde_json::from_str(&serde_json::to_string(&layout)?)?;
    assert_eq!(back, layout);
    assert!(approx(back.board_width(), 21.0));
    Ok(())
}

// ============================================================================
// Material Tests
// ============================================================================

#[test]
fn grayed_material_keeps_alpha() {
    let gray = Material::translucent(1.0, 0.0, 0.0, 0.4).grayed();
    assert!(approx(gray.color.x, gray.color.y));
    assert!(approx(gray.color.y, gray.color.z));
    assert!(approx(gray.color.w, 0.4));
    assert!(gray.alpha_blend);
}

#[test]
fn top_texture_separates_checker_top() {
    let mut config = RenderConfig::default();
    assert!(!config.separate_top());

    config.checker_materials[0] = config.checker_materials[0].with_texture(TextureRef {
        id: 1,
        width: 128,
        height: 128,
    });
    config.piece_texture_type = PieceTextureType::Top;
    assert!(config.separate_top());
}

#[test]
fn any_translucent_side_needs_two_passes() {
    let mut config = RenderConfig::default();
    assert!(!config.transparent_pieces());
    config.checker_materials[1] = Material::translucent(1.0, 1.0, 1.0, 0.5);
    assert!(config.transparent_pieces());
}

// ============================================================================
// Board State Tests
// ============================================================================

#[test]
fn starting_position_is_valid() {
    let board = BoardState::starting_position();
    assert!(board.validate().is_ok());
    assert_eq!(board.points.iter().filter(|c| **c > 0).sum::<i32>(), 15);
    assert_eq!(board.points.iter().filter(|c| **c < 0).sum::<i32>(), -15);
}

#[test]
fn overfull_point_is_rejected() {
    let mut board = BoardState::default();
    board.points[9] = -16;
    assert_eq!(
        board.validate(),
        Err(Board3dError::PointCountOutOfRange { point: 9, count: -16 })
    );
}

#[test]
fn cube_is_hidden_in_the_crawford_game() {
    let mut board = BoardState::default();
    assert!(board.shows_cube());
    board.crawford_game = true;
    assert!(!board.shows_cube());
}
