//! Tiled Export Tests
//!
//! Tests for:
//! - Tile counts for exact and partial grids
//! - Seamless composition against a single-tile render
//! - Live view and buffering restored after export
//! - Cancellation between tiles

use glam::{Mat4, Vec4};
use image::RgbImage;

use board3d::errors::{Board3dError, Result};
use board3d::renderer::context::{DrawState, RenderContext, Viewport};
use board3d::renderer::device::{
    ClearFlags, ModelKind, PixelRect, Primitive, RenderDevice, TextRequest,
};
use board3d::renderer::recorder::CommandRecorder;
use board3d::renderer::tiles::{TileRenderer, Tiler, TILE_BORDER};
use board3d::resources::config::RenderConfig;
use board3d::resources::material::Material;
use board3d::scene::camera::ViewVolume;
use board3d::scene::{BoardLayout, BoardState, SceneState};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Device whose "rendered" pixels encode their own eye-space position under
/// the projection and viewport of the last draw. Two renders agree pixel for
/// pixel exactly when they cover the same part of the view volume.
struct EyeSpaceDevice {
    projection: Mat4,
    viewport: Viewport,
    half_extent: (f32, f32),
    tiles_read: usize,
}

impl EyeSpaceDevice {
    fn new(half_extent: (f32, f32)) -> Self {
        Self {
            projection: Mat4::IDENTITY,
            viewport: Viewport::default(),
            half_extent,
            tiles_read: 0,
        }
    }

    fn capture(&mut self, state: &DrawState) {
        self.projection = state.projection;
        self.viewport = state.viewport;
    }
}

fn shade(value: f32, half: f32) -> u8 {
    ((value + half) / (2.0 * half) * 255.0).round().clamp(0.0, 255.0) as u8
}

impl RenderDevice for EyeSpaceDevice {
    fn clear(&mut self, _flags: ClearFlags) {}

    fn draw_model(&mut self, _kind: ModelKind, _material: Option<&Material>, state: &DrawState) {
        self.capture(state);
    }

    fn draw_primitive(&mut self, _primitive: &Primitive, state: &DrawState) {
        self.capture(state);
    }

    fn draw_text(&mut self, _request: &TextRequest, state: &DrawState) {
        self.capture(state);
    }

    fn read_pixels(&mut self, rect: PixelRect, out: &mut [u8]) -> Result<()> {
        let inverse = self.projection.inverse();
        let vw = self.viewport.width as f32;
        let vh = self.viewport.height as f32;
        for r in 0..rect.height {
            for c in 0..rect.width {
                let px = (rect.x + c as i32) as f32 + 0.5;
                let py = (rect.y + r as i32) as f32 + 0.5;
                let ndc = Vec4::new(px / vw * 2.0 - 1.0, py / vh * 2.0 - 1.0, 0.0, 1.0);
                let eye = inverse * ndc;
                let i = ((r * rect.width + c) * 3) as usize;
                out[i] = shade(eye.x / eye.w, self.half_extent.0);
                out[i + 1] = shade(eye.y / eye.w, self.half_extent.1);
                out[i + 2] = 0;
            }
        }
        self.tiles_read += 1;
        Ok(())
    }
}

fn plan_scene() -> SceneState {
    let layout = BoardLayout::default();
    SceneState {
        view: ViewVolume::plan(layout.total_width(), layout.total_height()),
        ..SceneState::default()
    }
}

fn export(
    device: &mut dyn RenderDevice,
    scene: &mut SceneState,
    live: Viewport,
    image: &mut RgbImage,
) -> Result<usize> {
    init_logger();
    let mut ctx = RenderContext::new(live);
    TileRenderer::new().render_to_buffer(
        device,
        &mut ctx,
        &BoardState::starting_position(),
        scene,
        &RenderConfig::default(),
        &BoardLayout::default(),
        live,
        image,
    )
}

// ============================================================================
// Tile Count Tests
// ============================================================================

#[test]
fn image_of_one_tile_renders_once() {
    let inner = 100 - 2 * TILE_BORDER;
    let mut image = RgbImage::new(inner, inner);
    let mut device = CommandRecorder::new();
    let mut scene = SceneState::default();

    let tiles = export(&mut device, &mut scene, Viewport::sized(100, 100), &mut image).unwrap();
    assert_eq!(tiles, 1);
    assert_eq!(device.top_level_groups().iter().filter(|g| **g == "table").count(), 1);
}

#[test]
fn partial_tiles_are_counted() {
    let tiler = Tiler::new(100, 100, TILE_BORDER, 200, 120).unwrap();
    assert_eq!(tiler.columns(), 3);
    assert_eq!(tiler.rows(), 2);
    assert_eq!(tiler.tile_count(), 6);
}

// ============================================================================
// Composition Tests
// ============================================================================

#[test]
fn tiled_image_matches_single_tile_render() {
    let half_extent = (24.0, 19.5);

    // 2.5 effective tiles across and down.
    let mut tiled = RgbImage::new(200, 200);
    let mut device = EyeSpaceDevice::new(half_extent);
    let tiles =
        export(&mut device, &mut plan_scene(), Viewport::sized(100, 100), &mut tiled).unwrap();
    assert_eq!(tiles, 9);
    assert_eq!(device.tiles_read, 9);

    let mut whole = RgbImage::new(200, 200);
    let mut device = EyeSpaceDevice::new(half_extent);
    let tiles =
        export(&mut device, &mut plan_scene(), Viewport::sized(220, 220), &mut whole).unwrap();
    assert_eq!(tiles, 1);

    for (x, y, pixel) in tiled.enumerate_pixels() {
        let other = whole.get_pixel(x, y);
        for channel in 0..3 {
            let diff = (i16::from(pixel[channel]) - i16::from(other[channel])).abs();
            assert!(diff <= 1, "seam at ({x}, {y}): {pixel:?} vs {other:?}");
        }
    }
}

#[test]
fn image_rows_run_top_down() {
    let mut image = RgbImage::new(150, 150);
    let mut device = EyeSpaceDevice::new((24.0, 19.5));
    export(&mut device, &mut plan_scene(), Viewport::sized(64, 64), &mut image).unwrap();

    // Green encodes eye-space height: the first image row is the far rail.
    assert!(image.get_pixel(75, 0)[1] > 240);
    assert!(image.get_pixel(75, 149)[1] < 15);
    assert!(image.get_pixel(0, 75)[0] < 15);
    assert!(image.get_pixel(149, 75)[0] > 240);
}

// ============================================================================
// Restoration Tests
// ============================================================================

#[test]
fn export_restores_live_view_and_buffering() {
    init_logger();
    let live = Viewport::sized(120, 90);
    let mut scene = SceneState::default();
    let mut ctx = RenderContext::new(live);
    let mut device = CommandRecorder::new();
    let mut image = RgbImage::new(300, 200);

    TileRenderer::new()
        .render_to_buffer(
            &mut device,
            &mut ctx,
            &BoardState::default(),
            &mut scene,
            &RenderConfig::default(),
            &BoardLayout::default(),
            live,
            &mut image,
        )
        .unwrap();

    assert!(scene.back_buffered);
    assert_eq!(ctx.viewport(), live);
    assert_eq!(ctx.projection(), scene.view.projection_matrix());
    assert_eq!(ctx.model_view(), scene.view.view_matrix());
}

#[test]
fn cancelled_export_reports_progress_and_restores_state() {
    init_logger();
    let live = Viewport::sized(100, 100);
    let mut scene = SceneState::default();
    let mut ctx = RenderContext::new(live);
    let mut device = CommandRecorder::new();
    let mut image = RgbImage::new(400, 400);

    let result = TileRenderer::new().render_to_buffer_with(
        &mut device,
        &mut ctx,
        &BoardState::default(),
        &mut scene,
        &RenderConfig::default(),
        &BoardLayout::default(),
        live,
        &mut image,
        |done, _| done < 2,
    );

    assert_eq!(result, Err(Board3dError::ExportCancelled { tiles_done: 2 }));
    assert!(scene.back_buffered);
    assert_eq!(ctx.viewport(), live);
}

#[test]
fn tile_smaller_than_its_border_fails_cleanly() {
    let mut scene = SceneState::default();
    let mut image = RgbImage::new(64, 64);
    let result = export(
        &mut CommandRecorder::new(),
        &mut scene,
        Viewport::sized(16, 16),
        &mut image,
    );

    assert!(matches!(result, Err(Board3dError::InvalidTileSize { .. })));
    assert!(scene.back_buffered);
}

#[test]
fn mismatched_output_buffer_is_rejected() {
    let mut tiler = Tiler::new(100, 100, TILE_BORDER, 200, 200).unwrap();
    let mut image = RgbImage::new(100, 100);
    let result = tiler.end_tile(&mut CommandRecorder::new(), &mut image);
    assert!(matches!(result, Err(Board3dError::BufferSizeMismatch { .. })));
}
