//! Tiled off-screen export
//!
//! An image larger than the live viewport is rendered as a grid of
//! viewport-sized tiles. Every tile gets the slice of the full view volume
//! that covers it, widened by a border on each side so smoothed edges near
//! the tile boundary sample the same neighbourhood as in one big render. Only
//! the inner part of each tile (border removed) is copied out, which keeps
//! adjacent tiles seamless.
//!
//! The last column and row are cropped to whatever remains of the image, so
//! image sizes need not be a multiple of the tile size.

use glam::Mat4;
use image::RgbImage;
use log::{debug, trace};

use crate::errors::{Board3dError, Result};
use crate::renderer::context::{RenderContext, Viewport};
use crate::renderer::device::{ClearFlags, PixelRect, RenderDevice};
use crate::renderer::graph::frame::{FrameInputs, SceneRenderer};
use crate::resources::config::RenderConfig;
use crate::scene::board::BoardState;
use crate::scene::camera::{FrustumBounds, ProjectionType};
use crate::scene::layout::BoardLayout;
use crate::scene::state::SceneState;

/// Border kept around every tile, in pixels.
pub const TILE_BORDER: u32 = 10;

/// Order in which tile rows are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowOrder {
    #[default]
    BottomToTop,
    TopToBottom,
}

/// One tile of the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileRegion {
    pub index: usize,
    pub row: u32,
    pub column: u32,
    /// Rendered size, border included.
    pub width: u32,
    pub height: u32,
    /// Sub-volume of the full view volume covering this tile.
    pub bounds: FrustumBounds,
    /// Lower-left corner of the copied area in the image, rows counted from
    /// the bottom.
    pub dest_x: u32,
    pub dest_y: u32,
}

impl TileRegion {
    /// Size of the area copied into the image.
    #[must_use]
    pub fn copy_size(&self, border: u32) -> (u32, u32) {
        (self.width - 2 * border, self.height - 2 * border)
    }
}

/// Tile-rendering context.
#[derive(Debug, Clone)]
pub struct Tiler {
    tile_width: u32,
    tile_height: u32,
    border: u32,
    image_width: u32,
    image_height: u32,
    row_order: RowOrder,
    projection: ProjectionType,
    bounds: FrustumBounds,
    columns: u32,
    rows: u32,
    current: usize,
}

impl Tiler {
    /// Tiles of `tile_width`x`tile_height` (border included) covering an
    /// image of `image_width`x`image_height`.
    pub fn new(
        tile_width: u32,
        tile_height: u32,
        border: u32,
        image_width: u32,
        image_height: u32,
    ) -> Result<Self> {
        if tile_width <= 2 * border || tile_height <= 2 * border {
            return Err(Board3dError::InvalidTileSize {
                width: tile_width,
                height: tile_height,
                border,
            });
        }
        if image_width == 0 || image_height == 0 {
            return Err(Board3dError::BufferSizeMismatch {
                expected: (1, 1),
                actual: (image_width, image_height),
            });
        }
        let inner_w = tile_width - 2 * border;
        let inner_h = tile_height - 2 * border;
        Ok(Self {
            tile_width,
            tile_height,
            border,
            image_width,
            image_height,
            row_order: RowOrder::default(),
            projection: ProjectionType::Perspective,
            bounds: FrustumBounds::symmetric(1.0, 1.0, 1.0, 100.0),
            columns: image_width.div_ceil(inner_w),
            rows: image_height.div_ceil(inner_h),
            current: 0,
        })
    }

    #[must_use]
    pub fn with_row_order(mut self, row_order: RowOrder) -> Self {
        self.row_order = row_order;
        self
    }

    /// Full view volume the tiles are cut from.
    pub fn set_projection(&mut self, projection: ProjectionType, bounds: FrustumBounds) {
        self.projection = projection;
        self.bounds = bounds;
    }

    #[must_use]
    pub fn columns(&self) -> u32 {
        self.columns
    }

    #[must_use]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    #[must_use]
    pub fn border(&self) -> u32 {
        self.border
    }

    #[must_use]
    pub fn image_size(&self) -> (u32, u32) {
        (self.image_width, self.image_height)
    }

    /// Index of the next tile to render, `None` once the grid is done.
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        (self.current < self.tile_count()).then_some(self.current)
    }

    /// Geometry of tile `index`.
    #[must_use]
    pub fn tile(&self, index: usize) -> Option<TileRegion> {
        if index >= self.tile_count() {
            return None;
        }
        let columns = self.columns as usize;
        let column = (index % columns) as u32;
        let row = match self.row_order {
            RowOrder::BottomToTop => (index / columns) as u32,
            RowOrder::TopToBottom => self.rows - (index / columns) as u32 - 1,
        };

        let border = self.border;
        let inner_w = self.tile_width - 2 * border;
        let inner_h = self.tile_height - 2 * border;
        let width = if column + 1 < self.columns {
            self.tile_width
        } else {
            self.image_width - (self.columns - 1) * inner_w + 2 * border
        };
        let height = if row + 1 < self.rows {
            self.tile_height
        } else {
            self.image_height - (self.rows - 1) * inner_h + 2 * border
        };

        let full = self.bounds;
        let image_w = self.image_width as f32;
        let image_h = self.image_height as f32;
        let span_x = full.right - full.left;
        let span_y = full.top - full.bottom;
        let left = full.left + span_x * ((column * inner_w) as f32 - border as f32) / image_w;
        let bottom = full.bottom + span_y * ((row * inner_h) as f32 - border as f32) / image_h;
        let bounds = FrustumBounds {
            left,
            right: left + span_x * width as f32 / image_w,
            bottom,
            top: bottom + span_y * height as f32 / image_h,
            near: full.near,
            far: full.far,
        };

        Some(TileRegion {
            index,
            row,
            column,
            width,
            height,
            bounds,
            dest_x: column * inner_w,
            dest_y: row * inner_h,
        })
    }

    /// Installs the viewport and projection of the current tile.
    pub fn begin_tile(&self, ctx: &mut RenderContext) -> Option<TileRegion> {
        let region = self.tile(self.current)?;
        trace!(
            "tile {} at row {} column {} ({}x{})",
            region.index,
            region.row,
            region.column,
            region.width,
            region.height
        );
        ctx.set_viewport(Viewport::sized(region.width, region.height));
        ctx.set_projection(region.bounds.matrix(self.projection));
        Some(region)
    }

    /// Copies the current tile into `image` and moves on. Returns whether
    /// tiles remain.
    pub fn end_tile(
        &mut self,
        device: &mut dyn RenderDevice,
        image: &mut RgbImage,
    ) -> Result<bool> {
        if image.dimensions() != self.image_size() {
            return Err(Board3dError::BufferSizeMismatch {
                expected: self.image_size(),
                actual: image.dimensions(),
            });
        }
        let Some(region) = self.tile(self.current) else {
            return Ok(false);
        };

        let (copy_w, copy_h) = region.copy_size(self.border);
        let rect = PixelRect {
            x: self.border as i32,
            y: self.border as i32,
            width: copy_w,
            height: copy_h,
        };
        let mut pixels = vec![0u8; rect.rgb_len()];
        device.read_pixels(rect, &mut pixels)?;

        let row_bytes = copy_w as usize * 3;
        let stride = self.image_width as usize * 3;
        let dest_x = region.dest_x as usize * 3;
        let raw: &mut [u8] = image;
        // Device rows run bottom-up, image rows top-down.
        for (r, src) in pixels.chunks_exact(row_bytes).enumerate() {
            let y = (self.image_height - 1 - (region.dest_y + r as u32)) as usize;
            let start = y * stride + dest_x;
            raw[start..start + row_bytes].copy_from_slice(src);
        }

        self.current += 1;
        Ok(self.current < self.tile_count())
    }
}

/// Renders the board into an image of any size by tiling the live viewport.
#[derive(Debug, Default, Clone, Copy)]
pub struct TileRenderer {
    scene_renderer: SceneRenderer,
    row_order: RowOrder,
}

impl TileRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_row_order(mut self, row_order: RowOrder) -> Self {
        self.row_order = row_order;
        self
    }

    /// Renders the whole image and returns the number of tiles drawn.
    pub fn render_to_buffer(
        &self,
        device: &mut dyn RenderDevice,
        ctx: &mut RenderContext,
        board: &BoardState,
        scene: &mut SceneState,
        config: &RenderConfig,
        layout: &BoardLayout,
        live_viewport: Viewport,
        image: &mut RgbImage,
    ) -> Result<usize> {
        self.render_to_buffer_with(
            device,
            ctx,
            board,
            scene,
            config,
            layout,
            live_viewport,
            image,
            |_, _| true,
        )
    }

    /// Like [`render_to_buffer`](Self::render_to_buffer), asking `proceed`
    /// with `(tiles_done, tile_count)` after each tile whether to continue.
    /// A `false` answer stops the export with
    /// [`Board3dError::ExportCancelled`]; the image is then incomplete.
    ///
    /// Back buffering is off while tiles are drawn, and the live view is
    /// reinstalled for `live_viewport` whatever the outcome.
    pub fn render_to_buffer_with(
        &self,
        device: &mut dyn RenderDevice,
        ctx: &mut RenderContext,
        board: &BoardState,
        scene: &mut SceneState,
        config: &RenderConfig,
        layout: &BoardLayout,
        live_viewport: Viewport,
        image: &mut RgbImage,
        proceed: impl FnMut(usize, usize) -> bool,
    ) -> Result<usize> {
        let saved_buffering = scene.back_buffered;
        scene.back_buffered = false;

        let result = self.draw_tiles(
            device,
            ctx,
            board,
            scene,
            config,
            layout,
            live_viewport,
            image,
            proceed,
        );

        scene.back_buffered = saved_buffering;
        scene.view.install(ctx, live_viewport);
        result
    }

    fn draw_tiles(
        &self,
        device: &mut dyn RenderDevice,
        ctx: &mut RenderContext,
        board: &BoardState,
        scene: &SceneState,
        config: &RenderConfig,
        layout: &BoardLayout,
        live_viewport: Viewport,
        image: &mut RgbImage,
        mut proceed: impl FnMut(usize, usize) -> bool,
    ) -> Result<usize> {
        let (image_w, image_h) = image.dimensions();
        let mut tiler = Tiler::new(
            live_viewport.width,
            live_viewport.height,
            TILE_BORDER,
            image_w,
            image_h,
        )?
        .with_row_order(self.row_order);
        tiler.set_projection(scene.view.projection_type, scene.view.bounds());

        let total = tiler.tile_count();
        debug!("exporting {image_w}x{image_h} image in {total} tile(s)");

        let frame = FrameInputs::new(board, scene, config, layout);
        let view: Mat4 = scene.view.view_matrix();
        let mut done = 0;
        while tiler.begin_tile(ctx).is_some() {
            ctx.load_model_view(view);
            device.clear(ClearFlags::COLOR | ClearFlags::DEPTH);
            self.scene_renderer.draw_board(device, ctx, &frame);

            let more = tiler.end_tile(device, image)?;
            done += 1;
            if !proceed(done, total) {
                debug!("export cancelled after {done} of {total} tile(s)");
                return Err(Board3dError::ExportCancelled { tiles_done: done });
            }
            if !more {
                break;
            }
        }
        Ok(done)
    }
}
