//! Render Context
//!
//! Explicit replacement for an immediate-mode pipeline's hidden global state.
//! A [`RenderContext`] carries the current viewport, projection, model-view
//! stack, fixed-function [`PipelineState`] and bound material. It is threaded
//! by `&mut` through every drawing call; each submission to a
//! [`RenderDevice`](super::device::RenderDevice) receives an immutable
//! [`DrawState`] snapshot of it.
//!
//! Temporary mode changes go through [`RenderContext::with_state`] and
//! [`RenderContext::with_matrix`], which always restore what they found.

use glam::{Mat4, Vec3, Vec4};

use crate::resources::material::Material;

// ─── Viewport ────────────────────────────────────────────────────────────────

/// Window-space rectangle in pixels, origin bottom-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Viewport anchored at the origin.
    #[must_use]
    pub const fn sized(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// `[x, y, width, height]` as floats, the layout unprojection expects.
    #[must_use]
    pub fn as_vec4(&self) -> Vec4 {
        Vec4::new(
            self.x as f32,
            self.y as f32,
            self.width as f32,
            self.height as f32,
        )
    }
}

// ─── Fixed-function state ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CullFace {
    Front,
    #[default]
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    Zero,
    One,
    SrcColor,
    OneMinusSrcColor,
    DstColor,
    OneMinusDstColor,
    SrcAlpha,
    OneMinusSrcAlpha,
}

/// Source/destination blend factor pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendFunc {
    pub src: BlendFactor,
    pub dst: BlendFactor,
}

impl BlendFunc {
    /// Conventional alpha compositing.
    pub const ALPHA: Self = Self::new(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha);
    /// Subtracts the source intensity from the destination.
    pub const MASK: Self = Self::new(BlendFactor::Zero, BlendFactor::OneMinusSrcColor);
    pub const ADDITIVE: Self = Self::new(BlendFactor::One, BlendFactor::One);
    /// Used for dots seen through the near side of a translucent die.
    pub const INVERTED: Self = Self::new(BlendFactor::SrcColor, BlendFactor::OneMinusSrcColor);

    #[must_use]
    pub const fn new(src: BlendFactor, dst: BlendFactor) -> Self {
        Self { src, dst }
    }
}

impl Default for BlendFunc {
    fn default() -> Self {
        Self::ALPHA
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DepthFunc {
    Less,
    #[default]
    LessEqual,
    Equal,
    Always,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PolygonMode {
    #[default]
    Fill,
    Line,
}

/// Every piece of fixed-function state the board renderer toggles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineState {
    pub cull_face: CullFace,
    pub blend: bool,
    pub blend_func: BlendFunc,
    pub depth_test: bool,
    pub depth_func: DepthFunc,
    pub depth_write: bool,
    pub polygon_mode: PolygonMode,
    pub texture: bool,
    pub line_smooth: bool,
    pub line_width: f32,
    pub stencil: bool,
    pub light_specular: bool,
}

impl Default for PipelineState {
    fn default() -> Self {
        Self {
            cull_face: CullFace::Back,
            blend: false,
            blend_func: BlendFunc::ALPHA,
            depth_test: true,
            depth_func: DepthFunc::LessEqual,
            depth_write: true,
            polygon_mode: PolygonMode::Fill,
            texture: false,
            line_smooth: false,
            line_width: 1.0,
            stencil: false,
            light_specular: true,
        }
    }
}

/// Immutable snapshot handed to the device with each submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawState {
    pub pipeline: PipelineState,
    pub projection: Mat4,
    pub model_view: Mat4,
    pub viewport: Viewport,
    pub material: Option<Material>,
}

impl DrawState {
    /// Model-view origin in eye space.
    #[must_use]
    pub fn eye_origin(&self) -> Vec3 {
        self.model_view.transform_point3(Vec3::ZERO)
    }
}

// ─── RenderContext ───────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct RenderContext {
    viewport: Viewport,
    projection: Mat4,
    model_view: Mat4,
    matrix_stack: Vec<Mat4>,
    state: PipelineState,
    material: Option<Material>,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl RenderContext {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            projection: Mat4::IDENTITY,
            model_view: Mat4::IDENTITY,
            matrix_stack: Vec::with_capacity(8),
            state: PipelineState::default(),
            material: None,
        }
    }

    // === Transforms ===

    #[inline]
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    #[inline]
    #[must_use]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
    }

    #[inline]
    #[must_use]
    pub fn model_view(&self) -> Mat4 {
        self.model_view
    }

    pub fn load_model_view(&mut self, model_view: Mat4) {
        self.model_view = model_view;
    }

    pub fn push_matrix(&mut self) {
        self.matrix_stack.push(self.model_view);
    }

    /// Restores the last pushed model-view. An unbalanced pop is logged and
    /// leaves the current matrix in place.
    pub fn pop_matrix(&mut self) {
        match self.matrix_stack.pop() {
            Some(m) => self.model_view = m,
            None => log::warn!("pop_matrix on an empty model-view stack"),
        }
    }

    #[inline]
    #[must_use]
    pub fn matrix_depth(&self) -> usize {
        self.matrix_stack.len()
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.model_view *= Mat4::from_translation(offset);
    }

    /// Post-multiplies a rotation of `degrees` about `axis`. A zero axis is
    /// ignored.
    pub fn rotate_deg(&mut self, degrees: f32, axis: Vec3) {
        if let Some(axis) = axis.try_normalize() {
            self.model_view *= Mat4::from_axis_angle(axis, degrees.to_radians());
        }
    }

    /// Runs `f` between a matrix push and pop.
    pub fn with_matrix<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.push_matrix();
        let depth = self.matrix_stack.len();
        let result = f(self);
        // Drop anything `f` left pushed so the pop lands on our entry.
        self.matrix_stack.truncate(depth);
        self.pop_matrix();
        result
    }

    // === Pipeline state ===

    #[inline]
    #[must_use]
    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    #[must_use]
    pub fn save_state(&self) -> PipelineState {
        self.state
    }

    pub fn restore_state(&mut self, state: PipelineState) {
        self.state = state;
    }

    /// Runs `f` and then restores the pipeline state and bound material.
    pub fn with_state<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = self.state;
        let material = self.material;
        let result = f(self);
        self.state = saved;
        self.material = material;
        result
    }

    pub fn set_cull_face(&mut self, face: CullFace) {
        self.state.cull_face = face;
    }

    pub fn set_blend(&mut self, enabled: bool) {
        self.state.blend = enabled;
    }

    pub fn set_blend_func(&mut self, func: BlendFunc) {
        self.state.blend_func = func;
    }

    pub fn set_depth_test(&mut self, enabled: bool) {
        self.state.depth_test = enabled;
    }

    pub fn set_depth_func(&mut self, func: DepthFunc) {
        self.state.depth_func = func;
    }

    pub fn set_depth_write(&mut self, enabled: bool) {
        self.state.depth_write = enabled;
    }

    pub fn set_polygon_mode(&mut self, mode: PolygonMode) {
        self.state.polygon_mode = mode;
    }

    pub fn set_texture(&mut self, enabled: bool) {
        self.state.texture = enabled;
    }

    pub fn set_line_smooth(&mut self, enabled: bool) {
        self.state.line_smooth = enabled;
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.state.line_width = width;
    }

    pub fn set_stencil(&mut self, enabled: bool) {
        self.state.stencil = enabled;
    }

    pub fn set_light_specular(&mut self, enabled: bool) {
        self.state.light_specular = enabled;
    }

    // === Material ===

    #[inline]
    #[must_use]
    pub fn material(&self) -> Option<&Material> {
        self.material.as_ref()
    }

    /// Binds `material` for subsequent draws and returns a copy for
    /// submission.
    pub fn set_material(&mut self, material: &Material) -> Material {
        self.material = Some(*material);
        *material
    }

    /// Binds a flat colour (no texture, no blending, no specular).
    pub fn set_color(&mut self, color: Vec4) -> Material {
        let material = Material {
            color,
            specular: 0.0,
            shininess: 0.0,
            texture: None,
            alpha_blend: false,
        };
        self.set_material(&material)
    }

    // === Submission ===

    #[must_use]
    pub fn draw_state(&self) -> DrawState {
        DrawState {
            pipeline: self.state,
            projection: self.projection,
            model_view: self.model_view,
            viewport: self.viewport,
            material: self.material,
        }
    }
}
