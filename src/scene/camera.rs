//! Board Camera
//!
//! The viewing volume the board is drawn through: an off-axis perspective
//! frustum for the live view, or an orthographic plan view straight down.
//! Tiled export narrows the same bounds to one tile at a time.

use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::renderer::context::{RenderContext, Viewport};
use crate::resources::config::RenderConfig;
use crate::scene::layout::BoardLayout;

/// How the viewing volume is projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionType {
    Perspective,
    /// Plan view straight down onto the board.
    Orthographic,
}

/// Clip volume bounds, in eye space, as passed to a frustum or ortho call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl FrustumBounds {
    /// Symmetric volume spanning `±half_width` by `±half_height`.
    #[must_use]
    pub fn symmetric(half_width: f32, half_height: f32, near: f32, far: f32) -> Self {
        Self {
            left: -half_width,
            right: half_width,
            bottom: -half_height,
            top: half_height,
            near,
            far,
        }
    }

    /// Off-axis perspective matrix (OpenGL clip conventions, `z` in `[-1, 1]`).
    #[must_use]
    pub fn perspective_matrix(&self) -> Mat4 {
        let Self { left: l, right: r, bottom: b, top: t, near: n, far: f } = *self;
        Mat4::from_cols(
            Vec4::new(2.0 * n / (r - l), 0.0, 0.0, 0.0),
            Vec4::new(0.0, 2.0 * n / (t - b), 0.0, 0.0),
            Vec4::new((r + l) / (r - l), (t + b) / (t - b), -(f + n) / (f - n), -1.0),
            Vec4::new(0.0, 0.0, -2.0 * f * n / (f - n), 0.0),
        )
    }

    /// Orthographic matrix over the same bounds.
    #[must_use]
    pub fn orthographic_matrix(&self) -> Mat4 {
        Mat4::orthographic_rh_gl(self.left, self.right, self.bottom, self.top, self.near, self.far)
    }

    #[must_use]
    pub fn matrix(&self, projection: ProjectionType) -> Mat4 {
        match projection {
            ProjectionType::Perspective => self.perspective_matrix(),
            ProjectionType::Orthographic => self.orthographic_matrix(),
        }
    }
}

/// Camera parameters for the live view.
///
/// The fields are worked out by the windowing layer from the board's view
/// area; the renderer only installs them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewVolume {
    pub projection_type: ProjectionType,
    /// Half width of the frustum at the near plane.
    pub hor_frustum: f32,
    /// Half height of the frustum at the near plane.
    pub vert_frustum: f32,
    pub near: f32,
    pub far: f32,

    // World to eye transform.
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Default for ViewVolume {
    fn default() -> Self {
        Self {
            projection_type: ProjectionType::Perspective,
            hor_frustum: 0.5,
            vert_frustum: 0.4,
            near: 1.0,
            far: 100.0,
            eye: Vec3::new(24.0, -20.0, 60.0),
            target: Vec3::new(24.0, 19.5, 0.0),
            up: Vec3::Y,
        }
    }
}

impl ViewVolume {
    /// Plan view over the whole board.
    #[must_use]
    pub fn plan(width: f32, height: f32) -> Self {
        Self {
            projection_type: ProjectionType::Orthographic,
            hor_frustum: width / 2.0,
            vert_frustum: height / 2.0,
            near: 1.0,
            far: 40.0,
            eye: Vec3::new(width / 2.0, height / 2.0, 20.0),
            target: Vec3::new(width / 2.0, height / 2.0, 0.0),
            up: Vec3::Y,
        }
    }

    /// Plan view when `config` asks for one, the default perspective
    /// otherwise.
    #[must_use]
    pub fn for_config(config: &RenderConfig, layout: &BoardLayout) -> Self {
        if config.plan_view {
            Self::plan(layout.total_width(), layout.total_height())
        } else {
            Self::default()
        }
    }

    #[must_use]
    pub fn bounds(&self) -> FrustumBounds {
        FrustumBounds::symmetric(self.hor_frustum, self.vert_frustum, self.near, self.far)
    }

    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.bounds().matrix(self.projection_type)
    }

    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Installs viewport, projection and model-view into the context.
    pub fn install(&self, ctx: &mut RenderContext, viewport: Viewport) {
        ctx.set_viewport(viewport);
        ctx.set_projection(self.projection_matrix());
        ctx.load_model_view(self.view_matrix());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perspective_maps_near_plane_to_minus_one() {
        let bounds = FrustumBounds::symmetric(0.5, 0.4, 1.0, 100.0);
        let clip = bounds.perspective_matrix() * Vec4::new(0.5, 0.4, -1.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!((ndc.z + 1.0).abs() < 1e-5);
        assert!((ndc.x - 1.0).abs() < 1e-5);
        assert!((ndc.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn plan_view_config_selects_orthographic() {
        let config = RenderConfig {
            plan_view: true,
            ..RenderConfig::default()
        };
        let view = ViewVolume::for_config(&config, &BoardLayout::default());
        assert_eq!(view.projection_type, ProjectionType::Orthographic);
    }

    #[test]
    fn perspective_maps_far_plane_to_plus_one() {
        let bounds = FrustumBounds::symmetric(0.5, 0.4, 1.0, 100.0);
        let clip = bounds.perspective_matrix() * Vec4::new(0.0, 0.0, -100.0, 1.0);
        assert!((clip.z / clip.w - 1.0).abs() < 1e-4);
    }
}
