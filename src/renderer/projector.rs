//! Screen-to-world projection.
//!
//! Maps a window coordinate back into board space by unprojecting it at the
//! near and far clip planes and walking the ray between them to a requested
//! world height. Used to place a dragged checker under the pointer and to
//! size the background plane against the viewport.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::errors::{Board3dError, Result};
use crate::renderer::context::{RenderContext, Viewport};
use crate::scene::layout::BoardLayout;
use crate::scene::state::BackgroundRect;

/// Determinants below this are treated as singular.
const SINGULAR_EPSILON: f32 = 1e-12;

/// Camera transforms captured for unprojection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    pub model_view: Mat4,
    pub projection: Mat4,
    pub viewport: Viewport,
}

impl Projector {
    #[must_use]
    pub fn new(model_view: Mat4, projection: Mat4, viewport: Viewport) -> Self {
        Self {
            model_view,
            projection,
            viewport,
        }
    }

    /// Snapshot of the transforms currently installed in `ctx`.
    #[must_use]
    pub fn from_context(ctx: &RenderContext) -> Self {
        Self::new(ctx.model_view(), ctx.projection(), ctx.viewport())
    }

    /// Window coordinates (`z` in `[0, 1]` depth range) to object space.
    pub fn unproject(&self, window: Vec3) -> Result<Vec3> {
        let combined = self.projection * self.model_view;
        if combined.determinant().abs() < SINGULAR_EPSILON {
            return Err(Board3dError::Unprojection("singular model-view-projection"));
        }
        let vp = self.viewport.as_vec4();
        if vp.z <= 0.0 || vp.w <= 0.0 {
            return Err(Board3dError::Unprojection("empty viewport"));
        }

        let ndc = Vec4::new(
            (window.x - vp.x) / vp.z * 2.0 - 1.0,
            (window.y - vp.y) / vp.w * 2.0 - 1.0,
            window.z * 2.0 - 1.0,
            1.0,
        );
        let obj = combined.inverse() * ndc;
        if obj.w.abs() <= f32::EPSILON {
            return Err(Board3dError::Unprojection("point at infinity"));
        }
        Ok(obj.truncate() / obj.w)
    }

    /// Point under window position (`x`, `y`) lying on the plane `z = depth`.
    pub fn projected_pos(&self, x: f32, y: f32, depth: f32) -> Result<Vec3> {
        let near = self.unproject(Vec3::new(x, y, 0.0))?;
        let far = self.unproject(Vec3::new(x, y, 1.0))?;

        let span = far.z - near.z;
        if span.abs() <= f32::EPSILON {
            return Err(Board3dError::Unprojection("view ray parallel to the depth plane"));
        }
        let t = (depth - near.z) / span;
        Ok(near + (far - near) * t)
    }

    /// [`projected_pos`](Self::projected_pos) with failure reported as the
    /// origin. The failure is logged, never raised.
    #[must_use]
    pub fn projected_pos_or_zero(&self, x: f32, y: f32, depth: f32) -> Vec3 {
        match self.projected_pos(x, y, depth) {
            Ok(pos) => pos,
            Err(err) => {
                log::warn!("Error projecting ({x}, {y}) to depth {depth}: {err}");
                Vec3::ZERO
            }
        }
    }

    /// Board position of a checker dragged under the pointer.
    #[must_use]
    pub fn piece_drag_pos(&self, layout: &BoardLayout, x: f32, y: f32) -> Vec3 {
        self.projected_pos_or_zero(x, y, layout.piece_drag_depth())
    }

    /// Background plane covering the whole viewport at `z = 0`.
    ///
    /// Width is measured along the top edge, which is the wider one under a
    /// perspective tilted towards the far rail.
    #[must_use]
    pub fn background_rect(&self) -> BackgroundRect {
        let vp = self.viewport.as_vec4();
        let top_left = self.projected_pos_or_zero(vp.x, vp.y + vp.w, 0.0);
        let top_right = self.projected_pos_or_zero(vp.x + vp.z, vp.y + vp.w, 0.0);
        let bottom_left = self.projected_pos_or_zero(vp.x, vp.y, 0.0);
        BackgroundRect {
            origin: Vec2::new(top_left.x, bottom_left.y),
            size: Vec2::new(top_right.x - top_left.x, top_left.y - bottom_left.y),
        }
    }
}
