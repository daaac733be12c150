use glam::Vec4;
use serde::{Deserialize, Serialize};

/// Reference to a texture owned by the resource layer.
///
/// The renderer never samples textures itself; it only needs the handle to
/// pass on and the pixel width for texture-coordinate scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureRef {
    pub id: u32,
    pub width: u32,
    pub height: u32,
}

/// Surface description applied before a draw.
///
/// A material with `alpha_blend` set must be drawn back faces first and
/// front faces second to composite correctly against itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Diffuse colour, RGBA.
    pub color: Vec4,
    /// Specular intensity (0 for a matte surface).
    pub specular: f32,
    pub shininess: f32,
    pub texture: Option<TextureRef>,
    pub alpha_blend: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self::solid(1.0, 1.0, 1.0)
    }
}

impl Material {
    /// Opaque, untextured, slightly glossy material.
    #[must_use]
    pub const fn solid(r: f32, g: f32, b: f32) -> Self {
        Self {
            color: Vec4::new(r, g, b, 1.0),
            specular: 0.3,
            shininess: 32.0,
            texture: None,
            alpha_blend: false,
        }
    }

    /// Translucent material, drawn with alpha blending.
    #[must_use]
    pub const fn translucent(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            color: Vec4::new(r, g, b, a),
            specular: 0.3,
            shininess: 32.0,
            texture: None,
            alpha_blend: true,
        }
    }

    #[must_use]
    pub const fn with_texture(mut self, texture: TextureRef) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Same material without specular highlights.
    #[must_use]
    pub const fn matte(mut self) -> Self {
        self.specular = 0.0;
        self
    }

    /// Desaturated copy, used to draw an inactive board.
    #[must_use]
    pub fn grayed(&self) -> Self {
        let luma = self.color.x * 0.299 + self.color.y * 0.587 + self.color.z * 0.114;
        Self {
            color: Vec4::new(luma, luma, luma, self.color.w),
            ..*self
        }
    }

    /// Texture coordinate scale for this material: `texture_scale` divided
    /// by the texture width, or zero when untextured.
    #[must_use]
    pub fn texture_uv_scale(&self, texture_scale: f32) -> f32 {
        match self.texture {
            Some(texture) if texture.width > 0 => texture_scale / texture.width as f32,
            _ => 0.0,
        }
    }
}
