//! Render Configuration
//!
//! Per-frame drawing options: the material table, geometric style flags and
//! feature toggles. Loaded and persisted by the configuration layer (hence
//! the `serde` derives) and passed to the renderer by reference.

use glam::Vec4;
use serde::{Deserialize, Serialize};

use super::material::Material;

/// Checker silhouette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PieceType {
    #[default]
    Rounded,
    Flat,
}

/// Which part of a checker a checker texture covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PieceTextureType {
    #[default]
    All,
    /// Only the top face; the body is drawn untextured.
    Top,
}

/// How edges are smoothed.
///
/// Overlay smoothing draws blended line passes over filled geometry; the
/// multisample mode relies on the target's MSAA and skips those passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EdgeSmoothing {
    #[default]
    Overlay,
    Multisample,
}

impl EdgeSmoothing {
    #[inline]
    #[must_use]
    pub fn uses_overlay(self) -> bool {
        matches!(self, Self::Overlay)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    // === Materials ===
    /// Checkers: `[negative side, positive side]`.
    pub checker_materials: [Material; 2],
    /// Points alternate between these two.
    pub point_materials: [Material; 2],
    pub dice_materials: [Material; 2],
    pub dice_dot_materials: [Material; 2],
    pub box_material: Material,
    pub base_material: Material,
    pub point_number_material: Material,
    pub hinge_material: Material,
    pub cube_material: Material,
    pub cube_number_material: Material,
    pub flag_material: Material,
    pub flag_number_material: Material,
    /// Shade of the gap between the two hinged board halves.
    pub gap_color: Vec4,

    // === Geometric style ===
    pub piece_type: PieceType,
    pub piece_texture_type: PieceTextureType,
    pub rounded_points: bool,
    pub rounded_edges: bool,
    /// Segments used to tessellate a full circle.
    pub curve_accuracy: u32,
    /// Edge length of a die.
    pub dice_size: f32,
    /// Points are drawn into the bear-off trays' frame.
    pub bg_in_trays: bool,

    // === Feature toggles ===
    pub labels: bool,
    /// Swap point numbers to the side to move.
    pub dynamic_labels: bool,
    pub hinges: bool,
    pub show_move_indicator: bool,
    pub quick_draw: bool,
    pub plan_view: bool,
    pub edge_smoothing: EdgeSmoothing,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            checker_materials: [
                Material::solid(0.15, 0.15, 0.15),
                Material::solid(0.9, 0.85, 0.75),
            ],
            point_materials: [Material::solid(0.6, 0.1, 0.1), Material::solid(0.85, 0.8, 0.65)],
            dice_materials: [Material::solid(0.15, 0.15, 0.15), Material::solid(0.95, 0.95, 0.95)],
            dice_dot_materials: [
                Material::solid(0.95, 0.95, 0.95).matte(),
                Material::solid(0.1, 0.1, 0.1).matte(),
            ],
            box_material: Material::solid(0.45, 0.25, 0.1),
            base_material: Material::solid(0.1, 0.35, 0.15).matte(),
            point_number_material: Material::solid(1.0, 1.0, 1.0).matte(),
            hinge_material: Material::solid(0.8, 0.7, 0.3),
            cube_material: Material::solid(0.95, 0.95, 0.9),
            cube_number_material: Material::solid(0.0, 0.0, 0.3).matte(),
            flag_material: Material::solid(1.0, 1.0, 1.0),
            flag_number_material: Material::solid(0.0, 0.0, 0.4).matte(),
            gap_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            piece_type: PieceType::Rounded,
            piece_texture_type: PieceTextureType::All,
            rounded_points: false,
            rounded_edges: true,
            curve_accuracy: 36,
            dice_size: 3.0,
            bg_in_trays: false,
            labels: true,
            dynamic_labels: false,
            hinges: true,
            show_move_indicator: true,
            quick_draw: false,
            plan_view: false,
            edge_smoothing: EdgeSmoothing::Overlay,
        }
    }
}

impl RenderConfig {
    /// Either side's checkers need the back-faces-first pass.
    #[inline]
    #[must_use]
    pub fn transparent_pieces(&self) -> bool {
        self.checker_materials.iter().any(|m| m.alpha_blend)
    }

    /// Checkers carry a texture on their top face only.
    #[inline]
    #[must_use]
    pub fn separate_top(&self) -> bool {
        self.checker_materials[0].texture.is_some()
            && self.piece_texture_type == PieceTextureType::Top
    }

    #[inline]
    #[must_use]
    pub fn rounded_pieces(&self) -> bool {
        self.piece_type == PieceType::Rounded
    }

    /// Copy with every table material desaturated.
    #[must_use]
    pub fn grayed(&self) -> Self {
        let mut gray = self.clone();
        gray.box_material = self.box_material.grayed();
        gray.base_material = self.base_material.grayed();
        gray.hinge_material = self.hinge_material.grayed();
        gray.point_materials = self.point_materials.map(|m| m.grayed());
        gray
    }

    /// Circle segment count, never below a triangle.
    #[inline]
    #[must_use]
    pub fn curve_segments(&self) -> u32 {
        self.curve_accuracy.max(3)
    }
}
