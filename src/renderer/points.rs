//! Board points.
//!
//! Draws the triangular points of one board half, optionally with rounded
//! ends, and mirrors them onto the other half by a half turn about the board
//! centre. Texture coordinates are scaled by the layout's texture scale over
//! the material's texture width so the point texture tiles the same way at
//! any texture resolution.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use smallvec::SmallVec;

use crate::renderer::aa::{self, EDGE_LINE};
use crate::renderer::context::RenderContext;
use crate::renderer::device::{Primitive, RenderDevice, Topology, Vertex};
use crate::resources::config::RenderConfig;
use crate::scene::layout::BoardLayout;

/// Near (`Near`) points run up from the bottom rail, far ones down from the
/// top rail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointRow {
    Far,
    Near,
}

pub struct PointRenderer<'a> {
    layout: &'a BoardLayout,
    config: &'a RenderConfig,
}

impl<'a> PointRenderer<'a> {
    #[must_use]
    pub fn new(layout: &'a BoardLayout, config: &'a RenderConfig) -> Self {
        Self { layout, config }
    }

    /// Offset applied before drawing any point.
    #[must_use]
    pub fn origin(&self) -> Vec3 {
        let l = self.layout;
        if self.config.bg_in_trays {
            Vec3::new(l.edge_width, l.edge_height, l.base_depth)
        } else {
            Vec3::new(l.tray_width(), l.edge_height, l.base_depth)
        }
    }

    /// Geometry of point `index` (0..6 from the tray side) in `row`, relative
    /// to [`origin`](Self::origin).
    #[must_use]
    pub fn point_geometry(
        &self,
        index: usize,
        row: PointRow,
        tuv: f32,
        outline: bool,
    ) -> SmallVec<[Primitive; 2]> {
        let l = self.layout;
        let hole = l.piece_hole;
        let mut w = hole;
        let mut h = l.point_height;
        let (mut x, mut y) = match row {
            PointRow::Near => (l.tray_width() - l.edge_width + hole * index as f32, -l.lift_off),
            PointRow::Far => {
                w = -w;
                h = -h;
                (
                    l.tray_width() - l.edge_width + l.board_width() - hole * index as f32,
                    l.total_height() - l.edge_height * 2.0 + l.lift_off,
                )
            }
        };
        if !self.config.bg_in_trays {
            x -= l.tray_width() - l.edge_width;
        }

        let uv = |p: Vec3| Vertex::new(p).with_tex(Vec2::new(p.x * tuv, p.y * tuv));
        let mut out = SmallVec::new();

        if self.config.rounded_points {
            w *= l.taki_width;
            y += w / 2.0;
            h -= w / 2.0;

            let x_centre = match row {
                PointRow::Near => x + hole / 2.0,
                PointRow::Far => x - hole / 2.0,
            };
            let accuracy = self.config.curve_segments();
            let step = TAU / accuracy as f32;
            let radius = w / 2.0;
            let mut angle = -step * (accuracy / 4) as f32;

            let mut cap = Primitive::new(if outline {
                Topology::LineStrip
            } else {
                Topology::TriangleFan
            });
            cap.push(uv(Vec3::new(x_centre, y, 0.0)));
            for _ in 0..=accuracy / 2 {
                let (s, c) = angle.sin_cos();
                cap.push(uv(Vec3::new(x_centre + s * radius, y + c * radius, 0.0)));
                angle -= step;
            }
            out.push(cap);

            let inset = hole * (1.0 - l.taki_width) / 2.0;
            match row {
                PointRow::Near => x += inset,
                PointRow::Far => x -= inset,
            }
        }

        let mut triangle = Primitive::new(if outline {
            Topology::LineStrip
        } else {
            Topology::Triangles
        });
        for corner in [
            Vec3::new(x + w, y, 0.0),
            Vec3::new(x + w / 2.0, y + h, 0.0),
            Vec3::new(x, y, 0.0),
        ] {
            triangle.push(uv(corner));
        }
        out.push(triangle);
        out
    }

    /// One half of the board: the six even-indexed points in the first
    /// point material, the odd ones in the second, both rows.
    pub fn draw_half(&self, device: &mut dyn RenderDevice, ctx: &mut RenderContext, outline: bool) {
        let texture_scale = self.layout.texture_scale();
        let origin = self.origin();
        ctx.with_state(|ctx| {
            for (parity, material) in self.config.point_materials.iter().enumerate() {
                ctx.set_material(material);
                ctx.set_texture(material.texture.is_some() && !outline);
                let tuv = material.texture_uv_scale(texture_scale);

                for index in (parity..6).step_by(2) {
                    for row in [PointRow::Far, PointRow::Near] {
                        let geometry = self.point_geometry(index, row, tuv, outline);
                        ctx.with_matrix(|ctx| {
                            ctx.translate(origin);
                            let state = ctx.draw_state();
                            for primitive in &geometry {
                                device.draw_primitive(primitive, &state);
                            }
                        });
                    }
                }
            }
        });
    }

    /// Both halves; the second is the first turned 180° about the board
    /// centre.
    pub fn draw(&self, device: &mut dyn RenderDevice, ctx: &mut RenderContext, outline: bool) {
        self.draw_half(device, ctx, outline);
        let corner = Vec3::new(self.layout.total_width(), self.layout.total_height(), 0.0);
        ctx.with_matrix(|ctx| {
            ctx.translate(corner);
            ctx.rotate_deg(180.0, Vec3::Z);
            self.draw_half(device, ctx, outline);
        });
    }

    /// Smoothed outlines over the filled points.
    pub fn draw_outlines(&self, device: &mut dyn RenderDevice, ctx: &mut RenderContext) {
        aa::with_aa(ctx, EDGE_LINE, true, |ctx| self.draw(device, ctx, true));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recorder::CommandRecorder;

    #[test]
    fn rounded_points_add_a_cap() {
        let layout = BoardLayout::default();
        let mut config = RenderConfig::default();
        let flat =
            PointRenderer::new(&layout, &config).point_geometry(0, PointRow::Near, 0.0, false);
        assert_eq!(flat.len(), 1);

        config.rounded_points = true;
        let rounded =
            PointRenderer::new(&layout, &config).point_geometry(0, PointRow::Near, 0.0, false);
        assert_eq!(rounded.len(), 2);
        assert_eq!(rounded[0].topology, Topology::TriangleFan);
    }

    #[test]
    fn both_halves_draw_twenty_four_points() {
        let layout = BoardLayout::default();
        let config = RenderConfig::default();
        let mut device = CommandRecorder::new();
        let mut ctx = RenderContext::default();
        PointRenderer::new(&layout, &config).draw(&mut device, &mut ctx, false);
        assert_eq!(device.commands().len(), 24);
        assert_eq!(ctx.matrix_depth(), 0);
    }

    #[test]
    fn texture_coordinates_scale_with_position() {
        let layout = BoardLayout::default();
        let config = RenderConfig::default();
        let geometry =
            PointRenderer::new(&layout, &config).point_geometry(2, PointRow::Near, 0.5, false);
        let tri = &geometry[0];
        for v in &tri.vertices {
            assert_eq!(v.tex_coord[0], v.position[0] * 0.5);
        }
    }
}
