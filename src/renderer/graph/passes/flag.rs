//! Resignation flag.
//!
//! The cloth is a bicubic-by-linear Bézier patch: four control columns along
//! the fly, two rows (top and bottom edge). Each column is displaced across
//! the cloth by a sine of the wave phase, so advancing the phase makes the
//! flag ripple. The patch is tessellated into strips on the CPU.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::renderer::context::RenderContext;
use crate::renderer::device::{
    FontKind, ModelKind, Primitive, RenderDevice, TextRequest, TextStyle, Topology, Vertex,
};
use crate::renderer::graph::frame::FrameInputs;
use crate::scene::layout::BoardLayout;

const S_POINTS: usize = 4;
const T_POINTS: usize = 2;

/// Scale of the resign value numeral relative to the cube numerals.
const FLAG_NUMERAL_SCALE: f32 = 1.3;

/// Control net of the flag cloth, in the pole's frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlagPatch {
    pub control: [[Vec3; T_POINTS]; S_POINTS],
}

impl FlagPatch {
    /// Cloth dimensions for `layout`: `(width, height, wag)`.
    #[must_use]
    pub fn dimensions(layout: &BoardLayout) -> (f32, f32, f32) {
        let hole = layout.piece_hole;
        (hole * 2.0, hole * 1.5, hole * 0.3)
    }

    /// Height of the top of the cloth above the pole foot.
    #[must_use]
    pub fn pole_height(layout: &BoardLayout) -> f32 {
        layout.piece_hole * 4.0
    }

    /// Control net at wave `phase` (`[0, 1)`).
    #[must_use]
    pub fn waved(layout: &BoardLayout, phase: f32) -> Self {
        let (width, height, wag) = Self::dimensions(layout);
        let top = Self::pole_height(layout);
        let mut control = [[Vec3::ZERO; T_POINTS]; S_POINTS];
        for (i, column) in control.iter_mut().enumerate() {
            let along = i as f32 / (S_POINTS - 1) as f32;
            // The edge on the pole is fixed; the wave grows towards the fly.
            let offset = wag * along * (TAU * (along + phase)).sin();
            for (j, point) in column.iter_mut().enumerate() {
                *point = Vec3::new(width * along, offset, top - height * j as f32);
            }
        }
        Self { control }
    }

    /// Point at `(s, t)` in `[0, 1]²`.
    #[must_use]
    pub fn evaluate(&self, s: f32, t: f32) -> Vec3 {
        let u = 1.0 - s;
        let basis = [u * u * u, 3.0 * s * u * u, 3.0 * s * s * u, s * s * s];
        let mut edge = [Vec3::ZERO; T_POINTS];
        for (i, b) in basis.iter().enumerate() {
            for (j, e) in edge.iter_mut().enumerate() {
                *e += self.control[i][j] * *b;
            }
        }
        edge[0].lerp(edge[1], t)
    }

    /// Strip of quads for each `s` interval, `steps` intervals per direction.
    #[must_use]
    pub fn tessellate(&self, steps: u32) -> Vec<Primitive> {
        let steps = steps.max(1);
        let normal = |s: f32, t: f32| {
            let ds = self.evaluate((s + 1e-3).min(1.0), t) - self.evaluate((s - 1e-3).max(0.0), t);
            let dt = self.control[0][1] - self.control[0][0];
            ds.cross(dt).normalize_or(Vec3::Y)
        };
        (0..steps)
            .map(|i| {
                let s0 = i as f32 / steps as f32;
                let s1 = (i + 1) as f32 / steps as f32;
                let mut strip = Primitive::new(Topology::TriangleStrip);
                for k in 0..=steps {
                    let t = k as f32 / steps as f32;
                    for s in [s0, s1] {
                        strip.push(Vertex::new(self.evaluate(s, t)).with_normal(normal(s, t)));
                    }
                }
                strip
            })
            .collect()
    }
}

/// Tessellation steps for a given circle accuracy.
#[must_use]
pub fn flag_steps(curve_accuracy: u32) -> u32 {
    (curve_accuracy / 4).clamp(2, 24)
}

pub fn run(device: &mut dyn RenderDevice, ctx: &mut RenderContext, frame: &FrameInputs<'_>) {
    let layout = frame.layout;
    let config = frame.config;
    let board = frame.board;

    let stencil = ctx.state().stencil;
    ctx.set_stencil(false);

    let patch = FlagPatch::waved(layout, frame.scene.flag_wave);
    ctx.with_matrix(|ctx| {
        ctx.translate(layout.flag_position(board.turn));

        ctx.set_material(&config.flag_material);
        device.draw_model(ModelKind::FlagPole, Some(&config.flag_material), &ctx.draw_state());
        let state = ctx.draw_state();
        for strip in patch.tessellate(flag_steps(config.curve_accuracy)) {
            device.draw_primitive(&strip, &state);
        }

        ctx.set_material(&config.flag_number_material);
        ctx.translate(patch.evaluate(0.5, 0.5));
        ctx.with_state(|ctx| {
            ctx.set_depth_test(false);
            ctx.set_light_specular(false);
            ctx.set_line_width(0.5);
            let request = TextRequest::new(
                FontKind::Cube,
                board.resigned.unsigned_abs().to_string(),
                FLAG_NUMERAL_SCALE,
                TextStyle::Solid,
            );
            device.draw_text(&request, &ctx.draw_state());
        });
    });

    ctx.set_stencil(stencil);
}
