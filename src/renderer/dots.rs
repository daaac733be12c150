//! Dice dot layout.
//!
//! Each pip value has a fixed list of grid cells; a cell index picks a
//! percentage across the face from [`DOT_POS`]. Dots are drawn as small
//! textured quads lifted just off each face.

use glam::{Vec2, Vec3};
use smallvec::SmallVec;

use crate::renderer::context::RenderContext;
use crate::renderer::device::{Primitive, RenderDevice, Topology, Vertex};
use crate::scene::dice::{walk_face, DieFaceConfig, DotPass, DIE_FACES};

/// Percentage across the dotted area for grid index 1, 2 and 3. Index 0 is
/// unused.
pub const DOT_POS: [f32; 4] = [0.0, 20.0, 50.0, 80.0];

const DOTS_1: &[(u8, u8)] = &[(2, 2)];
const DOTS_2: &[(u8, u8)] = &[(1, 1), (3, 3)];
const DOTS_3: &[(u8, u8)] = &[(1, 3), (2, 2), (3, 1)];
const DOTS_4: &[(u8, u8)] = &[(1, 1), (1, 3), (3, 1), (3, 3)];
const DOTS_5: &[(u8, u8)] = &[(1, 1), (1, 3), (2, 2), (3, 1), (3, 3)];
const DOTS_6: &[(u8, u8)] = &[(1, 1), (1, 3), (2, 1), (2, 3), (3, 1), (3, 3)];

const DOTS: [&[(u8, u8)]; 6] = [DOTS_1, DOTS_2, DOTS_3, DOTS_4, DOTS_5, DOTS_6];

/// Grid cells of pip `value` (1..=6). Out-of-range values have no dots.
#[must_use]
pub fn dot_cells(value: u8) -> &'static [(u8, u8)] {
    match value {
        1..=6 => DOTS[usize::from(value - 1)],
        _ => &[],
    }
}

/// Dot centres of pip `value` as fractions of the dotted area, in `[0, 1]`.
pub fn normalized_dots(value: u8) -> impl Iterator<Item = Vec2> {
    dot_cells(value).iter().map(|&(x, y)| {
        Vec2::new(
            DOT_POS[usize::from(x)] / 100.0,
            DOT_POS[usize::from(y)] / 100.0,
        )
    })
}

/// Dot geometry for a die of a given edge length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiceDotLayout {
    /// Side of the dotted area on a face.
    pub dotted_size: f32,
    /// Distance from the die centre to a face.
    pub face_distance: f32,
    /// Half extent of one dot quad.
    pub dot_size: f32,
}

impl DiceDotLayout {
    #[must_use]
    pub fn new(dice_size: f32) -> Self {
        let dotted_size = dice_size * 5.0 / 7.0;
        Self {
            dotted_size,
            face_distance: dotted_size / 2.0 + dice_size / 7.0,
            dot_size: dice_size / 10.0,
        }
    }

    /// Dot centres of pip `value` relative to the face centre.
    #[must_use]
    pub fn face_offsets(&self, value: u8) -> SmallVec<[Vec2; 6]> {
        let half = self.dotted_size / 2.0;
        normalized_dots(value)
            .map(|p| p * self.dotted_size - Vec2::splat(half))
            .collect()
    }

    /// Textured quad for one dot, `lift` above the face plane.
    #[must_use]
    pub fn dot_quad(&self, centre: Vec2, lift: f32) -> Primitive {
        let s = self.dot_size;
        let mut quad = Primitive::new(Topology::TriangleFan);
        for (dx, dy, u, v) in [
            (s, s, 0.0, 1.0),
            (-s, s, 1.0, 1.0),
            (-s, -s, 1.0, 0.0),
            (s, -s, 0.0, 0.0),
        ] {
            quad.push(
                Vertex::new(Vec3::new(centre.x + dx, centre.y + dy, lift))
                    .with_tex(Vec2::new(u, v)),
            );
        }
        quad
    }

    /// Walks all six faces, drawing the dots of every face `faces` marks
    /// visible for `pass`. Returns the number of dots drawn.
    ///
    /// The current model-view must be the die centre with the die's
    /// orientation applied. Depth testing is suspended for the top face of a
    /// resting die so its dots never fight with the face they sit on.
    pub fn draw(
        &self,
        device: &mut dyn RenderDevice,
        ctx: &mut RenderContext,
        faces: &DieFaceConfig,
        pass: DotPass,
        shaking: bool,
        lift: f32,
    ) -> usize {
        let mut drawn = 0;
        ctx.with_state(|ctx| {
            ctx.set_texture(true);
            ctx.with_matrix(|ctx| {
                for step in 0..DIE_FACES {
                    let face = walk_face(step);
                    if faces.draws_face(face, pass, shaking) {
                        let flat_top = !shaking && face == faces.top;
                        ctx.with_state(|ctx| {
                            if flat_top {
                                ctx.set_depth_test(false);
                            }
                            ctx.with_matrix(|ctx| {
                                ctx.translate(Vec3::new(0.0, 0.0, self.face_distance));
                                let state = ctx.draw_state();
                                for centre in self.face_offsets(face + 1) {
                                    device.draw_primitive(&self.dot_quad(centre, lift), &state);
                                    drawn += 1;
                                }
                            });
                        });
                    }
                    if step % 2 == 0 {
                        ctx.rotate_deg(-90.0, Vec3::Y);
                    } else {
                        ctx.rotate_deg(90.0, Vec3::X);
                    }
                }
            });
        });
        drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_centred() {
        let layout = DiceDotLayout::new(7.0);
        let one = layout.face_offsets(1);
        assert_eq!(one.len(), 1);
        assert!(one[0].length() < 1e-6);
    }

    #[test]
    fn out_of_range_value_has_no_dots() {
        assert!(dot_cells(0).is_empty());
        assert!(dot_cells(7).is_empty());
    }
}
