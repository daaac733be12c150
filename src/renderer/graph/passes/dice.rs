//! Dice pass.
//!
//! A die is its body model plus dots composited in two passes: the dot shape
//! is first punched out of whatever is already on screen with a white mask
//! (`Zero`, `OneMinusSrcColor`), then filled additively with the dot
//! material (`One`, `One`). This keeps dot colours true against any die body
//! colour. A translucent die also gets its far half and far dots drawn
//! first, with front faces culled and an inverted blend.

use glam::Vec3;

use crate::renderer::aa;
use crate::renderer::context::{BlendFunc, CullFace, RenderContext};
use crate::renderer::device::{ModelKind, RenderDevice};
use crate::renderer::dots::DiceDotLayout;
use crate::renderer::graph::frame::FrameInputs;
use crate::resources::material::Material;
use crate::scene::dice::{opposite_face, DieFaceConfig, DotPass, DIE_FACES};

/// Quarter turns about `x` then `y` that bring each value (1..=6) to the top.
const DIE_ORIENTATION: [[u8; 2]; 6] = [[0, 0], [0, 1], [3, 0], [1, 0], [0, 3], [2, 0]];

/// Outward normal of each face in die space, in the frame the dot walk
/// starts from.
const FACE_NORMALS: [Vec3; DIE_FACES] = [
    Vec3::Z,
    Vec3::NEG_X,
    Vec3::NEG_Y,
    Vec3::Y,
    Vec3::X,
    Vec3::NEG_Z,
];

/// Applies the resting orientation for `value` to the model-view.
pub fn orient_die(ctx: &mut RenderContext, value: u8) {
    let [x_turns, y_turns] = DIE_ORIENTATION[usize::from(value.clamp(1, 6) - 1)];
    ctx.rotate_deg(90.0 * f32::from(x_turns), Vec3::X);
    ctx.rotate_deg(90.0 * f32::from(y_turns), Vec3::Y);
}

/// Face layout of a resting die showing `value`, as seen through the current
/// model-view.
///
/// The model-view must already carry the die's placement and
/// [`orient_die`]. The two sides turned towards the eye become `side[0]` and
/// `side[1]`; when the eye sits straight above the die, screen-down decides.
#[must_use]
pub fn resting_faces(ctx: &RenderContext, value: u8) -> DieFaceConfig {
    let top = value.clamp(1, 6) - 1;
    let up = FACE_NORMALS[usize::from(top)];
    let flatten = |v: Vec3| v - up * v.dot(up);

    let inverse = ctx.model_view().inverse();
    let mut towards = flatten(inverse.transform_point3(Vec3::ZERO));
    if !towards.is_finite() || towards.length_squared() < 1e-6 {
        towards = flatten(inverse.transform_vector3(Vec3::NEG_Y));
    }
    if !towards.is_finite() || towards.length_squared() < 1e-6 {
        return DieFaceConfig::showing(value);
    }

    let facing = |exclude: &[u8]| {
        (0..DIE_FACES as u8)
            .filter(|f| !exclude.contains(f))
            .max_by(|a, b| {
                let da = FACE_NORMALS[usize::from(*a)].dot(towards);
                let db = FACE_NORMALS[usize::from(*b)].dot(towards);
                da.total_cmp(&db)
            })
            .unwrap_or(0)
    };
    let bottom = opposite_face(top);
    let near = facing(&[top, bottom]);
    let beside = facing(&[top, bottom, near, opposite_face(near)]);
    DieFaceConfig {
        top,
        bottom,
        side: [near, beside, opposite_face(near), opposite_face(beside)],
    }
}

/// Far half of a translucent die and the dots seen through it.
///
/// Leaves blending enabled so the near half composites over the far one.
pub fn draw_back_die(
    device: &mut dyn RenderDevice,
    ctx: &mut RenderContext,
    frame: &FrameInputs<'_>,
    faces: &DieFaceConfig,
    body: &Material,
    dot: &Material,
) -> usize {
    ctx.set_cull_face(CullFace::Front);
    ctx.set_blend(true);
    device.draw_model(ModelKind::Dice, Some(body), &ctx.draw_state());

    ctx.set_material(&dot.matte());
    ctx.set_blend(true);
    ctx.set_blend_func(BlendFunc::INVERTED);
    let drawn = DiceDotLayout::new(frame.config.dice_size).draw(
        device,
        ctx,
        faces,
        DotPass::Back,
        frame.scene.shaking_dice,
        -frame.layout.lift_off,
    );
    ctx.set_blend_func(BlendFunc::ALPHA);
    ctx.set_cull_face(CullFace::Back);
    drawn
}

/// Mask-then-fill compositing of the dots on the faces turned to the
/// viewer. Returns the number of dot quads drawn per fill.
pub fn draw_front_dots(
    device: &mut dyn RenderDevice,
    ctx: &mut RenderContext,
    frame: &FrameInputs<'_>,
    faces: &DieFaceConfig,
    dot: &Material,
) -> usize {
    let layout = DiceDotLayout::new(frame.config.dice_size);
    let shaking = frame.scene.shaking_dice;
    let lift = frame.layout.lift_off;

    ctx.set_blend(true);
    ctx.set_material(&Material::solid(1.0, 1.0, 1.0).matte());
    ctx.set_blend_func(BlendFunc::MASK);
    let masked = layout.draw(device, ctx, faces, DotPass::Front, shaking, lift);

    ctx.set_material(&dot.matte());
    ctx.set_blend_func(BlendFunc::ADDITIVE);
    let filled = layout.draw(device, ctx, faces, DotPass::Front, shaking, lift);
    debug_assert_eq!(masked, filled);

    ctx.set_blend(false);
    ctx.set_blend_func(BlendFunc::ALPHA);
    filled
}

/// Draws die `index`.
pub fn draw_die(
    device: &mut dyn RenderDevice,
    ctx: &mut RenderContext,
    frame: &FrameInputs<'_>,
    index: usize,
) {
    let config = frame.config;
    let die = &frame.scene.dice[index];
    let side = usize::from(frame.board.turn == 1);
    let body = config.dice_materials[side];
    let dot = config.dice_dot_materials[side];

    ctx.with_matrix(|ctx| {
        ctx.translate(die.position);
        ctx.rotate_deg(die.rotation, Vec3::Z);
        let value = frame.board.die_value(index);
        orient_die(ctx, value);
        let faces = resting_faces(ctx, value);

        if body.alpha_blend {
            draw_back_die(device, ctx, frame, &faces, &body, &dot);
        }

        ctx.set_material(&body);
        device.draw_model(ModelKind::Dice, Some(&body), &ctx.draw_state());

        if config.edge_smoothing.uses_overlay() {
            aa::die_outline(
                device,
                ctx,
                config.dice_size,
                frame.layout.lift_off,
                config.curve_segments(),
            );
        }

        let dots = draw_front_dots(device, ctx, frame, &faces, &dot);
        log::trace!("die {index}: {dots} front dots");
    });
}

pub fn run(device: &mut dyn RenderDevice, ctx: &mut RenderContext, frame: &FrameInputs<'_>) {
    draw_die(device, ctx, frame, 0);
    draw_die(device, ctx, frame, 1);
}
