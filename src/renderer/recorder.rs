//! Command recorder.
//!
//! A [`RenderDevice`] that keeps every submission instead of drawing it.
//! Each command stores the full [`DrawState`] it was issued with, which makes
//! pass order and blend/cull invariants observable without a GPU.

use crate::errors::{Board3dError, Result};
use crate::renderer::context::{BlendFunc, CullFace, DrawState};
use crate::renderer::device::{
    ClearFlags, ModelKind, PixelRect, Primitive, RenderDevice, TextRequest,
};
use crate::renderer::pipeline_key::{PipelineKeyCache, PipelineStateKey};
use crate::resources::material::Material;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Clear(ClearFlags),
    Model {
        kind: ModelKind,
        material: Option<Material>,
        state: DrawState,
    },
    Primitive {
        primitive: Primitive,
        state: DrawState,
    },
    Text {
        request: TextRequest,
        state: DrawState,
    },
    PushGroup(String),
    PopGroup,
}

impl Command {
    #[must_use]
    pub fn state(&self) -> Option<&DrawState> {
        match self {
            Self::Model { state, .. }
            | Self::Primitive { state, .. }
            | Self::Text { state, .. } => Some(state),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<Command>,
    /// Byte written for every pixel `read_pixels` returns.
    pub fill: u8,
}

impl CommandRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Labels of the outermost debug groups, in submission order.
    #[must_use]
    pub fn top_level_groups(&self) -> Vec<&str> {
        let mut depth = 0usize;
        let mut labels = Vec::new();
        for command in &self.commands {
            match command {
                Command::PushGroup(label) => {
                    if depth == 0 {
                        labels.push(label.as_str());
                    }
                    depth += 1;
                }
                Command::PopGroup => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        labels
    }

    /// Commands issued inside every group named `label` (nested groups
    /// included).
    #[must_use]
    pub fn group(&self, label: &str) -> Vec<&Command> {
        let mut out = Vec::new();
        let mut inside: Option<usize> = None;
        let mut depth = 0usize;
        for command in &self.commands {
            match command {
                Command::PushGroup(name) => {
                    depth += 1;
                    if inside.is_none() && name == label {
                        inside = Some(depth);
                        continue;
                    }
                }
                Command::PopGroup => {
                    if inside == Some(depth) {
                        inside = None;
                        depth = depth.saturating_sub(1);
                        continue;
                    }
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            }
            if inside.is_some() {
                out.push(command);
            }
        }
        out
    }

    /// Draw states of every `kind` model submission, in order.
    #[must_use]
    pub fn model_states(&self, kind: ModelKind) -> Vec<&DrawState> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Model { kind: k, state, .. } if *k == kind => Some(state),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn count_models(&self, kind: ModelKind) -> usize {
        self.model_states(kind).len()
    }

    /// Model submissions drawn with front faces culled.
    #[must_use]
    pub fn back_face_draws(&self, kind: ModelKind) -> usize {
        self.model_states(kind)
            .into_iter()
            .filter(|s| s.pipeline.cull_face == CullFace::Front)
            .count()
    }

    /// Primitives drawn with blending enabled under `func`.
    #[must_use]
    pub fn primitives_with_blend(&self, func: BlendFunc) -> Vec<&Primitive> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Primitive { primitive, state }
                    if state.pipeline.blend && state.pipeline.blend_func == func =>
                {
                    Some(primitive)
                }
                _ => None,
            })
            .collect()
    }

    /// Number of distinct `wgpu` pipelines a backend would need to replay
    /// the recorded geometry.
    #[must_use]
    pub fn distinct_pipelines(&self) -> usize {
        let mut cache = PipelineKeyCache::new();
        for command in &self.commands {
            match command {
                Command::Model { state, .. } => {
                    cache.get_or_insert(PipelineStateKey::for_model(state));
                }
                Command::Primitive { primitive, state } => {
                    cache.get_or_insert(PipelineStateKey::for_primitive(state, primitive.topology));
                }
                _ => {}
            }
        }
        cache.len()
    }

    #[must_use]
    pub fn texts(&self) -> Vec<&TextRequest> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Text { request, .. } => Some(request),
                _ => None,
            })
            .collect()
    }
}

impl RenderDevice for CommandRecorder {
    fn clear(&mut self, flags: ClearFlags) {
        self.commands.push(Command::Clear(flags));
    }

    fn draw_model(&mut self, kind: ModelKind, material: Option<&Material>, state: &DrawState) {
        self.commands.push(Command::Model {
            kind,
            material: material.copied(),
            state: *state,
        });
    }

    fn draw_primitive(&mut self, primitive: &Primitive, state: &DrawState) {
        self.commands.push(Command::Primitive {
            primitive: primitive.clone(),
            state: *state,
        });
    }

    fn draw_text(&mut self, request: &TextRequest, state: &DrawState) {
        self.commands.push(Command::Text {
            request: request.clone(),
            state: *state,
        });
    }

    fn read_pixels(&mut self, rect: PixelRect, out: &mut [u8]) -> Result<()> {
        let needed = rect.rgb_len();
        if out.len() < needed {
            return Err(Board3dError::ReadPixels(format!(
                "buffer holds {} bytes, {needed} needed",
                out.len()
            )));
        }
        out[..needed].fill(self.fill);
        Ok(())
    }

    fn push_debug_group(&mut self, label: &str) {
        self.commands.push(Command::PushGroup(label.to_owned()));
    }

    fn pop_debug_group(&mut self) {
        self.commands.push(Command::PopGroup);
    }
}
