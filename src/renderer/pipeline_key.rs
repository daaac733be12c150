//! Pipeline state keys.
//!
//! The board renderer tracks state the way a fixed-function pipeline does:
//! toggles flipped between draws. A `wgpu` backend needs that state baked into
//! pipeline objects instead. [`PipelineStateKey`] extracts the fields of a
//! [`DrawState`] that affect pipeline identity, in `wgpu` terms, with the
//! `Hash`/`Eq` impls `wgpu` descriptor types lack.
//!
//! [`PipelineKeyCache`] assigns a stable id per distinct key so a backend
//! creates each pipeline once.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHashMap;

use crate::renderer::context::{
    BlendFactor, BlendFunc, CullFace, DepthFunc, DrawState, PipelineState, PolygonMode,
};
use crate::renderer::device::Topology;

// ─── Conversions ─────────────────────────────────────────────────────────────

impl From<BlendFactor> for wgpu::BlendFactor {
    fn from(f: BlendFactor) -> Self {
        match f {
            BlendFactor::Zero => Self::Zero,
            BlendFactor::One => Self::One,
            BlendFactor::SrcColor => Self::Src,
            BlendFactor::OneMinusSrcColor => Self::OneMinusSrc,
            BlendFactor::DstColor => Self::Dst,
            BlendFactor::OneMinusDstColor => Self::OneMinusDst,
            BlendFactor::SrcAlpha => Self::SrcAlpha,
            BlendFactor::OneMinusSrcAlpha => Self::OneMinusSrcAlpha,
        }
    }
}

impl From<BlendFunc> for wgpu::BlendState {
    fn from(func: BlendFunc) -> Self {
        let component = wgpu::BlendComponent {
            src_factor: func.src.into(),
            dst_factor: func.dst.into(),
            operation: wgpu::BlendOperation::Add,
        };
        Self {
            color: component,
            alpha: component,
        }
    }
}

impl From<CullFace> for wgpu::Face {
    fn from(face: CullFace) -> Self {
        match face {
            CullFace::Front => Self::Front,
            CullFace::Back => Self::Back,
        }
    }
}

impl From<DepthFunc> for wgpu::CompareFunction {
    fn from(func: DepthFunc) -> Self {
        match func {
            DepthFunc::Less => Self::Less,
            DepthFunc::LessEqual => Self::LessEqual,
            DepthFunc::Equal => Self::Equal,
            DepthFunc::Always => Self::Always,
        }
    }
}

impl From<PolygonMode> for wgpu::PolygonMode {
    fn from(mode: PolygonMode) -> Self {
        match mode {
            PolygonMode::Fill => Self::Fill,
            PolygonMode::Line => Self::Line,
        }
    }
}

impl From<Topology> for wgpu::PrimitiveTopology {
    /// Fans and loops have no `wgpu` equivalent; submit them through
    /// [`Primitive::to_list`](crate::renderer::device::Primitive::to_list).
    fn from(t: Topology) -> Self {
        match t {
            Topology::Lines => Self::LineList,
            Topology::LineStrip | Topology::LineLoop => Self::LineStrip,
            Topology::Triangles | Topology::TriangleFan => Self::TriangleList,
            Topology::TriangleStrip => Self::TriangleStrip,
        }
    }
}

// ─── Hashable Mirror Types ───────────────────────────────────────────────────

/// Hashable mirror of `wgpu::BlendComponent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendComponentKey {
    pub src_factor: wgpu::BlendFactor,
    pub dst_factor: wgpu::BlendFactor,
    pub operation: wgpu::BlendOperation,
}

impl From<wgpu::BlendComponent> for BlendComponentKey {
    fn from(b: wgpu::BlendComponent) -> Self {
        Self {
            src_factor: b.src_factor,
            dst_factor: b.dst_factor,
            operation: b.operation,
        }
    }
}

impl From<BlendComponentKey> for wgpu::BlendComponent {
    fn from(k: BlendComponentKey) -> Self {
        Self {
            src_factor: k.src_factor,
            dst_factor: k.dst_factor,
            operation: k.operation,
        }
    }
}

/// Hashable mirror of `wgpu::BlendState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendStateKey {
    pub color: BlendComponentKey,
    pub alpha: BlendComponentKey,
}

impl From<wgpu::BlendState> for BlendStateKey {
    fn from(b: wgpu::BlendState) -> Self {
        Self {
            color: b.color.into(),
            alpha: b.alpha.into(),
        }
    }
}

impl From<BlendStateKey> for wgpu::BlendState {
    fn from(k: BlendStateKey) -> Self {
        Self {
            color: k.color.into(),
            alpha: k.alpha.into(),
        }
    }
}

/// Everything about a draw that selects a distinct `wgpu` render pipeline.
///
/// Disabled depth testing maps to `Always` with writes off, which is how
/// `wgpu` expresses it. Stencil and texture toggles are bind-time state and do
/// not participate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineStateKey {
    pub topology: wgpu::PrimitiveTopology,
    pub cull_mode: Option<wgpu::Face>,
    pub polygon_mode: wgpu::PolygonMode,
    pub blend: Option<BlendStateKey>,
    pub depth_compare: wgpu::CompareFunction,
    pub depth_write: bool,
    /// Line width bit pattern; only meaningful for line topologies.
    pub line_width_bits: u32,
}

impl PipelineStateKey {
    #[must_use]
    pub fn new(state: &PipelineState, topology: Topology) -> Self {
        let (depth_compare, depth_write) = if state.depth_test {
            (state.depth_func.into(), state.depth_write)
        } else {
            (wgpu::CompareFunction::Always, false)
        };
        let line_width_bits = if topology.is_lines() || state.polygon_mode == PolygonMode::Line {
            state.line_width.to_bits()
        } else {
            0
        };
        Self {
            topology: topology.into(),
            cull_mode: Some(state.cull_face.into()),
            polygon_mode: state.polygon_mode.into(),
            blend: state
                .blend
                .then(|| wgpu::BlendState::from(state.blend_func).into()),
            depth_compare,
            depth_write,
            line_width_bits,
        }
    }

    /// Key for a precompiled mesh, which is always a triangle list.
    #[must_use]
    pub fn for_model(state: &DrawState) -> Self {
        Self::new(&state.pipeline, Topology::Triangles)
    }

    #[must_use]
    pub fn for_primitive(state: &DrawState, topology: Topology) -> Self {
        Self::new(&state.pipeline, topology)
    }

    #[must_use]
    pub fn blend_state(&self) -> Option<wgpu::BlendState> {
        self.blend.map(Into::into)
    }

    #[must_use]
    pub fn primitive_state(&self) -> wgpu::PrimitiveState {
        wgpu::PrimitiveState {
            topology: self.topology,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: self.cull_mode,
            polygon_mode: self.polygon_mode,
            ..Default::default()
        }
    }
}

// ─── Cache ───────────────────────────────────────────────────────────────────

/// Assigns a dense id to every distinct [`PipelineStateKey`].
///
/// Lookups go through the key's Fx hash, as a pipeline cache does before
/// compiling anything.
#[derive(Debug, Default)]
pub struct PipelineKeyCache {
    ids: FxHashMap<u64, u32>,
}

impl PipelineKeyCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for `key`, allocating the next one on first sight.
    pub fn get_or_insert(&mut self, key: PipelineStateKey) -> u32 {
        let hash = fx_hash_key(&key);
        let next = self.ids.len() as u32;
        *self.ids.entry(hash).or_insert(next)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Compute a `u64` hash of any `Hash`-able value using `FxHasher`.
#[inline]
pub fn fx_hash_key<K: Hash>(key: &K) -> u64 {
    let mut hasher = rustc_hash::FxHasher::default();
    key.hash(&mut hasher);
    hasher.finish()
}
