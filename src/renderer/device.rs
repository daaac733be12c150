//! Device seam.
//!
//! [`RenderDevice`] is the immediate pipeline the board renderer submits to.
//! Precompiled meshes are referenced by [`ModelKind`]; everything the core
//! builds itself (points, outlines, dots, flag cloth) goes through
//! [`Primitive`]. Every call carries the [`DrawState`] it must be drawn with,
//! so implementations never depend on state left behind by earlier calls.

use bitflags::bitflags;
use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use smallvec::SmallVec;

use crate::errors::Result;
use crate::renderer::context::DrawState;
use crate::resources::material::Material;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u32 {
        const COLOR   = 1 << 0;
        const DEPTH   = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

/// Precompiled meshes owned by the model layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    TableBase,
    Table,
    Piece,
    PieceTop,
    Dice,
    DoubleCube,
    HingeGap,
    Hinge,
    FlagPole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    Lines,
    LineStrip,
    LineLoop,
    Triangles,
    TriangleStrip,
    TriangleFan,
}

impl Topology {
    #[inline]
    #[must_use]
    pub fn is_lines(self) -> bool {
        matches!(self, Self::Lines | Self::LineStrip | Self::LineLoop)
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
}

impl Vertex {
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: [0.0, 0.0, 1.0],
            tex_coord: [0.0, 0.0],
        }
    }

    #[must_use]
    pub fn with_tex(mut self, uv: Vec2) -> Self {
        self.tex_coord = uv.to_array();
        self
    }

    #[must_use]
    pub fn with_normal(mut self, normal: Vec3) -> Self {
        self.normal = normal.to_array();
        self
    }

    #[inline]
    #[must_use]
    pub fn pos(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

pub type VertexList = SmallVec<[Vertex; 16]>;

/// Geometry built on the fly by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub topology: Topology,
    pub vertices: VertexList,
}

impl Primitive {
    #[must_use]
    pub fn new(topology: Topology) -> Self {
        Self {
            topology,
            vertices: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn from_points(topology: Topology, points: impl IntoIterator<Item = Vec3>) -> Self {
        Self {
            topology,
            vertices: points.into_iter().map(Vertex::new).collect(),
        }
    }

    pub fn push(&mut self, vertex: Vertex) -> &mut Self {
        self.vertices.push(vertex);
        self
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Re-expresses the primitive in the list/strip topologies a modern
    /// pipeline supports: fans become triangle lists and loops are closed
    /// into strips.
    #[must_use]
    pub fn to_list(&self) -> Self {
        match self.topology {
            Topology::TriangleFan if self.vertices.len() >= 3 => {
                let hub = self.vertices[0];
                let mut vertices = VertexList::with_capacity((self.vertices.len() - 2) * 3);
                for pair in self.vertices[1..].windows(2) {
                    vertices.extend([hub, pair[0], pair[1]]);
                }
                Self {
                    topology: Topology::Triangles,
                    vertices,
                }
            }
            Topology::LineLoop if !self.vertices.is_empty() => {
                let mut vertices = self.vertices.clone();
                vertices.push(self.vertices[0]);
                Self {
                    topology: Topology::LineStrip,
                    vertices,
                }
            }
            _ => self.clone(),
        }
    }
}

/// Font a numeral is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontKind {
    PointNumbers,
    Cube,
    Flag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextStyle {
    Solid,
    /// Smoothed glyph outline drawn over a solid pass.
    Outline,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextRequest {
    pub font: FontKind,
    pub text: String,
    pub scale: f32,
    pub style: TextStyle,
}

impl TextRequest {
    #[must_use]
    pub fn new(font: FontKind, text: impl Into<String>, scale: f32, style: TextStyle) -> Self {
        Self {
            font,
            text: text.into(),
            scale,
            style,
        }
    }
}

/// Framebuffer region in pixels, origin bottom-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Bytes an RGB8 read of this rectangle needs.
    #[inline]
    #[must_use]
    pub fn rgb_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}

pub trait RenderDevice {
    fn clear(&mut self, flags: ClearFlags);

    /// Draws a precompiled mesh. `material` is bound first when given;
    /// `None` draws with whatever the device last bound.
    fn draw_model(&mut self, kind: ModelKind, material: Option<&Material>, state: &DrawState);

    fn draw_primitive(&mut self, primitive: &Primitive, state: &DrawState);

    fn draw_text(&mut self, request: &TextRequest, state: &DrawState);

    /// Reads RGB8 pixels of `rect` into `out`, rows bottom-to-top.
    fn read_pixels(&mut self, rect: PixelRect, out: &mut [u8]) -> Result<()>;

    fn push_debug_group(&mut self, _label: &str) {}

    fn pop_debug_group(&mut self) {}
}
