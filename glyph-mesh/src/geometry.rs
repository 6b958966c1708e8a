//! Output geometry types.

use bytemuck::{Pod, Zeroable};

use crate::contour::Winding;

/// Point in the output coordinate frame.
///
/// The z coordinate is always 0 for rasterized text; it exists so that
/// triangles can be handed directly to a 3D extrusion stage.
#[derive(Copy, Clone, PartialEq, Default, Debug, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(C)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vertex {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }
}

/// Single triangle of a glyph mesh.
///
/// This is `Pod` so a slice of triangles can be reinterpreted as a flat
/// `[f32]` buffer with nine values per triangle.
#[derive(Copy, Clone, PartialEq, Default, Debug, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(C)]
pub struct Triangle {
    pub a: Vertex,
    pub b: Vertex,
    pub c: Vertex,
}

impl Triangle {
    pub fn new(a: Vertex, b: Vertex, c: Vertex) -> Self {
        Self { a, b, c }
    }

    pub fn vertices(&self) -> [Vertex; 3] {
        [self.a, self.b, self.c]
    }

    /// Returns the smallest y coordinate of the three vertices.
    pub fn min_y(&self) -> f32 {
        self.a.y.min(self.b.y).min(self.c.y)
    }

    /// Returns the unsigned area of the triangle.
    pub fn area(&self) -> f32 {
        let Self { a, b, c } = self;
        ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)).abs() * 0.5
    }

    pub(crate) fn offset_y(&mut self, dy: f32) {
        self.a.y += dy;
        self.b.y += dy;
        self.c.y += dy;
    }
}

/// Triangles generated for a single character of the input text.
#[derive(Clone, PartialEq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GlyphMesh {
    /// The character this mesh was generated for.
    pub ch: char,
    /// Glyph identifier the character was mapped to. Zero for unmapped
    /// characters, which render as the font's `.notdef` glyph.
    pub glyph_id: u32,
    /// Horizontal pen position at which the glyph was placed.
    pub x_offset: f64,
    pub triangles: Vec<Triangle>,
}

/// A closed polyline in the output coordinate frame.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OutlineContour {
    pub winding: Winding,
    pub points: Vec<Vertex>,
}

/// Contours of a single character of the input text.
///
/// This is the outline counterpart of [`GlyphMesh`], produced by
/// [`Rasterizer::outline_text`](crate::Rasterizer::outline_text).
#[derive(Clone, PartialEq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GlyphOutlines {
    pub ch: char,
    pub glyph_id: u32,
    pub x_offset: f64,
    pub contours: Vec<OutlineContour>,
}
