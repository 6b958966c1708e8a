//! Rasterizing text into triangle meshes.
//!
//! Glyph-mesh turns a string into a sequence of flat 2D triangle meshes, one
//! per character, that are ready to be extruded or engraved onto a 3D model
//! by some downstream consumer.
//!
//! The pipeline for each character is:
//!
//! 1. an [`OutlineSource`] loads the glyph outline and flattens its curves
//!    into polylines;
//! 2. the [contour classifier](contour::classify) sorts the polylines into
//!    solid boundaries and the holes they contain;
//! 3. each solid boundary and its holes are handed to a constrained
//!    Delaunay [triangulator](triangulate::triangulate);
//! 4. the [layout](layout) pen positions the result horizontally using
//!    advance widths, kerning and side bearing rounding corrections.
//!
//! Finally the [`Rasterizer`] shifts the whole result vertically so that no
//! vertex has a negative y coordinate.
//!
//! ```no_run
//! use glyph_mesh::{FontData, Rasterizer, SkrifaSource, SourceOptions};
//!
//! let data = FontData::from_path("DejaVuSans.ttf").unwrap();
//! let source = SkrifaSource::new(&data, &SourceOptions::default()).unwrap();
//! let mut rasterizer = Rasterizer::new(source);
//! let meshes = rasterizer.rasterize_text("AV", 64, 6).unwrap();
//! assert_eq!(meshes.len(), 2);
//! ```

pub mod contour;
mod error;
mod geometry;
pub mod layout;
mod pen;
mod rasterizer;
pub mod source;
pub mod triangulate;

pub use error::Error;
pub use geometry::{GlyphMesh, GlyphOutlines, OutlineContour, Triangle, Vertex};
pub use rasterizer::Rasterizer;
pub use source::{
    FillOrientation, FontData, GlyphLoadError, GlyphOutline, Hinting, OutlineSource,
    SkrifaSource, SourceOptions,
};

#[cfg(feature = "freetype")]
pub use source::FreeTypeSource;

/// Re-export of the point type used for contour coordinates.
pub use kurbo::Point;
