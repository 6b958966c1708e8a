//! Error type for rasterization.

use std::path::PathBuf;

use skrifa::{outline::DrawError, raw::ReadError};
use thiserror::Error;

use crate::source::GlyphLoadError;

/// Errors that may occur when loading a font or rasterizing text.
///
/// Any failure to load a glyph aborts the whole call: skipping a character
/// would break the one-result-per-character contract of
/// [`Rasterizer::rasterize_text`](crate::Rasterizer::rasterize_text).
#[derive(Debug, Error)]
pub enum Error {
    #[error("Error reading font data: {0}")]
    InvalidFont(ReadError),

    #[error("Font does not contain scalable glyph outlines")]
    NoOutlines,

    #[error("Failed to prepare hinting: {0}")]
    Hinting(DrawError),

    #[error("Face index {index} is out of range for a file with {count} face(s)")]
    FaceIndex { index: usize, count: usize },

    #[error("Unable to open font file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load glyph {glyph_id} for {ch:?} at position {position}: {source}")]
    GlyphLoad {
        ch: char,
        position: usize,
        glyph_id: u32,
        #[source]
        source: GlyphLoadError,
    },

    #[error("Glyph {glyph_id} for {ch:?} at position {position} is not a scalable outline")]
    UnsupportedGlyphFormat {
        ch: char,
        position: usize,
        glyph_id: u32,
    },

    #[cfg(feature = "freetype")]
    #[error("FreeType error: {0}")]
    FreeType(#[from] freetype::Error),
}

impl Error {
    /// Attaches the character and its position in the input to a glyph
    /// loading failure.
    pub(crate) fn glyph(source: GlyphLoadError, ch: char, position: usize, glyph_id: u32) -> Self {
        match source {
            GlyphLoadError::NotScalable(_) => Self::UnsupportedGlyphFormat {
                ch,
                position,
                glyph_id,
            },
            source => Self::GlyphLoad {
                ch,
                position,
                glyph_id,
                source,
            },
        }
    }
}
