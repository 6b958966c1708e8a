//! Glyph outline providers.
//!
//! An [`OutlineSource`] wraps a font face that has been sized for a
//! particular pixel height. It maps characters to glyphs, loads flattened
//! glyph outlines along with the metrics needed for layout, and reports
//! pair kerning.

use std::{
    borrow::Borrow,
    fs::File,
    path::Path,
    sync::Arc,
};

use ::skrifa::{outline::DrawError, raw::FileRef};
use kurbo::Point;
use thiserror::Error;

use crate::Error;

#[cfg(feature = "freetype")]
mod freetype;
mod kern;
mod skrifa;

pub use self::skrifa::SkrifaSource;
pub use crate::contour::FillOrientation;
pub use kern::KernTable;

#[cfg(feature = "freetype")]
pub use self::freetype::FreeTypeSource;

/// Resolution assumed when converting a character height to pixels per em.
pub const DPI: u32 = 96;

/// Interface to a font face that produces flattened glyph outlines.
///
/// Loading a glyph may update state held by the face, so every method that
/// loads takes `&mut self` and returns an owned [`GlyphOutline`]. A single
/// source must not be shared between concurrent rasterizations; create one
/// source per worker from a shared [`FontData`] instead.
pub trait OutlineSource {
    /// Configures the face for rendering at the given character height in
    /// pixels.
    ///
    /// The height is treated as a nominal character size at [`DPI`], so
    /// the resulting pixels per em value is `height * 96 / 72`.
    fn set_height(&mut self, height_px: u32) -> Result<(), Error>;

    /// Maps a character to a glyph identifier.
    ///
    /// Returns 0, the `.notdef` glyph, for unmapped characters.
    fn glyph_index(&self, ch: char) -> u32;

    /// Loads the outline for the given glyph, flattening each curve into
    /// `bezier_steps` line segments.
    fn load_glyph(&mut self, glyph_id: u32, bezier_steps: u32)
        -> Result<GlyphOutline, GlyphLoadError>;

    /// Returns true if the face provides pair kerning.
    fn has_kerning(&self) -> bool;

    /// Returns the grid fitted kerning adjustment between two glyphs in
    /// 26.6 fixed point units.
    fn kerning(&self, left: u32, right: u32) -> i32;
}

impl<T: OutlineSource + ?Sized> OutlineSource for &mut T {
    fn set_height(&mut self, height_px: u32) -> Result<(), Error> {
        (**self).set_height(height_px)
    }

    fn glyph_index(&self, ch: char) -> u32 {
        (**self).glyph_index(ch)
    }

    fn load_glyph(
        &mut self,
        glyph_id: u32,
        bezier_steps: u32,
    ) -> Result<GlyphOutline, GlyphLoadError> {
        (**self).load_glyph(glyph_id, bezier_steps)
    }

    fn has_kerning(&self) -> bool {
        (**self).has_kerning()
    }

    fn kerning(&self, left: u32, right: u32) -> i32 {
        (**self).kerning(left, right)
    }
}

/// Flattened outline and horizontal metrics of a single glyph.
#[derive(Clone, PartialEq, Default, Debug)]
pub struct GlyphOutline {
    /// Closed polylines in pixel units with y pointing up. The closing
    /// point is implied and not repeated.
    pub contours: Vec<Vec<Point>>,
    /// Winding convention for solid contours of this glyph.
    pub orientation: FillOrientation,
    /// Horizontal advance in 26.6 fixed point.
    pub advance: i32,
    /// Rounding error of the hinted left side bearing, in 26.6.
    pub lsb_delta: i32,
    /// Rounding error of the hinted right side bearing, in 26.6.
    pub rsb_delta: i32,
}

/// Errors that may occur when loading a single glyph.
#[derive(Debug, Error)]
pub enum GlyphLoadError {
    #[error("Glyph {0} was not found in the font")]
    NotFound(u32),

    #[error("Glyph {0} is not a scalable outline")]
    NotScalable(u32),

    #[error("{0}")]
    Draw(DrawError),

    #[cfg(feature = "freetype")]
    #[error("FreeType error: {0}")]
    FreeType(::freetype::Error),
}

/// Hinting mode used when loading outlines.
///
/// Side bearing deltas are only produced by the automatic hinter. They are
/// the leftovers of rounding the hinted side bearings to whole pixels and
/// always lie within half a pixel.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub enum Hinting {
    /// Outlines are scaled without hinting.
    None,
    /// The font's own TrueType or CFF hinting instructions.
    Native,
    /// The automatic hinter.
    Auto,
    /// Native hinting when the font has instructions, automatic otherwise.
    /// This is what FreeType does when no hinting flags are given.
    #[default]
    Default,
}

/// Options for creating an outline source.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct SourceOptions {
    /// Index of the face in a font collection. Zero for single fonts.
    pub index: usize,
    pub hinting: Hinting,
}

impl SourceOptions {
    pub fn new(index: usize, hinting: Hinting) -> Self {
        Self { index, hinting }
    }
}

/// Shared, immutable font file contents.
///
/// Cloning is cheap so each worker thread can build its own source from the
/// same data.
#[derive(Clone)]
pub struct FontData(Arc<Bytes>);

enum Bytes {
    Mapped(memmap2::Mmap),
    Owned(Vec<u8>),
    Static(&'static [u8]),
}

impl FontData {
    /// Memory maps the font file at the given path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let io_error = |source| Error::Io {
            path: path.to_owned(),
            source,
        };
        let file = File::open(path).map_err(io_error)?;
        // SAFETY: the mapping is read only. Modifying the file while it is
        // mapped is undefined behavior that we can't guard against.
        let map = unsafe { memmap2::Mmap::map(&file) }.map_err(io_error)?;
        Ok(Self(Arc::new(Bytes::Mapped(map))))
    }

    pub fn from_vec(data: Vec<u8>) -> Self {
        Self(Arc::new(Bytes::Owned(data)))
    }

    pub fn from_static(data: &'static [u8]) -> Self {
        Self(Arc::new(Bytes::Static(data)))
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self.0.as_ref() {
            Bytes::Mapped(map) => map.as_ref(),
            Bytes::Owned(data) => data,
            Bytes::Static(data) => data,
        }
    }

    /// Returns the number of faces in the file: 1 for a single font or the
    /// number of fonts in a collection.
    pub fn face_count(&self) -> Result<usize, Error> {
        match FileRef::new(self.as_bytes()).map_err(Error::InvalidFont)? {
            FileRef::Font(_) => Ok(1),
            FileRef::Collection(collection) => Ok(collection.len() as usize),
        }
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<(), Error> {
        let count = self.face_count()?;
        if index >= count {
            return Err(Error::FaceIndex { index, count });
        }
        Ok(())
    }
}

impl Borrow<[u8]> for FontData {
    fn borrow(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for FontData {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl std::fmt::Debug for FontData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("FontData")
            .field(&self.as_bytes().len())
            .finish()
    }
}

/// Returns the nominal character size in 26.6 fixed point for a height in
/// pixels, matching a request for `height` points at [`DPI`].
pub fn char_size(height_px: u32) -> i64 {
    (((height_px as i64) << 6) * DPI as i64 + 36) / 72
}

/// Converts a value in pixels to 26.6 fixed point.
pub(crate) fn to_f26dot6(px: f32) -> i32 {
    (px * 64.0).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_size_at_96_dpi() {
        // 64px at 96dpi is 85.33ppem
        assert_eq!(char_size(64), 5461);
        assert_eq!(char_size(12), 1024);
        assert_eq!(char_size(0), 0);
    }

    #[test]
    fn fixed_point_conversion() {
        assert_eq!(to_f26dot6(1.0), 64);
        assert_eq!(to_f26dot6(-0.5), -32);
        assert_eq!(to_f26dot6(42.6640625), 2731);
    }

    #[test]
    fn hinted_by_default() {
        assert_eq!(Hinting::default(), Hinting::Default);
        assert_eq!(SourceOptions::default().hinting, Hinting::Default);
    }

    #[test]
    fn face_count_rejects_garbage() {
        let data = FontData::from_static(b"definitely not a font");
        assert!(matches!(data.face_count(), Err(Error::InvalidFont(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = FontData::from_path("/nonexistent/font.ttf").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
