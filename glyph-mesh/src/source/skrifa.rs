//! Outline source built on skrifa.

use skrifa::{
    charmap::Charmap,
    outline::{DrawSettings, Engine, HintingInstance, HintingOptions, OutlineGlyphFormat},
    prelude::{LocationRef, Size},
    raw::{FontRef, TableProvider},
    GlyphId, MetadataProvider, OutlineGlyphCollection,
};

use super::{
    char_size, kern::fit_kerning, to_f26dot6, FillOrientation, FontData, GlyphLoadError,
    GlyphOutline, Hinting, KernTable, OutlineSource, SourceOptions,
};
use crate::{pen::FlatteningPen, Error};

/// Pure Rust outline source.
///
/// Outlines are loaded with skrifa and kerning is read from the legacy
/// `kern` table. When the automatic hinter is in use, side bearing deltas
/// are the rounding leftovers of snapping the hinted edges back to the
/// pixel grid, derived by comparing the hinted and unhinted outlines.
pub struct SkrifaSource<'a> {
    font: FontRef<'a>,
    charmap: Charmap<'a>,
    outlines: OutlineGlyphCollection<'a>,
    orientation: FillOrientation,
    kern: Option<KernTable<'a>>,
    units_per_em: u16,
    glyph_count: u32,
    hinting: Hinting,
    autohinted: bool,
    char_size: i64,
    size: Size,
    hinter: Option<HintingInstance>,
}

impl<'a> SkrifaSource<'a> {
    /// Creates a source for the face selected by `options.index`.
    pub fn new(data: &'a FontData, options: &SourceOptions) -> Result<Self, Error> {
        data.check_index(options.index)?;
        let font =
            FontRef::from_index(data.as_bytes(), options.index as u32).map_err(Error::InvalidFont)?;
        Self::from_font(font, options.hinting)
    }

    /// Creates a source from an already parsed font.
    pub fn from_font(font: FontRef<'a>, hinting: Hinting) -> Result<Self, Error> {
        let outlines = font.outline_glyphs();
        let orientation = outlines
            .format()
            .map(fill_orientation)
            .ok_or(Error::NoOutlines)?;
        let units_per_em = font.head().map_err(Error::InvalidFont)?.units_per_em();
        let glyph_count = font.maxp().map_err(Error::InvalidFont)?.num_glyphs() as u32;
        let kern = font.kern().ok().and_then(KernTable::new);
        let autohinted = match hinting {
            Hinting::Auto => true,
            Hinting::Default => !outlines.prefer_interpreter(),
            Hinting::None | Hinting::Native => false,
        };
        log::debug!(
            "skrifa source: {orientation:?} outlines, {units_per_em} upem, kerning: {}",
            kern.is_some()
        );
        Ok(Self {
            charmap: font.charmap(),
            font,
            outlines,
            orientation,
            kern,
            units_per_em,
            glyph_count,
            hinting,
            autohinted,
            char_size: 0,
            size: Size::unscaled(),
            hinter: None,
        })
    }

    pub fn hinting(&self) -> Hinting {
        self.hinting
    }
}

fn fill_orientation(format: OutlineGlyphFormat) -> FillOrientation {
    match format {
        OutlineGlyphFormat::Glyf => FillOrientation::Clockwise,
        OutlineGlyphFormat::Cff | OutlineGlyphFormat::Cff2 => FillOrientation::CounterClockwise,
    }
}

fn hinting_options(hinting: Hinting) -> Option<HintingOptions> {
    let engine = match hinting {
        Hinting::None => return None,
        Hinting::Native => Engine::Interpreter,
        Hinting::Auto => Engine::Auto(None),
        Hinting::Default => Engine::AutoFallback,
    };
    Some(HintingOptions {
        engine,
        ..Default::default()
    })
}

/// Computes the side bearing deltas of an autohinted glyph in 26.6.
///
/// `hinted` and `original` are the horizontal extents of the outline and
/// `advances` the hinted and unhinted advance widths, all in pixels.
///
/// The hinter moves the left edge of the glyph and then snaps the origin so
/// the original left side bearing is kept as closely as the pixel grid
/// allows. The delta is what that rounding lost. The right side is handled
/// the same way against the advance.
fn side_bearing_deltas(
    hinted: (f32, f32),
    original: (f32, f32),
    (hinted_advance, advance): (f32, f32),
) -> (i32, i32) {
    let lsb_delta = to_f26dot6(original.0) - to_f26dot6(hinted.0);
    let rsb_delta = (to_f26dot6(hinted_advance) - to_f26dot6(advance))
        - (to_f26dot6(hinted.1) - to_f26dot6(original.1));
    (lsb_delta.clamp(-32, 32), rsb_delta.clamp(-32, 32))
}

impl OutlineSource for SkrifaSource<'_> {
    fn set_height(&mut self, height_px: u32) -> Result<(), Error> {
        self.char_size = char_size(height_px);
        self.size = Size::new(self.char_size as f32 / 64.0);
        self.hinter = match hinting_options(self.hinting) {
            Some(options) => Some(
                HintingInstance::new(&self.outlines, self.size, LocationRef::default(), options)
                    .map_err(Error::Hinting)?,
            ),
            None => None,
        };
        Ok(())
    }

    fn glyph_index(&self, ch: char) -> u32 {
        self.charmap.map(ch).map(|gid| gid.to_u32()).unwrap_or(0)
    }

    fn load_glyph(
        &mut self,
        glyph_id: u32,
        bezier_steps: u32,
    ) -> Result<GlyphOutline, GlyphLoadError> {
        let gid = GlyphId::new(glyph_id);
        let glyph = self.outlines.get(gid).ok_or(if glyph_id < self.glyph_count {
            GlyphLoadError::NotScalable(glyph_id)
        } else {
            GlyphLoadError::NotFound(glyph_id)
        })?;
        let location = LocationRef::default();
        let unhinted = DrawSettings::unhinted(self.size, location);
        let mut pen = FlatteningPen::new(bezier_steps);
        let mut outline = GlyphOutline {
            orientation: self.orientation,
            ..Default::default()
        };
        let advance = match &self.hinter {
            Some(hinter) => {
                let metrics = glyph
                    .draw(DrawSettings::hinted(hinter, false), &mut pen)
                    .map_err(GlyphLoadError::Draw)?;
                if self.autohinted {
                    let mut reference = FlatteningPen::new(bezier_steps);
                    let original = glyph
                        .draw(unhinted, &mut reference)
                        .map_err(GlyphLoadError::Draw)?;
                    let advance = original.advance_width.or_else(|| {
                        self.font
                            .glyph_metrics(self.size, location)
                            .advance_width(gid)
                    });
                    let advances = metrics.advance_width.zip(advance);
                    if let (Some(hinted), Some(original), Some(advances)) =
                        (pen.x_range(), reference.x_range(), advances)
                    {
                        (outline.lsb_delta, outline.rsb_delta) =
                            side_bearing_deltas(hinted, original, advances);
                    }
                }
                metrics.advance_width
            }
            None => {
                glyph
                    .draw(unhinted, &mut pen)
                    .map_err(GlyphLoadError::Draw)?;
                None
            }
        };
        let advance = advance
            .or_else(|| {
                self.font
                    .glyph_metrics(self.size, location)
                    .advance_width(gid)
            })
            .unwrap_or_default();
        outline.advance = to_f26dot6(advance);
        outline.contours = pen.into_contours();
        Ok(outline)
    }

    fn has_kerning(&self) -> bool {
        self.kern.is_some()
    }

    fn kerning(&self, left: u32, right: u32) -> i32 {
        self.kern
            .as_ref()
            .map(|kern| fit_kerning(kern.kerning(left, right), self.char_size, self.units_per_em))
            .unwrap_or(0)
    }
}
