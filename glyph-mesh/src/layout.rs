//! Horizontal placement of glyphs along a line of text.
//!
//! The pen starts at zero and moves right by each glyph's advance. Pair
//! kerning moves it before a glyph is placed, and the side bearing deltas
//! produced by hinting are used to nudge the pen by a pixel when rounding
//! the previous glyph's right edge and the current glyph's left edge would
//! otherwise open or close a visible gap.

use std::{iter::Enumerate, str::Chars};

use kurbo::Vec2;

use crate::{
    source::{GlyphOutline, OutlineSource},
    Error,
};

/// Pen position and the state carried from one glyph to the next.
///
/// A fresh pen is created for every line of text.
#[derive(Copy, Clone, PartialEq, Default, Debug)]
pub struct PenState {
    offset: f64,
    previous_glyph: u32,
    previous_rsb_delta: i32,
}

impl PenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current horizontal pen position in pixels.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Places a glyph and advances the pen past it, returning the x offset
    /// at which the glyph should be drawn.
    pub fn place<S: OutlineSource + ?Sized>(
        &mut self,
        source: &S,
        glyph_id: u32,
        outline: &GlyphOutline,
    ) -> f64 {
        if self.previous_glyph != 0 && source.has_kerning() {
            let kerning = source.kerning(self.previous_glyph, glyph_id);
            if kerning != 0 {
                log::trace!(
                    "kerning {} -> {glyph_id}: {}px",
                    self.previous_glyph,
                    kerning >> 6
                );
            }
            self.offset += (kerning >> 6) as f64;
        }
        let bearing = self.previous_rsb_delta - outline.lsb_delta;
        if bearing >= 32 {
            log::trace!("glyph {glyph_id}: bearing delta {bearing}, pulling left");
            self.offset -= 1.0;
        } else if bearing < -32 {
            log::trace!("glyph {glyph_id}: bearing delta {bearing}, pushing right");
            self.offset += 1.0;
        }
        let x_offset = self.offset;
        self.offset += (outline.advance / 64) as f64;
        self.previous_glyph = glyph_id;
        self.previous_rsb_delta = outline.rsb_delta;
        x_offset
    }
}

/// A glyph loaded and positioned on the line.
#[derive(Clone, PartialEq, Debug)]
pub struct PlacedGlyph {
    pub ch: char,
    /// Index of the character in the text, counted in `char`s.
    pub position: usize,
    pub glyph_id: u32,
    pub x_offset: f64,
    /// Outline with contours already moved to `x_offset`.
    pub outline: GlyphOutline,
}

/// Iterator that loads and positions the glyph for each character of a
/// string.
///
/// The source must already be sized. Iteration stops after the first
/// error.
pub struct Layout<'a, S: ?Sized> {
    source: &'a mut S,
    chars: Enumerate<Chars<'a>>,
    bezier_steps: u32,
    pen: PenState,
    failed: bool,
}

impl<'a, S: OutlineSource + ?Sized> Layout<'a, S> {
    pub fn new(source: &'a mut S, text: &'a str, bezier_steps: u32) -> Self {
        Self {
            source,
            chars: text.chars().enumerate(),
            bezier_steps,
            pen: PenState::new(),
            failed: false,
        }
    }

    /// Current pen position. After the last glyph this is the advance of
    /// the whole line.
    pub fn pen_offset(&self) -> f64 {
        self.pen.offset()
    }

    fn place_next(&mut self, position: usize, ch: char) -> Result<PlacedGlyph, Error> {
        let glyph_id = self.source.glyph_index(ch);
        let mut outline = self
            .source
            .load_glyph(glyph_id, self.bezier_steps)
            .map_err(|e| Error::glyph(e, ch, position, glyph_id))?;
        let x_offset = self.pen.place(&*self.source, glyph_id, &outline);
        let shift = Vec2::new(x_offset, 0.0);
        for point in outline.contours.iter_mut().flatten() {
            *point += shift;
        }
        log::debug!(
            "placed {ch:?} (glyph {glyph_id}) at {x_offset} with {} contour(s)",
            outline.contours.len()
        );
        Ok(PlacedGlyph {
            ch,
            position,
            glyph_id,
            x_offset,
            outline,
        })
    }
}

impl<S: OutlineSource + ?Sized> Iterator for Layout<'_, S> {
    type Item = Result<PlacedGlyph, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let (position, ch) = self.chars.next()?;
        let result = self.place_next(position, ch);
        self.failed = result.is_err();
        Some(result)
    }
}
