//! Pair kerning from the [kern](https://docs.microsoft.com/en-us/typography/opentype/spec/kern) table.
//!
//! Only the OpenType (version 0) flavor of the table is supported and only
//! horizontal format 0 subtables are consulted. This matches the kerning
//! that FreeType reports for a face; the Apple flavor and GPOS based
//! kerning are ignored.

use skrifa::{
    raw::tables::kern::{Kern, Subtable, Subtable0, Subtable0Pair, SubtableKind},
    GlyphId,
};

/// Values are minimums rather than adjustments.
const COVERAGE_MINIMUM: u16 = 0x0002;
/// Values replace the accumulated value rather than adding to it.
const COVERAGE_OVERRIDE: u16 = 0x0008;

/// Horizontal pair kerning subtables of a legacy kerning table.
#[derive(Clone)]
pub struct KernTable<'a> {
    subtables: Vec<PairTable<'a>>,
}

#[derive(Clone)]
struct PairTable<'a> {
    pairs: Subtable0<'a>,
    is_override: bool,
    is_sorted: bool,
}

impl<'a> KernTable<'a> {
    /// Collects the usable subtables, returning `None` if there are none.
    pub fn new(kern: Kern<'a>) -> Option<Self> {
        if !matches!(kern, Kern::Ot(_)) {
            return None;
        }
        let subtables = kern
            .subtables()
            .map_while(Result::ok)
            .filter_map(PairTable::new)
            .collect::<Vec<_>>();
        (!subtables.is_empty()).then_some(Self { subtables })
    }

    /// Returns the kerning adjustment in font units for the given pair.
    ///
    /// Values from all subtables are summed, except that a subtable with
    /// the override flag replaces the sum so far.
    pub fn kerning(&self, left: u32, right: u32) -> i32 {
        let (left, right) = (GlyphId::new(left), GlyphId::new(right));
        let mut value = 0;
        for subtable in &self.subtables {
            if let Some(adjustment) = subtable.find(left, right) {
                if subtable.is_override {
                    value = adjustment;
                } else {
                    value += adjustment;
                }
            }
        }
        value
    }
}

impl std::fmt::Debug for KernTable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KernTable")
            .field("subtables", &self.subtables.len())
            .finish()
    }
}

impl<'a> PairTable<'a> {
    fn new(subtable: Subtable<'a>) -> Option<Self> {
        let Subtable::Ot(header) = &subtable else {
            return None;
        };
        let coverage = header.coverage();
        if coverage & COVERAGE_MINIMUM != 0
            || !subtable.is_horizontal()
            || subtable.is_cross_stream()
        {
            return None;
        }
        let SubtableKind::Format0(pairs) = subtable.kind().ok()? else {
            return None;
        };
        let is_sorted = pairs
            .pairs()
            .windows(2)
            .all(|pair| pair_key(&pair[0]) < pair_key(&pair[1]));
        Some(Self {
            pairs,
            is_override: coverage & COVERAGE_OVERRIDE != 0,
            is_sorted,
        })
    }

    fn find(&self, left: GlyphId, right: GlyphId) -> Option<i32> {
        if self.is_sorted {
            return self.pairs.kerning(left, right);
        }
        self.pairs
            .pairs()
            .iter()
            .find(|pair| {
                pair.left().to_u32() == left.to_u32() && pair.right().to_u32() == right.to_u32()
            })
            .map(|pair| pair.value() as i32)
    }
}

fn pair_key(pair: &Subtable0Pair) -> u32 {
    (pair.left().to_u32() << 16) | pair.right().to_u32()
}

/// Scales a kerning value in font units to a grid fitted 26.6 value.
///
/// `char_size` is the nominal size in 26.6. Small sizes reduce kerning
/// proportionally below 25 pixels per em, then the result is rounded to a
/// whole pixel.
pub(crate) fn fit_kerning(value: i32, char_size: i64, units_per_em: u16) -> i32 {
    if value == 0 || units_per_em == 0 {
        return 0;
    }
    let mut scaled = (value as f64 * char_size as f64 / units_per_em as f64).round();
    let ppem = (char_size + 32) >> 6;
    if ppem < 25 {
        scaled = (scaled * ppem as f64 / 25.0).round();
    }
    (scaled as i32 + 32) & !63
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyph_mesh_test_data::kern;
    use skrifa::raw::{FontData, FontRead};

    fn read(data: &'static [u8]) -> Option<KernTable<'static>> {
        Kern::read(FontData::new(data)).ok().and_then(KernTable::new)
    }

    #[test]
    fn format0_pairs() {
        let table = read(kern::KERN_VER_0_FMT_0).unwrap();
        assert_eq!(table.kerning(4, 12), -40);
        assert_eq!(table.kerning(4, 28), 40);
        assert_eq!(table.kerning(5, 40), -50);
        // reversed and missing pairs
        assert_eq!(table.kerning(12, 4), 0);
        assert_eq!(table.kerning(4, 13), 0);
        assert_eq!(table.kerning(70_000, 12), 0);
    }

    #[test]
    fn accumulate_and_override() {
        let table = read(kern::KERN_TWO_SUBTABLES).unwrap();
        // present in first (additive) and second (override) subtables
        assert_eq!(table.kerning(4, 12), 10);
        // only in the first
        assert_eq!(table.kerning(5, 40), -50);
        // only in the second
        assert_eq!(table.kerning(6, 7), 30);
    }

    #[test]
    fn cross_stream_is_ignored() {
        assert!(read(kern::KERN_CROSS_STREAM).is_none());
    }

    #[test]
    fn minimum_values_are_ignored() {
        assert!(read(kern::KERN_MINIMUM).is_none());
    }

    #[test]
    fn apple_version_is_ignored() {
        assert!(read(kern::KERN_VER_1).is_none());
    }

    #[test]
    fn unsorted_pairs_use_linear_search() {
        let table = read(kern::KERN_UNSORTED).unwrap();
        assert_eq!(table.kerning(5, 40), -50);
        assert_eq!(table.kerning(4, 12), -40);
    }

    #[test]
    fn fitting_rounds_to_pixels() {
        // 64px height at 96dpi with 1000 units per em: -100 units is
        // -546/64 px which rounds to -9px
        assert_eq!(fit_kerning(-100, 5461, 1000), -9 * 64);
        assert_eq!(fit_kerning(100, 5461, 1000), 9 * 64);
        assert_eq!(fit_kerning(0, 5461, 1000), 0);
    }

    #[test]
    fn fitting_shrinks_small_sizes() {
        // 12px height is exactly 16ppem: -100 units is -1.6px before
        // shrinking, -1.024px after, which rounds to -1px
        assert_eq!(fit_kerning(-100, 1024, 1000), -64);
        // 32ppem is left alone: -3.2px rounds to -3px
        assert_eq!(fit_kerning(-100, 1024 * 2, 1000), -3 * 64);
    }
}
