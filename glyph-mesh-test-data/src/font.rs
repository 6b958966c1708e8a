//! Small TrueType fonts assembled from hand written glyph outlines.
//!
//! Both fonts use 1000 units per em and contain the same glyphs. They
//! differ only in the presence of a `kern` table with the pairs `A V` and
//! `V A`.
//!
//! | glyph | char | contents |
//! |---|---|---|
//! | 0 | .notdef | rectangle with a rectangular hole |
//! | 1 | space | no contours |
//! | 2 | A | triangle with a triangular hole |
//! | 3 | V | concave polygon |
//! | 4 | O | quadratic ring |
//! | 5 | j | rectangle reaching below the baseline |
//! | 6 | ! | a lone hole |
//! | 7 | i | two separate rectangles |
//! | 8 | @ | two nested rings, holes listed before solids |
//!
//! Solid contours are clockwise and holes counter clockwise, as required
//! for TrueType.

use std::error::Error;

use write_fonts::{
    read::tables::glyf::CurvePoint,
    tables::{
        cmap::Cmap,
        glyf::{Contour, GlyfLocaBuilder, SimpleGlyph},
        head::Head,
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
        maxp::Maxp,
    },
    types::{FWord, GlyphId, Tag, UfWord},
    FontBuilder,
};

use crate::kern::KERN_A_V;

pub const UNITS_PER_EM: u16 = 1000;

pub const GID_NOTDEF: u32 = 0;
pub const GID_SPACE: u32 = 1;
pub const GID_A: u32 = 2;
pub const GID_V: u32 = 3;
pub const GID_O: u32 = 4;
pub const GID_J: u32 = 5;
pub const GID_EXCLAIM: u32 = 6;
pub const GID_I: u32 = 7;
pub const GID_AT: u32 = 8;

pub const NUM_GLYPHS: u32 = 9;

/// Kerning for both `A V` and `V A` in font units.
pub const KERN_AV: i16 = -100;

const ON: bool = true;
const OFF: bool = false;

/// x, y, on curve
type ContourPoint = (i16, i16, bool);

struct Glyph {
    advance: u16,
    contours: &'static [&'static [ContourPoint]],
}

#[rustfmt::skip]
static GLYPHS: &[Glyph] = &[
    // .notdef
    Glyph {
        advance: 500,
        contours: &[
            &[(50, 0, ON), (50, 700, ON), (450, 700, ON), (450, 0, ON)],
            &[(100, 50, ON), (400, 50, ON), (400, 650, ON), (100, 650, ON)],
        ],
    },
    // space
    Glyph {
        advance: 250,
        contours: &[],
    },
    // A
    Glyph {
        advance: 500,
        contours: &[
            &[(0, 0, ON), (250, 700, ON), (500, 0, ON)],
            &[(200, 200, ON), (300, 200, ON), (250, 400, ON)],
        ],
    },
    // V
    Glyph {
        advance: 500,
        contours: &[&[
            (0, 700, ON), (100, 700, ON), (250, 150, ON), (400, 700, ON),
            (500, 700, ON), (300, 0, ON), (200, 0, ON),
        ]],
    },
    // O
    Glyph {
        advance: 500,
        contours: &[
            &[
                (250, 0, ON), (0, 0, OFF), (0, 350, ON), (0, 700, OFF),
                (250, 700, ON), (500, 700, OFF), (500, 350, ON), (500, 0, OFF),
            ],
            &[
                (250, 150, ON), (350, 150, OFF), (350, 350, ON), (350, 550, OFF),
                (250, 550, ON), (150, 550, OFF), (150, 350, ON), (150, 150, OFF),
            ],
        ],
    },
    // j
    Glyph {
        advance: 300,
        contours: &[&[(100, -200, ON), (100, 500, ON), (200, 500, ON), (200, -200, ON)]],
    },
    // !
    Glyph {
        advance: 300,
        contours: &[&[(100, 100, ON), (200, 100, ON), (200, 200, ON), (100, 200, ON)]],
    },
    // i
    Glyph {
        advance: 300,
        contours: &[
            &[(100, 0, ON), (100, 500, ON), (200, 500, ON), (200, 0, ON)],
            &[(100, 600, ON), (100, 700, ON), (200, 700, ON), (200, 600, ON)],
        ],
    },
    // @
    Glyph {
        advance: 600,
        contours: &[
            &[(250, 250, ON), (350, 250, ON), (350, 350, ON), (250, 350, ON)],
            &[(0, 0, ON), (0, 600, ON), (600, 600, ON), (600, 0, ON)],
            &[(100, 100, ON), (500, 100, ON), (500, 500, ON), (100, 500, ON)],
            &[(200, 200, ON), (200, 400, ON), (400, 400, ON), (400, 200, ON)],
        ],
    },
];

/// Sorted by character.
static CHARMAP: &[(char, u32)] = &[
    (' ', GID_SPACE),
    ('!', GID_EXCLAIM),
    ('@', GID_AT),
    ('A', GID_A),
    ('O', GID_O),
    ('V', GID_V),
    ('i', GID_I),
    ('j', GID_J),
];

/// Returns a font with a `kern` table.
pub fn kerned_font() -> Vec<u8> {
    build(true).expect("kerned test font should build")
}

/// Returns the same font without a `kern` table.
pub fn unkerned_font() -> Vec<u8> {
    build(false).expect("unkerned test font should build")
}

fn build(with_kern: bool) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut glyf_loca = GlyfLocaBuilder::new();
    for glyph in GLYPHS {
        glyf_loca.add_glyph(&simple_glyph(glyph))?;
    }
    let (glyf, loca, loca_format) = glyf_loca.build();
    let head = Head {
        units_per_em: UNITS_PER_EM,
        x_min: 0,
        y_min: -200,
        x_max: 600,
        y_max: 700,
        lowest_rec_ppem: 8,
        font_direction_hint: 2,
        index_to_loc_format: loca_format as i16,
        ..Default::default()
    };
    let hhea = Hhea {
        ascender: FWord::new(800),
        descender: FWord::new(-200),
        line_gap: FWord::new(0),
        advance_width_max: UfWord::new(600),
        min_left_side_bearing: FWord::new(0),
        min_right_side_bearing: FWord::new(0),
        x_max_extent: FWord::new(600),
        caret_slope_rise: 1,
        caret_slope_run: 0,
        caret_offset: 0,
        number_of_h_metrics: GLYPHS.len() as u16,
    };
    let hmtx = Hmtx {
        h_metrics: GLYPHS
            .iter()
            .map(|glyph| LongMetric {
                advance: glyph.advance,
                side_bearing: x_min(glyph),
            })
            .collect(),
        left_side_bearings: vec![],
    };
    let cmap = Cmap::from_mappings(CHARMAP.iter().map(|(ch, gid)| (*ch, GlyphId::new(*gid))))?;
    let mut builder = FontBuilder::new();
    builder
        .add_table(&head)?
        .add_table(&hhea)?
        .add_table(&maxp())?
        .add_table(&hmtx)?
        .add_table(&cmap)?
        .add_table(&glyf)?
        .add_table(&loca)?;
    if with_kern {
        builder.add_raw(Tag::new(b"kern"), KERN_A_V);
    }
    Ok(builder.build())
}

fn points(glyph: &Glyph) -> impl Iterator<Item = &ContourPoint> + '_ {
    glyph.contours.iter().flat_map(|contour| contour.iter())
}

fn x_min(glyph: &Glyph) -> i16 {
    points(glyph).map(|p| p.0).min().unwrap_or(0)
}

fn simple_glyph(glyph: &Glyph) -> SimpleGlyph {
    let mut simple = SimpleGlyph {
        contours: glyph
            .contours
            .iter()
            .map(|contour| {
                contour
                    .iter()
                    .map(|&(x, y, on_curve)| CurvePoint::new(x, y, on_curve))
                    .collect::<Vec<_>>()
                    .into()
            })
            .collect::<Vec<Contour>>(),
        ..Default::default()
    };
    simple.recompute_bounding_box();
    simple
}

// Version 1.0 so the TrueType interpreter can run on these glyphs
fn maxp() -> Maxp {
    Maxp {
        num_glyphs: GLYPHS.len() as u16,
        max_points: GLYPHS.iter().map(|g| points(g).count() as u16).max(),
        max_contours: GLYPHS.iter().map(|g| g.contours.len() as u16).max(),
        max_composite_points: Some(0),
        max_composite_contours: Some(0),
        max_zones: Some(2),
        max_twilight_points: Some(0),
        max_storage: Some(0),
        max_function_defs: Some(0),
        max_instruction_defs: Some(0),
        max_stack_elements: Some(64),
        max_size_of_instructions: Some(0),
        max_component_elements: Some(0),
        max_component_depth: Some(0),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        kerned_font, unkerned_font, CHARMAP, GID_A, GID_V, GLYPHS, KERN_AV, NUM_GLYPHS,
        UNITS_PER_EM,
    };
    use skrifa::{
        raw::{
            tables::{
                glyf::Glyph,
                kern::{Subtable, SubtableKind},
            },
            FontRef, TableProvider,
        },
        GlyphId, MetadataProvider,
    };

    #[test]
    fn fonts_parse() {
        let data = kerned_font();
        let font = FontRef::new(&data).unwrap();
        assert_eq!(font.head().unwrap().units_per_em(), UNITS_PER_EM);
        assert_eq!(font.maxp().unwrap().num_glyphs() as usize, GLYPHS.len());
        assert_eq!(GLYPHS.len(), NUM_GLYPHS as usize);
        let outlines = font.outline_glyphs();
        for gid in 0..NUM_GLYPHS {
            assert!(outlines.get(GlyphId::new(gid)).is_some());
        }

        let data = unkerned_font();
        let font = FontRef::new(&data).unwrap();
        assert!(font.kern().is_err());
    }

    #[test]
    fn outlines_round_trip() {
        let data = kerned_font();
        let font = FontRef::new(&data).unwrap();
        let glyf = font.glyf().unwrap();
        let loca = font.loca(None).unwrap();
        for (gid, glyph) in GLYPHS.iter().enumerate() {
            let parsed = loca.get_glyf(GlyphId::new(gid as u32), &glyf).unwrap();
            let Some(Glyph::Simple(parsed)) = parsed else {
                assert!(glyph.contours.is_empty(), "glyph {gid}");
                continue;
            };
            let expected = glyph
                .contours
                .iter()
                .flat_map(|contour| contour.iter().copied())
                .collect::<Vec<_>>();
            let actual = parsed
                .points()
                .map(|p| (p.x, p.y, p.on_curve))
                .collect::<Vec<_>>();
            assert_eq!(actual, expected, "glyph {gid}");
        }
    }

    #[test]
    fn kern_pairs() {
        let data = kerned_font();
        let font = FontRef::new(&data).unwrap();
        let kern = font.kern().unwrap();
        let subtable = kern.subtables().next().unwrap().unwrap();
        assert!(matches!(subtable, Subtable::Ot(_)));
        let Ok(SubtableKind::Format0(pairs)) = subtable.kind() else {
            panic!("expected a format 0 subtable");
        };
        let (a, v) = (GlyphId::new(GID_A), GlyphId::new(GID_V));
        assert_eq!(pairs.kerning(a, v), Some(KERN_AV as i32));
        assert_eq!(pairs.kerning(v, a), Some(KERN_AV as i32));
        assert_eq!(pairs.kerning(a, a), None);
    }

    #[test]
    fn charmap() {
        let data = kerned_font();
        let font = FontRef::new(&data).unwrap();
        let charmap = font.charmap();
        for (ch, gid) in CHARMAP {
            assert_eq!(charmap.map(*ch).map(|gid| gid.to_u32()), Some(*gid));
        }
        assert_eq!(charmap.map('Z'), None);
    }
}
