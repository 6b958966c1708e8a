//! Raw `kern` tables.

#[rustfmt::skip]
pub static KERN_VER_0_FMT_0: &[u8] = &[
    0x00, 0x00, //  0: version=0
    0x00, 0x01, //  2: nTables=1
    0x00, 0x00, //  4: version=0 (bogus field, unused)
    0x00, 0x20, //  6: length=32
    0x00,       //  8: format=0
    0x01,       //  9: coverage=1
    0x00, 0x03, // 10: nPairs=3
    0x00, 0x0C, // 12: searchRange=12
    0x00, 0x01, // 14: entrySelector=1
    0x00, 0x06, // 16: rangeShift=6
    0x00, 0x04, 0x00, 0x0C, 0xFF, 0xD8, // 18: l=4, r=12, v=-40
    0x00, 0x04, 0x00, 0x1C, 0x00, 0x28, // 24: l=4, r=28, v=40
    0x00, 0x05, 0x00, 0x28, 0xFF, 0xCE, // 30: l=5, r=40, v=-50
];

/// An additive subtable followed by one with the override bit set.
#[rustfmt::skip]
pub static KERN_TWO_SUBTABLES: &[u8] = &[
    0x00, 0x00, //  0: version=0
    0x00, 0x02, //  2: nTables=2
    // first subtable
    0x00, 0x00, //  4: version=0
    0x00, 0x1A, //  6: length=26
    0x00,       //  8: format=0
    0x01,       //  9: coverage=1 (horizontal)
    0x00, 0x02, // 10: nPairs=2
    0x00, 0x0C, // 12: searchRange=12
    0x00, 0x01, // 14: entrySelector=1
    0x00, 0x00, // 16: rangeShift=0
    0x00, 0x04, 0x00, 0x0C, 0xFF, 0xD8, // 18: l=4, r=12, v=-40
    0x00, 0x05, 0x00, 0x28, 0xFF, 0xCE, // 24: l=5, r=40, v=-50
    // second subtable
    0x00, 0x00, // 30: version=0
    0x00, 0x1A, // 32: length=26
    0x00,       // 34: format=0
    0x09,       // 35: coverage=9 (horizontal, override)
    0x00, 0x02, // 36: nPairs=2
    0x00, 0x0C, // 38: searchRange=12
    0x00, 0x01, // 40: entrySelector=1
    0x00, 0x00, // 42: rangeShift=0
    0x00, 0x04, 0x00, 0x0C, 0x00, 0x0A, // 44: l=4, r=12, v=10
    0x00, 0x06, 0x00, 0x07, 0x00, 0x1E, // 50: l=6, r=7, v=30
];

/// Only a cross-stream subtable.
#[rustfmt::skip]
pub static KERN_CROSS_STREAM: &[u8] = &[
    0x00, 0x00, //  0: version=0
    0x00, 0x01, //  2: nTables=1
    0x00, 0x00, //  4: version=0
    0x00, 0x14, //  6: length=20
    0x00,       //  8: format=0
    0x05,       //  9: coverage=5 (horizontal, cross-stream)
    0x00, 0x01, // 10: nPairs=1
    0x00, 0x06, // 12: searchRange=6
    0x00, 0x00, // 14: entrySelector=0
    0x00, 0x00, // 16: rangeShift=0
    0x00, 0x04, 0x00, 0x0C, 0xFF, 0xD8, // 18: l=4, r=12, v=-40
];

/// Apple flavored table header.
#[rustfmt::skip]
pub static KERN_VER_1: &[u8] = &[
    0x00, 0x01, 0x00, 0x00, //  0: version=1.0
    0x00, 0x00, 0x00, 0x01, //  4: nTables=1
    0x00, 0x00, 0x00, 0x1A, //  8: length=26
    0x00,                   // 12: coverage=0 (horizontal)
    0x00,                   // 13: format=0
    0x00, 0x00,             // 14: tupleIndex=0
    0x00, 0x01,             // 16: nPairs=1
    0x00, 0x06,             // 18: searchRange=6
    0x00, 0x00,             // 20: entrySelector=0
    0x00, 0x00,             // 22: rangeShift=0
    0x00, 0x04, 0x00, 0x0C, 0xFF, 0xD8, // 24: l=4, r=12, v=-40
];

/// Pairs out of order, which rules out a binary search.
#[rustfmt::skip]
pub static KERN_UNSORTED: &[u8] = &[
    0x00, 0x00, //  0: version=0
    0x00, 0x01, //  2: nTables=1
    0x00, 0x00, //  4: version=0
    0x00, 0x1A, //  6: length=26
    0x00,       //  8: format=0
    0x01,       //  9: coverage=1
    0x00, 0x02, // 10: nPairs=2
    0x00, 0x0C, // 12: searchRange=12
    0x00, 0x01, // 14: entrySelector=1
    0x00, 0x00, // 16: rangeShift=0
    0x00, 0x05, 0x00, 0x28, 0xFF, 0xCE, // 18: l=5, r=40, v=-50
    0x00, 0x04, 0x00, 0x0C, 0xFF, 0xD8, // 24: l=4, r=12, v=-40
];

/// Only a subtable holding minimum values.
#[rustfmt::skip]
pub static KERN_MINIMUM: &[u8] = &[
    0x00, 0x00, //  0: version=0
    0x00, 0x01, //  2: nTables=1
    0x00, 0x00, //  4: version=0
    0x00, 0x14, //  6: length=20
    0x00,       //  8: format=0
    0x03,       //  9: coverage=3 (horizontal, minimum)
    0x00, 0x01, // 10: nPairs=1
    0x00, 0x06, // 12: searchRange=6
    0x00, 0x00, // 14: entrySelector=0
    0x00, 0x00, // 16: rangeShift=0
    0x00, 0x04, 0x00, 0x0C, 0xFF, 0xD8, // 18: l=4, r=12, v=-40
];

/// The table in [`crate::font::kerned_font`]: `A V` and `V A` at -100.
#[rustfmt::skip]
pub static KERN_A_V: &[u8] = &[
    0x00, 0x00, //  0: version=0
    0x00, 0x01, //  2: nTables=1
    0x00, 0x00, //  4: version=0
    0x00, 0x1A, //  6: length=26
    0x00,       //  8: format=0
    0x01,       //  9: coverage=1 (horizontal)
    0x00, 0x02, // 10: nPairs=2
    0x00, 0x0C, // 12: searchRange=12
    0x00, 0x01, // 14: entrySelector=1
    0x00, 0x00, // 16: rangeShift=0
    0x00, 0x02, 0x00, 0x03, 0xFF, 0x9C, // 18: l=2 (A), r=3 (V), v=-100
    0x00, 0x03, 0x00, 0x02, 0xFF, 0x9C, // 24: l=3 (V), r=2 (A), v=-100
];
