//! test data shared between the glyph-mesh crates.

pub mod font;
pub mod kern;
