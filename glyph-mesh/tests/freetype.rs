//! Compares the FreeType and skrifa outline sources.

#![cfg(feature = "freetype")]

use glyph_mesh::{
    FontData, FreeTypeSource, GlyphMesh, Hinting, OutlineSource, Rasterizer, SkrifaSource,
    SourceOptions,
};
use glyph_mesh_test_data::font;
use pretty_assertions::assert_eq;

fn summary(meshes: &[GlyphMesh]) -> Vec<(char, u32, f64, usize)> {
    meshes
        .iter()
        .map(|mesh| (mesh.ch, mesh.glyph_id, mesh.x_offset, mesh.triangles.len()))
        .collect()
}

#[test]
fn sources_agree_unhinted() {
    let data = FontData::from_vec(font::kerned_font());
    let options = SourceOptions::new(0, Hinting::None);
    let text = "AVO j@Z";
    let freetype = Rasterizer::new(FreeTypeSource::new(&data, &options).unwrap())
        .rasterize_text(text, 64, 6)
        .unwrap();
    let skrifa = Rasterizer::new(SkrifaSource::new(&data, &options).unwrap())
        .rasterize_text(text, 64, 6)
        .unwrap();
    assert_eq!(summary(&freetype), summary(&skrifa));
}

#[test]
fn freetype_kerning() {
    let data = FontData::from_vec(font::kerned_font());
    let options = SourceOptions::new(0, Hinting::None);
    let mut source = FreeTypeSource::new(&data, &options).unwrap();
    source.set_height(64).unwrap();
    assert!(source.has_kerning());
    assert_eq!(source.kerning(font::GID_A, font::GID_V), -9 * 64);
    assert_eq!(source.glyph_index('A'), font::GID_A);
    assert_eq!(source.glyph_index('Z'), 0);
}

#[test]
fn freetype_autohinter_deltas() {
    let data = FontData::from_vec(font::kerned_font());
    let options = SourceOptions::new(0, Hinting::Auto);
    let mut source = FreeTypeSource::new(&data, &options).unwrap();
    source.set_height(17).unwrap();
    for gid in 0..font::NUM_GLYPHS {
        let outline = source.load_glyph(gid, 6).unwrap();
        assert!((-32..=32).contains(&outline.lsb_delta), "glyph {gid}");
        assert!((-32..=32).contains(&outline.rsb_delta), "glyph {gid}");
    }
}
