//! End to end tests against the synthetic fonts from glyph-mesh-test-data.

use glyph_mesh::{
    contour::Winding, layout::PenState, FontData, GlyphMesh, Hinting, OutlineSource, Rasterizer,
    SkrifaSource, SourceOptions,
};
use glyph_mesh_test_data::font;
use pretty_assertions::assert_eq;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn unhinted() -> SourceOptions {
    SourceOptions::new(0, Hinting::None)
}

fn rasterize(data: &FontData, text: &str) -> Vec<GlyphMesh> {
    init_logging();
    let source = SkrifaSource::new(data, &unhinted()).unwrap();
    Rasterizer::new(source).rasterize_text(text, 64, 6).unwrap()
}

fn min_y(meshes: &[GlyphMesh]) -> Option<f32> {
    meshes
        .iter()
        .flat_map(|mesh| &mesh.triangles)
        .map(|triangle| triangle.min_y())
        .reduce(f32::min)
}

#[test]
fn kerning_pulls_pair_together() {
    let kerned = rasterize(&FontData::from_vec(font::kerned_font()), "AV");
    let unkerned = rasterize(&FontData::from_vec(font::unkerned_font()), "AV");
    assert_eq!(kerned[0].x_offset, 0.0);
    assert_eq!(unkerned[0].x_offset, 0.0);
    // 500 units is 42.66px; -100 units of kerning rounds to -9px
    assert_eq!(unkerned[1].x_offset, 42.0);
    assert_eq!(kerned[1].x_offset, 33.0);
}

#[test]
fn triangle_counts() {
    let data = FontData::from_vec(font::kerned_font());
    let meshes = rasterize(&data, "AVO j!i@Z");
    let summary = meshes
        .iter()
        .map(|mesh| (mesh.ch, mesh.glyph_id, mesh.triangles.len()))
        .collect::<Vec<_>>();
    assert_eq!(
        summary,
        vec![
            ('A', font::GID_A, 6),
            ('V', font::GID_V, 5),
            // 24 points on each ring of the flattened curves
            ('O', font::GID_O, 48),
            (' ', font::GID_SPACE, 0),
            ('j', font::GID_J, 2),
            // only a hole
            ('!', font::GID_EXCLAIM, 0),
            ('i', font::GID_I, 4),
            ('@', font::GID_AT, 16),
            // .notdef
            ('Z', font::GID_NOTDEF, 8),
        ]
    );
}

#[test]
fn shifted_to_zero() {
    let data = FontData::from_vec(font::kerned_font());
    for text in ["A", "j", "Aj", "i@"] {
        let meshes = rasterize(&data, text);
        assert_eq!(min_y(&meshes), Some(0.0), "{text}");
    }
}

#[test]
fn mesh_covers_glyph_area() {
    let data = FontData::from_vec(font::kerned_font());
    let meshes = rasterize(&data, "A");
    let area: f32 = meshes[0].triangles.iter().map(|t| t.area()).sum();
    // 165000 square units at 0.085328125 px per unit
    let expected = 165000.0 * 0.085328125f32 * 0.085328125;
    assert!((area - expected).abs() < 1.0, "{area} != {expected}");
}

#[test]
fn same_input_same_output() {
    let data = FontData::from_vec(font::kerned_font());
    let first = rasterize(&data, "AVO@");
    let second = rasterize(&data, "AVO@");
    assert_eq!(first, second);
}

#[test]
fn empty_and_blank_text() {
    let data = FontData::from_vec(font::kerned_font());
    assert!(rasterize(&data, "").is_empty());
    let meshes = rasterize(&data, " ");
    assert_eq!(meshes.len(), 1);
    assert!(meshes[0].triangles.is_empty());
}

#[test]
fn text_width_includes_kerning() {
    let data = FontData::from_vec(font::kerned_font());
    let source = SkrifaSource::new(&data, &unhinted()).unwrap();
    let mut rasterizer = Rasterizer::new(source);
    assert_eq!(rasterizer.text_width("AV", 64).unwrap(), 75.0);
    assert_eq!(rasterizer.text_width("", 64).unwrap(), 0.0);

    let data = FontData::from_vec(font::unkerned_font());
    let source = SkrifaSource::new(&data, &unhinted()).unwrap();
    assert_eq!(Rasterizer::new(source).text_width("AV", 64).unwrap(), 84.0);
}

#[test]
fn nested_outlines() {
    let data = FontData::from_vec(font::kerned_font());
    let source = SkrifaSource::new(&data, &unhinted()).unwrap();
    let outlines = Rasterizer::new(source).outline_text("@!", 64, 6).unwrap();
    assert_eq!(outlines.len(), 2);
    let windings = outlines[0]
        .contours
        .iter()
        .map(|contour| contour.winding)
        .collect::<Vec<_>>();
    assert_eq!(
        windings,
        vec![Winding::Solid, Winding::Hole, Winding::Solid, Winding::Hole]
    );
    assert!(outlines[1].contours.is_empty());
}

#[test]
fn hinted_layout() {
    init_logging();
    let data = FontData::from_vec(font::kerned_font());
    let options = SourceOptions::new(0, Hinting::Native);
    let source = SkrifaSource::new(&data, &options).unwrap();
    let meshes = Rasterizer::new(source).rasterize_text("AV", 64, 6).unwrap();
    assert_eq!(meshes.len(), 2);
    assert_eq!(meshes[0].triangles.len(), 6);
    assert_eq!(min_y(&meshes), Some(0.0));
}

#[test]
fn default_options_are_hinted() {
    assert_eq!(SourceOptions::default().hinting, Hinting::Default);
    let data = FontData::from_vec(font::kerned_font());
    let source = SkrifaSource::new(&data, &SourceOptions::default()).unwrap();
    assert_eq!(source.hinting(), Hinting::Default);
}

#[test]
fn autohinted_layout() {
    init_logging();
    let data = FontData::from_vec(font::kerned_font());
    let text = "AVOAiVj@";
    for hinting in [Hinting::Auto, Hinting::Default] {
        let options = SourceOptions::new(0, hinting);
        for height in [11, 17, 64] {
            let source = SkrifaSource::new(&data, &options).unwrap();
            let meshes = Rasterizer::new(source)
                .rasterize_text(text, height, 6)
                .unwrap();
            let offsets = meshes.iter().map(|mesh| mesh.x_offset).collect::<Vec<_>>();

            // replay the layout one glyph at a time
            let mut source = SkrifaSource::new(&data, &options).unwrap();
            source.set_height(height).unwrap();
            let mut pen = PenState::new();
            let mut previous: Option<(u32, i32)> = None;
            let mut expected = vec![];
            for ch in text.chars() {
                let glyph_id = source.glyph_index(ch);
                let outline = source.load_glyph(glyph_id, 6).unwrap();
                for delta in [outline.lsb_delta, outline.rsb_delta] {
                    assert!((-32..=32).contains(&delta), "{ch}: {delta}");
                }
                let before = pen.offset();
                let x_offset = pen.place(&source, glyph_id, &outline);
                assert_eq!(x_offset.fract(), 0.0);
                // kerning and advances move the pen by whole pixels and the
                // bearing correction by at most one more
                let kerning = previous
                    .map(|(left, _)| source.kerning(left, glyph_id) >> 6)
                    .unwrap_or(0);
                let correction = x_offset - before - kerning as f64;
                let bearing = previous.map(|(_, rsb)| rsb).unwrap_or(0) - outline.lsb_delta;
                let expected_correction = if bearing >= 32 {
                    -1.0
                } else if bearing < -32 {
                    1.0
                } else {
                    0.0
                };
                assert_eq!(correction, expected_correction, "{ch} at {height}px");
                previous = Some((glyph_id, outline.rsb_delta));
                expected.push(x_offset);
            }
            assert_eq!(offsets, expected, "{hinting:?} at {height}px");
        }
    }
}

#[test]
fn font_from_path() {
    let path = std::env::temp_dir().join(format!("glyph-mesh-{}.ttf", std::process::id()));
    std::fs::write(&path, font::kerned_font()).unwrap();
    let data = FontData::from_path(&path).unwrap();
    assert_eq!(data.face_count().unwrap(), 1);
    let meshes = rasterize(&data, "AV");
    assert_eq!(meshes[1].x_offset, 33.0);
    drop(data);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn one_source_per_thread() {
    let data = FontData::from_vec(font::kerned_font());
    let expected = rasterize(&data, "AVO");
    std::thread::scope(|scope| {
        let handles = (0..4)
            .map(|_| {
                let data = data.clone();
                scope.spawn(move || rasterize(&data, "AVO"))
            })
            .collect::<Vec<_>>();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
