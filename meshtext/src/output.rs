//! Formatting command results.

use std::io::Write;

use glyph_mesh::{contour::Winding, GlyphMesh, GlyphOutlines, Triangle};
use serde::Serialize;

#[derive(Serialize)]
struct TextEntry<'a, T> {
    text: &'a str,
    glyphs: T,
}

pub struct RasterReport<'a> {
    texts: &'a [String],
    meshes: Vec<Vec<GlyphMesh>>,
}

impl<'a> RasterReport<'a> {
    pub fn new(texts: &'a [String], meshes: Vec<Vec<GlyphMesh>>) -> Self {
        Self { texts, meshes }
    }

    pub fn write_json(&self, writer: &mut impl Write) -> Result<(), crate::Error> {
        let entries = self
            .texts
            .iter()
            .zip(&self.meshes)
            .map(|(text, glyphs)| TextEntry { text, glyphs })
            .collect::<Vec<_>>();
        serde_json::to_writer_pretty(&mut *writer, &entries)?;
        writeln!(writer)?;
        Ok(())
    }

    pub fn write_summary(&self, writer: &mut impl Write) -> Result<(), crate::Error> {
        for (text, glyphs) in self.texts.iter().zip(&self.meshes) {
            let total: usize = glyphs.iter().map(|glyph| glyph.triangles.len()).sum();
            writeln!(writer, "{text:?}: {total} triangle(s)")?;
            for glyph in glyphs {
                writeln!(
                    writer,
                    "  {:?} gid {} at x {}: {} triangle(s)",
                    glyph.ch,
                    glyph.glyph_id,
                    glyph.x_offset,
                    glyph.triangles.len()
                )?;
            }
        }
        Ok(())
    }

    /// Writes every triangle of every text back to back.
    pub fn write_raw(&self, writer: &mut impl Write) -> Result<(), crate::Error> {
        for glyph in self.meshes.iter().flatten() {
            writer.write_all(raw_bytes(&glyph.triangles))?;
        }
        Ok(())
    }
}

fn raw_bytes(triangles: &[Triangle]) -> &[u8] {
    bytemuck::cast_slice(triangles)
}

pub struct OutlineReport<'a> {
    texts: &'a [String],
    outlines: Vec<Vec<GlyphOutlines>>,
}

impl<'a> OutlineReport<'a> {
    pub fn new(texts: &'a [String], outlines: Vec<Vec<GlyphOutlines>>) -> Self {
        Self { texts, outlines }
    }

    pub fn write_json(&self, writer: &mut impl Write) -> Result<(), crate::Error> {
        let entries = self
            .texts
            .iter()
            .zip(&self.outlines)
            .map(|(text, glyphs)| TextEntry { text, glyphs })
            .collect::<Vec<_>>();
        serde_json::to_writer_pretty(&mut *writer, &entries)?;
        writeln!(writer)?;
        Ok(())
    }

    pub fn write_summary(&self, writer: &mut impl Write) -> Result<(), crate::Error> {
        for (text, glyphs) in self.texts.iter().zip(&self.outlines) {
            writeln!(writer, "{text:?}")?;
            for glyph in glyphs {
                let solids = glyph
                    .contours
                    .iter()
                    .filter(|contour| contour.winding == Winding::Solid)
                    .count();
                let holes = glyph.contours.len() - solids;
                writeln!(
                    writer,
                    "  {:?} gid {} at x {}: {solids} solid, {holes} hole(s)",
                    glyph.ch, glyph.glyph_id, glyph.x_offset
                )?;
            }
        }
        Ok(())
    }
}

pub struct WidthReport<'a> {
    texts: &'a [String],
    widths: Vec<f64>,
}

impl<'a> WidthReport<'a> {
    pub fn new(texts: &'a [String], widths: Vec<f64>) -> Self {
        Self { texts, widths }
    }

    pub fn write(&self, writer: &mut impl Write) -> Result<(), crate::Error> {
        for (text, width) in self.texts.iter().zip(&self.widths) {
            writeln!(writer, "{width}\t{text}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyph_mesh::{OutlineContour, Vertex};

    fn meshes() -> Vec<Vec<GlyphMesh>> {
        vec![vec![
            GlyphMesh {
                ch: 'a',
                glyph_id: 3,
                x_offset: 0.0,
                triangles: vec![Triangle::new(
                    Vertex::new(0.0, 0.0),
                    Vertex::new(1.0, 0.0),
                    Vertex::new(0.0, 1.0),
                )],
            },
            GlyphMesh {
                ch: ' ',
                glyph_id: 1,
                x_offset: 4.0,
                triangles: vec![],
            },
        ]]
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<(), crate::Error>) -> String {
        let mut buf = vec![];
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn raster_summary() {
        let texts = vec!["a ".to_string()];
        let report = RasterReport::new(&texts, meshes());
        let text = render(|buf| report.write_summary(buf));
        assert_eq!(
            text,
            "\"a \": 1 triangle(s)\n  'a' gid 3 at x 0: 1 triangle(s)\n  ' ' gid 1 at x 4: 0 triangle(s)\n"
        );
    }

    #[test]
    fn raster_json() {
        let texts = vec!["a ".to_string()];
        let report = RasterReport::new(&texts, meshes());
        let text = render(|buf| report.write_json(buf));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["text"], "a ");
        assert_eq!(value[0]["glyphs"][0]["ch"], "a");
        assert_eq!(value[0]["glyphs"][0]["triangles"][0]["b"]["x"], 1.0);
        assert_eq!(value[0]["glyphs"][1]["x_offset"], 4.0);
    }

    #[test]
    fn raw_is_nine_floats_per_triangle() {
        let texts = vec!["a ".to_string()];
        let report = RasterReport::new(&texts, meshes());
        let mut buf = vec![];
        report.write_raw(&mut buf).unwrap();
        assert_eq!(buf.len(), 9 * std::mem::size_of::<f32>());
        assert_eq!(&buf[12..16], &1.0f32.to_ne_bytes());
    }

    #[test]
    fn outline_summary() {
        let texts = vec!["o".to_string()];
        let square = |d: f32| {
            vec![
                Vertex::new(d, d),
                Vertex::new(d, 10.0 - d),
                Vertex::new(10.0 - d, 10.0 - d),
            ]
        };
        let outlines = vec![vec![GlyphOutlines {
            ch: 'o',
            glyph_id: 5,
            x_offset: 0.0,
            contours: vec![
                OutlineContour {
                    winding: Winding::Solid,
                    points: square(0.0),
                },
                OutlineContour {
                    winding: Winding::Hole,
                    points: square(2.0),
                },
            ],
        }]];
        let report = OutlineReport::new(&texts, outlines);
        let text = render(|buf| report.write_summary(buf));
        assert_eq!(text, "\"o\"\n  'o' gid 5 at x 0: 1 solid, 1 hole(s)\n");
    }

    #[test]
    fn widths() {
        let texts = vec!["AV".to_string(), "".to_string()];
        let report = WidthReport::new(&texts, vec![75.0, 0.0]);
        let text = render(|buf| report.write(buf));
        assert_eq!(text, "75\tAV\n0\t\n");
    }
}
