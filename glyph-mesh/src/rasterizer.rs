//! The text to mesh pipeline.

use crate::{
    contour::{classify, ContourGroup},
    layout::Layout,
    source::OutlineSource,
    triangulate::triangulate,
    Error, GlyphMesh, GlyphOutlines, OutlineContour, Vertex,
};

/// Turns strings into triangle meshes using glyphs from an outline source.
///
/// The rasterizer holds no state between calls besides the source itself.
/// Each call sizes the source, lays out the text from a fresh pen and
/// builds the output for one character at a time.
pub struct Rasterizer<S> {
    source: S,
}

impl<S: OutlineSource> Rasterizer<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Rasterizes a line of text.
    ///
    /// `font_height_px` is the requested character height and
    /// `bezier_steps` the number of line segments used to approximate each
    /// curve. The result holds one [`GlyphMesh`] per `char` of `text` in
    /// order, with an empty triangle list for characters such as spaces
    /// that have no outline.
    ///
    /// All triangles are in a y down frame and shifted vertically so that
    /// the smallest y coordinate over the whole result is exactly 0.
    ///
    /// Any failure to load a glyph fails the whole call.
    pub fn rasterize_text(
        &mut self,
        text: &str,
        font_height_px: u32,
        bezier_steps: u32,
    ) -> Result<Vec<GlyphMesh>, Error> {
        log::debug!("rasterizing {text:?} at {font_height_px}px, {bezier_steps} step(s) per curve");
        self.source.set_height(font_height_px)?;
        let mut meshes = Vec::with_capacity(text.chars().count());
        for placed in Layout::new(&mut self.source, text, bezier_steps) {
            let placed = placed?;
            let classification = classify(placed.outline.contours, placed.outline.orientation);
            let mut triangles = vec![];
            for group in &classification.groups {
                let holes = group.holes.iter().collect::<Vec<_>>();
                triangles.extend(triangulate(&group.outer, &holes));
            }
            log::debug!(
                "{:?}: {} solid contour(s), {} triangle(s)",
                placed.ch,
                classification.groups.len(),
                triangles.len()
            );
            meshes.push(GlyphMesh {
                ch: placed.ch,
                glyph_id: placed.glyph_id,
                x_offset: placed.x_offset,
                triangles,
            });
        }
        let min_y = meshes
            .iter()
            .flat_map(|mesh| &mesh.triangles)
            .map(|triangle| triangle.min_y())
            .reduce(f32::min);
        if let Some(min_y) = min_y {
            for triangle in meshes.iter_mut().flat_map(|mesh| &mut mesh.triangles) {
                triangle.offset_y(-min_y);
            }
        }
        Ok(meshes)
    }

    /// Produces the classified outline contours of a line of text instead
    /// of triangles.
    ///
    /// Placement, y orientation and the vertical shift are the same as for
    /// [`rasterize_text`](Self::rasterize_text). Each solid contour is
    /// followed by the holes it encloses; degenerate contours and holes
    /// outside any solid contour are omitted.
    pub fn outline_text(
        &mut self,
        text: &str,
        font_height_px: u32,
        bezier_steps: u32,
    ) -> Result<Vec<GlyphOutlines>, Error> {
        self.source.set_height(font_height_px)?;
        let mut outlines = Vec::with_capacity(text.chars().count());
        for placed in Layout::new(&mut self.source, text, bezier_steps) {
            let placed = placed?;
            let classification = classify(placed.outline.contours, placed.outline.orientation);
            let contours = classification
                .groups
                .iter()
                .flat_map(ContourGroup::contours)
                .map(|contour| OutlineContour {
                    winding: contour.winding(),
                    points: contour
                        .points()
                        .iter()
                        .map(|p| Vertex::new(p.x as f32, -p.y as f32))
                        .collect(),
                })
                .collect();
            outlines.push(GlyphOutlines {
                ch: placed.ch,
                glyph_id: placed.glyph_id,
                x_offset: placed.x_offset,
                contours,
            });
        }
        let min_y = outlines
            .iter()
            .flat_map(|glyph| &glyph.contours)
            .flat_map(|contour| &contour.points)
            .map(|vertex| vertex.y)
            .reduce(f32::min);
        if let Some(min_y) = min_y {
            for vertex in outlines
                .iter_mut()
                .flat_map(|glyph| &mut glyph.contours)
                .flat_map(|contour| &mut contour.points)
            {
                vertex.y -= min_y;
            }
        }
        Ok(outlines)
    }

    /// Returns the advance of a line of text in pixels, including kerning
    /// and side bearing corrections.
    pub fn text_width(&mut self, text: &str, font_height_px: u32) -> Result<f64, Error> {
        self.source.set_height(font_height_px)?;
        let mut layout = Layout::new(&mut self.source, text, 1);
        for placed in layout.by_ref() {
            placed?;
        }
        Ok(layout.pen_offset())
    }
}
