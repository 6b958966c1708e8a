//! Winding based classification of glyph contours.
//!
//! Fonts describe filled regions and the holes cut into them with the
//! direction of each closed contour. A contour drawn in the font's fill
//! direction is solid; one drawn against it is a hole. Each hole is paired
//! with the solid contour that encloses it so the two can be triangulated
//! together.

use kurbo::{BezPath, Point, Shape};

/// Role of a contour within its glyph.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Winding {
    /// Encloses filled area.
    Solid,
    /// Removes area from an enclosing solid contour.
    Hole,
}

/// Direction in which solid contours of a glyph are drawn, assuming y
/// points up.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub enum FillOrientation {
    /// TrueType outlines.
    #[default]
    Clockwise,
    /// PostScript (CFF and CFF2) outlines.
    CounterClockwise,
}

impl FillOrientation {
    /// Determines the winding for a contour with the given signed area,
    /// where a positive area means counter clockwise.
    pub fn winding(self, signed_area: f64) -> Winding {
        let counter_clockwise = signed_area > 0.0;
        match (self, counter_clockwise) {
            (Self::Clockwise, false) | (Self::CounterClockwise, true) => Winding::Solid,
            _ => Winding::Hole,
        }
    }
}

/// A closed polyline of a glyph outline.
#[derive(Clone, Debug)]
pub struct Contour {
    index: usize,
    points: Vec<Point>,
    path: BezPath,
    signed_area: f64,
    winding: Winding,
}

impl Contour {
    /// Builds a contour from the points of a closed polyline.
    ///
    /// Returns `None` for degenerate contours: fewer than three points or
    /// no enclosed area.
    pub fn new(index: usize, points: Vec<Point>, orientation: FillOrientation) -> Option<Self> {
        if points.len() < 3 {
            return None;
        }
        let mut path = BezPath::new();
        path.move_to(points[0]);
        for point in &points[1..] {
            path.line_to(*point);
        }
        path.close_path();
        let signed_area = path.area();
        if signed_area == 0.0 || !signed_area.is_finite() {
            return None;
        }
        Some(Self {
            index,
            points,
            path,
            signed_area,
            winding: orientation.winding(signed_area),
        })
    }

    /// Position of the contour in the glyph outline.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn winding(&self) -> Winding {
        self.winding
    }

    /// Area enclosed by the contour, positive when counter clockwise.
    pub fn signed_area(&self) -> f64 {
        self.signed_area
    }

    pub fn area(&self) -> f64 {
        self.signed_area.abs()
    }

    /// Returns true if the point lies inside the contour by the nonzero
    /// rule.
    pub fn contains_point(&self, point: Point) -> bool {
        self.path.winding(point) != 0
    }

    /// Returns true if `other` lies inside this contour.
    ///
    /// Glyph contours don't intersect so testing the first point of
    /// `other` is sufficient.
    pub fn contains(&self, other: &Contour) -> bool {
        other
            .points
            .first()
            .is_some_and(|point| self.contains_point(*point))
    }
}

/// A solid contour together with the holes it encloses.
#[derive(Clone, Debug)]
pub struct ContourGroup {
    pub outer: Contour,
    pub holes: Vec<Contour>,
}

impl ContourGroup {
    /// Returns the outer contour followed by its holes.
    pub fn contours(&self) -> impl Iterator<Item = &Contour> + '_ {
        std::iter::once(&self.outer).chain(&self.holes)
    }
}

/// Result of classifying the contours of a glyph.
#[derive(Clone, Default, Debug)]
pub struct Classification {
    /// One group per solid contour, in outline order.
    pub groups: Vec<ContourGroup>,
    /// Number of degenerate contours that were discarded.
    pub degenerate: usize,
    /// Number of holes that no solid contour encloses. These are
    /// discarded.
    pub orphans: usize,
}

/// Determines the winding of each contour and assigns every hole to the
/// solid contour that encloses it.
///
/// When several solid contours enclose a hole, as happens with nested
/// rings, the hole belongs to the innermost one, which is the one with the
/// smallest area. Ties go to the contour that appears first in the
/// outline. Contour order in the font is not otherwise significant.
pub fn classify(polylines: Vec<Vec<Point>>, orientation: FillOrientation) -> Classification {
    let total = polylines.len();
    let (solids, holes): (Vec<_>, Vec<_>) = polylines
        .into_iter()
        .enumerate()
        .filter_map(|(index, points)| Contour::new(index, points, orientation))
        .partition(|contour| contour.winding == Winding::Solid);
    let degenerate = total - solids.len() - holes.len();
    let mut classification = Classification {
        groups: solids
            .into_iter()
            .map(|outer| ContourGroup {
                outer,
                holes: vec![],
            })
            .collect(),
        degenerate,
        orphans: 0,
    };
    for hole in holes {
        let owner = classification
            .groups
            .iter()
            .enumerate()
            .filter(|(_, group)| group.outer.contains(&hole))
            .min_by(|(_, a), (_, b)| a.outer.area().total_cmp(&b.outer.area()))
            .map(|(i, _)| i);
        match owner {
            Some(i) => classification.groups[i].holes.push(hole),
            None => {
                log::debug!("dropping hole contour {} outside any solid", hole.index);
                classification.orphans += 1;
            }
        }
    }
    if degenerate != 0 {
        log::debug!("dropped {degenerate} degenerate contour(s)");
    }
    classification
}
