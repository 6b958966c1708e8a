//! Constrained Delaunay triangulation of solid contours with holes.

use kurbo::Point;
use spade::{
    handles::FixedVertexHandle, ConstrainedDelaunayTriangulation, InsertionError, Point2,
    Triangulation,
};

use crate::{contour::Contour, Triangle, Vertex};

type Cdt = ConstrainedDelaunayTriangulation<Point2<f64>>;

/// Triangulates the area enclosed by `outer` minus the area of `holes`.
///
/// Every edge of every ring becomes a constraint edge. Triangles are kept
/// when their centroid lies inside the outer ring and outside all holes.
///
/// Output vertices have their y coordinate negated so the mesh is in a
/// y down frame.
///
/// Degenerate input produces no triangles. Edges that would cross an
/// existing constraint, which only happens for self intersecting outlines,
/// are skipped.
pub fn triangulate(outer: &Contour, holes: &[&Contour]) -> Vec<Triangle> {
    let mut cdt = Cdt::new();
    for ring in std::iter::once(outer).chain(holes.iter().copied()) {
        if let Err(e) = insert_ring(&mut cdt, ring) {
            log::warn!("unable to triangulate contour {}: {e}", outer.index());
            return vec![];
        }
    }
    cdt.inner_faces()
        .filter_map(|face| {
            let [a, b, c] = face.vertices().map(|v| v.position());
            let centroid = Point::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0);
            let inside = outer.contains_point(centroid)
                && !holes.iter().any(|hole| hole.contains_point(centroid));
            inside.then(|| Triangle::new(flip(a), flip(b), flip(c)))
        })
        .collect()
}

fn insert_ring(cdt: &mut Cdt, ring: &Contour) -> Result<(), InsertionError> {
    let handles = ring
        .points()
        .iter()
        .map(|p| cdt.insert(Point2::new(p.x, p.y)))
        .collect::<Result<Vec<FixedVertexHandle>, _>>()?;
    for (i, from) in handles.iter().enumerate() {
        let to = handles[(i + 1) % handles.len()];
        if *from == to {
            continue;
        }
        if cdt.can_add_constraint(*from, to) {
            cdt.add_constraint(*from, to);
        } else {
            log::warn!(
                "skipping intersecting edge {i} of contour {}",
                ring.index()
            );
        }
    }
    Ok(())
}

fn flip(p: Point2<f64>) -> Vertex {
    Vertex::new(p.x as f32, -p.y as f32)
}
