use kurbo::{CubicBez, ParamCurve, Point, QuadBez};
use skrifa::outline::OutlinePen;

/// Pen that flattens an outline into closed polylines.
///
/// Each quadratic or cubic segment is replaced by `steps` line segments
/// whose end points are evaluated at equally spaced curve parameters, so
/// the number of generated points per curve is fixed regardless of the
/// curve's length.
///
/// The pen also regularizes the output:
///
/// 1. Line segments that end at the current point are dropped.
/// 2. The explicit closing point of a contour is dropped when it repeats
///    the start point; contours are implicitly closed.
/// 3. A move without any following segment does not produce a contour.
pub(crate) struct FlatteningPen {
    steps: u32,
    contours: Vec<Vec<Point>>,
    current: Vec<Point>,
    x_range: Option<(f32, f32)>,
}

impl FlatteningPen {
    /// A step count of zero is treated as one, which replaces every curve
    /// by the straight line between its end points.
    pub fn new(steps: u32) -> Self {
        Self {
            steps: steps.max(1),
            contours: vec![],
            current: vec![],
            x_range: None,
        }
    }

    /// Returns the minimum and maximum x of every coordinate passed to the
    /// pen, control points included.
    pub fn x_range(&self) -> Option<(f32, f32)> {
        self.x_range
    }

    fn track(&mut self, xs: &[f32]) {
        for &x in xs {
            self.x_range = Some(match self.x_range {
                Some((min, max)) => (min.min(x), max.max(x)),
                None => (x, x),
            });
        }
    }

    pub fn into_contours(mut self) -> Vec<Vec<Point>> {
        self.finish_contour();
        self.contours
    }

    fn last_point(&self) -> Point {
        self.current.last().copied().unwrap_or(Point::ZERO)
    }

    fn push_point(&mut self, p: Point) {
        if self.current.last() != Some(&p) {
            self.current.push(p);
        }
    }

    fn finish_contour(&mut self) {
        if self.current.len() > 1 && self.current.first() == self.current.last() {
            self.current.pop();
        }
        if self.current.len() > 1 {
            self.contours.push(std::mem::take(&mut self.current));
        } else {
            self.current.clear();
        }
    }

    fn flatten(&mut self, curve: impl ParamCurve, end: Point) {
        let steps = self.steps;
        for i in 1..steps {
            let t = i as f64 / steps as f64;
            self.push_point(curve.eval(t));
        }
        // Evaluate the end point exactly so closing points are recognized.
        self.push_point(end);
    }
}

fn point(x: f32, y: f32) -> Point {
    Point::new(x as f64, y as f64)
}

impl OutlinePen for FlatteningPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.track(&[x]);
        self.finish_contour();
        self.current.push(point(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.track(&[x]);
        self.push_point(point(x, y));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.track(&[cx0, x]);
        let end = point(x, y);
        let quad = QuadBez::new(self.last_point(), point(cx0, cy0), end);
        self.flatten(quad, end);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.track(&[cx0, cx1, x]);
        let end = point(x, y);
        let cubic = CubicBez::new(self.last_point(), point(cx0, cy0), point(cx1, cy1), end);
        self.flatten(cubic, end);
    }

    fn close(&mut self) {
        self.finish_contour();
    }
}
