//! Contours and shapes: the outline model the generator consumes.

use kurbo::{BezPath, PathEl, Point, Rect};
use serde::{Deserialize, Serialize};

use crate::scanline::Scanline;
use crate::segment::{Curve, EdgeSegment};

// Gaps smaller than this are considered already closed when building
// contours from paths.
const CLOSURE_EPSILON: f64 = 1e-12;

/// The input points were faulty. Validation is advisory: the generator
/// itself never fails on malformed geometry, it just produces an
/// uninformative field.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ValidationError {
    /// At least one control point was not a number.
    NaN,
    /// At least one control point was infinite.
    Infinity,
    /// A contour had no edges.
    EmptyContour,
}

/// A closed loop of edge segments.
///
/// Closure is semantic: `point(1)` of each edge is expected to coincide
/// with `point(0)` of the next, cyclically. It is established by
/// construction, not checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contour {
    /// The edges, in traversal order.
    pub edges: Vec<EdgeSegment>,
}

impl Contour {
    /// An empty contour.
    pub fn new() -> Self {
        Contour::default()
    }

    /// Append an edge.
    pub fn add_edge(&mut self, edge: EdgeSegment) {
        self.edges.push(edge);
    }

    /// The winding sign of this contour: +1 counterclockwise, -1
    /// clockwise, 0 degenerate.
    ///
    /// Computed by a shoelace sum over sampled vertices; short contours
    /// sample interior points so that a loop made of one or two edges
    /// still gets a meaningful sign.
    pub fn winding(&self) -> i32 {
        fn shoelace(a: Point, b: Point) -> f64 {
            a.to_vec2().cross(b.to_vec2())
        }

        let mut total = 0.0;
        match self.edges.len() {
            0 => return 0,
            1 => {
                let a = self.edges[0].point(0.0);
                let b = self.edges[0].point(1.0 / 3.0);
                let c = self.edges[0].point(2.0 / 3.0);
                total += shoelace(a, b);
                total += shoelace(b, c);
                total += shoelace(c, a);
            }
            2 => {
                let a = self.edges[0].point(0.0);
                let b = self.edges[0].point(0.5);
                let c = self.edges[1].point(0.0);
                let d = self.edges[1].point(0.5);
                total += shoelace(a, b);
                total += shoelace(b, c);
                total += shoelace(c, d);
                total += shoelace(d, a);
            }
            _ => {
                let mut prev = self.edges.last().unwrap().start();
                for edge in &self.edges {
                    let cur = edge.start();
                    total += shoelace(prev, cur);
                    prev = cur;
                }
            }
        }
        if total > 0.0 {
            1
        } else if total < 0.0 {
            -1
        } else {
            0
        }
    }

    /// Reverse the traversal direction, negating the winding sign.
    pub fn reverse(&mut self) {
        self.edges.reverse();
        for edge in &mut self.edges {
            *edge = edge.reverse();
        }
    }

    /// The axis-aligned bounding box, or `None` for an empty contour.
    pub fn bound(&self) -> Option<Rect> {
        union_bounds(self.edges.iter().map(EdgeSegment::bound))
    }
}

/// Which way the shape's y axis points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YAxisOrientation {
    /// Mathematical convention: y grows upward.
    #[default]
    Upward,
    /// Image convention: y grows downward.
    Downward,
}

/// An ordered collection of contours plus the y-axis convention.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// The contours, in order.
    pub contours: Vec<Contour>,
    /// Which way the y axis points.
    pub y_axis: YAxisOrientation,
}

impl Shape {
    /// An empty shape.
    pub fn new() -> Self {
        Shape::default()
    }

    /// Append a contour.
    pub fn add_contour(&mut self, contour: Contour) {
        self.contours.push(contour);
    }

    /// The total number of edges across all contours.
    pub fn edge_count(&self) -> usize {
        self.contours.iter().map(|c| c.edges.len()).sum()
    }

    /// The axis-aligned bounding box, or `None` for an empty shape.
    pub fn bound(&self) -> Option<Rect> {
        union_bounds(self.contours.iter().filter_map(Contour::bound))
    }

    /// The sorted crossings of this shape's outline with the horizontal
    /// line at `y`.
    pub fn scanline(&self, y: f64) -> Scanline {
        let mut scanline = Scanline::new();
        for contour in &self.contours {
            for edge in &contour.edges {
                for crossing in edge.scanline_intersections(y) {
                    scanline.add_intersection(crossing.x, crossing.direction);
                }
            }
        }
        scanline.sort();
        scanline
    }

    /// Orient every contour to positive winding, and split single-edge
    /// contours into thirds so they have enough pieces to color.
    ///
    /// Shapes that encode holes as opposite-winding contours must skip
    /// this, or re-reverse their hole contours afterwards; normalization
    /// cannot tell a hole from a backwards outer contour.
    pub fn normalize(&mut self) {
        for contour in &mut self.contours {
            if contour.edges.len() == 1 {
                let [a, b, c] = contour.edges[0].split_in_thirds();
                contour.edges.clear();
                contour.edges.extend([a, b, c]);
            }
            if contour.winding() < 0 {
                contour.reverse();
            }
        }
    }

    /// Advisory input validation: finite control points, no empty
    /// contours.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for contour in &self.contours {
            if contour.edges.is_empty() {
                return Err(ValidationError::EmptyContour);
            }
            for edge in &contour.edges {
                for p in control_points(edge) {
                    if p.x.is_nan() || p.y.is_nan() {
                        return Err(ValidationError::NaN);
                    }
                    if p.x.is_infinite() || p.y.is_infinite() {
                        return Err(ValidationError::Infinity);
                    }
                }
            }
        }
        Ok(())
    }

    /// Build a shape from a path. Every `MoveTo` starts a new contour; a
    /// closing line is synthesized when a contour doesn't end where it
    /// started. All edges start out white.
    pub fn from_path(path: &BezPath) -> Shape {
        let mut shape = Shape::default();
        let mut contour = Contour::default();
        let mut start = Point::ZERO;
        let mut current = Point::ZERO;

        let mut finish = |contour: &mut Contour, current: Point, start: Point| {
            if !contour.edges.is_empty() {
                if (current - start).hypot() > CLOSURE_EPSILON {
                    contour.add_edge(EdgeSegment::line(current, start));
                }
                shape.contours.push(std::mem::take(contour));
            }
        };

        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => {
                    finish(&mut contour, current, start);
                    start = p;
                    current = p;
                }
                PathEl::LineTo(p) => {
                    if (p - current).hypot() > CLOSURE_EPSILON {
                        contour.add_edge(EdgeSegment::line(current, p));
                    }
                    current = p;
                }
                PathEl::QuadTo(p1, p2) => {
                    contour.add_edge(EdgeSegment::quadratic(current, p1, p2));
                    current = p2;
                }
                PathEl::CurveTo(p1, p2, p3) => {
                    contour.add_edge(EdgeSegment::cubic(current, p1, p2, p3));
                    current = p3;
                }
                PathEl::ClosePath => {
                    finish(&mut contour, current, start);
                    current = start;
                }
            }
        }
        finish(&mut contour, current, start);
        shape
    }

    /// The shape as a closed path.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for contour in &self.contours {
            let Some(first) = contour.edges.first() else {
                continue;
            };
            path.move_to(first.start());
            for edge in &contour.edges {
                match edge.curve {
                    Curve::Linear(l) => path.line_to(l.p1),
                    Curve::Quadratic(q) => path.quad_to(q.p1, q.p2),
                    Curve::Cubic(c) => path.curve_to(c.p1, c.p2, c.p3),
                }
            }
            path.close_path();
        }
        path
    }
}

fn control_points(edge: &EdgeSegment) -> Vec<Point> {
    match edge.curve {
        Curve::Linear(l) => vec![l.p0, l.p1],
        Curve::Quadratic(q) => vec![q.p0, q.p1, q.p2],
        Curve::Cubic(c) => vec![c.p0, c.p1, c.p2, c.p3],
    }
}

fn union_bounds(rects: impl Iterator<Item = Rect>) -> Option<Rect> {
    rects.reduce(|a, b| {
        Rect::new(
            a.x0.min(b.x0),
            a.y0.min(b.y0),
            a.x1.max(b.x1),
            a.y1.max(b.y1),
        )
    })
}
