//! The edge segment kernel: closest-point search, scanline crossings,
//! bounds, and subdivision for the three Bézier variants.

use arrayvec::ArrayVec;
use kurbo::{CubicBez, Line, ParamCurve, Point, QuadBez, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::color::EdgeColor;
use crate::distance::SignedDistance;
use crate::geom::{normalize, normalize_or_zero};
use crate::num::{non_zero_sign, solve_cubic, solve_quadratic};

// Winning parameters this close to an endpoint are treated as endpoint
// hits by the perpendicular-distance conversion.
const PERPENDICULAR_T_WINDOW: f64 = 1e-4;

// Newton refinement schedule for the cubic closest-point search.
const CUBIC_SEARCH_STARTS: usize = 4;
const CUBIC_SEARCH_STEPS: usize = 4;

#[inline]
fn mix(a: Vec2, b: Vec2, t: f64) -> Vec2 {
    a + (b - a) * t
}

#[inline]
fn sign_i32(x: f64) -> i32 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

/// The control polygon of one edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Curve {
    /// A line segment.
    Linear(Line),
    /// A quadratic Bézier.
    Quadratic(QuadBez),
    /// A cubic Bézier.
    Cubic(CubicBez),
}

/// One crossing of an edge with a horizontal line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanlineCrossing {
    /// Curve parameter of the crossing.
    pub t: f64,
    /// Horizontal position of the crossing.
    pub x: f64,
    /// Sign of `dy/dt` at the crossing; 0 for a tangent grazing.
    pub direction: i32,
}

/// An edge of a contour: a curve plus its channel membership.
///
/// The curve is parameterized by `t ∈ [0, 1]`, with `point(0)` at the
/// first control point and `point(1)` at the last.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeSegment {
    /// The geometry of the edge.
    pub curve: Curve,
    /// The channels this edge contributes distances to.
    pub color: EdgeColor,
}

impl EdgeSegment {
    /// A white linear edge.
    pub fn line(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        EdgeSegment {
            curve: Curve::Linear(Line::new(p0, p1)),
            color: EdgeColor::WHITE,
        }
    }

    /// A white quadratic edge.
    pub fn quadratic(p0: impl Into<Point>, p1: impl Into<Point>, p2: impl Into<Point>) -> Self {
        EdgeSegment {
            curve: Curve::Quadratic(QuadBez::new(p0.into(), p1.into(), p2.into())),
            color: EdgeColor::WHITE,
        }
    }

    /// A white cubic edge.
    pub fn cubic(
        p0: impl Into<Point>,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        p3: impl Into<Point>,
    ) -> Self {
        EdgeSegment {
            curve: Curve::Cubic(CubicBez::new(p0.into(), p1.into(), p2.into(), p3.into())),
            color: EdgeColor::WHITE,
        }
    }

    /// The same edge with a different color.
    pub fn with_color(mut self, color: EdgeColor) -> Self {
        self.color = color;
        self
    }

    /// The first control point.
    pub fn start(&self) -> Point {
        match self.curve {
            Curve::Linear(l) => l.p0,
            Curve::Quadratic(q) => q.p0,
            Curve::Cubic(c) => c.p0,
        }
    }

    /// The last control point.
    pub fn end(&self) -> Point {
        match self.curve {
            Curve::Linear(l) => l.p1,
            Curve::Quadratic(q) => q.p2,
            Curve::Cubic(c) => c.p3,
        }
    }

    /// The point at parameter `t`.
    pub fn point(&self, t: f64) -> Point {
        match self.curve {
            Curve::Linear(l) => l.eval(t),
            Curve::Quadratic(q) => q.eval(t),
            Curve::Cubic(c) => c.eval(t),
        }
    }

    /// The tangent direction at parameter `t` (not normalized).
    ///
    /// Where the true derivative vanishes at an endpoint (coincident
    /// control points), falls back to the chord towards the next
    /// distinct control point so callers always get a usable direction.
    pub fn direction(&self, t: f64) -> Vec2 {
        match self.curve {
            Curve::Linear(l) => l.p1 - l.p0,
            Curve::Quadratic(q) => {
                let tangent = mix(q.p1 - q.p0, q.p2 - q.p1, t);
                if tangent.hypot2() == 0.0 {
                    q.p2 - q.p0
                } else {
                    tangent
                }
            }
            Curve::Cubic(c) => {
                let tangent = mix(
                    mix(c.p1 - c.p0, c.p2 - c.p1, t),
                    mix(c.p2 - c.p1, c.p3 - c.p2, t),
                    t,
                );
                if tangent.hypot2() == 0.0 {
                    if t == 0.0 {
                        return c.p2 - c.p0;
                    }
                    if t == 1.0 {
                        return c.p3 - c.p1;
                    }
                }
                tangent
            }
        }
    }

    /// The rate of change of the direction at parameter `t`.
    pub fn direction_change(&self, t: f64) -> Vec2 {
        match self.curve {
            Curve::Linear(_) => Vec2::ZERO,
            Curve::Quadratic(q) => (q.p2 - q.p1) - (q.p1 - q.p0),
            Curve::Cubic(c) => mix(
                (c.p2 - c.p1) - (c.p1 - c.p0),
                (c.p3 - c.p2) - (c.p2 - c.p1),
                t,
            ),
        }
    }

    /// The signed distance from `p` to the nearest point of this edge,
    /// along with the winning parameter clamped to `[0, 1]`.
    ///
    /// The sign is positive when `p` lies to the left of the edge's
    /// travel direction, which for positively wound contours is the
    /// filled side.
    pub fn signed_distance(&self, p: Point) -> (SignedDistance, f64) {
        match self.curve {
            Curve::Linear(l) => linear_signed_distance(l, p),
            Curve::Quadratic(q) => quadratic_signed_distance(self, q, p),
            Curve::Cubic(c) => cubic_signed_distance(self, c, p),
        }
    }

    /// Convert an endpoint distance into the signed distance to the
    /// tangent line at that endpoint.
    ///
    /// Applies when the winning parameter `t` landed within `1e-4` of an
    /// endpoint, the sample lies beyond the endpoint along the tangent,
    /// and the perpendicular distance has smaller magnitude. This unifies
    /// the field across convex corners. Linear edges are returned
    /// unchanged.
    pub fn distance_to_perpendicular(
        &self,
        distance: SignedDistance,
        p: Point,
        t: f64,
    ) -> SignedDistance {
        if matches!(self.curve, Curve::Linear(_)) {
            return distance;
        }
        if t < PERPENDICULAR_T_WINDOW {
            let dir = normalize(self.direction(0.0));
            let aq = p - self.start();
            if aq.dot(dir) < 0.0 {
                let perpendicular = dir.cross(aq);
                if perpendicular.abs() <= distance.distance.abs() {
                    return SignedDistance::new(perpendicular, 0.0);
                }
            }
        } else if t > 1.0 - PERPENDICULAR_T_WINDOW {
            let dir = normalize(self.direction(1.0));
            let bq = p - self.end();
            if bq.dot(dir) > 0.0 {
                let perpendicular = dir.cross(bq);
                if perpendicular.abs() <= distance.distance.abs() {
                    return SignedDistance::new(perpendicular, 0.0);
                }
            }
        }
        distance
    }

    /// Every crossing of this edge with the horizontal line at `y`,
    /// for parameters in `[0, 1)`.
    ///
    /// The half-open parameter interval leaves crossings at shared
    /// vertices to the following edge. Tangent grazings are reported
    /// with direction 0; the scanline discards them.
    pub fn scanline_intersections(&self, y: f64) -> ArrayVec<ScanlineCrossing, 3> {
        let mut out = ArrayVec::new();
        match self.curve {
            Curve::Linear(l) => {
                let dy = l.p1.y - l.p0.y;
                if dy != 0.0 {
                    let t = (y - l.p0.y) / dy;
                    if (0.0..1.0).contains(&t) {
                        out.push(ScanlineCrossing {
                            t,
                            x: l.p0.x + t * (l.p1.x - l.p0.x),
                            direction: sign_i32(dy),
                        });
                    }
                }
            }
            Curve::Quadratic(q) => {
                let ab = q.p1 - q.p0;
                let br = (q.p2 - q.p1) - ab;
                for t in solve_quadratic(br.y, 2.0 * ab.y, q.p0.y - y) {
                    if (0.0..1.0).contains(&t) {
                        out.push(ScanlineCrossing {
                            t,
                            x: q.eval(t).x,
                            direction: sign_i32(ab.y + t * br.y),
                        });
                    }
                }
            }
            Curve::Cubic(c) => {
                let ab = c.p1 - c.p0;
                let br = (c.p2 - c.p1) - ab;
                let ar = ((c.p3 - c.p2) - (c.p2 - c.p1)) - br;
                for t in solve_cubic(ar.y, 3.0 * br.y, 3.0 * ab.y, c.p0.y - y) {
                    if (0.0..1.0).contains(&t) {
                        out.push(ScanlineCrossing {
                            t,
                            x: c.eval(t).x,
                            direction: sign_i32(ab.y + 2.0 * t * br.y + t * t * ar.y),
                        });
                    }
                }
            }
        }
        out
    }

    /// The axis-aligned bounding box, including interior extrema.
    pub fn bound(&self) -> Rect {
        let mut bounds = Bounds::seed(self.start());
        bounds.add(self.end());
        match self.curve {
            Curve::Linear(_) => {}
            Curve::Quadratic(q) => {
                let bot = (q.p1 - q.p0) - (q.p2 - q.p1);
                if bot.x != 0.0 {
                    let t = (q.p1.x - q.p0.x) / bot.x;
                    if t > 0.0 && t < 1.0 {
                        bounds.add(q.eval(t));
                    }
                }
                if bot.y != 0.0 {
                    let t = (q.p1.y - q.p0.y) / bot.y;
                    if t > 0.0 && t < 1.0 {
                        bounds.add(q.eval(t));
                    }
                }
            }
            Curve::Cubic(c) => {
                let a0 = c.p1 - c.p0;
                let a1 = ((c.p2 - c.p1) - a0) * 2.0;
                let a2 = ((c.p3 - c.p2) - (c.p2 - c.p1)) - ((c.p2 - c.p1) - a0);
                for t in solve_quadratic(a2.x, a1.x, a0.x) {
                    if t > 0.0 && t < 1.0 {
                        bounds.add(c.eval(t));
                    }
                }
                for t in solve_quadratic(a2.y, a1.y, a0.y) {
                    if t > 0.0 && t < 1.0 {
                        bounds.add(c.eval(t));
                    }
                }
            }
        }
        bounds.rect()
    }

    /// The same edge traversed in the opposite direction.
    pub fn reverse(&self) -> EdgeSegment {
        let curve = match self.curve {
            Curve::Linear(l) => Curve::Linear(Line::new(l.p1, l.p0)),
            Curve::Quadratic(q) => Curve::Quadratic(QuadBez::new(q.p2, q.p1, q.p0)),
            Curve::Cubic(c) => Curve::Cubic(CubicBez::new(c.p3, c.p2, c.p1, c.p0)),
        };
        EdgeSegment {
            curve,
            color: self.color,
        }
    }

    /// Move the first control point to `to`, preserving the opposite
    /// endpoint's tangent where the geometry allows it.
    pub fn move_start_point(&mut self, to: Point) {
        match &mut self.curve {
            Curve::Linear(l) => l.p0 = to,
            Curve::Quadratic(q) => {
                let orig_start_dir = q.p0 - q.p1;
                let orig_p1 = q.p1;
                let denom = (q.p0 - q.p1).cross(q.p2 - q.p1);
                if denom != 0.0 {
                    q.p1 += ((q.p0 - q.p1).cross(to - q.p0) / denom) * (q.p2 - q.p1);
                }
                q.p0 = to;
                if orig_start_dir.dot(q.p0 - q.p1) < 0.0 {
                    q.p1 = orig_p1;
                }
            }
            Curve::Cubic(c) => {
                c.p1 += to - c.p0;
                c.p0 = to;
            }
        }
    }

    /// Move the last control point to `to`, preserving the opposite
    /// endpoint's tangent where the geometry allows it.
    pub fn move_end_point(&mut self, to: Point) {
        match &mut self.curve {
            Curve::Linear(l) => l.p1 = to,
            Curve::Quadratic(q) => {
                let orig_end_dir = q.p2 - q.p1;
                let orig_p1 = q.p1;
                let denom = (q.p2 - q.p1).cross(q.p0 - q.p1);
                if denom != 0.0 {
                    q.p1 += ((q.p2 - q.p1).cross(to - q.p2) / denom) * (q.p0 - q.p1);
                }
                q.p2 = to;
                if orig_end_dir.dot(q.p2 - q.p1) < 0.0 {
                    q.p1 = orig_p1;
                }
            }
            Curve::Cubic(c) => {
                c.p2 += to - c.p3;
                c.p3 = to;
            }
        }
    }

    /// Split into three pieces whose concatenation reproduces this edge.
    pub fn split_in_thirds(&self) -> [EdgeSegment; 3] {
        let thirds = |lo: f64, hi: f64| {
            let curve = match self.curve {
                Curve::Linear(l) => Curve::Linear(l.subsegment(lo..hi)),
                Curve::Quadratic(q) => Curve::Quadratic(q.subsegment(lo..hi)),
                Curve::Cubic(c) => Curve::Cubic(c.subsegment(lo..hi)),
            };
            EdgeSegment {
                curve,
                color: self.color,
            }
        };
        [
            thirds(0.0, 1.0 / 3.0),
            thirds(1.0 / 3.0, 2.0 / 3.0),
            thirds(2.0 / 3.0, 1.0),
        ]
    }

    /// A cheap polyline estimate of this edge's length.
    pub fn length_estimate(&self) -> f64 {
        const SAMPLES: usize = 4;
        let mut length = 0.0;
        let mut prev = self.point(0.0);
        for i in 1..=SAMPLES {
            let p = self.point(i as f64 / SAMPLES as f64);
            length += (p - prev).hypot();
            prev = p;
        }
        length
    }
}

struct Bounds {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl Bounds {
    fn seed(p: Point) -> Self {
        Bounds {
            x0: p.x,
            y0: p.y,
            x1: p.x,
            y1: p.y,
        }
    }

    fn add(&mut self, p: Point) {
        self.x0 = self.x0.min(p.x);
        self.y0 = self.y0.min(p.y);
        self.x1 = self.x1.max(p.x);
        self.y1 = self.y1.max(p.y);
    }

    fn rect(&self) -> Rect {
        Rect::new(self.x0, self.y0, self.x1, self.y1)
    }
}

fn linear_signed_distance(l: Line, p: Point) -> (SignedDistance, f64) {
    let aq = p - l.p0;
    let ab = l.p1 - l.p0;
    let ab2 = ab.hypot2();
    let t = if ab2 == 0.0 { 0.5 } else { aq.dot(ab) / ab2 };
    let nearest_endpoint = if t > 0.5 { l.p1 } else { l.p0 };
    let eq = nearest_endpoint - p;
    let endpoint_distance = eq.hypot();
    if t > 0.0 && t < 1.0 {
        let ortho = ab.cross(aq) / ab.hypot();
        if ortho.abs() < endpoint_distance {
            return (SignedDistance::new(ortho, 0.0), t);
        }
    }
    let distance = non_zero_sign(ab.cross(aq)) * endpoint_distance;
    // A sample exactly on the endpoint gets a neutral tie-breaker.
    let dot = normalize(ab).dot(normalize_or_zero(eq)).abs();
    (SignedDistance::new(distance, dot), t.clamp(0.0, 1.0))
}

fn quadratic_signed_distance(
    edge: &EdgeSegment,
    q: QuadBez,
    p: Point,
) -> (SignedDistance, f64) {
    let qa = q.p0 - p;
    let ab = q.p1 - q.p0;
    let br = (q.p2 - q.p1) - ab;

    // d|Q(t) - p|²/dt = 0, expanded as a cubic in t.
    let a = br.dot(br);
    let b = 3.0 * ab.dot(br);
    let c = 2.0 * ab.dot(ab) + qa.dot(br);
    let d = qa.dot(ab);

    let mut t_best = 0.0;
    let q0 = p - q.p0;
    let mut min_distance = non_zero_sign(edge.direction(0.0).cross(q0)) * q0.hypot();
    {
        let q2 = p - q.p2;
        let distance = q2.hypot();
        if distance < min_distance.abs() {
            min_distance = non_zero_sign(edge.direction(1.0).cross(q2)) * distance;
            t_best = 1.0;
        }
    }
    for t in solve_cubic(a, b, c, d) {
        if t > 0.0 && t < 1.0 {
            let qe = p - q.eval(t);
            let distance = qe.hypot();
            if distance <= min_distance.abs() {
                min_distance = non_zero_sign((ab + br * t).cross(qe)) * distance;
                t_best = t;
            }
        }
    }

    endpoint_dot(edge, p, min_distance, t_best)
}

fn cubic_signed_distance(edge: &EdgeSegment, c: CubicBez, p: Point) -> (SignedDistance, f64) {
    let ab = c.p1 - c.p0;
    let br = (c.p2 - c.p1) - ab;
    let ar = ((c.p3 - c.p2) - (c.p2 - c.p1)) - br;

    let mut t_best = 0.0;
    let q0 = p - c.p0;
    let mut min_distance = non_zero_sign(edge.direction(0.0).cross(q0)) * q0.hypot();
    {
        let q3 = p - c.p3;
        let distance = q3.hypot();
        if distance < min_distance.abs() {
            min_distance = non_zero_sign(edge.direction(1.0).cross(q3)) * distance;
            t_best = 1.0;
        }
    }

    // No closed form: refine a few uniformly seeded starts with Newton
    // iterations on ⟨Q(t) - p, Q'(t)⟩ = 0.
    for i in 0..=CUBIC_SEARCH_STARTS {
        let mut t = i as f64 / CUBIC_SEARCH_STARTS as f64;
        let mut qe = c.eval(t) - p;
        for _ in 0..CUBIC_SEARCH_STEPS {
            let d1 = ab * 3.0 + br * (6.0 * t) + ar * (3.0 * t * t);
            let d2 = br * 6.0 + ar * (6.0 * t);
            t -= qe.dot(d1) / (d1.dot(d1) + qe.dot(d2));
            if t <= 0.0 || t >= 1.0 {
                break;
            }
            qe = c.eval(t) - p;
            let distance = qe.hypot();
            if distance < min_distance.abs() {
                let d1 = ab * 3.0 + br * (6.0 * t) + ar * (3.0 * t * t);
                min_distance = non_zero_sign(qe.cross(d1)) * distance;
                t_best = t;
            }
        }
    }

    endpoint_dot(edge, p, min_distance, t_best)
}

// Shared tail of the curved-segment distance routines: interior winners
// carry no tie-breaker, endpoint winners carry the tangent/sample cosine.
fn endpoint_dot(
    edge: &EdgeSegment,
    p: Point,
    min_distance: f64,
    t_best: f64,
) -> (SignedDistance, f64) {
    if t_best > 0.0 && t_best < 1.0 {
        (SignedDistance::new(min_distance, 0.0), t_best)
    } else if t_best < 0.5 {
        let dot = normalize(edge.direction(0.0))
            .dot(normalize_or_zero(edge.start() - p))
            .abs();
        (SignedDistance::new(min_distance, dot), 0.0)
    } else {
        let dot = normalize(edge.direction(1.0))
            .dot(normalize_or_zero(edge.end() - p))
            .abs();
        (SignedDistance::new(min_distance, dot), 1.0)
    }
}
