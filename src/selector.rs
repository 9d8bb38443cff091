//! Distance selectors: per-query accumulators that keep the minimum
//! signed distance observed over a stream of edges.

use kurbo::Point;

use crate::color::EdgeColor;
use crate::distance::{MultiAndTrueDistance, MultiDistance, SignedDistance};
use crate::segment::EdgeSegment;

/// Accumulates the minimum distance over a stream of edges.
///
/// One selector is reset and refilled per sample point; the combiner
/// feeds it every edge of every contour.
pub trait DistanceSelector: Clone + Default {
    /// The combined distance this selector produces.
    type Distance;

    /// Start a new query at sample point `p`.
    fn reset(&mut self, p: Point);

    /// Offer one edge's distance candidate, with the winning parameter.
    fn add_edge(&mut self, distance: SignedDistance, edge: &EdgeSegment, t: f64);

    /// The accumulated distance.
    fn distance(&self) -> Self::Distance;

    /// Keep the per-channel closer candidate of `self` and `other`.
    fn merge(&mut self, other: &Self);
}

// One channel's minimum, remembering the winning edge so the endpoint
// distance can be converted to a perpendicular distance at read time.
// Converting only the winner (rather than every candidate) keeps the
// in/out decision with the true nearest edge.
#[derive(Clone, Default)]
struct PerpendicularChannel {
    min: SignedDistance,
    winner: Option<(EdgeSegment, f64)>,
}

impl PerpendicularChannel {
    fn reset(&mut self) {
        self.min = SignedDistance::default();
        self.winner = None;
    }

    fn add(&mut self, distance: SignedDistance, edge: &EdgeSegment, t: f64) {
        if distance.closer_than(&self.min) {
            self.min = distance;
            self.winner = Some((*edge, t));
        }
    }

    fn resolve(&self, p: Point) -> f64 {
        match &self.winner {
            Some((edge, t)) => edge.distance_to_perpendicular(self.min, p, *t).distance,
            None => self.min.distance,
        }
    }

    fn merge(&mut self, other: &Self) {
        if other.min.closer_than(&self.min) {
            self.min = other.min;
            self.winner = other.winner;
        }
    }
}

/// Selects the true (Euclidean) signed distance.
#[derive(Clone, Default)]
pub struct TrueDistanceSelector {
    min: SignedDistance,
}

impl DistanceSelector for TrueDistanceSelector {
    type Distance = f64;

    fn reset(&mut self, _p: Point) {
        self.min = SignedDistance::default();
    }

    fn add_edge(&mut self, distance: SignedDistance, _edge: &EdgeSegment, _t: f64) {
        if distance.closer_than(&self.min) {
            self.min = distance;
        }
    }

    fn distance(&self) -> f64 {
        self.min.distance
    }

    fn merge(&mut self, other: &Self) {
        if other.min.closer_than(&self.min) {
            self.min = other.min;
        }
    }
}

/// Selects the perpendicular signed distance: the nearest edge's
/// distance, extended past its endpoints along the endpoint tangents.
#[derive(Clone, Default)]
pub struct PerpendicularDistanceSelector {
    p: Point,
    channel: PerpendicularChannel,
}

impl DistanceSelector for PerpendicularDistanceSelector {
    type Distance = f64;

    fn reset(&mut self, p: Point) {
        self.p = p;
        self.channel.reset();
    }

    fn add_edge(&mut self, distance: SignedDistance, edge: &EdgeSegment, t: f64) {
        self.channel.add(distance, edge, t);
    }

    fn distance(&self) -> f64 {
        self.channel.resolve(self.p)
    }

    fn merge(&mut self, other: &Self) {
        self.channel.merge(&other.channel);
    }
}

/// Selects three perpendicular distances, one per color channel. Edges
/// only feed the channels their color contains; black edges are
/// invisible.
#[derive(Clone, Default)]
pub struct MultiDistanceSelector {
    p: Point,
    r: PerpendicularChannel,
    g: PerpendicularChannel,
    b: PerpendicularChannel,
}

impl DistanceSelector for MultiDistanceSelector {
    type Distance = MultiDistance;

    fn reset(&mut self, p: Point) {
        self.p = p;
        self.r.reset();
        self.g.reset();
        self.b.reset();
    }

    fn add_edge(&mut self, distance: SignedDistance, edge: &EdgeSegment, t: f64) {
        if edge.color.contains(EdgeColor::RED) {
            self.r.add(distance, edge, t);
        }
        if edge.color.contains(EdgeColor::GREEN) {
            self.g.add(distance, edge, t);
        }
        if edge.color.contains(EdgeColor::BLUE) {
            self.b.add(distance, edge, t);
        }
    }

    fn distance(&self) -> MultiDistance {
        MultiDistance {
            r: self.r.resolve(self.p),
            g: self.g.resolve(self.p),
            b: self.b.resolve(self.p),
        }
    }

    fn merge(&mut self, other: &Self) {
        self.r.merge(&other.r);
        self.g.merge(&other.g);
        self.b.merge(&other.b);
    }
}

/// [`MultiDistanceSelector`] plus a fourth channel carrying the true
/// distance, fed by every edge regardless of color.
#[derive(Clone, Default)]
pub struct MultiAndTrueDistanceSelector {
    multi: MultiDistanceSelector,
    alpha: TrueDistanceSelector,
}

impl DistanceSelector for MultiAndTrueDistanceSelector {
    type Distance = MultiAndTrueDistance;

    fn reset(&mut self, p: Point) {
        self.multi.reset(p);
        self.alpha.reset(p);
    }

    fn add_edge(&mut self, distance: SignedDistance, edge: &EdgeSegment, t: f64) {
        self.multi.add_edge(distance, edge, t);
        self.alpha.add_edge(distance, edge, t);
    }

    fn distance(&self) -> MultiAndTrueDistance {
        MultiAndTrueDistance {
            multi: self.multi.distance(),
            a: self.alpha.distance(),
        }
    }

    fn merge(&mut self, other: &Self) {
        self.multi.merge(&other.multi);
        self.alpha.merge(&other.alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed<S: DistanceSelector>(selector: &mut S, edges: &[EdgeSegment], p: Point) {
        selector.reset(p);
        for edge in edges {
            let (d, t) = edge.signed_distance(p);
            selector.add_edge(d, edge, t);
        }
    }

    #[test]
    fn true_selector_keeps_nearest() {
        let edges = [
            EdgeSegment::line((0.0, 0.0), (2.0, 0.0)),
            EdgeSegment::line((0.0, 5.0), (2.0, 5.0)),
        ];
        let mut selector = TrueDistanceSelector::default();
        feed(&mut selector, &edges, Point::new(1.0, 1.0));
        assert!((selector.distance().abs() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_selector_reports_far_outside() {
        let mut selector = TrueDistanceSelector::default();
        selector.reset(Point::new(0.0, 0.0));
        assert_eq!(selector.distance(), -f64::MAX);
    }

    #[test]
    fn multi_selector_respects_colors() {
        let near = EdgeSegment::line((0.0, 0.0), (2.0, 0.0)).with_color(EdgeColor::CYAN);
        let far = EdgeSegment::line((0.0, 5.0), (2.0, 5.0)).with_color(EdgeColor::MAGENTA);
        let mut selector = MultiDistanceSelector::default();
        feed(&mut selector, &[near, far], Point::new(1.0, 1.0));
        let d = selector.distance();
        // Red is only fed by the far magenta edge.
        assert!((d.r.abs() - 4.0).abs() < 1e-12);
        // Green is only fed by the near cyan edge.
        assert!((d.g.abs() - 1.0).abs() < 1e-12);
        // Blue sees both and keeps the nearer.
        assert!((d.b.abs() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn black_edges_are_invisible_to_multi() {
        let edge = EdgeSegment::line((0.0, 0.0), (2.0, 0.0)).with_color(EdgeColor::BLACK);
        let mut selector = MultiDistanceSelector::default();
        feed(&mut selector, &[edge], Point::new(1.0, 1.0));
        let d = selector.distance();
        assert_eq!(d.r, -f64::MAX);
        assert_eq!(d.g, -f64::MAX);
        assert_eq!(d.b, -f64::MAX);
    }

    #[test]
    fn mtsdf_alpha_ignores_colors() {
        let edge = EdgeSegment::line((0.0, 0.0), (2.0, 0.0)).with_color(EdgeColor::BLACK);
        let mut selector = MultiAndTrueDistanceSelector::default();
        feed(&mut selector, &[edge], Point::new(1.0, 1.0));
        let d = selector.distance();
        assert!((d.a.abs() - 1.0).abs() < 1e-12);
        assert_eq!(d.multi.r, -f64::MAX);
    }

    #[test]
    fn merge_takes_the_closer_channel() {
        let near = EdgeSegment::line((0.0, 0.0), (2.0, 0.0));
        let far = EdgeSegment::line((0.0, 5.0), (2.0, 5.0));
        let p = Point::new(1.0, 1.0);
        let mut a = MultiDistanceSelector::default();
        feed(&mut a, &[near], p);
        let mut b = MultiDistanceSelector::default();
        feed(&mut b, &[far], p);
        b.merge(&a);
        let d = b.distance();
        assert!((d.g.abs() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn perpendicular_selector_unifies_convex_corner() {
        // Two edges of a square corner at the origin; sample diagonally
        // outside the corner. True distance would be the Euclidean
        // distance to the corner; the perpendicular selector reports the
        // distance to a tangent line instead.
        let edges = [
            EdgeSegment::quadratic((0.0, 0.0), (1.0, 0.0), (2.0, 0.0)),
            EdgeSegment::quadratic((0.0, 2.0), (0.0, 1.0), (0.0, 0.0)),
        ];
        let p = Point::new(-0.5, -0.5);
        let mut selector = PerpendicularDistanceSelector::default();
        feed(&mut selector, &edges, p);
        assert!((selector.distance() - (-0.5)).abs() < 1e-9);

        let mut true_selector = TrueDistanceSelector::default();
        feed(&mut true_selector, &edges, p);
        assert!((true_selector.distance().abs() - 0.5f64.hypot(0.5)).abs() < 1e-9);
    }
}
