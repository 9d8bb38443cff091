//! Contour combiners: drive a selector over every edge of a shape and
//! resolve the final sign.

use kurbo::Point;

use crate::distance::DistanceValue;
use crate::scanline::Scanline;
use crate::selector::DistanceSelector;
use crate::shape::Shape;

/// Evaluates one sample point against a whole shape.
///
/// A combiner is stateful so its caches survive across samples; it is
/// reset implicitly at the start of every [`measure`](Self::measure).
pub trait ContourCombiner: Default {
    /// The selector this combiner drives.
    type Selector: DistanceSelector;

    /// The combined distance of `shape` at `p`.
    fn measure(
        &mut self,
        shape: &Shape,
        p: Point,
    ) -> <Self::Selector as DistanceSelector>::Distance;
}

/// Feeds every edge of every contour into the selector. No winding: the
/// sign is whatever the nearest edge says, which is correct for shapes
/// without overlapping contours.
#[derive(Clone, Default)]
pub struct SimpleContourCombiner<S: DistanceSelector> {
    selector: S,
}

fn run_selector<S: DistanceSelector>(selector: &mut S, shape: &Shape, p: Point) {
    selector.reset(p);
    for contour in &shape.contours {
        for edge in &contour.edges {
            let (distance, t) = edge.signed_distance(p);
            selector.add_edge(distance, edge, t);
        }
    }
}

impl<S: DistanceSelector> ContourCombiner for SimpleContourCombiner<S> {
    type Selector = S;

    fn measure(&mut self, shape: &Shape, p: Point) -> S::Distance {
        run_selector(&mut self.selector, shape, p);
        self.selector.distance()
    }
}

/// Like [`SimpleContourCombiner`], but corrects the sign against a
/// non-zero winding fill test, so overlapping and self-intersecting
/// contours render as their union.
///
/// The scanline is cached per `y`; sampling row by row (as the generator
/// does) rebuilds it once per row.
#[derive(Clone, Default)]
pub struct OverlappingContourCombiner<S: DistanceSelector> {
    selector: S,
    scanline: Scanline,
    cached_y: Option<f64>,
}

impl<S> ContourCombiner for OverlappingContourCombiner<S>
where
    S: DistanceSelector,
    S::Distance: DistanceValue,
{
    type Selector = S;

    fn measure(&mut self, shape: &Shape, p: Point) -> S::Distance {
        if self.cached_y != Some(p.y) {
            self.scanline.reset();
            for contour in &shape.contours {
                for edge in &contour.edges {
                    for crossing in edge.scanline_intersections(p.y) {
                        self.scanline.add_intersection(crossing.x, crossing.direction);
                    }
                }
            }
            self.scanline.sort();
            self.cached_y = Some(p.y);
        }

        run_selector(&mut self.selector, shape, p);

        let filled = self.scanline.filled(p.x);
        let mut distance = self.selector.distance();
        if filled != (distance.resolve() > 0.0) {
            distance.flip_sign();
        }
        distance
    }
}
