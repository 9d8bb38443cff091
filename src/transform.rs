//! The two halves of an SDF transformation: where shape coordinates land
//! in the output bitmap, and how distances become pixel values.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// A range of signed distances, in shape units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    /// The distance mapped to pixel value 0.
    pub lower: f64,
    /// The distance mapped to pixel value 1.
    pub upper: f64,
}

impl Range {
    /// A range from `lower` to `upper`.
    pub fn new(lower: f64, upper: f64) -> Self {
        Range { lower, upper }
    }

    /// A range of the given total width, centered on zero.
    pub fn symmetrical(width: f64) -> Self {
        Range {
            lower: -0.5 * width,
            upper: 0.5 * width,
        }
    }
}

/// An invertible affine mapping from signed distances to stored values.
///
/// `map(d) = scale * (d + translate)`. Constructed from a [`Range`] so
/// that `lower` maps to 0 and `upper` maps to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceMapping {
    scale: f64,
    translate: f64,
}

impl DistanceMapping {
    /// The identity mapping.
    pub fn identity() -> Self {
        DistanceMapping {
            scale: 1.0,
            translate: 0.0,
        }
    }

    /// The mapping taking `range.lower` to 0 and `range.upper` to 1.
    pub fn new(range: Range) -> Self {
        DistanceMapping {
            scale: 1.0 / (range.upper - range.lower),
            translate: -range.lower,
        }
    }

    /// Map a distance to a stored value.
    #[inline]
    pub fn map(&self, d: f64) -> f64 {
        self.scale * (d + self.translate)
    }

    /// Map a distance difference, ignoring the offset.
    #[inline]
    pub fn map_delta(&self, d: f64) -> f64 {
        self.scale * d
    }

    /// The inverse mapping, from stored values back to distances.
    pub fn inverse(&self) -> Self {
        DistanceMapping {
            scale: 1.0 / self.scale,
            translate: -self.scale * self.translate,
        }
    }
}

impl From<Range> for DistanceMapping {
    fn from(range: Range) -> Self {
        DistanceMapping::new(range)
    }
}

/// A component-wise scale and translation between shape coordinates and
/// pixel coordinates: `project(p) = scale ⊙ (p + translate)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    scale: Vec2,
    translate: Vec2,
}

impl Default for Projection {
    fn default() -> Self {
        Projection {
            scale: Vec2::new(1.0, 1.0),
            translate: Vec2::ZERO,
        }
    }
}

impl Projection {
    /// A projection with the given scale and translation.
    pub fn new(scale: Vec2, translate: Vec2) -> Self {
        Projection { scale, translate }
    }

    /// Shape coordinates to pixel coordinates.
    #[inline]
    pub fn project(&self, p: Point) -> Point {
        Point::new(
            self.scale.x * (p.x + self.translate.x),
            self.scale.y * (p.y + self.translate.y),
        )
    }

    /// Pixel coordinates to shape coordinates. Exact inverse of
    /// [`project`](Self::project).
    #[inline]
    pub fn unproject(&self, p: Point) -> Point {
        Point::new(
            p.x / self.scale.x - self.translate.x,
            p.y / self.scale.y - self.translate.y,
        )
    }
}

/// Everything the generator needs to know about coordinates: the spatial
/// projection and the distance-to-value mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SdfTransformation {
    /// Shape-to-pixel spatial projection.
    pub projection: Projection,
    /// Distance-to-value mapping.
    pub distance_mapping: DistanceMapping,
}

impl SdfTransformation {
    /// Combine a projection and a distance mapping.
    pub fn new(projection: Projection, distance_mapping: DistanceMapping) -> Self {
        SdfTransformation {
            projection,
            distance_mapping,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn nonzero() -> impl Strategy<Value = f64> {
        (-1e3..1e3f64).prop_filter("nonzero", |x| x.abs() > 1e-3)
    }

    proptest! {
        #[test]
        fn unproject_inverts_project(
            sx in nonzero(), sy in nonzero(),
            tx in -1e3..1e3f64, ty in -1e3..1e3f64,
            px in -1e3..1e3f64, py in -1e3..1e3f64,
        ) {
            let proj = Projection::new(Vec2::new(sx, sy), Vec2::new(tx, ty));
            let p = Point::new(px, py);
            let q = proj.unproject(proj.project(p));
            prop_assert!((q - p).hypot() < 1e-9 * (1.0 + p.to_vec2().hypot()));
        }

        #[test]
        fn mapping_inverse_round_trips(
            lo in -1e3..1e3f64, width in 1e-3..1e3f64, d in -1e3..1e3f64,
        ) {
            let mapping = DistanceMapping::new(Range::new(lo, lo + width));
            let x = mapping.inverse().map(mapping.map(d));
            prop_assert!((x - d).abs() < 1e-6 * (1.0 + d.abs()));
        }
    }

    #[test]
    fn range_endpoints_map_to_unit_interval() {
        let mapping = DistanceMapping::new(Range::new(-2.0, 2.0));
        assert_eq!(mapping.map(-2.0), 0.0);
        assert_eq!(mapping.map(2.0), 1.0);
        assert_eq!(mapping.map(0.0), 0.5);
        assert_eq!(mapping.map_delta(2.0), 0.5);
    }
}
