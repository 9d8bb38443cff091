//! Distance values flowing out of the selection pipeline.
//!
//! Sign convention: a sample inside the filled region has *positive*
//! distance, so with an increasing distance mapping the interior of a
//! shape stores values above the 0.5 isoline.

use serde::{Deserialize, Serialize};

use crate::num::median;
use crate::transform::DistanceMapping;

/// A signed distance candidate from one edge.
///
/// `distance` is negative outside the edge's filled side. `dot` is the
/// absolute cosine between the edge tangent at the nearest parameter and
/// the vector to the sample; it only matters as a tie-breaker when two
/// edges meeting at a point report the same absolute distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignedDistance {
    /// The signed distance itself.
    pub distance: f64,
    /// Tie-breaker for equal absolute distances; 0 for interior hits.
    pub dot: f64,
}

impl Default for SignedDistance {
    /// The sentinel "no edge seen yet": infinitely far outside.
    fn default() -> Self {
        SignedDistance {
            distance: -f64::MAX,
            dot: 0.0,
        }
    }
}

impl SignedDistance {
    /// A signed distance with the given tie-breaker.
    pub fn new(distance: f64, dot: f64) -> Self {
        SignedDistance { distance, dot }
    }

    /// Ordering: compare by absolute distance first, then by `dot`.
    ///
    /// Not an `Ord` impl because it deliberately disagrees with
    /// `PartialEq` (distances of opposite sign compare as equal).
    #[inline]
    pub fn closer_than(&self, other: &SignedDistance) -> bool {
        self.distance.abs() < other.distance.abs()
            || (self.distance.abs() == other.distance.abs() && self.dot < other.dot)
    }
}

/// A distance result the generator can store: some number of channels
/// plus a scalar resolution used for the fill test.
pub trait DistanceValue: Copy {
    /// The per-pixel storage, one `f32` per channel.
    type Pixel: Copy;

    /// Negate every channel.
    fn flip_sign(&mut self);

    /// The scalar distance this value stands for: the value itself for
    /// scalars, the channel median for multi-channel values.
    fn resolve(&self) -> f64;

    /// Map every channel and pack the result for storage.
    fn to_pixel(&self, mapping: &DistanceMapping) -> Self::Pixel;
}

impl DistanceValue for f64 {
    type Pixel = [f32; 1];

    fn flip_sign(&mut self) {
        *self = -*self;
    }

    fn resolve(&self) -> f64 {
        *self
    }

    fn to_pixel(&self, mapping: &DistanceMapping) -> [f32; 1] {
        [mapping.map(*self) as f32]
    }
}

/// A three-channel signed distance. Its representative value is the
/// median of the channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiDistance {
    /// Red channel distance.
    pub r: f64,
    /// Green channel distance.
    pub g: f64,
    /// Blue channel distance.
    pub b: f64,
}

impl MultiDistance {
    /// The channel median, which reconstructs the true distance away
    /// from corners.
    pub fn median(&self) -> f64 {
        median(self.r, self.g, self.b)
    }
}

impl DistanceValue for MultiDistance {
    type Pixel = [f32; 3];

    fn flip_sign(&mut self) {
        self.r = -self.r;
        self.g = -self.g;
        self.b = -self.b;
    }

    fn resolve(&self) -> f64 {
        self.median()
    }

    fn to_pixel(&self, mapping: &DistanceMapping) -> [f32; 3] {
        [
            mapping.map(self.r) as f32,
            mapping.map(self.g) as f32,
            mapping.map(self.b) as f32,
        ]
    }
}

/// A three-channel signed distance plus the color-agnostic true distance
/// in the fourth channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiAndTrueDistance {
    /// The color channels.
    pub multi: MultiDistance,
    /// The true distance, independent of edge colors.
    pub a: f64,
}

impl DistanceValue for MultiAndTrueDistance {
    type Pixel = [f32; 4];

    fn flip_sign(&mut self) {
        self.multi.flip_sign();
        self.a = -self.a;
    }

    fn resolve(&self) -> f64 {
        self.multi.median()
    }

    fn to_pixel(&self, mapping: &DistanceMapping) -> [f32; 4] {
        let [r, g, b] = self.multi.to_pixel(mapping);
        [r, g, b, mapping.map(self.a) as f32]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_prefers_smaller_magnitude() {
        let near = SignedDistance::new(-1.0, 0.5);
        let far = SignedDistance::new(2.0, 0.0);
        assert!(near.closer_than(&far));
        assert!(!far.closer_than(&near));
    }

    #[test]
    fn ordering_breaks_ties_by_dot() {
        let a = SignedDistance::new(1.0, 0.1);
        let b = SignedDistance::new(-1.0, 0.2);
        assert!(a.closer_than(&b));
        assert!(!b.closer_than(&a));
    }

    #[test]
    fn sentinel_loses_to_everything() {
        let sentinel = SignedDistance::default();
        assert!(SignedDistance::new(1e300, 1.0).closer_than(&sentinel));
    }

    #[test]
    fn multi_resolves_to_median() {
        let mut m = MultiDistance {
            r: 1.0,
            g: -2.0,
            b: 0.5,
        };
        assert_eq!(m.resolve(), 0.5);
        m.flip_sign();
        assert_eq!(m.resolve(), -0.5);
    }
}
