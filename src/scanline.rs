//! A horizontal line through a shape and its crossings with the outline.

use crate::num::CheapOrderedFloat;

/// How a winding number turns into an inside/outside decision.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FillRule {
    /// The point is inside if its winding number is non-zero.
    NonZero,
    /// The point is inside if its winding number is odd.
    EvenOdd,
}

/// One crossing of the outline with a horizontal line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    /// Horizontal position of the crossing.
    pub x: f64,
    /// Sign of `dy/dt` where the contour crosses: +1 going up, -1 going
    /// down.
    pub direction: i32,
}

/// The ordered crossings of a shape's outline with one horizontal line.
///
/// Populate with [`add_intersection`](Self::add_intersection), then call
/// [`sort`](Self::sort) before querying windings.
#[derive(Clone, Debug, Default)]
pub struct Scanline {
    intersections: Vec<Intersection>,
    // winding_prefix[k] is the summed direction of the first k
    // intersections; rebuilt by sort().
    winding_prefix: Vec<i32>,
    sorted: bool,
}

impl Scanline {
    /// An empty scanline.
    pub fn new() -> Self {
        Scanline::default()
    }

    /// Record a crossing. Grazing crossings (direction 0) carry no
    /// winding and are discarded.
    pub fn add_intersection(&mut self, x: f64, direction: i32) {
        if direction == 0 {
            return;
        }
        self.intersections.push(Intersection { x, direction });
        self.sorted = false;
    }

    /// Sort crossings by x and prepare winding queries.
    pub fn sort(&mut self) {
        self.intersections
            .sort_by_key(|i| CheapOrderedFloat::from(i.x));
        self.winding_prefix.clear();
        self.winding_prefix.push(0);
        let mut sum = 0;
        for i in &self.intersections {
            sum += i.direction;
            self.winding_prefix.push(sum);
        }
        self.sorted = true;
    }

    /// The winding number just left of `x`: the summed directions of all
    /// crossings strictly left of `x`.
    ///
    /// Requires [`sort`](Self::sort) to have been called since the last
    /// insertion.
    pub fn winding(&self, x: f64) -> i32 {
        debug_assert!(self.sorted || self.intersections.is_empty());
        let k = self.intersections.partition_point(|i| i.x < x);
        self.winding_prefix.get(k).copied().unwrap_or(0)
    }

    /// Is `x` inside the shape under the non-zero fill rule?
    pub fn filled(&self, x: f64) -> bool {
        self.filled_by(x, FillRule::NonZero)
    }

    /// Is `x` inside the shape under the given fill rule?
    pub fn filled_by(&self, x: f64, rule: FillRule) -> bool {
        let w = self.winding(x);
        match rule {
            FillRule::NonZero => w != 0,
            FillRule::EvenOdd => w % 2 != 0,
        }
    }

    /// The crossings recorded so far (sorted only after
    /// [`sort`](Self::sort)).
    pub fn intersections(&self) -> &[Intersection] {
        &self.intersections
    }

    /// Forget all crossings.
    pub fn reset(&mut self) {
        self.intersections.clear();
        self.winding_prefix.clear();
        self.sorted = false;
    }
}
