//! Small numerical helpers: float ordering, medians, and the polynomial
//! root solvers backing closest-point search and scanline intersection.

use arrayvec::ArrayVec;

/// A wrapper for `f64` that implements `Ord`.
///
/// Unlike the more principled wrappers in the `ordered_float` crate, this
/// one just panics when comparing NaNs -- it doesn't order them, nor does
/// it guard against them on construction. Distance evaluation is dense in
/// float comparisons, and none of our comparison sites can produce a NaN
/// from finite input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheapOrderedFloat(f64);

impl CheapOrderedFloat {
    /// Retrieve the inner `f64`.
    pub fn into_inner(self) -> f64 {
        self.0
    }
}

impl From<f64> for CheapOrderedFloat {
    fn from(value: f64) -> Self {
        CheapOrderedFloat(value)
    }
}

impl Eq for CheapOrderedFloat {}

impl PartialOrd for CheapOrderedFloat {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CheapOrderedFloat {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        if self.0 < other.0 {
            std::cmp::Ordering::Less
        } else if self.0 > other.0 {
            std::cmp::Ordering::Greater
        } else {
            std::cmp::Ordering::Equal
        }
    }
}

/// The middle of three values.
///
/// This is the MSDF decoding function: the median of the three color
/// channels reconstructs the true distance everywhere except near
/// corners, where the channels intentionally disagree.
#[inline]
pub fn median(a: f64, b: f64, c: f64) -> f64 {
    a.min(b).max(a.max(b).min(c))
}

/// The sign of `x`, counting zero as negative.
///
/// Cross products decide which side of an edge a sample lies on; a sample
/// exactly on the tangent line has to land on one side deterministically.
#[inline]
pub fn non_zero_sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Real roots of `ax² + bx + c = 0`, without multiplicity.
///
/// Returns no roots when the equation is degenerate (`a = b = 0`) or has
/// no real solution, one root in the linear and double-root cases, and
/// two roots otherwise, in arbitrary order.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> ArrayVec<f64, 2> {
    let mut roots = ArrayVec::new();

    // When b dwarfs a, the quadratic term only adds noise: the root the
    // caller cares about is the one near -c/b, and going through the
    // discriminant loses it to cancellation.
    if a == 0.0 || b.abs() > 1e12 * a.abs() {
        if b == 0.0 {
            return roots;
        }
        roots.push(-c / b);
        return roots;
    }

    let dscr = b * b - 4.0 * a * c;
    if dscr > 0.0 {
        let sqrt_dscr = dscr.sqrt();
        roots.push((-b + sqrt_dscr) / (2.0 * a));
        roots.push((-b - sqrt_dscr) / (2.0 * a));
    } else if dscr == 0.0 {
        roots.push(-b / (2.0 * a));
    }
    roots
}

// Roots of the monic cubic x³ + ax² + bx + c, via the depressed form.
fn solve_cubic_normed(a: f64, b: f64, c: f64) -> ArrayVec<f64, 3> {
    let mut roots = ArrayVec::new();

    let a2 = a * a;
    let q = (a2 - 3.0 * b) / 9.0;
    let r = (a * (2.0 * a2 - 9.0 * b) + 27.0 * c) / 54.0;
    let r2 = r * r;
    let q3 = q * q * q;
    let a_third = a / 3.0;

    if r2 < q3 {
        // Three real roots: trigonometric form. The acos argument can
        // drift just outside [-1, 1] through rounding.
        let t = (r / q3.sqrt()).clamp(-1.0, 1.0).acos();
        let q = -2.0 * q.sqrt();
        roots.push(q * (t / 3.0).cos() - a_third);
        roots.push(q * ((t + 2.0 * std::f64::consts::PI) / 3.0).cos() - a_third);
        roots.push(q * ((t - 2.0 * std::f64::consts::PI) / 3.0).cos() - a_third);
    } else {
        // One real root, or a simple root plus a double root: Cardano.
        let u = non_zero_sign(-r) * (r.abs() + (r2 - q3).sqrt()).cbrt();
        let v = if u == 0.0 { 0.0 } else { q / u };
        roots.push((u + v) - a_third);
        if u == v || (u - v).abs() < 1e-12 * (u + v).abs() {
            roots.push(-0.5 * (u + v) - a_third);
        }
    }
    roots
}

/// Real roots of `ax³ + bx² + cx + d = 0`, without multiplicity.
///
/// Falls back to [`solve_quadratic`] when `a` is zero or so small that
/// normalizing by it would blow up the remaining coefficients.
pub fn solve_cubic(a: f64, b: f64, c: f64, d: f64) -> ArrayVec<f64, 3> {
    if a != 0.0 {
        let bn = b / a;
        // Above this ratio the error from the normalization exceeds the
        // error from dropping the cubic term outright.
        if bn.abs() < 1e6 {
            return solve_cubic_normed(bn, c / a, d / a);
        }
    }
    let mut roots = ArrayVec::new();
    roots.extend(solve_quadratic(b, c, d));
    roots
}
