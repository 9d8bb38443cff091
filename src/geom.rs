//! Vector helpers on top of [`kurbo::Vec2`].

use kurbo::Vec2;

/// The counterclockwise perpendicular of `v` (assuming y points up).
#[inline]
pub fn orthogonal(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// `v` scaled to unit length.
///
/// A zero vector normalizes to the positive y axis, so degenerate
/// tangents still produce a usable direction. Callers that want to
/// detect the degenerate case use [`normalize_or_zero`].
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    let len = v.hypot();
    if len == 0.0 {
        Vec2::new(0.0, 1.0)
    } else {
        v / len
    }
}

/// `v` scaled to unit length, passing a zero vector through unchanged.
#[inline]
pub fn normalize_or_zero(v: Vec2) -> Vec2 {
    let len = v.hypot();
    if len == 0.0 {
        Vec2::ZERO
    } else {
        v / len
    }
}
