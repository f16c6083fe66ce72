//! Easing curve for the chaos/formed blend.
//!
//! Shapes the damped progress scalar before it is used to blend between
//! the two endpoint configurations.

/// Cubic ease-in-out: slow at both ends, fast through the middle.
///
/// Input `t` is clamped to `[0.0, 1.0]`; the result is in the same range.
#[inline]
#[must_use]
pub fn cubic_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        0.5 * (2.0 * t - 2.0).powi(3) + 1.0
    }
}
