//! Interpolation and easing
//!
//! Timed motions (camera focus, entity `move_to`) map their linear progress
//! through [`smooth`] before interpolating, which gives a slow start, a fast
//! middle and a gentle settle.

use std::f64::consts::PI;

use crate::Vec3;

/// Linear interpolation between two points
#[inline]
pub fn lerp(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    from.lerp(to, t)
}

/// S-curve remap of a linear progress fraction
///
/// `tanh(sqrt(x) * 6 - π) / 2 + 0.503`. The domain is not clamped: callers
/// snap to the end point once progress passes 1, so values slightly past 1
/// are tolerated. Negative input yields NaN.
#[inline]
pub fn smooth(x: f64) -> f64 {
    (x.sqrt() * 6.0 - PI).tanh() / 2.0 + 0.503
}
