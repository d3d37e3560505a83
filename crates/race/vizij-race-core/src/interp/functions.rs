//! Interpolation helpers:
//! - lerp_f32 (linear blend)
//! - raised_cosine (Hann-like window weight)
//! - frac / snap_index (fractional part and near-integer snapping)

use std::f32::consts::PI;

/// Offsets within this distance of the next integer snap up to it.
pub const SNAP_EPS: f32 = 0.01;

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Fractional part of a non-negative index.
#[inline]
pub fn frac(x: f32) -> f32 {
    x - x.floor()
}

/// Weight of a sample `offset` days away from the window center.
/// 1 at the center, 0 at `|offset| == window`. Callers guarantee `window > 0`.
#[inline]
pub fn raised_cosine(offset: f32, window: f32) -> f32 {
    0.5 + 0.5 * (offset / window * PI).cos()
}

/// Floor `x`, except values within [`SNAP_EPS`] below the next integer round up.
/// Keeps float noise such as `2.9999` from selecting the lower slot.
#[inline]
pub fn snap_index(x: f32) -> i64 {
    let floor = x.floor();
    if x - floor > 1.0 - SNAP_EPS {
        floor as i64 + 1
    } else {
        floor as i64
    }
}
