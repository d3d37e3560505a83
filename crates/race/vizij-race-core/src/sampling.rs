//! Continuous-time sampling of per-day series.
//!
//! Model:
//! - A series holds one value per day, `D` days long.
//! - A fractional day index selects a point between two days.
//! - Indices are clamped into `[0, D-1]`; boundary days repeat, never extrapolate.
//!
//! API:
//! - step_index: hold the day at `floor(index)`
//! - lin_index: linear blend between `floor(index)` and the next day
//! - avg_index: raised-cosine weighted average over `[index - w, index + w]`
//!
//! All three are pure and read-only, so a finalized race can be sampled from
//! several threads at once.

use crate::interp::functions::{frac, lerp_f32, raised_cosine};

/// Weight sums below this are treated as an empty window.
const MIN_WEIGHT_SUM: f32 = 1e-6;

/// Read-only view of a per-day numeric series.
pub trait DaySeries {
    fn day_count(&self) -> usize;
    /// Value at an in-range day.
    fn at(&self, day: usize) -> f32;
}

impl DaySeries for [f32] {
    fn day_count(&self) -> usize {
        self.len()
    }
    fn at(&self, day: usize) -> f32 {
        self[day]
    }
}

impl DaySeries for [u32] {
    fn day_count(&self) -> usize {
        self.len()
    }
    fn at(&self, day: usize) -> f32 {
        self[day] as f32
    }
}

/// Absent days read as 0 so bars grow from (and shrink to) the origin.
impl DaySeries for [Option<f32>] {
    fn day_count(&self) -> usize {
        self.len()
    }
    fn at(&self, day: usize) -> f32 {
        self[day].unwrap_or(0.0)
    }
}

impl<T> DaySeries for Vec<T>
where
    [T]: DaySeries,
{
    fn day_count(&self) -> usize {
        self.as_slice().day_count()
    }
    fn at(&self, day: usize) -> f32 {
        self.as_slice().at(day)
    }
}

/// Clamp a fractional index into `[0, len-1]`. NaN maps to 0.
#[inline]
pub fn clamp_index(index: f32, len: usize) -> f32 {
    if len == 0 || index.is_nan() {
        return 0.0;
    }
    index.clamp(0.0, (len - 1) as f32)
}

/// Integer day at `floor(index)`, clamped.
#[inline]
pub fn floor_day(index: f32, len: usize) -> usize {
    clamp_index(index, len).floor() as usize
}

/// Integer day nearest to `index`, clamped. Used for text lookups.
#[inline]
pub fn round_day(index: f32, len: usize) -> usize {
    clamp_index(index, len).round() as usize
}

/// Step sample: `series[floor(index)]`. Empty series sample as 0.
pub fn step_index<S: DaySeries + ?Sized>(series: &S, index: f32) -> f32 {
    let len = series.day_count();
    if len == 0 {
        return 0.0;
    }
    series.at(floor_day(index, len))
}

/// Linear sample between `floor(index)` and `min(floor(index) + 1, D-1)`.
pub fn lin_index<S: DaySeries + ?Sized>(series: &S, index: f32) -> f32 {
    let len = series.day_count();
    if len == 0 {
        return 0.0;
    }
    let index = clamp_index(index, len);
    let i0 = index.floor() as usize;
    let i1 = (i0 + 1).min(len - 1);
    lerp_f32(series.at(i0), series.at(i1), frac(index))
}

/// Raised-cosine weighted average of the days in `[index - window, index + window]`.
///
/// Days at exactly `±window` carry zero weight, so a step in the series turns
/// into a glide of `2 * window` days without overshoot. A non-positive window,
/// or a window that holds no weight, falls back to [`step_index`].
pub fn avg_index<S: DaySeries + ?Sized>(series: &S, index: f32, window: f32) -> f32 {
    let len = series.day_count();
    if len == 0 {
        return 0.0;
    }
    if !(window > 0.0) || !window.is_finite() {
        return step_index(series, index);
    }
    let index = clamp_index(index, len);
    let start = (index - window).ceil().max(0.0) as usize;
    let end = ((index + window).floor() as usize).min(len - 1);

    let mut sum = 0.0f32;
    let mut weights = 0.0f32;
    let (mut lo, mut hi) = (f32::INFINITY, f32::NEG_INFINITY);
    for day in start..=end {
        let w = raised_cosine(day as f32 - index, window);
        let v = series.at(day);
        weights += w;
        sum += v * w;
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if weights < MIN_WEIGHT_SUM {
        return step_index(series, index);
    }
    // A weighted mean never leaves the sampled range; clamp away round-off.
    (sum / weights).clamp(lo, hi)
}
