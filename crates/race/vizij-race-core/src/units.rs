//! Axis tick-unit selection.
//!
//! For an axis scale `s`, the preferred unit is the smallest table entry
//! `U[k] >= s / goal`. The stored per-day choice is `k - 1`, clamped so that
//! both `U[i]` and `U[i + 1]` exist; smoothing that index over days yields a
//! fractional value whose remainder cross-fades two tick layers.

use serde::{Deserialize, Serialize};

use crate::display::{format_duration, DurationFormat};
use crate::interp::functions::{frac, snap_index, SNAP_EPS};
use crate::outputs::{TickLayer, TickMark};

/// Upper bound on marks emitted for one layer.
pub const MAX_TICKS: usize = 256;

/// Per-day unit index for `scale`. `units` must hold at least two ascending entries.
pub fn select_unit_index(scale: f32, units: &[f32], goal: u32) -> f32 {
    if units.len() < 2 {
        return 0.0;
    }
    let target = scale / goal.max(1) as f32;
    let k = units
        .iter()
        .position(|u| *u >= target)
        .unwrap_or(units.len() - 1);
    k.saturating_sub(1).min(units.len() - 2) as f32
}

/// Integer unit slot plus the blend toward the next slot.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TickBlend {
    pub index: usize,
    /// 0 shows only `U[index]`; values toward 1 fade in `U[index + 1]`.
    pub blend: f32,
}

impl TickBlend {
    /// Split a smoothed unit index. Remainders within 0.01 of either end snap.
    pub fn from_preferred(preferred: f32, units_len: usize) -> Self {
        let max_index = units_len.saturating_sub(2);
        let p = if preferred.is_finite() {
            preferred.clamp(0.0, max_index as f32)
        } else {
            0.0
        };
        let index = (snap_index(p).max(0) as usize).min(max_index);
        let mut blend = frac(p);
        if blend > 1.0 - SNAP_EPS {
            blend = 0.0;
        }
        Self { index, blend }
    }

    /// Whether the secondary layer is visible at all.
    #[inline]
    pub fn has_secondary(&self) -> bool {
        self.blend >= SNAP_EPS
    }
}

/// Tick values `unit, 2*unit, ...` strictly below `scale * span`. Zero is skipped.
pub fn tick_values(unit: f32, scale: f32, span: f32) -> Vec<f32> {
    let limit = scale * span;
    if !(unit > 0.0) || !(limit > 0.0) || !limit.is_finite() {
        return Vec::new();
    }
    (1..=MAX_TICKS)
        .map(|i| unit * i as f32)
        .take_while(|v| *v < limit)
        .collect()
}

/// Build the visible tick layers for a blend at the given axis scale.
/// Labels render `value + value_floor` so they read in raw units.
pub fn tick_layers(
    blend: TickBlend,
    units: &[f32],
    scale: f32,
    span: f32,
    value_floor: f32,
    label_format: DurationFormat,
) -> Vec<TickLayer> {
    let layer = |unit: f32, opacity: f32| TickLayer {
        unit,
        opacity,
        marks: tick_values(unit, scale, span)
            .into_iter()
            .map(|value| TickMark {
                value,
                label: format_duration(value + value_floor, label_format),
            })
            .collect(),
    };

    let mut layers = Vec::with_capacity(2);
    if let Some(unit) = units.get(blend.index) {
        layers.push(layer(*unit, 1.0 - blend.blend));
    }
    if blend.has_secondary() {
        if let Some(next) = units.get(blend.index + 1) {
            layers.push(layer(*next, blend.blend));
        }
    }
    layers
}
