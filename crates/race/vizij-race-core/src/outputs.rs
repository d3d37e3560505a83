//! Output contracts from the core to the renderer.
//!
//! A snapshot carries everything a renderer needs for one frame, in value
//! space: the renderer owns pixel mapping, fonts, images and encoding.
//! Snapshots are only produced from a finalized race.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::ids::EntityIdx;

/// One tick mark in value space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TickMark {
    pub value: f32,
    pub label: String,
}

/// One layer of tick marks at a single unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TickLayer {
    pub unit: f32,
    /// 0..1
    pub opacity: f32,
    pub marks: Vec<TickMark>,
}

/// Per-entity state for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityFrame {
    pub entity: EntityIdx,
    pub id: String,
    pub display_name: String,
    pub color: Rgb,
    /// Linearly interpolated raw value.
    pub value: f32,
    /// `value / axis_scale`; 0 when the scale is not positive.
    pub x_fraction: f32,
    /// Smoothed rank; fractional while gliding between slots.
    pub rank: f32,
    /// Ordinal of the discrete rank at the rounded day ("1st", "2nd", ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<String>,
    pub display_value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<String>,
    /// `"<region> <platform> emu"` for the run, when its metadata is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// First line of the day's comment, `" [...]"`-marked when truncated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub decorations: serde_json::Value,
}

/// Everything sampled for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub frame: u64,
    pub day_index: f32,
    /// Day used for text lookups (`round(day_index)`).
    pub day: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_label: Option<String>,
    pub axis_scale: f32,
    pub unit_index: usize,
    pub unit_blend: f32,
    pub ticks: Vec<TickLayer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_holder: Option<String>,
    pub record_holder_streak: u32,
    pub streak_label: String,
    /// Visible entities ordered by smoothed rank.
    pub entities: Vec<EntityFrame>,
}

/// Emitted once when the timeline is exhausted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSummary {
    pub frames_rendered: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_frame: Option<u64>,
    pub last_day_index: f32,
}
