//! Core configuration for vizij-race-core.

use serde::{Deserialize, Serialize};

use crate::color::Theme;
use crate::display::DurationFormat;
use crate::error::RaceError;

/// Tick-mark increments in seconds, ascending.
pub const DEFAULT_TICK_UNITS: [f32; 19] = [
    1.0, 5.0, 10.0, 15.0, 30.0, 60.0, 120.0, 180.0, 300.0, 600.0, 900.0, 1800.0, 3600.0,
    7200.0, 10800.0, 18000.0, 36000.0, 86400.0, 172800.0,
];

/// Floor subtracted from raw speedrun times (90 minutes).
pub const SPEEDRUN_VALUE_FLOOR: f32 = 90.0 * 60.0;

/// Tunables for ranking, sampling and tick selection.
/// Every field has a default so partial JSON configs deserialize.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How many top-ranked entities are shown and considered for the axis scale.
    pub display_limit: usize,
    pub frames_per_day: f32,
    /// Frame counter value the driver starts from.
    pub start_frame: u64,

    /// Averaging windows (in days) for rank, axis scale and tick unit smoothing.
    pub rank_smoothing: f32,
    pub axis_smoothing: f32,
    pub tick_fade: f32,

    /// Desired number of tick marks across the axis scale.
    pub units_goal: u32,
    /// Ascending table of tick increments.
    pub tick_units: Vec<f32>,
    /// Tick marks are emitted below `axis_scale * tick_span`.
    pub tick_span: f32,

    /// Subtracted from every raw value before ranking and scaling.
    pub value_floor: f32,

    pub theme: Theme,
    /// Seed for the fallback color generator.
    pub color_seed: u64,
    /// Format used when an ingestion call supplies no display string.
    pub duration_format: DurationFormat,
    pub tick_format: DurationFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display_limit: 10,
            frames_per_day: 3.0,
            start_frame: 0,
            rank_smoothing: 4.0,
            axis_smoothing: 14.0,
            tick_fade: 3.0,
            units_goal: 3,
            tick_units: DEFAULT_TICK_UNITS.to_vec(),
            tick_span: 1.4,
            value_floor: 0.0,
            theme: Theme::default(),
            color_seed: 1_152_003,
            duration_format: DurationFormat::default(),
            tick_format: DurationFormat::TICK_LABEL,
        }
    }
}

impl Config {
    /// Speedrun leaderboards: times are measured above a 90 minute floor.
    pub fn speedrun() -> Self {
        Self {
            value_floor: SPEEDRUN_VALUE_FLOOR,
            ..Self::default()
        }
    }

    /// Rank slot written for entities that are absent or beyond the display limit.
    #[inline]
    pub fn unranked(&self) -> u32 {
        self.display_limit as u32 + 1
    }

    pub fn validate(&self) -> Result<(), RaceError> {
        if self.display_limit == 0 {
            return Err(RaceError::InvalidConfig("display_limit must be > 0".into()));
        }
        if !self.frames_per_day.is_finite() || self.frames_per_day <= 0.0 {
            return Err(RaceError::InvalidConfig(
                "frames_per_day must be finite and > 0".into(),
            ));
        }
        if self.units_goal == 0 {
            return Err(RaceError::InvalidConfig("units_goal must be > 0".into()));
        }
        if self.tick_units.len() < 2 {
            return Err(RaceError::InvalidConfig(
                "tick_units needs at least two entries".into(),
            ));
        }
        if self.tick_units.iter().any(|u| !u.is_finite() || *u <= 0.0) {
            return Err(RaceError::InvalidConfig(
                "tick_units must be finite and > 0".into(),
            ));
        }
        if self.tick_units.windows(2).any(|w| w[1] <= w[0]) {
            return Err(RaceError::InvalidConfig(
                "tick_units must be strictly ascending".into(),
            ));
        }
        if !self.tick_span.is_finite() || self.tick_span <= 0.0 {
            return Err(RaceError::InvalidConfig("tick_span must be finite and > 0".into()));
        }
        if !self.value_floor.is_finite() {
            return Err(RaceError::InvalidConfig("value_floor must be finite".into()));
        }
        for (name, window) in [
            ("rank_smoothing", self.rank_smoothing),
            ("axis_smoothing", self.axis_smoothing),
            ("tick_fade", self.tick_fade),
        ] {
            // Non-positive windows are legal (step fallback); NaN is not.
            if window.is_nan() {
                return Err(RaceError::InvalidConfig(format!("{name} must not be NaN")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let cfg = Config::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.unranked(), 11);
        assert_eq!(Config::speedrun().value_floor, 5400.0);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: Config = serde_json::from_str(r#"{ "display_limit": 2 }"#).unwrap();
        assert_eq!(cfg.display_limit, 2);
        assert_eq!(cfg.frames_per_day, 3.0);
        assert_eq!(cfg.tick_units.len(), DEFAULT_TICK_UNITS.len());
    }

    #[test]
    fn rejects_unusable_tick_tables() {
        let mut cfg = Config {
            tick_units: vec![5.0],
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(RaceError::InvalidConfig(_))));
        cfg.tick_units = vec![5.0, 5.0];
        assert!(matches!(cfg.validate(), Err(RaceError::InvalidConfig(_))));
        cfg.tick_units = vec![1.0, 5.0];
        cfg.frames_per_day = 0.0;
        assert!(matches!(cfg.validate(), Err(RaceError::InvalidConfig(_))));
    }
}
