//! Vizij Race Core (renderer-agnostic)
//!
//! Timeline ranking and animation engine for bar chart races. Ingestion
//! adapters populate a [`RaceBuilder`] day by day; finalizing it yields an
//! immutable [`Race`] whose continuous-time samplers feed a [`FrameDriver`],
//! which hands one [`Snapshot`] per frame to an external [`FrameSink`].
//!
//! Data flows one way:
//! ingestion → time series → ranking fold (once per day) → sampler (per frame) → driver → renderer.

pub mod builder;
pub mod color;
pub mod config;
pub mod dataset;
pub mod diagnostics;
pub mod display;
pub mod driver;
pub mod entity;
pub mod error;
pub mod ids;
pub mod interp;
pub mod outputs;
pub mod race;
pub mod ranking;
pub mod registry;
pub mod sampling;
pub mod series;
pub mod units;

// Re-exports for consumers (adapters and renderers)
pub use builder::RaceBuilder;
pub use color::{resolve_color, NameStyle, Rgb, Theme, ThemedColor};
pub use config::Config;
pub use dataset::{load_race_json, parse_race_json, DatasetError, RaceDocument};
pub use diagnostics::{IngestReport, SkipReason, SkippedCell};
pub use display::{
    display_days, format_duration, placement_label, platform_label, short_comment, short_platform,
    DurationFormat, RunInfo,
};
pub use driver::{DriverState, DriverStep, FrameDriver, FrameSink};
pub use entity::{DisplayName, Entity, EntitySpec};
pub use error::RaceError;
pub use ids::EntityIdx;
pub use outputs::{EntityFrame, PlaybackSummary, Snapshot, TickLayer, TickMark};
pub use race::Race;
pub use ranking::{DailySeries, DayRanking, RankingFold};
pub use registry::Registry;
pub use sampling::{avg_index, lin_index, step_index, DaySeries};
pub use series::TimeSeries;
pub use units::{select_unit_index, TickBlend};
