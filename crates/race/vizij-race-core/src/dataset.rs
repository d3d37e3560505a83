//! Public API: parse a JSON race document into a finalized [`Race`].
//!
//! Notes:
//! - `days` labels the timeline; every per-entity array must have the same length.
//! - `values` cells are numbers, numeric strings or null (no data).
//!   Any other string is a data error: the cell is skipped and reported.
//! - `display`, `runs` and `comments` are optional day-aligned arrays.
//! - `config` is optional; missing fields take their defaults.
//! - `runs` optionally maps run references to `{ region, platform, emulated }`.
//! - Ingestion follows the builder protocol: register all entities, then
//!   write and finalize each day in order.

use hashbrown::HashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::builder::RaceBuilder;
use crate::color::{NameStyle, Rgb};
use crate::config::Config;
use crate::diagnostics::{IngestReport, SkipReason};
use crate::display::RunInfo;
use crate::entity::{DisplayName, EntitySpec};
use crate::error::RaceError;
use crate::race::Race;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("race json parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("entity '{entity}' has {found} {field} entries, expected {expected}")]
    SeriesLength {
        entity: String,
        field: &'static str,
        found: usize,
        expected: usize,
    },
    #[error("invalid color '{color}' for entity '{entity}'")]
    InvalidColor { entity: String, color: String },
    #[error(transparent)]
    Race(#[from] RaceError),
}

/// Parse and ingest a race document in one call.
pub fn load_race_json(s: &str) -> Result<(Race, IngestReport), DatasetError> {
    parse_race_json(s)?.into_race()
}

/// Parse a race document without ingesting it.
pub fn parse_race_json(s: &str) -> Result<RaceDocument, DatasetError> {
    let doc: RaceDocument = serde_json::from_str(s)?;
    doc.validate()?;
    Ok(doc)
}

// ----- JSON schema (serde) -----

#[derive(Debug, Clone, Deserialize)]
pub struct RaceDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub config: Option<Config>,
    pub days: Vec<String>,
    pub entities: Vec<RaceEntity>,
    #[serde(default)]
    pub runs: HashMap<String, RunInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RaceEntity {
    pub id: String,
    pub name: DisplayName,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub style: Option<NameStyle>,
    #[serde(default)]
    pub decorations: serde_json::Value,
    pub values: Vec<Option<RawCell>>,
    #[serde(default)]
    pub display: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub runs: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub comments: Option<Vec<Option<String>>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawCell {
    Number(f64),
    Text(String),
}

/// Parsed value of one cell.
enum Cell {
    Value(f32),
    Empty,
    Skip(SkipReason),
}

impl RawCell {
    fn parse(&self) -> Cell {
        match self {
            RawCell::Number(n) => Cell::Value(*n as f32),
            RawCell::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Cell::Empty;
                }
                match trimmed.parse::<f32>() {
                    Ok(v) => Cell::Value(v),
                    Err(_) => Cell::Skip(SkipReason::Malformed { text: text.clone() }),
                }
            }
        }
    }
}

fn day_at<T: Clone>(series: &Option<Vec<Option<T>>>, day: usize) -> Option<T> {
    series.as_ref().and_then(|s| s.get(day).cloned().flatten())
}

impl RaceDocument {
    fn validate(&self) -> Result<(), DatasetError> {
        let expected = self.days.len();
        for e in &self.entities {
            let lengths = [
                ("values", Some(e.values.len())),
                ("display", e.display.as_ref().map(Vec::len)),
                ("runs", e.runs.as_ref().map(Vec::len)),
                ("comments", e.comments.as_ref().map(Vec::len)),
            ];
            for (field, found) in lengths {
                if let Some(found) = found.filter(|n| *n != expected) {
                    return Err(DatasetError::SeriesLength {
                        entity: e.id.clone(),
                        field,
                        found,
                        expected,
                    });
                }
            }
        }
        Ok(())
    }

    /// Ingest through a [`RaceBuilder`] and finalize.
    pub fn into_race(self) -> Result<(Race, IngestReport), DatasetError> {
        self.validate()?;
        let cfg = self.config.unwrap_or_default();
        let days = self.days.len();
        let mut builder = RaceBuilder::new(cfg, days)?.with_name(self.name);
        builder.set_day_labels(self.days)?;
        for (reference, info) in self.runs {
            builder.set_run_info(reference, info);
        }

        for e in &self.entities {
            let mut spec = EntitySpec::new(e.id.clone(), e.name.clone())
                .with_decorations(e.decorations.clone());
            if let Some(style) = &e.style {
                spec = spec.with_style(style.clone());
            }
            if let Some(hex) = &e.color {
                let rgb = Rgb::from_hex(hex).ok_or_else(|| DatasetError::InvalidColor {
                    entity: e.id.clone(),
                    color: hex.clone(),
                })?;
                spec = spec.with_color(rgb);
            }
            builder.register_entity(spec)?;
        }

        for day in 0..days {
            for e in &self.entities {
                if let Some(cell) = &e.values[day] {
                    match cell.parse() {
                        Cell::Value(v) => {
                            builder.set_day_value(&e.id, day, v, day_at(&e.display, day))?
                        }
                        Cell::Skip(reason) => builder.skip_day_value(&e.id, day, reason)?,
                        Cell::Empty => {}
                    }
                }
                if let Some(run) = day_at(&e.runs, day) {
                    builder.set_day_run(&e.id, day, &run)?;
                }
                if let Some(comment) = day_at(&e.comments, day) {
                    builder.set_day_comment(&e.id, day, comment)?;
                }
            }
            builder.finalize_day(day)?;
        }

        Ok(builder.finalize()?)
    }
}
