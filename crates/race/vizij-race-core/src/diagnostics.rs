//! Ingestion diagnostics.
//!
//! Data errors (malformed or non-finite cells) do not abort ingestion. Each
//! one is recorded here and surfaced in aggregate after finalize().

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// Value was NaN or infinite.
    NonFinite,
    /// Text cell that does not parse as a number.
    Malformed { text: String },
    /// Rejected by the ingestion adapter.
    Adapter { message: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NonFinite => write!(f, "non-finite value"),
            SkipReason::Malformed { text } => write!(f, "malformed value '{text}'"),
            SkipReason::Adapter { message } => write!(f, "{message}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkippedCell {
    pub entity: String,
    pub day: usize,
    pub reason: SkipReason,
}

/// Aggregate of all skipped cells for one ingestion run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestReport {
    #[serde(default)]
    pub skipped: Vec<SkippedCell>,
}

impl IngestReport {
    #[inline]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    #[inline]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    pub(crate) fn record(&mut self, entity: &str, day: usize, reason: SkipReason) {
        log::warn!("skipping cell for '{entity}' on day {day}: {reason}");
        self.skipped.push(SkippedCell {
            entity: entity.to_string(),
            day,
            reason,
        });
    }
}

impl fmt::Display for IngestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.skipped.len() {
            1 => write!(f, "1 cell skipped"),
            n => write!(f, "{n} cells skipped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts_cells() {
        let mut report = IngestReport::default();
        assert!(report.is_clean());
        assert_eq!(report.to_string(), "0 cells skipped");
        report.record("a", 3, SkipReason::NonFinite);
        assert_eq!(report.to_string(), "1 cell skipped");
        report.record(
            "b",
            4,
            SkipReason::Malformed {
                text: "n/a".into(),
            },
        );
        assert_eq!(report.skipped_count(), 2);
        assert_eq!(report.skipped[1].reason.to_string(), "malformed value 'n/a'");
    }
}
