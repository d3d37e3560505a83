//! Model invariant violations.
//!
//! These are programming errors at the ingestion boundary and abort the
//! current call with context. Malformed cells are not errors: they are
//! recorded in [`crate::diagnostics::IngestReport`].

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RaceError {
    #[error("timeline must contain at least one day")]
    EmptyTimeline,
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("entity '{0}' is already registered")]
    DuplicateEntity(String),
    #[error("unknown entity '{0}'")]
    UnknownEntity(String),
    #[error("day {day} is outside the timeline of {days} days")]
    DayOutOfRange { day: usize, days: usize },
    #[error("{got} day labels supplied for a timeline of {days} days")]
    DayLabelCount { got: usize, days: usize },
    #[error("cell for entity '{entity}' on day {day} was already written")]
    CellWrittenTwice { entity: String, day: usize },
    #[error("day {day} is already finalized; cannot write entity '{entity}'")]
    DayAlreadyFinalized { entity: String, day: usize },
    #[error("day {day} was finalized twice")]
    DayFinalizedTwice { day: usize },
    #[error("day {day} finalized out of order (next expected day is {expected})")]
    DayOutOfOrder { day: usize, expected: usize },
}
