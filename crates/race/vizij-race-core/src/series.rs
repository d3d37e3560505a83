//! Per-entity time series.
//!
//! Three day-aligned sequences (raw value, display string, rank) plus two
//! per-day references into entity-owned side tables (runs, comments).
//! Every cell is written at most once during ingestion and only read afterwards.

use hashbrown::HashMap;

/// Day-aligned series for one entity. Length is fixed at creation.
#[derive(Clone, Debug)]
pub struct TimeSeries {
    values: Vec<Option<f32>>,
    display: Vec<String>,
    ranks: Vec<u32>,
    written: Vec<bool>,
    unranked: u32,

    run_index: Vec<Option<usize>>,
    runs: Vec<String>,
    run_lookup: HashMap<String, usize>,

    comment_index: Vec<Option<usize>>,
    comments: Vec<String>,
}

impl TimeSeries {
    pub(crate) fn new(days: usize, unranked: u32) -> Self {
        Self {
            values: vec![None; days],
            display: vec![String::new(); days],
            ranks: vec![unranked; days],
            written: vec![false; days],
            unranked,
            run_index: vec![None; days],
            runs: Vec::new(),
            run_lookup: HashMap::new(),
            comment_index: vec![None; days],
            comments: Vec::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw (floored) value, None when the entity has no data that day.
    #[inline]
    pub fn value(&self, day: usize) -> Option<f32> {
        self.values.get(day).copied().flatten()
    }

    #[inline]
    pub fn values(&self) -> &[Option<f32>] {
        &self.values
    }

    /// Display string, empty when the entity has no data that day.
    #[inline]
    pub fn display(&self, day: usize) -> &str {
        self.display.get(day).map(String::as_str).unwrap_or("")
    }

    /// Assigned rank, None when unranked that day.
    #[inline]
    pub fn rank(&self, day: usize) -> Option<u32> {
        self.ranks.get(day).copied().filter(|r| *r != self.unranked)
    }

    /// Raw rank slots including the unranked sentinel.
    #[inline]
    pub fn ranks(&self) -> &[u32] {
        &self.ranks
    }

    #[inline]
    pub fn unranked(&self) -> u32 {
        self.unranked
    }

    /// Whether a value (or a skipped cell) was already recorded for `day`.
    #[inline]
    pub fn is_written(&self, day: usize) -> bool {
        self.written.get(day).copied().unwrap_or(false)
    }

    pub fn run_index(&self, day: usize) -> Option<usize> {
        self.run_index.get(day).copied().flatten()
    }

    pub fn run(&self, day: usize) -> Option<&str> {
        self.run_index(day).map(|i| self.runs[i].as_str())
    }

    /// Distinct run references in first-seen order.
    pub fn runs(&self) -> &[String] {
        &self.runs
    }

    pub fn comment_index(&self, day: usize) -> Option<usize> {
        self.comment_index.get(day).copied().flatten()
    }

    pub fn comment(&self, day: usize) -> Option<&str> {
        self.comment_index(day).map(|i| self.comments[i].as_str())
    }

    pub(crate) fn write_value(&mut self, day: usize, value: f32, display: String) {
        self.values[day] = Some(value);
        self.display[day] = display;
        self.written[day] = true;
    }

    /// Record a cell that was attempted but carried no usable value.
    pub(crate) fn write_absent(&mut self, day: usize) {
        self.written[day] = true;
    }

    pub(crate) fn set_rank(&mut self, day: usize, rank: u32) {
        self.ranks[day] = rank;
    }

    /// Point `day` at `reference`, reusing its slot when seen before.
    pub(crate) fn set_run(&mut self, day: usize, reference: &str) {
        let next = self.runs.len();
        let idx = *self
            .run_lookup
            .entry(reference.to_string())
            .or_insert(next);
        if idx == next {
            self.runs.push(reference.to_string());
        }
        self.run_index[day] = Some(idx);
    }

    pub(crate) fn set_comment(&mut self, day: usize, comment: String) {
        self.comment_index[day] = Some(self.comments.len());
        self.comments.push(comment);
    }
}
