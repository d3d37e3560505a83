//! Ingestion: the only way to populate a race.
//!
//! Protocol:
//! - register_entity for every competitor (registration order is the tie-break order)
//! - per day, in increasing order: set_day_value / set_day_run / set_day_comment,
//!   then finalize_day (runs the ranking fold for that day, exactly once)
//! - finalize: ranks any remaining days, derives the tick-unit series and
//!   locks the model into an immutable [`Race`]
//!
//! Invariant violations return [`RaceError`]; malformed cells are recorded in
//! the [`IngestReport`] and read as "no data".

use hashbrown::HashMap;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::color::resolve_color;
use crate::config::Config;
use crate::diagnostics::{IngestReport, SkipReason};
use crate::display::{format_duration, short_platform, RunInfo};
use crate::entity::{Entity, EntitySpec};
use crate::error::RaceError;
use crate::ids::EntityIdx;
use crate::race::Race;
use crate::ranking::{DailySeries, RankingFold};
use crate::registry::Registry;
use crate::sampling::avg_index;
use crate::series::TimeSeries;
use crate::units::select_unit_index;

#[derive(Debug)]
pub struct RaceBuilder {
    cfg: Config,
    name: String,
    days: usize,
    day_labels: Vec<String>,
    registry: Registry,
    run_info: HashMap<String, RunInfo>,
    daily: DailySeries,
    fold: RankingFold,
    next_day: usize,
    report: IngestReport,
    rng: StdRng,
}

impl RaceBuilder {
    /// Start a race over `days` days.
    pub fn new(cfg: Config, days: usize) -> Result<Self, RaceError> {
        cfg.validate()?;
        if days == 0 {
            return Err(RaceError::EmptyTimeline);
        }
        Ok(Self {
            rng: StdRng::seed_from_u64(cfg.color_seed),
            cfg,
            name: String::new(),
            days,
            day_labels: Vec::new(),
            registry: Registry::new(),
            run_info: HashMap::new(),
            daily: DailySeries::new(days),
            fold: RankingFold::new(),
            next_day: 0,
            report: IngestReport::default(),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn day_count(&self) -> usize {
        self.days
    }

    /// First day that has not been finalized yet.
    pub fn next_day(&self) -> usize {
        self.next_day
    }

    pub fn report(&self) -> &IngestReport {
        &self.report
    }

    /// One label per day (e.g. dates), shown with the frame's day.
    pub fn set_day_labels(&mut self, labels: Vec<String>) -> Result<(), RaceError> {
        if labels.len() != self.days {
            return Err(RaceError::DayLabelCount {
                got: labels.len(),
                days: self.days,
            });
        }
        self.day_labels = labels;
        Ok(())
    }

    /// Register a competitor. Its color is resolved here, once: an explicit
    /// color wins, then a solo entry's name style, then a seeded random color.
    pub fn register_entity(&mut self, spec: EntitySpec) -> Result<EntityIdx, RaceError> {
        if self.registry.contains(&spec.id) {
            return Err(RaceError::DuplicateEntity(spec.id));
        }
        let color = match spec.color {
            Some(color) => color,
            None => {
                let style = if spec.name.is_solo() {
                    spec.style.as_ref()
                } else {
                    None
                };
                resolve_color(style, self.cfg.theme, &mut self.rng)
            }
        };
        let entity = Entity {
            idx: self.registry.next_idx(),
            display_name: spec.name.resolve(),
            id: spec.id,
            color,
            decorations: spec.decorations,
            series: TimeSeries::new(self.days, self.cfg.unranked()),
        };
        self.registry.insert(entity)
    }

    /// Record `entity`'s raw value on `day`.
    ///
    /// The configured value floor is subtracted before storage. A missing
    /// display string is formatted from `raw`. Non-finite values are skipped
    /// and reported, not stored.
    pub fn set_day_value(
        &mut self,
        entity: &str,
        day: usize,
        raw: f32,
        display: Option<String>,
    ) -> Result<(), RaceError> {
        self.check_cell(entity, day)?;
        if !raw.is_finite() {
            return self.skip_cell(entity, day, SkipReason::NonFinite);
        }
        let display = display
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| format_duration(raw, self.cfg.duration_format));
        let value = raw - self.cfg.value_floor;
        self.series_mut(entity)?.write_value(day, value, display);
        Ok(())
    }

    /// Record that an adapter could not produce a value for this cell.
    pub fn skip_day_value(
        &mut self,
        entity: &str,
        day: usize,
        reason: SkipReason,
    ) -> Result<(), RaceError> {
        self.check_cell(entity, day)?;
        self.skip_cell(entity, day, reason)
    }

    /// Point `day` at a run reference in the entity's side table.
    pub fn set_day_run(&mut self, entity: &str, day: usize, reference: &str) -> Result<(), RaceError> {
        self.check_open_day(entity, day)?;
        self.series_mut(entity)?.set_run(day, reference);
        Ok(())
    }

    pub fn set_day_comment(
        &mut self,
        entity: &str,
        day: usize,
        comment: impl Into<String>,
    ) -> Result<(), RaceError> {
        self.check_open_day(entity, day)?;
        self.series_mut(entity)?.set_comment(day, comment.into());
        Ok(())
    }

    /// Attach platform metadata to a run reference. Platform names are
    /// shortened here ("Nintendo 64" → "N64"); a later call replaces the entry.
    pub fn set_run_info(&mut self, reference: impl Into<String>, mut info: RunInfo) {
        if let Some(platform) = info.platform.as_mut() {
            *platform = short_platform(platform).to_string();
        }
        self.run_info.insert(reference.into(), info);
    }

    /// Rank `day`. Days must be finalized in increasing order, each exactly once.
    pub fn finalize_day(&mut self, day: usize) -> Result<(), RaceError> {
        self.check_day(day)?;
        if day < self.next_day {
            return Err(RaceError::DayFinalizedTwice { day });
        }
        if day > self.next_day {
            return Err(RaceError::DayOutOfOrder {
                day,
                expected: self.next_day,
            });
        }

        let active: Vec<(EntityIdx, f32)> = self
            .registry
            .iter()
            .filter_map(|e| e.series.value(day).map(|v| (e.idx, v)))
            .collect();
        let ranking = self.fold.rank_day(&active, self.cfg.display_limit);
        ranking.apply(day, &mut self.registry, &mut self.daily);
        log::debug!(
            "day {day}: {} active, {} ranked, axis max {}, holder {:?} ({} days)",
            active.len(),
            ranking.ranked.len(),
            ranking.axis_max,
            ranking.holder,
            ranking.streak
        );

        self.next_day += 1;
        Ok(())
    }

    /// Lock the model. Remaining days are ranked in order, then the per-day
    /// tick unit is chosen from the smoothed axis scale.
    pub fn finalize(mut self) -> Result<(Race, IngestReport), RaceError> {
        while self.next_day < self.days {
            self.finalize_day(self.next_day)?;
        }

        for day in 0..self.days {
            let scale = avg_index(&self.daily.axis_max, day as f32, self.cfg.axis_smoothing);
            self.daily.unit_choice[day] =
                select_unit_index(scale, &self.cfg.tick_units, self.cfg.units_goal);
        }

        log::info!(
            "finalized race '{}': {} days, {} entities, {}",
            self.name,
            self.days,
            self.registry.len(),
            self.report
        );
        let race = Race::from_parts(
            self.cfg,
            self.name,
            self.day_labels,
            self.registry,
            self.run_info,
            self.daily,
        );
        Ok((race, self.report))
    }

    fn check_day(&self, day: usize) -> Result<(), RaceError> {
        if day >= self.days {
            return Err(RaceError::DayOutOfRange {
                day,
                days: self.days,
            });
        }
        Ok(())
    }

    /// Day in range, not yet finalized, entity known.
    fn check_open_day(&self, entity: &str, day: usize) -> Result<(), RaceError> {
        self.check_day(day)?;
        if day < self.next_day {
            return Err(RaceError::DayAlreadyFinalized {
                entity: entity.to_string(),
                day,
            });
        }
        if !self.registry.contains(entity) {
            return Err(RaceError::UnknownEntity(entity.to_string()));
        }
        Ok(())
    }

    /// As [`Self::check_open_day`], and the value cell is still unwritten.
    fn check_cell(&self, entity: &str, day: usize) -> Result<(), RaceError> {
        self.check_open_day(entity, day)?;
        let written = self
            .registry
            .by_id(entity)
            .is_some_and(|e| e.series.is_written(day));
        if written {
            return Err(RaceError::CellWrittenTwice {
                entity: entity.to_string(),
                day,
            });
        }
        Ok(())
    }

    fn skip_cell(&mut self, entity: &str, day: usize, reason: SkipReason) -> Result<(), RaceError> {
        self.series_mut(entity)?.write_absent(day);
        self.report.record(entity, day, reason);
        Ok(())
    }

    fn series_mut(&mut self, entity: &str) -> Result<&mut TimeSeries, RaceError> {
        Ok(&mut self.registry.by_id_mut(entity)?.series)
    }
}
