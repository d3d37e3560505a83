//! A finalized race: immutable model plus continuous-time samplers.
//!
//! Sampling is pure over the finalized arrays:
//! - value: linear between days (bar length)
//! - rank: raised-cosine average over `rank_smoothing` days (bars glide between slots)
//! - axis scale: average over `axis_smoothing` days
//! - tick unit: average of the per-day unit choice over `tick_fade` days

use hashbrown::HashMap;

use crate::config::Config;
use crate::display::{display_days, placement_label, platform_label, short_comment, RunInfo};
use crate::entity::Entity;
use crate::ids::EntityIdx;
use crate::interp::functions::SNAP_EPS;
use crate::outputs::{EntityFrame, Snapshot};
use crate::ranking::DailySeries;
use crate::registry::Registry;
use crate::sampling::{avg_index, floor_day, lin_index, round_day};
use crate::units::{tick_layers, TickBlend};

#[derive(Clone, Debug)]
pub struct Race {
    cfg: Config,
    name: String,
    day_labels: Vec<String>,
    registry: Registry,
    run_info: HashMap<String, RunInfo>,
    daily: DailySeries,
}

impl Race {
    pub(crate) fn from_parts(
        cfg: Config,
        name: String,
        day_labels: Vec<String>,
        registry: Registry,
        run_info: HashMap<String, RunInfo>,
        daily: DailySeries,
    ) -> Self {
        Self {
            cfg,
            name,
            day_labels,
            registry,
            run_info,
            daily,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Number of days `D`.
    #[inline]
    pub fn day_count(&self) -> usize {
        self.daily.len()
    }

    pub fn day_label(&self, day: usize) -> Option<&str> {
        self.day_labels.get(day).map(String::as_str)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.registry.iter()
    }

    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.registry.by_id(id)
    }

    /// Platform metadata for a run reference, if any was supplied.
    pub fn run_info(&self, reference: &str) -> Option<&RunInfo> {
        self.run_info.get(reference)
    }

    pub fn daily(&self) -> &DailySeries {
        &self.daily
    }

    /// Fractional day index shown at `frame`.
    #[inline]
    pub fn day_index(&self, frame: u64) -> f64 {
        frame as f64 / self.cfg.frames_per_day as f64
    }

    /// Whether `frame` maps inside `[0, D-1]`.
    #[inline]
    pub fn frame_in_range(&self, frame: u64) -> bool {
        self.day_index(frame) <= (self.day_count() - 1) as f64
    }

    /// Animated raw value of an entity (absent days read as 0).
    pub fn value_at(&self, entity: EntityIdx, day_index: f32) -> f32 {
        self.registry
            .get(entity)
            .map(|e| lin_index(e.series.values(), day_index))
            .unwrap_or(0.0)
    }

    /// Smoothed rank slot; unranked days pull toward `display_limit + 1`.
    pub fn rank_at(&self, entity: EntityIdx, day_index: f32) -> f32 {
        self.registry
            .get(entity)
            .map(|e| avg_index(e.series.ranks(), day_index, self.cfg.rank_smoothing))
            .unwrap_or(self.cfg.unranked() as f32)
    }

    pub fn axis_scale_at(&self, day_index: f32) -> f32 {
        avg_index(&self.daily.axis_max, day_index, self.cfg.axis_smoothing)
    }

    /// Smoothed, fractional index into the tick unit table.
    pub fn preferred_unit_at(&self, day_index: f32) -> f32 {
        avg_index(&self.daily.unit_choice, day_index, self.cfg.tick_fade)
    }

    pub fn tick_blend_at(&self, day_index: f32) -> TickBlend {
        TickBlend::from_preferred(self.preferred_unit_at(day_index), self.cfg.tick_units.len())
    }

    /// Sample everything shown at `frame`. Indices past the timeline clamp to
    /// the last day; the driver stops before that happens.
    pub fn snapshot(&self, frame: u64) -> Snapshot {
        let day_index = self.day_index(frame) as f32;
        let days = self.day_count();
        let day = round_day(day_index, days);

        let axis_scale = self.axis_scale_at(day_index);
        let blend = self.tick_blend_at(day_index);
        let ticks = tick_layers(
            blend,
            &self.cfg.tick_units,
            axis_scale,
            self.cfg.tick_span,
            self.cfg.value_floor,
            self.cfg.tick_format,
        );

        let unranked = self.cfg.unranked() as f32;
        let mut entities: Vec<EntityFrame> = self
            .registry
            .iter()
            .filter_map(|e| {
                let display_value = e.series.display(day);
                if display_value.is_empty() {
                    return None;
                }
                let rank = self.rank_at(e.idx, day_index);
                if rank > unranked - SNAP_EPS {
                    return None;
                }
                let value = self.value_at(e.idx, day_index);
                let x_fraction = if axis_scale > 0.0 {
                    value / axis_scale
                } else {
                    0.0
                };
                Some(EntityFrame {
                    entity: e.idx,
                    id: e.id.clone(),
                    display_name: e.display_name.clone(),
                    color: e.color,
                    value,
                    x_fraction,
                    rank,
                    placement: e.series.rank(day).map(|r| placement_label(r as usize)),
                    display_value: display_value.to_string(),
                    run: e.series.run(day).map(str::to_string),
                    platform: e
                        .series
                        .run(day)
                        .and_then(|r| self.run_info.get(r))
                        .map(platform_label)
                        .filter(|label| !label.is_empty()),
                    comment: e
                        .series
                        .comment(day)
                        .map(|c| short_comment(c).into_owned()),
                    decorations: e.decorations.clone(),
                })
            })
            .collect();
        entities.sort_by(|a, b| a.rank.total_cmp(&b.rank));

        let streak = self.daily.streak[day];
        Snapshot {
            frame,
            day_index,
            day,
            day_label: self
                .day_label(floor_day(day_index, days))
                .map(str::to_string),
            axis_scale,
            unit_index: blend.index,
            unit_blend: blend.blend,
            ticks,
            record_holder: self.daily.holder[day]
                .and_then(|idx| self.registry.get(idx))
                .map(|e| e.id.clone()),
            record_holder_streak: streak,
            streak_label: display_days(streak),
            entities,
        }
    }
}
