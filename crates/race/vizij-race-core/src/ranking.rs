//! Ranking engine: one pass per day, in day order.
//!
//! Per day:
//! 1. Active entities are sorted ascending by raw value. The sort is stable and
//!    callers pass entities in registration order, so ties get distinct ranks
//!    in registration order.
//! 2. The first `min(count, display_limit)` entities get ranks `0..k`; the rest
//!    keep the unranked sentinel.
//! 3. The axis maximum is the value at the last displayed rank, capped by the
//!    previous day's axis maximum once one exists.
//! 4. The record-holder streak grows while the same entity holds rank 0 and
//!    resets to 0 when the holder changes.
//!
//! Days depend on the previous day's axis cap and holder, so the pass is a
//! sequential fold. [`RankingFold`] carries that state explicitly.

use serde::{Deserialize, Serialize};

use crate::ids::EntityIdx;
use crate::registry::Registry;

/// Global per-day series produced by the fold. All vectors are `D` long.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    /// Raw value that fills the axis on each day.
    pub axis_max: Vec<f32>,
    /// Fractional index into the tick unit table (filled at finalize).
    pub unit_choice: Vec<f32>,
    /// Consecutive days the current record holder has held rank 0.
    pub streak: Vec<u32>,
    pub holder: Vec<Option<EntityIdx>>,
}

impl DailySeries {
    pub fn new(days: usize) -> Self {
        Self {
            axis_max: vec![0.0; days],
            unit_choice: vec![0.0; days],
            streak: vec![0; days],
            holder: vec![None; days],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.axis_max.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.axis_max.is_empty()
    }
}

/// Result of ranking one day.
#[derive(Clone, Debug, PartialEq)]
pub struct DayRanking {
    /// Displayed entities in rank order; position is the rank.
    pub ranked: Vec<EntityIdx>,
    pub axis_max: f32,
    pub holder: Option<EntityIdx>,
    pub streak: u32,
}

impl DayRanking {
    /// Write this day's ranks into the registry and the global series.
    pub fn apply(&self, day: usize, registry: &mut Registry, daily: &mut DailySeries) {
        for (rank, idx) in self.ranked.iter().enumerate() {
            if let Some(entity) = registry.get_mut(*idx) {
                entity.series.set_rank(day, rank as u32);
            }
        }
        daily.axis_max[day] = self.axis_max;
        daily.streak[day] = self.streak;
        daily.holder[day] = self.holder;
    }
}

/// State carried from one day to the next.
#[derive(Clone, Debug, Default)]
pub struct RankingFold {
    prev_axis: Option<f32>,
    holder: Option<EntityIdx>,
    streak: u32,
}

impl RankingFold {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holder(&self) -> Option<EntityIdx> {
        self.holder
    }

    /// Rank one day's active entities.
    ///
    /// `active` must list every entity with data that day, in registration
    /// order. An empty day ranks nobody, carries the previous axis maximum
    /// (0 when there is none) and records a streak of 0. The tracked holder
    /// survives the gap, so its next day at rank 0 counts from that 0.
    pub fn rank_day(&mut self, active: &[(EntityIdx, f32)], display_limit: usize) -> DayRanking {
        let mut order: Vec<(EntityIdx, f32)> = active.to_vec();
        order.sort_by(|a, b| a.1.total_cmp(&b.1));
        order.truncate(display_limit);

        let Some(&(_, cutoff)) = order.last() else {
            self.streak = 0;
            return DayRanking {
                ranked: Vec::new(),
                axis_max: self.prev_axis.unwrap_or(0.0),
                holder: None,
                streak: 0,
            };
        };

        let axis_max = match self.prev_axis {
            Some(prev) => cutoff.min(prev),
            None => cutoff,
        };
        self.prev_axis = Some(axis_max);

        let leader = order[0].0;
        if self.holder == Some(leader) {
            self.streak += 1;
        } else {
            self.holder = Some(leader);
            self.streak = 0;
        }

        DayRanking {
            ranked: order.into_iter().map(|(idx, _)| idx).collect(),
            axis_max,
            holder: self.holder,
            streak: self.streak,
        }
    }
}
