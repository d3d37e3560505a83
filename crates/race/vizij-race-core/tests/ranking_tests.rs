use std::collections::BTreeSet;

use vizij_race_core::{
    config::Config,
    entity::EntitySpec,
    ids::EntityIdx,
    race::Race,
    Rgb, RaceBuilder,
};

fn mk_race(display_limit: usize, series: &[(&str, &[Option<f32>])]) -> Race {
    let cfg = Config {
        display_limit,
        ..Config::default()
    };
    let days = series[0].1.len();
    let mut b = RaceBuilder::new(cfg, days).expect("builder");
    for (id, _) in series {
        b.register_entity(EntitySpec::new(*id, *id).with_color(Rgb::new(9, 9, 9)))
            .expect("register");
    }
    for day in 0..days {
        for (id, values) in series {
            if let Some(v) = values[day] {
                b.set_day_value(id, day, v, None).expect("value");
            }
        }
        b.finalize_day(day).expect("finalize day");
    }
    b.finalize().expect("finalize").0
}

fn ranks_on(race: &Race, day: usize) -> Vec<Option<u32>> {
    race.entities().map(|e| e.series.rank(day)).collect()
}

#[test]
fn three_day_scenario_ranks_axis_and_streak() {
    // A: [100, 90, 80], B: [95, 85, 999], display limit 2
    let race = mk_race(
        2,
        &[
            ("A", &[Some(100.0), Some(90.0), Some(80.0)]),
            ("B", &[Some(95.0), Some(85.0), Some(999.0)]),
        ],
    );

    assert_eq!(ranks_on(&race, 0), vec![Some(1), Some(0)]);
    assert_eq!(ranks_on(&race, 1), vec![Some(1), Some(0)]);
    assert_eq!(ranks_on(&race, 2), vec![Some(0), Some(1)]);

    let daily = race.daily();
    assert_eq!(daily.axis_max, vec![100.0, 90.0, 90.0]);
    assert_eq!(daily.streak, vec![0, 1, 0]);
    assert_eq!(
        daily.holder,
        vec![Some(EntityIdx(1)), Some(EntityIdx(1)), Some(EntityIdx(0))]
    );
}

#[test]
fn ranks_form_a_gap_free_prefix() {
    let race = mk_race(
        3,
        &[
            ("a", &[Some(5.0), None, Some(1.0), Some(4.0)]),
            ("b", &[Some(3.0), None, None, Some(2.0)]),
            ("c", &[Some(9.0), Some(7.0), Some(3.0), Some(6.0)]),
            ("d", &[Some(1.0), None, Some(8.0), Some(3.0)]),
            ("e", &[None, None, Some(2.0), Some(5.0)]),
        ],
    );

    for day in 0..race.day_count() {
        let active = race.entities().filter(|e| e.series.value(day).is_some()).count();
        let k = active.min(3) as u32;
        let ranks: Vec<u32> = race.entities().filter_map(|e| e.series.rank(day)).collect();
        let unique: BTreeSet<u32> = ranks.iter().copied().collect();
        assert_eq!(ranks.len(), unique.len(), "duplicate rank on day {day}");
        assert_eq!(unique, (0..k).collect::<BTreeSet<u32>>(), "day {day}");
    }
    // Beyond the display limit entities keep the sentinel slot.
    assert_eq!(race.entity("c").unwrap().series.ranks()[0], 4);
}

#[test]
fn ties_get_distinct_ranks_in_registration_order() {
    let race = mk_race(
        5,
        &[
            ("first", &[Some(10.0)]),
            ("second", &[Some(10.0)]),
            ("leader", &[Some(1.0)]),
        ],
    );
    assert_eq!(ranks_on(&race, 0), vec![Some(1), Some(2), Some(0)]);
}

#[test]
fn axis_max_is_capped_by_previous_day() {
    let race = mk_race(
        2,
        &[
            ("x", &[Some(10.0), Some(10.0), Some(10.0), Some(10.0)]),
            ("y", &[Some(50.0), Some(80.0), Some(30.0), Some(40.0)]),
        ],
    );
    let axis = &race.daily().axis_max;
    assert_eq!(axis, &vec![50.0, 50.0, 30.0, 30.0]);

    for day in 1..axis.len() {
        let cutoff = race
            .entities()
            .filter(|e| e.series.rank(day) == Some(1))
            .find_map(|e| e.series.value(day))
            .unwrap();
        if cutoff > axis[day - 1] {
            assert!(axis[day] <= axis[day - 1]);
        } else {
            assert_eq!(axis[day], cutoff);
        }
    }
}

#[test]
fn streak_counts_consecutive_days_at_rank_zero() {
    let race = mk_race(
        3,
        &[
            ("p", &[Some(1.0), Some(1.0), Some(1.0), Some(5.0), Some(5.0)]),
            ("q", &[Some(2.0), Some(2.0), Some(2.0), Some(2.0), Some(2.0)]),
        ],
    );
    let daily = race.daily();
    assert_eq!(daily.streak, vec![0, 1, 2, 0, 1]);
    for day in 1..daily.streak.len() {
        if daily.holder[day] == daily.holder[day - 1] {
            assert_eq!(daily.streak[day], daily.streak[day - 1] + 1);
        } else {
            assert_eq!(daily.streak[day], 0);
        }
    }
}

#[test]
fn empty_day_keeps_sentinels_and_carries_axis() {
    let race = mk_race(2, &[("solo", &[Some(40.0), None, Some(60.0)])]);
    assert_eq!(ranks_on(&race, 1), vec![None]);
    assert_eq!(race.daily().axis_max, vec![40.0, 40.0, 40.0]);
    assert_eq!(race.daily().holder[1], None);
    assert_eq!(race.daily().holder[2], Some(EntityIdx(0)));
    // The holder is remembered across the gap; the gap day itself reads 0.
    assert_eq!(race.daily().streak, vec![0, 0, 1]);
}

#[test]
fn holder_returning_after_a_gap_counts_on_from_zero() {
    let race = mk_race(
        2,
        &[
            ("a", &[Some(5.0), Some(5.0), None, Some(5.0)]),
            ("b", &[Some(9.0), Some(9.0), None, Some(9.0)]),
        ],
    );
    assert_eq!(race.daily().streak, vec![0, 1, 0, 1]);

    // A new leader after the gap starts over.
    let race = mk_race(
        2,
        &[
            ("a", &[Some(5.0), Some(5.0), None, Some(9.0)]),
            ("b", &[Some(9.0), Some(9.0), None, Some(5.0)]),
        ],
    );
    assert_eq!(race.daily().streak, vec![0, 1, 0, 0]);
}
