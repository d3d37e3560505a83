use std::convert::Infallible;

use vizij_race_core::{
    Config, DriverState, DriverStep, EntitySpec, FrameDriver, FrameSink, PlaybackSummary, Race,
    RaceBuilder, Rgb, Snapshot,
};

fn mk_race(days: usize, frames_per_day: f32, start_frame: u64) -> Race {
    let cfg = Config {
        frames_per_day,
        start_frame,
        ..Config::default()
    };
    let mut b = RaceBuilder::new(cfg, days).expect("builder");
    b.register_entity(EntitySpec::new("a", "Alpha").with_color(Rgb::new(200, 10, 10)))
        .expect("register a");
    b.register_entity(EntitySpec::new("b", "Bravo").with_color(Rgb::new(10, 10, 200)))
        .expect("register b");
    for day in 0..days {
        b.set_day_value("a", day, 100.0 - day as f32, None).expect("a");
        b.set_day_value("b", day, 90.0 + 3.0 * day as f32, None).expect("b");
    }
    b.finalize().expect("finalize").0
}

#[derive(Default)]
struct Collector {
    frames: Vec<Snapshot>,
    finished: Option<PlaybackSummary>,
}

impl FrameSink for Collector {
    type Error = Infallible;

    fn render(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error> {
        self.frames.push(snapshot.clone());
        Ok(())
    }

    fn finish(&mut self, summary: &PlaybackSummary) -> Result<(), Self::Error> {
        self.finished = Some(summary.clone());
        Ok(())
    }
}

struct FailAfter(usize);

impl FrameSink for FailAfter {
    type Error = String;

    fn render(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error> {
        if self.0 == 0 {
            return Err(format!("sink full at frame {}", snapshot.frame));
        }
        self.0 -= 1;
        Ok(())
    }
}

#[test]
fn five_days_at_two_frames_per_day_render_nine_frames() {
    let race = mk_race(5, 2.0, 0);
    let mut driver = FrameDriver::new(&race);

    let mut day_indices = Vec::new();
    loop {
        match driver.step() {
            DriverStep::Frame(snap) => day_indices.push(snap.day_index),
            DriverStep::Terminated(summary) => {
                assert_eq!(summary.frames_rendered, 9);
                assert_eq!(summary.last_frame, Some(8));
                assert_eq!(summary.last_day_index, 4.0);
                break;
            }
        }
    }
    assert_eq!(day_indices.len(), 9);
    assert_eq!(day_indices[1], 0.5);
    assert!(day_indices.iter().all(|d| *d <= 4.0));
    assert_eq!(driver.state(), DriverState::Terminated);
    assert_eq!(driver.frame(), 9);
}

#[test]
fn terminated_driver_stays_terminated() {
    let race = mk_race(2, 1.0, 0);
    let mut driver = FrameDriver::new(&race);
    assert!(matches!(driver.step(), DriverStep::Frame(_)));
    assert!(matches!(driver.step(), DriverStep::Frame(_)));
    let first = driver.step();
    let second = driver.step();
    assert!(matches!(first, DriverStep::Terminated(_)));
    assert_eq!(first, second);
    assert_eq!(driver.frames_rendered(), 2);
}

#[test]
fn run_feeds_every_frame_then_finishes() {
    let race = mk_race(4, 3.0, 0);
    let mut sink = Collector::default();
    let summary = FrameDriver::new(&race).run(&mut sink).expect("infallible");

    // Frames 0..=9 map to day indices 0..=3.
    assert_eq!(summary.frames_rendered, 10);
    assert_eq!(sink.frames.len(), 10);
    assert_eq!(sink.finished.as_ref(), Some(&summary));

    let frames: Vec<u64> = sink.frames.iter().map(|s| s.frame).collect();
    assert_eq!(frames, (0..10).collect::<Vec<u64>>());

    // Day indices are non-decreasing and every snapshot is ordered by rank.
    for pair in sink.frames.windows(2) {
        assert!(pair[0].day_index <= pair[1].day_index);
    }
    for snap in &sink.frames {
        for pair in snap.entities.windows(2) {
            assert!(pair[0].rank <= pair[1].rank);
        }
    }
}

#[test]
fn start_frame_offsets_playback() {
    let race = mk_race(3, 2.0, 2);
    let mut sink = Collector::default();
    let summary = FrameDriver::new(&race).run(&mut sink).expect("infallible");
    assert_eq!(sink.frames[0].frame, 2);
    assert_eq!(sink.frames[0].day_index, 1.0);
    assert_eq!(summary.frames_rendered, 3);
    assert_eq!(summary.last_frame, Some(4));
}

#[test]
fn start_past_the_timeline_terminates_immediately() {
    let race = mk_race(3, 2.0, 0);
    let mut sink = Collector::default();
    let summary = FrameDriver::starting_at(&race, 50)
        .run(&mut sink)
        .expect("infallible");
    assert!(sink.frames.is_empty());
    assert_eq!(summary.frames_rendered, 0);
    assert_eq!(summary.last_frame, None);
    assert!(sink.finished.is_some());
}

#[test]
fn sink_errors_stop_playback() {
    let race = mk_race(3, 2.0, 0);
    let mut driver = FrameDriver::new(&race);
    let err = driver.run(&mut FailAfter(2)).unwrap_err();
    assert_eq!(err, "sink full at frame 2");
    assert_eq!(driver.state(), DriverState::Running);
    assert_eq!(driver.frames_rendered(), 3);
}

#[test]
fn leader_swap_shows_up_in_record_holder() {
    // Lower is better. a: 100, 99, 98, 97; b: 90, 93, 96, 99. b leads until day 3.
    let race = mk_race(4, 1.0, 0);
    let holders: Vec<Option<String>> = (0..4).map(|f| race.snapshot(f).record_holder).collect();
    assert_eq!(
        holders,
        vec![
            Some("b".to_string()),
            Some("b".to_string()),
            Some("b".to_string()),
            Some("a".to_string()),
        ]
    );
    let snap = race.snapshot(2);
    assert_eq!(snap.record_holder_streak, 2);
    assert_eq!(snap.streak_label, "2d");
}

/// `values[e][d]` for entity `e{e}` on day `d`.
fn crowded_race(display_limit: usize, values: &[Vec<f32>]) -> Race {
    let cfg = Config {
        display_limit,
        ..Config::default()
    };
    let days = values[0].len();
    let mut b = RaceBuilder::new(cfg, days).expect("builder");
    for e in 0..values.len() {
        let spec = EntitySpec::new(format!("e{e}"), format!("E{e}"));
        b.register_entity(spec.with_color(Rgb::new(50, 50, 50)))
            .expect("register");
    }
    for day in 0..days {
        for (e, series) in values.iter().enumerate() {
            b.set_day_value(&format!("e{e}"), day, series[day], None)
                .expect("value");
        }
        b.finalize_day(day).expect("finalize day");
    }
    b.finalize().expect("finalize").0
}

fn assert_only_window_entities(race: &Race) {
    let unranked = race.config().unranked() as f32;
    let mut sink = Collector::default();
    FrameDriver::new(race).run(&mut sink).expect("infallible");
    for snap in &sink.frames {
        for e in &snap.entities {
            assert!(
                e.placement.is_some() || e.rank < unranked - 0.01,
                "frame {}: {} shown at rank {} without a placement",
                snap.frame,
                e.id,
                e.rank
            );
        }
    }
}

#[test]
fn entities_beyond_the_limit_stay_hidden() {
    // Five entities, constant order, limit 2: only e0 and e1 ever show.
    let values: Vec<Vec<f32>> = (0..5).map(|e| vec![10.0 + e as f32; 40]).collect();
    let race = crowded_race(2, &values);
    assert_only_window_entities(&race);

    for frame in [0u64, 1, 59, 118] {
        let snap = race.snapshot(frame);
        let ids: Vec<&str> = snap.entities.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e0", "e1"], "frame {frame}");
        assert!(snap.entities.iter().all(|e| e.placement.is_some()));
    }
}

#[test]
fn entities_crossing_the_limit_fade_through_the_window() {
    // e4 climbs from last to first; others hold still. Limit 2.
    let mut values: Vec<Vec<f32>> = (0..4).map(|e| vec![10.0 + e as f32; 20]).collect();
    values.push((0..20).map(|d| 30.0 - 2.0 * d as f32).collect());
    let race = crowded_race(2, &values);
    assert_only_window_entities(&race);

    let first = race.snapshot(0);
    assert!(first.entities.iter().all(|e| e.id != "e4"));
    let last = race.snapshot(19 * 3);
    assert_eq!(last.entities[0].id, "e4");
    assert!(last.entities.iter().all(|e| e.id != "e2" && e.id != "e3"));
}
