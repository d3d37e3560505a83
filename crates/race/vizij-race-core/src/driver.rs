//! Frame driver: forward-only playback over a finalized race.
//!
//! States:
//! - Running: each step samples the current frame and advances the counter
//! - Terminated: the next frame's day index would pass `D-1`
//!
//! Termination is the normal end-of-data signal, reported as
//! [`DriverStep::Terminated`] with a [`PlaybackSummary`]. It is never an error.

use serde::{Deserialize, Serialize};

use crate::outputs::{PlaybackSummary, Snapshot};
use crate::race::Race;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverState {
    Running,
    Terminated,
}

/// Outcome of one driver step.
#[derive(Clone, Debug, PartialEq)]
pub enum DriverStep {
    Frame(Snapshot),
    Terminated(PlaybackSummary),
}

/// Renderer seam. Implementors own pixels, fonts, images and output encoding.
pub trait FrameSink {
    type Error;

    fn render(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error>;

    /// Called once after the last frame (e.g. to close a video file).
    fn finish(&mut self, _summary: &PlaybackSummary) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[derive(Debug)]
pub struct FrameDriver<'a> {
    race: &'a Race,
    frame: u64,
    state: DriverState,
    rendered: u64,
    last: Option<(u64, f32)>,
}

impl<'a> FrameDriver<'a> {
    /// Start at the race's configured `start_frame`.
    pub fn new(race: &'a Race) -> Self {
        Self::starting_at(race, race.config().start_frame)
    }

    pub fn starting_at(race: &'a Race, frame: u64) -> Self {
        Self {
            race,
            frame,
            state: DriverState::Running,
            rendered: 0,
            last: None,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Frame the next step will sample.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn frames_rendered(&self) -> u64 {
        self.rendered
    }

    /// Sample the current frame and advance, or report termination.
    /// Once terminated every further step returns the same summary.
    pub fn step(&mut self) -> DriverStep {
        if self.state == DriverState::Running && !self.race.frame_in_range(self.frame) {
            self.state = DriverState::Terminated;
            let summary = self.summary();
            log::info!(
                "playback ended after {} frames (last day index {})",
                summary.frames_rendered,
                summary.last_day_index
            );
            return DriverStep::Terminated(summary);
        }
        if self.state == DriverState::Terminated {
            return DriverStep::Terminated(self.summary());
        }

        let snapshot = self.race.snapshot(self.frame);
        self.last = Some((self.frame, snapshot.day_index));
        self.rendered += 1;
        self.frame += 1;
        DriverStep::Frame(snapshot)
    }

    /// Drive `sink` until the timeline is exhausted.
    pub fn run<S: FrameSink>(&mut self, sink: &mut S) -> Result<PlaybackSummary, S::Error> {
        loop {
            match self.step() {
                DriverStep::Frame(snapshot) => sink.render(&snapshot)?,
                DriverStep::Terminated(summary) => {
                    sink.finish(&summary)?;
                    return Ok(summary);
                }
            }
        }
    }

    fn summary(&self) -> PlaybackSummary {
        PlaybackSummary {
            frames_rendered: self.rendered,
            last_frame: self.last.map(|(frame, _)| frame),
            last_day_index: self.last.map(|(_, day)| day).unwrap_or(0.0),
        }
    }
}
