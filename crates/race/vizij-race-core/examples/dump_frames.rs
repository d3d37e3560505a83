//! Print one JSON snapshot per frame.
//!
//! Usage: `cargo run --example dump_frames -- [fixture-name | path/to/race.json] [every-nth]`

use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use vizij_race_core::{load_race_json, FrameDriver, FrameSink, PlaybackSummary, Snapshot};

/// JSON-lines sink that keeps every `every`-th frame.
struct JsonLines<W: Write> {
    out: W,
    every: u64,
}

impl<W: Write> FrameSink for JsonLines<W> {
    type Error = anyhow::Error;

    fn render(&mut self, snapshot: &Snapshot) -> anyhow::Result<()> {
        if snapshot.frame % self.every != 0 {
            return Ok(());
        }
        serde_json::to_writer(&mut self.out, snapshot)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self, summary: &PlaybackSummary) -> anyhow::Result<()> {
        self.out.flush()?;
        eprintln!(
            "{} frames rendered, last day index {}",
            summary.frames_rendered, summary.last_day_index
        );
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let source = args.next().unwrap_or_else(|| "speedrun-sample".to_string());
    let every: u64 = match args.next() {
        Some(n) => n.parse().context("every-nth must be a positive integer")?,
        None => 1,
    };

    let json = if Path::new(&source).exists() {
        std::fs::read_to_string(&source).with_context(|| format!("reading {source}"))?
    } else {
        vizij_test_fixtures::races::json(&source)?
    };

    let (race, report) = load_race_json(&json)?;
    for cell in &report.skipped {
        eprintln!("skipped {} day {}: {}", cell.entity, cell.day, cell.reason);
    }

    let stdout = io::stdout();
    let mut sink = JsonLines {
        out: BufWriter::new(stdout.lock()),
        every: every.max(1),
    };
    FrameDriver::new(&race).run(&mut sink)?;
    Ok(())
}
