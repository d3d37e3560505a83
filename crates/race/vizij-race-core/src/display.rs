//! Human-readable renderings of raw values, streaks, placements and run metadata.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Which components of a duration are rendered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationFormat {
    pub milliseconds: bool,
    pub seconds: bool,
    pub hours: bool,
}

impl DurationFormat {
    /// Axis labels: hours and minutes only.
    pub const TICK_LABEL: DurationFormat = DurationFormat {
        milliseconds: false,
        seconds: false,
        hours: true,
    };
}

impl Default for DurationFormat {
    fn default() -> Self {
        Self {
            milliseconds: false,
            seconds: true,
            hours: true,
        }
    }
}

/// Render seconds as `1h 02m 03s`.
///
/// Hours are dropped when zero or disabled; minutes always show. With
/// milliseconds the seconds read `03.250s`. Without seconds the minutes close
/// the string.
pub fn format_duration(seconds: f32, fmt: DurationFormat) -> String {
    if !seconds.is_finite() {
        return String::new();
    }
    if seconds < 0.0 {
        return format!("-{}", format_duration(-seconds, fmt));
    }
    let total_ms = (seconds as f64 * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms / 60_000) % 60;
    let secs = (total_ms / 1000) % 60;
    let millis = total_ms % 1000;

    let mut parts: Vec<String> = Vec::with_capacity(3);
    if fmt.hours && hours > 0 {
        parts.push(format!("{hours}h"));
    }
    parts.push(format!("{minutes:02}m"));
    if fmt.seconds {
        if fmt.milliseconds {
            parts.push(format!("{secs:02}.{millis:03}s"));
        } else {
            parts.push(format!("{secs:02}s"));
        }
    }
    parts.join(" ")
}

/// Render a day count as `1y 2m 3d` using 31-day months and 12-month years.
/// Zero leading components are omitted.
pub fn display_days(days: u32) -> String {
    let true_days = days % 31;
    let months = (days / 31) % 12;
    let years = days / 31 / 12;
    let mut out = String::new();
    if years > 0 {
        out.push_str(&format!("{years}y "));
    }
    if months > 0 || years > 0 {
        out.push_str(&format!("{months}m "));
    }
    out.push_str(&format!("{true_days}d"));
    out
}

/// Ordinal label of a 0-based rank: 0 → "1st", 10 → "11th", 20 → "21st".
pub fn placement_label(rank: usize) -> String {
    let n = rank + 1;
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Suffix appended to a comment cut down to its first line.
pub const MORE_MARKER: &str = " [...]";

/// Leaderboard platform names with a shorter label.
const PLATFORM_SHORT_NAMES: &[(&str, &str)] = &[
    ("Nintendo 64", "N64"),
    ("Wii Virtual Console", "Wii VC"),
    ("Wii U Virtual Console", "Wii U VC"),
    ("3DO Interactive Multiplayer", "3DO"),
    ("Amazon Fire TV", "FireTV"),
    ("New Nintendo 3DS", "New 3DS"),
    ("New Nintendo 3DS Virtual Console", "New 3DS VC"),
    ("Nintendo 3DS", "3DS"),
    ("Nintendo 3DS Virtual Console", "3DS VC"),
    ("Nintendo DS", "DS"),
    ("Nintendo Entertainment System", "NES"),
    ("Super Nintendo", "SNES"),
    ("Switch Virtual Console", "Switch VC"),
    ("GameCube", "GC"),
    ("PlayStation", "PSX"),
    ("PlayStation 2", "PS2"),
    ("PlayStation 3", "PS3"),
    ("PlayStation 4", "PS4"),
    ("PlayStation 4 Pro", "PS4 Pro"),
    ("PlayStation 5", "PS5"),
    ("Playstation Now", "PSNow"),
    ("Playstation TV", "PSTV"),
    ("PlayStation Vita", "PSVita"),
    ("PlayStation Portable", "PSP"),
    ("Xbox 360", "X360"),
    ("Xbox 360 Arcade", "X360 Arcade"),
    ("Xbox One", "XBO"),
    ("Xbox One S", "XBOS"),
    ("Xbox One X", "XBOX"),
    ("Xbox Series S", "XBSS"),
    ("Xbox Series X", "XBSX"),
];

/// Short label for a platform name; unknown names pass through.
pub fn short_platform(platform: &str) -> &str {
    PLATFORM_SHORT_NAMES
        .iter()
        .find(|(long, _)| *long == platform)
        .map(|(_, short)| *short)
        .unwrap_or(platform)
}

/// Where and how a run was played.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunInfo {
    /// Region names may list alternatives as `"USA / Canada"`.
    pub region: Option<String>,
    pub platform: Option<String>,
    pub emulated: bool,
}

/// `"<region> <platform> emu"` with absent parts left out.
/// Only the first of `" / "`-separated regions is shown.
pub fn platform_label(run: &RunInfo) -> String {
    let mut out = String::new();
    if let Some(region) = &run.region {
        out.push_str(region.split(" / ").next().unwrap_or_default());
    }
    if let Some(platform) = &run.platform {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(platform);
    }
    if run.emulated {
        out.push_str(" emu");
    }
    out
}

/// First line of a comment, marked with `" [...]"` when more lines follow.
pub fn short_comment(comment: &str) -> Cow<'_, str> {
    match comment.split_once('\n') {
        None => Cow::Borrowed(comment),
        Some((first, _)) => {
            let first = first.strip_suffix('\r').unwrap_or(first);
            Cow::Owned(format!("{first}{MORE_MARKER}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_default_format() {
        let fmt = DurationFormat::default();
        assert_eq!(format_duration(3723.0, fmt), "1h 02m 03s");
        assert_eq!(format_duration(95.4, fmt), "01m 35s");
        assert_eq!(format_duration(0.0, fmt), "00m 00s");
    }

    #[test]
    fn durations_with_milliseconds() {
        let fmt = DurationFormat {
            milliseconds: true,
            ..DurationFormat::default()
        };
        assert_eq!(format_duration(5403.25, fmt), "1h 30m 03.250s");
    }

    #[test]
    fn tick_labels_drop_seconds() {
        assert_eq!(format_duration(5400.0, DurationFormat::TICK_LABEL), "1h 30m");
        assert_eq!(format_duration(600.0, DurationFormat::TICK_LABEL), "10m");
        let no_hours = DurationFormat {
            hours: false,
            ..DurationFormat::default()
        };
        assert_eq!(format_duration(3723.0, no_hours), "02m 03s");
    }

    #[test]
    fn streak_days() {
        assert_eq!(display_days(0), "0d");
        assert_eq!(display_days(5), "5d");
        assert_eq!(display_days(31), "1m 0d");
        assert_eq!(display_days(31 * 12 + 3), "1y 0m 3d");
        assert_eq!(display_days(31 * 14 + 2), "1y 2m 2d");
    }

    #[test]
    fn placements() {
        assert_eq!(placement_label(0), "1st");
        assert_eq!(placement_label(1), "2nd");
        assert_eq!(placement_label(2), "3rd");
        assert_eq!(placement_label(3), "4th");
        assert_eq!(placement_label(10), "11th");
        assert_eq!(placement_label(11), "12th");
        assert_eq!(placement_label(20), "21st");
    }

    #[test]
    fn platform_short_names() {
        assert_eq!(short_platform("Nintendo 64"), "N64");
        assert_eq!(short_platform("PlayStation 4 Pro"), "PS4 Pro");
        assert_eq!(short_platform("Xbox Series X"), "XBSX");
        assert_eq!(short_platform("PC"), "PC");
    }

    #[test]
    fn platform_labels() {
        let full = RunInfo {
            region: Some("USA / Canada".into()),
            platform: Some("N64".into()),
            emulated: true,
        };
        assert_eq!(platform_label(&full), "USA N64 emu");

        let no_region = RunInfo {
            platform: Some("PC".into()),
            ..RunInfo::default()
        };
        assert_eq!(platform_label(&no_region), "PC");

        let region_only = RunInfo {
            region: Some("JPN".into()),
            ..RunInfo::default()
        };
        assert_eq!(platform_label(&region_only), "JPN");
        assert_eq!(platform_label(&RunInfo::default()), "");
    }

    #[test]
    fn comments_keep_first_line() {
        assert_eq!(short_comment("gg"), "gg");
        assert_eq!(short_comment("line one\nline two"), "line one [...]");
        assert_eq!(short_comment("line one\r\nline two\r\nthree"), "line one [...]");
    }
}
