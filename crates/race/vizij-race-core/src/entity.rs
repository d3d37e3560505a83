//! Competing entities: identity, display name, color and decorations.

use serde::{Deserialize, Serialize};

use crate::color::{NameStyle, Rgb};
use crate::ids::EntityIdx;
use crate::series::TimeSeries;

/// Separator between team members in a resolved display name.
pub const TEAM_SEPARATOR: &str = " & ";

const LOCALIZED_PREFIX: &str = "[jp]";

/// Roster entry shape. Resolved once at registration into a single string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DisplayName {
    Solo(String),
    Team(Vec<String>),
}

impl DisplayName {
    pub fn is_solo(&self) -> bool {
        match self {
            DisplayName::Solo(_) => true,
            DisplayName::Team(members) => members.len() == 1,
        }
    }

    /// Single display string: members cleaned and joined with `" & "`.
    pub fn resolve(&self) -> String {
        match self {
            DisplayName::Solo(name) => clean_name(name),
            DisplayName::Team(members) => members
                .iter()
                .map(|m| clean_name(m))
                .collect::<Vec<_>>()
                .join(TEAM_SEPARATOR),
        }
    }
}

impl From<&str> for DisplayName {
    fn from(name: &str) -> Self {
        DisplayName::Solo(name.to_string())
    }
}

impl From<String> for DisplayName {
    fn from(name: String) -> Self {
        DisplayName::Solo(name)
    }
}

/// Prefer the romanized half of `"[jp]Native (Romanized)"`, then strip
/// two-letter locale tags such as `[jp]` or `[us]`.
fn clean_name(raw: &str) -> String {
    let mut name = raw.trim();
    if name.starts_with(LOCALIZED_PREFIX) {
        let parts: Vec<&str> = name.split(' ').collect();
        if let [_, romanized] = parts.as_slice() {
            if let Some(inner) = romanized
                .strip_prefix('(')
                .and_then(|s| s.strip_suffix(')'))
            {
                name = inner;
            }
        }
    }
    strip_locale_tags(name).trim().to_string()
}

fn strip_locale_tags(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < chars.len() {
        let is_tag = chars[i] == '['
            && i + 3 < chars.len()
            && chars[i + 3] == ']'
            && is_word_char(chars[i + 1])
            && is_word_char(chars[i + 2]);
        if is_tag {
            i += 4;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Registration request handed to [`crate::RaceBuilder::register_entity`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntitySpec {
    pub id: String,
    pub name: DisplayName,
    /// Explicit color; wins over `style`.
    #[serde(default)]
    pub color: Option<Rgb>,
    /// Only honored for solo entries.
    #[serde(default)]
    pub style: Option<NameStyle>,
    /// Opaque renderer metadata (avatar, flag, ...).
    #[serde(default)]
    pub decorations: serde_json::Value,
}

impl EntitySpec {
    pub fn new(id: impl Into<String>, name: impl Into<DisplayName>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: None,
            style: None,
            decorations: serde_json::Value::Null,
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_style(mut self, style: NameStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_decorations(mut self, decorations: serde_json::Value) -> Self {
        self.decorations = decorations;
        self
    }
}

/// A registered entity and its time series.
/// Identity and display fields are fixed at registration; only the series'
/// per-day cells are written afterwards, once each.
#[derive(Clone, Debug)]
pub struct Entity {
    pub idx: EntityIdx,
    pub id: String,
    pub display_name: String,
    pub color: Rgb,
    pub decorations: serde_json::Value,
    pub series: TimeSeries,
}
