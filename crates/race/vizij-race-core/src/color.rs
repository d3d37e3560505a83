//! Entity color resolution.
//!
//! Resolution happens once at registration and never on the sampling path:
//! - a solid name style picks the theme's hex color
//! - a gradient name style picks the channel-wise midpoint of its two stops
//! - styled colors get their HSB saturation floored so near-gray names stay tinted
//! - anything else draws a random hue with muted saturation/brightness from a seeded RNG

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Lowest saturation kept for styled colors.
pub const MIN_STYLED_SATURATION: f32 = 0.2;

const RANDOM_SATURATION: (f32, f32) = (0.6, 0.2);
const RANDOM_BRIGHTNESS: (f32, f32) = (0.5, 0.2);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn midpoint(a: Rgb, b: Rgb) -> Rgb {
        let mid = |x: u8, y: u8| ((x as u16 + y as u16) / 2) as u8;
        Rgb::new(mid(a.r, b.r), mid(a.g, b.g), mid(a.b, b.b))
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// One hex color per theme.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemedColor {
    pub light: String,
    pub dark: String,
}

impl ThemedColor {
    pub fn for_theme(&self, theme: Theme) -> &str {
        match theme {
            Theme::Light => &self.light,
            Theme::Dark => &self.dark,
        }
    }
}

/// Name style descriptor attached to a roster entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "lowercase")]
pub enum NameStyle {
    Solid {
        color: ThemedColor,
    },
    Gradient {
        #[serde(rename = "color-from")]
        from: ThemedColor,
        #[serde(rename = "color-to")]
        to: ThemedColor,
    },
}

impl NameStyle {
    /// Base color for `theme`, or None when a stop is not valid hex.
    pub fn base_color(&self, theme: Theme) -> Option<Rgb> {
        match self {
            NameStyle::Solid { color } => Rgb::from_hex(color.for_theme(theme)),
            NameStyle::Gradient { from, to } => Some(Rgb::midpoint(
                Rgb::from_hex(from.for_theme(theme))?,
                Rgb::from_hex(to.for_theme(theme))?,
            )),
        }
    }
}

/// Resolve an entity color from an optional style.
/// Unusable styles fall back to [`random_color`], same as a missing one.
pub fn resolve_color<R: Rng + ?Sized>(style: Option<&NameStyle>, theme: Theme, rng: &mut R) -> Rgb {
    match style.and_then(|s| s.base_color(theme)) {
        Some(base) => {
            let (h, s, v) = rgb_to_hsb(base);
            hsb_to_rgb(h, s.max(MIN_STYLED_SATURATION), v)
        }
        None => random_color(rng),
    }
}

/// Random hue; saturation in [0.6, 0.8) and brightness in [0.5, 0.7).
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    let s = RANDOM_SATURATION.0 + rng.gen::<f32>() * RANDOM_SATURATION.1;
    let v = RANDOM_BRIGHTNESS.0 + rng.gen::<f32>() * RANDOM_BRIGHTNESS.1;
    let h = rng.gen::<f32>();
    hsb_to_rgb(h, s, v)
}

/// HSB (all 0..1, hue wraps) to RGB.
pub fn hsb_to_rgb(h: f32, s: f32, v: f32) -> Rgb {
    let s = s.clamp(0.0, 1.0);
    let v = v.clamp(0.0, 1.0);
    let to_u8 = |x: f32| (x * 255.0 + 0.5) as u8;
    if s == 0.0 {
        let c = to_u8(v);
        return Rgb::new(c, c, c);
    }
    let h6 = (h - h.floor()) * 6.0;
    let f = h6 - h6.floor();
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match h6.floor() as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Rgb::new(to_u8(r), to_u8(g), to_u8(b))
}

/// RGB to HSB (all 0..1).
pub fn rgb_to_hsb(c: Rgb) -> (f32, f32, f32) {
    let r = c.r as f32 / 255.0;
    let g = c.g as f32 / 255.0;
    let b = c.b as f32 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max > 0.0 { delta / max } else { 0.0 };
    if delta == 0.0 {
        return (0.0, s, v);
    }
    let h = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    (h / 6.0, s, v)
}
