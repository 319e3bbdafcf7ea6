//! Sequential color scales and color-string helpers.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Parse `#rrggbb` or the short `#rgb` form.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |h: &str| u8::from_str_radix(h, 16).ok();
        match hex.len() {
            6 => Some(Rgb::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Some(Rgb::new(expand(0)?, expand(1)?, expand(2)?))
            }
            _ => None,
        }
    }

    /// `#rrggbb`, lowercase, zero-padded.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear interpolation in RGB space, channels rounded to nearest.
    pub fn lerp(&self, other: &Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| -> u8 {
            let v = a as f64 + t * (b as f64 - a as f64);
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

/// Renders as `rgb(r, g, b)`, the form [`rgb_to_hex`] consumes.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

// ─── Domain ──────────────────────────────────────────────────────────────────

/// `[min, max]` over the counts of one dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorDomain {
    pub min: f64,
    pub max: f64,
}

impl ColorDomain {
    pub fn new(min: f64, max: f64) -> Self {
        ColorDomain { min, max }
    }

    /// Extent of the finite counts; `[0, 0]` when there are none.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut extent: Option<(f64, f64)> = None;
        for c in counts.into_iter().flatten().filter(|c| c.is_finite()) {
            extent = Some(match extent {
                None => (c, c),
                Some((lo, hi)) => (lo.min(c), hi.max(c)),
            });
        }
        let (min, max) = extent.unwrap_or((0.0, 0.0));
        ColorDomain { min, max }
    }

    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Position of `value` along the domain, clamped to `[0, 1]`.
    /// A degenerate domain maps everything to `0`.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.is_degenerate() || !value.is_finite() {
            return 0.0;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

// ─── Scale ───────────────────────────────────────────────────────────────────

/// The two endpoint colors of a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub low: Rgb,
    pub high: Rgb,
}

impl Palette {
    pub const HOURLY: Palette = Palette {
        low: Rgb::new(0xf0, 0xf0, 0xf0),
        high: Rgb::new(0xf5, 0x46, 0x32),
    };

    pub const MONTHLY: Palette = Palette {
        low: Rgb::new(0xf0, 0xf0, 0xf0),
        high: Rgb::new(0xf5, 0x35, 0x0f),
    };

    pub fn new(low: Rgb, high: Rgb) -> Self {
        Palette { low, high }
    }

    pub fn swapped(&self) -> Self {
        Palette {
            low: self.high,
            high: self.low,
        }
    }
}

/// Maps a count onto a two-color gradient over a data-derived domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequentialScale {
    pub domain: ColorDomain,
    pub palette: Palette,
}

impl SequentialScale {
    pub fn new(domain: ColorDomain, palette: Palette) -> Self {
        SequentialScale { domain, palette }
    }

    pub fn color(&self, value: f64) -> Rgb {
        let t = self.domain.normalize(value);
        self.palette.low.lerp(&self.palette.high, t)
    }

    /// Same domain, stops swapped: a label colored with this stays legible
    /// on a cell filled by `self`.
    pub fn inverted(&self) -> Self {
        SequentialScale {
            domain: self.domain,
            palette: self.palette.swapped(),
        }
    }
}

// ─── String conversion ───────────────────────────────────────────────────────

fn rgb_pattern() -> &'static Regex {
    static RGB_RE: OnceLock<Regex> = OnceLock::new();
    RGB_RE.get_or_init(|| {
        Regex::new(r"rgb\((\d+),\s?(\d+),\s?(\d+)\)").expect("rgb pattern is a valid regex")
    })
}

/// Convert an `rgb(r, g, b)` string into `#rrggbb`.
///
/// Returns `None` when the string holds no such pattern or a channel does
/// not fit in a byte.
pub fn rgb_to_hex(input: &str) -> Option<String> {
    let caps = rgb_pattern().captures(input)?;
    let channel = |i: usize| caps.get(i)?.as_str().parse::<u8>().ok();
    Some(Rgb::new(channel(1)?, channel(2)?, channel(3)?).to_hex())
}

/// Inverse of [`rgb_to_hex`]: `#rrggbb` back to its channels.
pub fn hex_to_rgb(input: &str) -> Option<(u8, u8, u8)> {
    Rgb::from_hex(input).map(|c| (c.r, c.g, c.b))
}
