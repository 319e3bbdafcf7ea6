//! Render configuration – canvas size and gradient stops.
//!
//! Read from a TOML file; every key is optional:
//!
//! ```toml
//! [canvas]
//! width = 600
//! height = 300
//!
//! [hourly]
//! low = "#f0f0f0"
//! high = "#f54632"
//!
//! [monthly]
//! low = "#f0f0f0"
//! high = "#f5350f"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::color::{Palette, Rgb};
use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub canvas: CanvasSection,
    #[serde(default)]
    pub hourly: PaletteSection,
    #[serde(default)]
    pub monthly: PaletteSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasSection {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

/// Gradient stops as `#rrggbb` strings.  An unset stop keeps the built-in
/// color for its heatmap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaletteSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<String>,
}

fn default_width() -> u32 {
    600
}

fn default_height() -> u32 {
    300
}

impl Default for CanvasSection {
    fn default() -> Self {
        CanvasSection {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl PaletteSection {
    fn resolve(
        &self,
        fallback: Palette,
        low_key: &'static str,
        high_key: &'static str,
    ) -> Result<Palette, ConfigError> {
        let color = |field: &'static str, value: Option<&String>, default: Rgb| match value {
            None => Ok(default),
            Some(value) => Rgb::from_hex(value).ok_or_else(|| ConfigError::InvalidColor {
                field,
                value: value.clone(),
            }),
        };
        Ok(Palette::new(
            color(low_key, self.low.as_ref(), fallback.low)?,
            color(high_key, self.high.as_ref(), fallback.high)?,
        ))
    }
}

impl Config {
    /// Default config path, relative to the working directory.
    pub fn default_path() -> &'static str {
        "heatmap.toml"
    }

    pub fn hourly_palette(&self) -> Result<Palette, ConfigError> {
        self.hourly.resolve(Palette::HOURLY, "hourly.low", "hourly.high")
    }

    pub fn monthly_palette(&self) -> Result<Palette, ConfigError> {
        self.monthly.resolve(Palette::MONTHLY, "monthly.low", "monthly.high")
    }

    /// Check everything that serde cannot: canvas size and color syntax.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::InvalidCanvas {
                width: self.canvas.width,
                height: self.canvas.height,
            });
        }
        self.hourly_palette()?;
        self.monthly_palette()?;
        Ok(())
    }
}

/// Parse and validate TOML config text.
pub fn parse(text: &str) -> Result<Config> {
    let config: Config = toml::from_str(text).context("Invalid config TOML")?;
    config.validate()?;
    Ok(config)
}

/// Load and validate a config file.
pub fn load(path: &Path) -> Result<Config> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read config: {}", path.display()))?;
    let config = parse(&text).with_context(|| format!("Bad config: {}", path.display()))?;
    info!(
        "Loaded config from {} ({}x{})",
        path.display(),
        config.canvas.width,
        config.canvas.height
    );
    Ok(config)
}

// ─── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_full_config() {
        let text = r##"
[canvas]
width = 800
height = 400

[hourly]
low = "#ffffff"
high = "#000"

[monthly]
low = "#eeeeee"
high = "#123456"
"##;
        let config = parse(text).unwrap();
        assert_eq!(config.canvas.width, 800);
        assert_eq!(
            config.hourly_palette().unwrap(),
            Palette::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0))
        );
        assert_eq!(config.monthly_palette().unwrap().high, Rgb::new(0x12, 0x34, 0x56));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.canvas.width, 600);
        assert_eq!(config.hourly_palette().unwrap(), Palette::HOURLY);
        assert_eq!(config.monthly_palette().unwrap(), Palette::MONTHLY);
    }

    #[test]
    fn test_partial_canvas() {
        let config = parse("[canvas]\nheight = 250\n").unwrap();
        assert_eq!(config.canvas.width, 600);
        assert_eq!(config.canvas.height, 250);
    }

    #[test]
    fn test_partial_palette_keeps_default_stop() {
        let config = parse("[hourly]\nhigh = \"#000000\"\n").unwrap();
        let hourly = config.hourly_palette().unwrap();
        assert_eq!(hourly.low, Palette::HOURLY.low);
        assert_eq!(hourly.high, Rgb::new(0, 0, 0));
        assert_eq!(config.monthly_palette().unwrap(), Palette::MONTHLY);

        let config = parse("[monthly]\nlow = \"#ffffff\"\n").unwrap();
        let monthly = config.monthly_palette().unwrap();
        assert_eq!(monthly.low, Rgb::new(255, 255, 255));
        assert_eq!(monthly.high, Palette::MONTHLY.high);
    }

    #[test]
    fn test_invalid_color_rejected() {
        let text = "[monthly]\nlow = \"red\"\nhigh = \"#f5350f\"\n";
        let err = parse(text).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("monthly.low"), "{msg}");
    }

    #[test]
    fn test_zero_canvas_rejected() {
        assert!(parse("[canvas]\nwidth = 0\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = tempfile("[canvas]\nwidth = 400\nheight = 250\n");
        let config = load(&path).unwrap();
        assert_eq!((config.canvas.width, config.canvas.height), (400, 250));
        assert!(load(Path::new("/nonexistent/heatmap.toml")).is_err());
    }

    fn tempfile(content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("heatmap_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("heatmap.toml");
        std::fs::write(&path, content).unwrap();
        path
    }
}
