//! Heatmap Render – lays out an hourly or monthly heatmap from a JSON
//! dataset and writes it as SVG, optionally with the tooltip for a pointer
//! position.
//!
//! Usage: `heatmap-render <hourly|monthly> <data.json> [out.svg] [x y]`

mod document;
mod tooltip;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use heatmap_common::config::{self, Config};

use document::HeatmapKind;

const USAGE: &str = "usage: heatmap-render <hourly|monthly> <data.json> [out.svg] [x y]";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (kind, data_path) = match (args.first(), args.get(1)) {
        (Some(kind), Some(path)) => (kind.parse::<HeatmapKind>()?, PathBuf::from(path)),
        _ => anyhow::bail!(USAGE),
    };
    let out_path = args.get(2).map(PathBuf::from);
    let pointer = match (args.get(3), args.get(4)) {
        (Some(x), Some(y)) => Some((
            x.parse::<f64>().with_context(|| format!("Bad pointer x: {x}"))?,
            y.parse::<f64>().with_context(|| format!("Bad pointer y: {y}"))?,
        )),
        (Some(_), None) => anyhow::bail!(USAGE),
        _ => None,
    };

    // ── load config ──────────────────────────────────────────────────
    let config = match std::env::var("HEATMAP_CONFIG") {
        Ok(path) => config::load(Path::new(&path)).context("Config load failed")?,
        Err(_) if Path::new(Config::default_path()).exists() => {
            config::load(Path::new(Config::default_path())).context("Config load failed")?
        }
        Err(_) => {
            info!("No config file – using built-in defaults");
            Config::default()
        }
    };

    // ── render ───────────────────────────────────────────────────────
    let data = std::fs::read_to_string(&data_path)
        .with_context(|| format!("Cannot read dataset: {}", data_path.display()))?;
    let svg = document::render(kind, &data, &config, pointer)?;

    match out_path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, &svg)
                .with_context(|| format!("Cannot write SVG to {}", path.display()))?;
            info!("Heatmap written to {}", path.display());
        }
        None => print!("{svg}"),
    }

    Ok(())
}
