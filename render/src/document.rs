//! Builds one SVG document: dataset → layout → hover replay → scene +
//! tooltip.

use std::str::FromStr;

use anyhow::{Context, Result};
use tracing::{info, warn};

use heatmap_common::config::Config;
use heatmap_common::error::Skipped;
use heatmap_common::hourly::HourlyLayout;
use heatmap_common::monthly::{MonthlyLayout, VIEWPORT};
use heatmap_common::{Heatmap, HeatmapLayout, HourlyRecord, MonthlyRecord};

use crate::tooltip;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatmapKind {
    Hourly,
    Monthly,
}

impl FromStr for HeatmapKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hourly" => Ok(HeatmapKind::Hourly),
            "monthly" => Ok(HeatmapKind::Monthly),
            other => anyhow::bail!("Unknown heatmap kind {other:?} (expected hourly or monthly)"),
        }
    }
}

/// Render `data` (a JSON array of records) as a standalone SVG.
///
/// `pointer` is a canvas position replayed as a pointer move before
/// rendering, so the output shows the hover state for that point.
pub fn render(
    kind: HeatmapKind,
    data: &str,
    config: &Config,
    pointer: Option<(f64, f64)>,
) -> Result<String> {
    let width = config.canvas.width as f64;
    let height = config.canvas.height as f64;

    match kind {
        HeatmapKind::Hourly => {
            let records: Vec<HourlyRecord> =
                serde_json::from_str(data).context("Invalid hourly dataset")?;
            let layout = HourlyLayout::with_palette(&records, width, height, config.hourly_palette()?);
            report_skipped(records.len(), &layout.skipped);
            Ok(finish(Heatmap::new(layout), pointer, (width, height)))
        }
        HeatmapKind::Monthly => {
            let records: Vec<MonthlyRecord> =
                serde_json::from_str(data).context("Invalid monthly dataset")?;
            let layout =
                MonthlyLayout::with_palette(&records, width, height, config.monthly_palette()?);
            report_skipped(records.len(), &layout.skipped);
            Ok(finish(Heatmap::new(layout), pointer, VIEWPORT))
        }
    }
}

fn finish<L: HeatmapLayout>(
    mut map: Heatmap<L>,
    pointer: Option<(f64, f64)>,
    overlay_size: (f64, f64),
) -> String {
    if let Some((x, y)) = pointer {
        map.pointer_move(x, y);
        match map.interaction() {
            Some(data) => info!("Pointer at ({x}, {y}) is over {} ({})", data.label, data.count),
            None => info!("Pointer at ({x}, {y}) is over no cell"),
        }
    }
    let overlay = tooltip::overlay(map.interaction(), overlay_size.0, overlay_size.1);
    map.scene().to_svg_with_overlay(&overlay)
}

fn report_skipped(total: usize, skipped: &[Skipped]) {
    if skipped.is_empty() {
        info!("Laid out {total} records");
    } else {
        warn!("Laid out {} of {total} records ({} skipped)", total - skipped.len(), skipped.len());
    }
}
