//! Hourly heatmap: weekday rows × hour columns.
//!
//! Both axes are band scales over the distinct values of the dataset, in
//! first-seen order.  Hours run left to right; days run bottom to top.

use tracing::debug;

use crate::band::{BandScale, DEFAULT_PADDING};
use crate::color::{ColorDomain, Palette, Rgb, SequentialScale};
use crate::error::{SkipReason, Skipped};
use crate::heatmap::HeatmapLayout;
use crate::interaction::{round_count, InteractionData};
use crate::record::{HourKey, HourlyRecord};
use crate::scene::{CellId, Margin, RectShape, Scene, TextAnchor, TextLabel};

pub const MARGIN: Margin = Margin {
    top: 10.0,
    right: 50.0,
    bottom: 30.0,
    left: 50.0,
};

const LABEL_FONT_SIZE: f64 = 10.0;
const CELL_RADIUS: f64 = 5.0;
const CELL_STROKE: &str = "white";
const STROKE_WIDTH: f64 = 1.0;

/// One drawn cell, in plot coordinates (inside the margins).
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyCell {
    pub id: CellId,
    pub day: String,
    pub hour: HourKey,
    pub count: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Rgb,
}

impl HourlyCell {
    /// Tooltip record: `"<day> <h> AM/PM"`, anchored right of the cell and
    /// half a column-width below its top.
    pub fn interaction(&self) -> InteractionData {
        InteractionData {
            label: format!("{} {}", self.day, self.hour.clock_label()),
            count: round_count(self.count),
            x_pos: self.x + self.width + MARGIN.left,
            y_pos: self.y + self.width / 2.0 + MARGIN.top,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HourlyLayout {
    pub width: f64,
    pub height: f64,
    pub x_scale: BandScale<HourKey>,
    pub y_scale: BandScale<String>,
    pub color: SequentialScale,
    /// In input order; a later duplicate paints over an earlier one.
    pub cells: Vec<HourlyCell>,
    pub skipped: Vec<Skipped>,
}

impl HourlyLayout {
    pub fn new(records: &[HourlyRecord], width: f64, height: f64) -> Self {
        Self::with_palette(records, width, height, Palette::HOURLY)
    }

    pub fn with_palette(records: &[HourlyRecord], width: f64, height: f64, palette: Palette) -> Self {
        let (bounds_width, bounds_height) = MARGIN.bounds(width, height);

        let x_scale = BandScale::new(
            records.iter().map(|r| r.hour.clone()),
            (0.0, bounds_width),
            DEFAULT_PADDING,
        );
        let y_scale = BandScale::new(
            records.iter().map(|r| r.day.clone()),
            (bounds_height, 0.0),
            DEFAULT_PADDING,
        );
        let domain = ColorDomain::from_counts(records.iter().map(|r| r.count));
        let color = SequentialScale::new(domain, palette);

        let mut cells = Vec::with_capacity(records.len());
        let mut skipped = Vec::new();
        for (index, record) in records.iter().enumerate() {
            match place(record, &x_scale, &y_scale) {
                Ok((count, x, y)) => cells.push(HourlyCell {
                    id: CellId(index),
                    day: record.day.clone(),
                    hour: record.hour.clone(),
                    count,
                    x,
                    y,
                    width: x_scale.bandwidth(),
                    height: y_scale.bandwidth(),
                    fill: color.color(count),
                }),
                Err(reason) => {
                    debug!("Skipping hourly record {index}: {reason}");
                    skipped.push(Skipped { index, reason });
                }
            }
        }

        debug!(
            "Hourly layout: {} cells, {} days × {} hours, domain [{}, {}]",
            cells.len(),
            y_scale.len(),
            x_scale.len(),
            domain.min,
            domain.max
        );

        HourlyLayout {
            width,
            height,
            x_scale,
            y_scale,
            color,
            cells,
            skipped,
        }
    }

    pub fn cell(&self, id: CellId) -> Option<&HourlyCell> {
        self.cells.iter().find(|c| c.id == id)
    }

    /// Hour labels, centred under each column.
    pub fn x_labels(&self) -> Vec<TextLabel> {
        let (_, bounds_height) = MARGIN.bounds(self.width, self.height);
        self.x_scale
            .categories()
            .iter()
            .filter_map(|hour| {
                let x = self.x_scale.center(hour)?;
                Some(TextLabel::new(
                    x,
                    bounds_height + 10.0,
                    hour.label(),
                    TextAnchor::Middle,
                    LABEL_FONT_SIZE,
                ))
            })
            .collect()
    }

    /// Day labels, right-aligned left of the plot.
    pub fn y_labels(&self) -> Vec<TextLabel> {
        self.y_scale
            .categories()
            .iter()
            .filter_map(|day| {
                let y = self.y_scale.center(day)?;
                Some(TextLabel::new(-5.0, y, day.as_str(), TextAnchor::End, LABEL_FONT_SIZE))
            })
            .collect()
    }
}

fn place(
    record: &HourlyRecord,
    x_scale: &BandScale<HourKey>,
    y_scale: &BandScale<String>,
) -> Result<(f64, f64, f64), SkipReason> {
    let count = record.count.ok_or(SkipReason::NullCount)?;
    if !count.is_finite() {
        return Err(SkipReason::NonFiniteCount);
    }
    match (x_scale.position(&record.hour), y_scale.position(&record.day)) {
        (Some(x), Some(y)) => Ok((count, x, y)),
        _ => Err(SkipReason::UnresolvableCategory {
            day: record.day.clone(),
            hour: record.hour.label(),
        }),
    }
}

impl HeatmapLayout for HourlyLayout {
    /// Hover does not restyle hourly cells; only the tooltip reacts.
    fn scene(&self, _hovered: Option<CellId>) -> Scene {
        let mut scene = Scene::new(self.width, self.height, (MARGIN.left, MARGIN.top));
        for cell in &self.cells {
            scene.push_rect(RectShape {
                cell: Some(cell.id),
                x: cell.x,
                y: cell.y,
                width: cell.width,
                height: cell.height,
                rx: CELL_RADIUS,
                fill: cell.fill.to_string(),
                stroke: CELL_STROKE.to_string(),
                stroke_width: STROKE_WIDTH,
            });
        }
        for label in self.x_labels().into_iter().chain(self.y_labels()) {
            scene.push_text(label);
        }
        scene
    }

    fn interaction(&self, cell: CellId) -> Option<InteractionData> {
        self.cell(cell).map(HourlyCell::interaction)
    }

    fn cell_count(&self) -> usize {
        self.cells.len()
    }
}
