//! Monthly calendar heatmap.
//!
//! Seven weekday columns (Sunday first) and one row per calendar week of the
//! month, laid out on a fixed 800×400 logical viewport.  Each day cell holds
//! its day-of-month number, colored with the inverse of the fill gradient so
//! it stays readable.
//!
//! Cell size is `floor(min(bounds_width / 7, bounds_height / 4))`: a
//! four-week month always fits, a fifth or sixth week runs past the bottom.
//! Rows and columns advance by a fixed 50 units regardless of cell size.

use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use crate::color::{rgb_to_hex, ColorDomain, Palette, Rgb, SequentialScale};
use crate::error::{SkipReason, Skipped};
use crate::heatmap::HeatmapLayout;
use crate::interaction::{round_count, InteractionData};
use crate::record::MonthlyRecord;
use crate::scene::{CellId, Margin, RectShape, Scene, TextAnchor, TextLabel};

pub const MARGIN: Margin = Margin {
    top: 20.0,
    right: 50.0,
    bottom: 30.0,
    left: 50.0,
};

/// Logical viewport of the monthly scene; the caller scales it.
pub const VIEWPORT: (f64, f64) = (800.0, 400.0);

pub const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const COLUMN_ORIGIN: f64 = 100.0;
const COLUMN_PITCH: f64 = 50.0;
const ROW_PITCH: f64 = 50.0;

const DEFAULT_STROKE: &str = "#ffffff";
const STROKE_WIDTH: f64 = 2.0;
const CELL_RADIUS: f64 = 5.0;
const DAY_FONT_SIZE: f64 = 10.0;
const DAY_FONT_FAMILY: &str = "Arial, sans-serif";
const HEADER_FONT_SIZE: f64 = 14.0;
const HEADER_FILL: &str = "#595758";
const HEADER_Y: f64 = -14.0;

/// Square cell edge for a `width × height` canvas.
pub fn cell_size(width: f64, height: f64) -> f64 {
    let (bounds_width, bounds_height) = MARGIN.bounds(width, height);
    (bounds_width / 7.0)
        .floor()
        .min((bounds_height / 4.0).floor())
        .max(0.0)
}

/// Where a date falls in its month's grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarPosition {
    /// 0 = Sunday … 6 = Saturday.
    pub weekday: u32,
    /// Weekday of the 1st of the month, same numbering.
    pub month_start_weekday: u32,
    /// Whole calendar days since the 1st of the month.
    pub day_offset: u32,
    pub row: u32,
}

impl CalendarPosition {
    pub fn of(date: NaiveDate) -> Self {
        let month_start = date.with_day(1).unwrap_or(date);
        let day_offset = date.signed_duration_since(month_start).num_days() as u32;
        let month_start_weekday = month_start.weekday().num_days_from_sunday();
        CalendarPosition {
            weekday: date.weekday().num_days_from_sunday(),
            month_start_weekday,
            day_offset,
            row: (month_start_weekday + day_offset) / 7,
        }
    }

    pub fn weekday_name(&self) -> &'static str {
        WEEKDAYS[(self.weekday % 7) as usize]
    }

    /// Left edge of the date's weekday column.
    pub fn column(&self) -> f64 {
        COLUMN_ORIGIN + (self.weekday % 7) as f64 * COLUMN_PITCH
    }

    /// Top edge of the date's week row.
    pub fn row_y(&self) -> f64 {
        self.row as f64 * ROW_PITCH + 0.5
    }
}

/// `"3rd Jan"`, `"11th Apr"`, `"22nd May"`.
pub fn ordinal_label(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = match day % 100 {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    };
    format!("{day}{suffix} {}", date.format("%b"))
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyCell {
    pub id: CellId,
    pub date: NaiveDate,
    pub count: f64,
    pub position: CalendarPosition,
    pub cell_size: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Rgb,
    /// Day-number color; also the stroke of the hovered cell.
    pub label_color: Rgb,
}

impl MonthlyCell {
    pub fn weekday(&self) -> &'static str {
        self.position.weekday_name()
    }

    pub fn day_label(&self) -> String {
        self.date.day().to_string()
    }

    /// Label color as `#rrggbb`, falling back to the default stroke.
    fn label_hex(&self) -> String {
        rgb_to_hex(&self.label_color.to_string()).unwrap_or_else(|| DEFAULT_STROKE.to_string())
    }

    pub fn stroke(&self, hovered: bool) -> String {
        if hovered {
            self.label_hex()
        } else {
            DEFAULT_STROKE.to_string()
        }
    }

    /// Tooltip record, anchored just right of and below the cell.
    pub fn interaction(&self) -> InteractionData {
        InteractionData {
            label: ordinal_label(self.date),
            count: round_count(self.count),
            x_pos: self.x + self.cell_size + 25.0,
            y_pos: self.y + self.cell_size + MARGIN.top + 10.0,
        }
    }

    fn day_text(&self) -> TextLabel {
        let column = self.position.column();
        TextLabel {
            x: column + (self.cell_size - 2.0) + self.cell_size / 2.0,
            y: self.y + (self.cell_size - 2.0) / 2.0,
            text: self.day_label(),
            anchor: TextAnchor::Middle,
            font_size: DAY_FONT_SIZE,
            bold: true,
            fill: Some(self.label_hex()),
            font_family: Some(DAY_FONT_FAMILY.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MonthlyLayout {
    pub width: f64,
    pub height: f64,
    pub cell_size: f64,
    pub fill_scale: SequentialScale,
    pub label_scale: SequentialScale,
    pub cells: Vec<MonthlyCell>,
    pub skipped: Vec<Skipped>,
}

impl MonthlyLayout {
    pub fn new(records: &[MonthlyRecord], width: f64, height: f64) -> Self {
        Self::with_palette(records, width, height, Palette::MONTHLY)
    }

    pub fn with_palette(records: &[MonthlyRecord], width: f64, height: f64, palette: Palette) -> Self {
        let cell_size = cell_size(width, height);
        let domain = ColorDomain::from_counts(records.iter().map(|r| Some(r.count)));
        let fill_scale = SequentialScale::new(domain, palette);
        let label_scale = fill_scale.inverted();

        let mut cells = Vec::with_capacity(records.len());
        let mut skipped = Vec::new();
        for (index, record) in records.iter().enumerate() {
            let date = match record.calendar_date() {
                Some(d) => d,
                None => {
                    warn!("Skipping monthly record {index}: invalid date {:?}", record.date);
                    skipped.push(Skipped {
                        index,
                        reason: SkipReason::InvalidDate(record.date.clone()),
                    });
                    continue;
                }
            };
            if !record.count.is_finite() {
                debug!("Skipping monthly record {index}: non-finite count");
                skipped.push(Skipped {
                    index,
                    reason: SkipReason::NonFiniteCount,
                });
                continue;
            }

            let position = CalendarPosition::of(date);
            cells.push(MonthlyCell {
                id: CellId(index),
                date,
                count: record.count,
                position,
                cell_size,
                x: position.column() + cell_size,
                y: position.row_y(),
                width: (cell_size - 5.0).max(0.0),
                height: (cell_size - 6.0).max(0.0),
                fill: fill_scale.color(record.count),
                label_color: label_scale.color(record.count),
            });
        }

        debug!(
            "Monthly layout: {} cells, cell size {}, domain [{}, {}]",
            cells.len(),
            cell_size,
            domain.min,
            domain.max
        );

        MonthlyLayout {
            width,
            height,
            cell_size,
            fill_scale,
            label_scale,
            cells,
            skipped,
        }
    }

    pub fn cell(&self, id: CellId) -> Option<&MonthlyCell> {
        self.cells.iter().find(|c| c.id == id)
    }

    /// `Sun … Sat` across the top, shifted by one cell like the cells are.
    pub fn headers(&self) -> Vec<TextLabel> {
        WEEKDAYS
            .iter()
            .enumerate()
            .map(|(i, name)| TextLabel {
                x: COLUMN_ORIGIN + i as f64 * COLUMN_PITCH + self.cell_size + 35.0 / 2.0,
                y: HEADER_Y,
                text: name.to_string(),
                anchor: TextAnchor::Middle,
                font_size: HEADER_FONT_SIZE,
                bold: true,
                fill: Some(HEADER_FILL.to_string()),
                font_family: None,
            })
            .collect()
    }
}

impl HeatmapLayout for MonthlyLayout {
    fn scene(&self, hovered: Option<CellId>) -> Scene {
        let mut scene = Scene::new(self.width, self.height, (MARGIN.left, MARGIN.top));
        scene.view_box = Some(VIEWPORT);
        for header in self.headers() {
            scene.push_text(header);
        }
        for cell in &self.cells {
            scene.push_rect(RectShape {
                cell: Some(cell.id),
                x: cell.x,
                y: cell.y,
                width: cell.width,
                height: cell.height,
                rx: CELL_RADIUS,
                fill: cell.fill.to_string(),
                stroke: cell.stroke(hovered == Some(cell.id)),
                stroke_width: STROKE_WIDTH,
            });
            scene.push_text(cell.day_text());
        }
        scene
    }

    fn interaction(&self, cell: CellId) -> Option<InteractionData> {
        self.cell(cell).map(MonthlyCell::interaction)
    }

    fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_single_record_new_year_2024() {
        let layout = MonthlyLayout::new(&[MonthlyRecord::new("2024-01-01", 10.0)], 400.0, 250.0);
        assert_eq!(layout.cells.len(), 1);
        let cell = &layout.cells[0];
        assert_eq!(cell.position.row, 0);
        assert_eq!(cell.weekday(), "Mon");
        assert_eq!(cell.day_label(), "1");
        assert_eq!(cell.position.column(), 150.0);
        assert_eq!(cell.y, 0.5);
    }

    #[test]
    fn test_row_law_over_a_year() {
        for month in 1..=12 {
            let first = CalendarPosition::of(date(2024, month, 1));
            assert_eq!(first.row, 0);
            assert_eq!(first.day_offset, 0);
            for day in 1..=21 {
                let a = CalendarPosition::of(date(2024, month, day));
                let b = CalendarPosition::of(date(2024, month, day + 7));
                assert_eq!(b.row, a.row + 1, "{month}/{day}");
                assert_eq!(b.column(), a.column());
            }
        }
    }

    #[test]
    fn test_columns_follow_own_weekday() {
        // March 2024 starts on a Friday
        let fri = CalendarPosition::of(date(2024, 3, 1));
        let sat = CalendarPosition::of(date(2024, 3, 2));
        let sun = CalendarPosition::of(date(2024, 3, 3));
        assert_eq!(fri.month_start_weekday, 5);
        assert_eq!(fri.column(), 350.0);
        assert_eq!(sat.column(), 400.0);
        assert_eq!(sun.column(), 100.0);
        assert_eq!((fri.row, sat.row, sun.row), (0, 0, 1));
    }

    #[test]
    fn test_cell_size() {
        assert_eq!(cell_size(400.0, 250.0), 42.0);
        assert_eq!(cell_size(800.0, 400.0), 87.0);
        assert_eq!(cell_size(50.0, 20.0), 0.0);
    }

    #[test]
    fn test_ordinal_label() {
        assert_eq!(ordinal_label(date(2024, 1, 3)), "3rd Jan");
        assert_eq!(ordinal_label(date(2024, 2, 1)), "1st Feb");
        assert_eq!(ordinal_label(date(2024, 2, 2)), "2nd Feb");
        assert_eq!(ordinal_label(date(2024, 4, 11)), "11th Apr");
        assert_eq!(ordinal_label(date(2024, 4, 12)), "12th Apr");
        assert_eq!(ordinal_label(date(2024, 4, 13)), "13th Apr");
        assert_eq!(ordinal_label(date(2024, 5, 22)), "22nd May");
        assert_eq!(ordinal_label(date(2024, 5, 23)), "23rd May");
        assert_eq!(ordinal_label(date(2024, 12, 31)), "31st Dec");
    }

    #[test]
    fn test_invalid_dates_are_skipped() {
        let records = vec![
            MonthlyRecord::new("2024-02-30", 3.0),
            MonthlyRecord::new("2024-02-01", 1.0),
            MonthlyRecord::new("", 2.0),
            MonthlyRecord::new("2024-02-02", 5.0),
        ];
        let layout = MonthlyLayout::new(&records, 400.0, 250.0);
        assert_eq!(layout.cell_count(), 2);
        assert_eq!(
            layout.skipped.iter().map(|s| s.index).collect::<Vec<_>>(),
            vec![0, 2]
        );
        assert!(matches!(layout.skipped[0].reason, SkipReason::InvalidDate(_)));
        // the bad records still count towards the color domain
        assert_eq!(layout.fill_scale.domain, ColorDomain::new(1.0, 5.0));
    }

    #[test]
    fn test_cell_geometry() {
        let layout = MonthlyLayout::new(&[MonthlyRecord::new("2024-01-10", 4.0)], 400.0, 250.0);
        let cell = &layout.cells[0];
        // Wednesday of the second week
        assert_eq!(cell.position.row, 1);
        assert_eq!(cell.y, 50.5);
        assert_eq!(cell.position.column(), 250.0);
        assert_eq!(cell.x, 250.0 + 42.0);
        assert_eq!((cell.width, cell.height), (37.0, 36.0));

        let scene = layout.scene(None);
        let text = scene.texts().find(|t| t.text == "10").unwrap();
        assert_eq!(text.x, 250.0 + 40.0 + 21.0);
        assert_eq!(text.y, 50.5 + 20.0);
        assert!(text.bold);
    }

    #[test]
    fn test_label_colors_are_inverse_of_fill() {
        let records = vec![
            MonthlyRecord::new("2024-06-01", 0.0),
            MonthlyRecord::new("2024-06-02", 20.0),
        ];
        let layout = MonthlyLayout::new(&records, 400.0, 250.0);
        assert_eq!(layout.cells[0].fill, Palette::MONTHLY.low);
        assert_eq!(layout.cells[0].label_color, Palette::MONTHLY.high);
        assert_eq!(layout.cells[1].fill, Palette::MONTHLY.high);
        assert_eq!(layout.cells[1].label_color, Palette::MONTHLY.low);
    }

    #[test]
    fn test_hover_restyles_only_hovered_cell() {
        let records = vec![
            MonthlyRecord::new("2024-01-01", 10.0),
            MonthlyRecord::new("2024-01-02", 10.0),
        ];
        let layout = MonthlyLayout::new(&records, 400.0, 250.0);

        let idle = layout.scene(None);
        assert!(idle.rects().all(|r| r.stroke == "#ffffff"));

        let hovered = layout.scene(Some(CellId(1)));
        assert_eq!(hovered.cell_rect(CellId(0)).unwrap().stroke, "#ffffff");
        // constant dataset: the label scale sits on its low end, the fill's high stop
        assert_eq!(hovered.cell_rect(CellId(1)).unwrap().stroke, "#f5350f");
    }

    #[test]
    fn test_interaction() {
        let layout = MonthlyLayout::new(&[MonthlyRecord::new("2024-01-03", 2.346)], 400.0, 250.0);
        let cell = layout.cells[0].clone();
        let data = layout.interaction(CellId(0)).unwrap();
        assert_eq!(data.label, "3rd Jan");
        assert_eq!(data.count, 2.35);
        assert_eq!(data.x_pos, cell.x + 42.0 + 25.0);
        assert_eq!(data.y_pos, 0.5 + 42.0 + 20.0 + 10.0);
    }

    #[test]
    fn test_headers_and_viewport() {
        let layout = MonthlyLayout::new(&[], 400.0, 250.0);
        let scene = layout.scene(None);
        assert_eq!(scene.view_box, Some(VIEWPORT));
        let headers: Vec<_> = scene.texts().collect();
        assert_eq!(headers.len(), 7);
        assert_eq!(headers[0].text, "Sun");
        assert_eq!(headers[6].text, "Sat");
        assert_eq!(headers[0].x, 100.0 + 42.0 + 17.5);
        assert_eq!(headers[0].y, -14.0);
        assert_eq!(scene.rects().count(), 0);
    }
}
