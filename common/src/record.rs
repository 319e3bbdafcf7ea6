//! Input records for the two heatmaps.
//!
//! Both record kinds deserialize straight from the JSON arrays the caller
//! hands over; nothing is validated here beyond shape.  Per-record problems
//! (a `null` count, a date that does not parse) are left for the layout
//! engines to skip.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

// ─── Hourly ──────────────────────────────────────────────────────────────────

/// One (weekday, hour) bucket of the hourly heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyRecord {
    pub day: String,
    pub hour: HourKey,
    /// `None` when the source reported `null`; such records are not drawn.
    pub count: Option<f64>,
}

impl HourlyRecord {
    pub fn new(day: &str, hour: impl Into<HourKey>, count: Option<f64>) -> Self {
        HourlyRecord {
            day: day.to_string(),
            hour: hour.into(),
            count,
        }
    }
}

/// An hour as it arrives on the wire: either `9` or `"9"`.
///
/// Integral floats (`9.0`) collapse to `Number`; any other number (`9.5`)
/// is kept as its text so it still forms its own axis category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum HourKey {
    Number(i64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireHour {
    Int(i64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for HourKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match WireHour::deserialize(deserializer)? {
            WireHour::Int(n) => HourKey::Number(n),
            WireHour::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                HourKey::Number(f as i64)
            }
            WireHour::Float(f) => HourKey::Text(f.to_string()),
            WireHour::Text(s) => HourKey::Text(s),
        })
    }
}

impl HourKey {
    /// Numeric hour, when the key holds (or spells) an integer.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            HourKey::Number(n) => Some(*n),
            HourKey::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Axis label, exactly as the value was written.
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// 12-hour clock label: `0 → "12 AM"`, `12 → "12 PM"`, `9 → "9 AM"`,
    /// `15 → "3 PM"`.  Non-numeric keys are returned unchanged.
    pub fn clock_label(&self) -> String {
        match self.as_number() {
            Some(0) => "12 AM".to_string(),
            Some(12) => "12 PM".to_string(),
            Some(h) if h < 12 => format!("{h} AM"),
            Some(h) => format!("{} PM", h - 12),
            None => self.label(),
        }
    }
}

impl fmt::Display for HourKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HourKey::Number(n) => write!(f, "{n}"),
            HourKey::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for HourKey {
    fn from(n: i64) -> Self {
        HourKey::Number(n)
    }
}

impl From<&str> for HourKey {
    fn from(s: &str) -> Self {
        HourKey::Text(s.to_string())
    }
}

// ─── Monthly ─────────────────────────────────────────────────────────────────

/// One calendar day of the monthly heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    /// ISO date, e.g. `2024-01-01`.
    pub date: String,
    pub count: f64,
}

impl MonthlyRecord {
    pub fn new(date: &str, count: f64) -> Self {
        MonthlyRecord {
            date: date.to_string(),
            count,
        }
    }

    /// Calendar date of the record, or `None` if `date` is malformed.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.date)
    }
}

/// Parse an ISO date into a calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 date-times and naive `YYYY-MM-DDTHH:MM:SS`.
/// The calendar date is taken as written; offsets never shift the day.
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local().date());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_label() {
        assert_eq!(HourKey::Number(0).clock_label(), "12 AM");
        assert_eq!(HourKey::Number(12).clock_label(), "12 PM");
        assert_eq!(HourKey::Number(9).clock_label(), "9 AM");
        assert_eq!(HourKey::Number(23).clock_label(), "11 PM");
        assert_eq!(HourKey::from("15").clock_label(), "3 PM");
        assert_eq!(HourKey::from("noon").clock_label(), "noon");
    }

    #[test]
    fn test_hourly_records_from_json() {
        let json = r#"[
            {"day": "Mon", "hour": "9", "count": 5},
            {"day": "Tue", "hour": 10, "count": null}
        ]"#;
        let records: Vec<HourlyRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].hour, HourKey::from("9"));
        assert_eq!(records[0].count, Some(5.0));
        assert_eq!(records[1].hour, HourKey::Number(10));
        assert!(records[1].count.is_none());
    }

    #[test]
    fn test_float_hours_do_not_abort_dataset() {
        let json = r#"[
            {"day": "Mon", "hour": 9, "count": 5},
            {"day": "Mon", "hour": 9.0, "count": 2},
            {"day": "Mon", "hour": 9.5, "count": 1}
        ]"#;
        let records: Vec<HourlyRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records[0].hour, HourKey::Number(9));
        assert_eq!(records[1].hour, HourKey::Number(9));
        assert_eq!(records[2].hour, HourKey::from("9.5"));
        assert_eq!(records[2].hour.clock_label(), "9.5");
    }

    #[test]
    fn test_parse_calendar_date_forms() {
        let jan1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(parse_calendar_date("2024-01-01"), Some(jan1));
        assert_eq!(parse_calendar_date("2024-01-01T23:30:00-05:00"), Some(jan1));
        assert_eq!(parse_calendar_date("2024-01-01T08:00:00"), Some(jan1));
        assert!(parse_calendar_date("2024-13-01").is_none());
        assert!(parse_calendar_date("not a date").is_none());
        assert!(parse_calendar_date("").is_none());
    }
}
