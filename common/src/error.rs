//! Error types.
//!
//! Nothing in the layout engines fails as a whole: a bad record is recorded
//! as [`Skipped`] and the rest of the grid is still laid out.

use thiserror::Error;

/// Why a record produced no cell.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkipReason {
    #[error("count is null")]
    NullCount,
    #[error("count is not a finite number")]
    NonFiniteCount,
    #[error("no band for day {day:?} / hour {hour:?}")]
    UnresolvableCategory { day: String, hour: String },
    #[error("invalid date {0:?}")]
    InvalidDate(String),
}

/// A record left out of the layout, by its position in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Skipped {
    pub index: usize,
    pub reason: SkipReason,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid color {value:?} for {field}: expected #rrggbb or #rgb")]
    InvalidColor { field: &'static str, value: String },
    #[error("canvas size must be positive, got {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },
}
