//! Heatmap core – turns flat (bucket, count) records into laid-out,
//! colored grids and tracks which cell the pointer is over.
//!
//! Two layouts share one color mapper and one hover model:
//!
//! - [`hourly::HourlyLayout`]: weekday × hour band grid.
//! - [`monthly::MonthlyLayout`]: one calendar month, seven weekday columns.
//!
//! Both implement [`heatmap::HeatmapLayout`] and produce a
//! [`scene::Scene`], a renderer-agnostic list of rectangles and labels.

pub mod band;
pub mod color;
pub mod config;
pub mod error;
pub mod heatmap;
pub mod hourly;
pub mod interaction;
pub mod monthly;
pub mod record;
pub mod scene;

pub use heatmap::{Heatmap, HeatmapLayout};
pub use interaction::{HoverState, InteractionData};
pub use record::{HourKey, HourlyRecord, MonthlyRecord};
pub use scene::{CellId, Scene};
