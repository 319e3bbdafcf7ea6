//! Hover state shared by both heatmaps.
//!
//! At most one cell is hovered at any instant.  Entering a cell overwrites
//! whatever was there; leaving clears the slot.

use serde::{Deserialize, Serialize};

use crate::scene::CellId;

/// What the tooltip shows for the hovered cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionData {
    /// `"Mon 9 AM"` for the hourly map, `"3rd Jan"` for the monthly one.
    #[serde(rename = "day")]
    pub label: String,
    /// Rounded to two decimals.
    pub count: f64,
    pub x_pos: f64,
    pub y_pos: f64,
}

/// Round to two decimal places, halves towards positive infinity.
pub fn round_count(count: f64) -> f64 {
    (count * 100.0 + 0.5).floor() / 100.0
}

#[derive(Debug, Clone, PartialEq)]
struct Hovered {
    cell: CellId,
    data: InteractionData,
}

/// Single-slot hover state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoverState {
    slot: Option<Hovered>,
}

impl HoverState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer entered `cell`: replaces any previous record.
    pub fn enter(&mut self, cell: CellId, data: InteractionData) {
        self.slot = Some(Hovered { cell, data });
    }

    /// Pointer left the hovered cell.
    pub fn leave(&mut self) {
        self.slot = None;
    }

    pub fn current(&self) -> Option<&InteractionData> {
        self.slot.as_ref().map(|h| &h.data)
    }

    pub fn hovered_cell(&self) -> Option<CellId> {
        self.slot.as_ref().map(|h| h.cell)
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}
