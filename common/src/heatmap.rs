//! Heatmap container: a laid-out grid plus the one hover slot.
//!
//! The container is the only writer of the hover state.  Pointer events come
//! in, the state changes, and the next [`Heatmap::scene`] call re-derives
//! every cell's styling from that state.

use crate::interaction::{HoverState, InteractionData};
use crate::scene::{CellId, Scene};

/// A laid-out heatmap that can be drawn and hovered.
pub trait HeatmapLayout {
    /// Build the scene, styling `hovered` (if any) as the hovered cell.
    fn scene(&self, hovered: Option<CellId>) -> Scene;

    /// Tooltip record for `cell`; `None` for cells that were not drawn.
    fn interaction(&self, cell: CellId) -> Option<InteractionData>;

    /// Number of cells actually drawn (skipped records excluded).
    fn cell_count(&self) -> usize;
}

#[derive(Debug, Clone)]
pub struct Heatmap<L> {
    layout: L,
    hover: HoverState,
}

impl<L: HeatmapLayout> Heatmap<L> {
    pub fn new(layout: L) -> Self {
        Heatmap {
            layout,
            hover: HoverState::new(),
        }
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    pub fn hover(&self) -> &HoverState {
        &self.hover
    }

    /// Current tooltip record, if a cell is hovered.
    pub fn interaction(&self) -> Option<&InteractionData> {
        self.hover.current()
    }

    /// Pointer entered `cell`.  Unknown cells leave the state untouched.
    pub fn pointer_enter(&mut self, cell: CellId) {
        if let Some(data) = self.layout.interaction(cell) {
            self.hover.enter(cell, data);
        }
    }

    pub fn pointer_leave(&mut self) {
        self.hover.leave();
    }

    /// Pointer moved to the canvas point `(x, y)`.
    ///
    /// Moving onto a different cell replaces the hovered record in one step;
    /// moving off every cell clears it.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let hit = self.scene().hit_test(x, y);
        match hit {
            Some(cell) if self.hover.hovered_cell() == Some(cell) => {}
            Some(cell) => self.pointer_enter(cell),
            None => self.pointer_leave(),
        }
    }

    /// Scene for the current hover state.
    pub fn scene(&self) -> Scene {
        self.layout.scene(self.hover.hovered_cell())
    }

    /// Swap in a freshly computed layout (new data or new size).  The hover
    /// slot is cleared, since cell identities no longer line up.
    pub fn replace_layout(&mut self, layout: L) {
        self.layout = layout;
        self.hover.leave();
    }
}
