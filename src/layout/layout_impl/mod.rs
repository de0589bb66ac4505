//! Implementation of [`LayoutSession`] methods, split by category:
//!
//! - `types.rs` - Interactive move state
//! - `queries.rs` - Read-only queries and render geometry
//! - `widget_ops.rs` - Widget lifecycle, settings and layer sequencing
//! - `tab_ops.rs` - Layout mode, tab count and tab selection
//! - `grid_ops.rs` - Row and column editing
//! - `interactive_move.rs` - Pointer-driven repositioning

pub(crate) mod types;

mod grid_ops;
mod interactive_move;
mod queries;
mod tab_ops;
mod widget_ops;

use std::collections::HashSet;

use tracing::warn;

use super::occupancy;
use super::types::{CellRect, LayoutMode, WidgetId};
use super::LayoutSession;

impl LayoutSession {
    /// Brings a freshly loaded screen in line with the session invariants.
    ///
    /// Loaded records are trusted as little as transient edit states: grids are repaired,
    /// widgets are attached to existing tabs, clamped into their grid, and colliding layers are
    /// re-sequenced.
    pub(super) fn normalize(&mut self) {
        let options = self.options.clone();

        if self.tabs.is_empty() {
            self.tabs.push(options.default_tab(0));
        }

        match self.mode {
            LayoutMode::Single => {
                if self.tabs.len() > 1 {
                    warn!(
                        "screen {} is in single layout but has {} tabs, keeping the first",
                        self.saved.id,
                        self.tabs.len()
                    );
                    self.tabs.truncate(1);
                }
            }
            LayoutMode::Tabs => {
                while self.tabs.len() < options.min_tab_count {
                    let idx = self.tabs.len();
                    self.tabs.push(options.default_tab(idx));
                }
            }
        }

        for tab in &mut self.tabs {
            tab.grid_config.repair(&options);
        }

        for idx in 0..self.widgets.len() {
            if self.fit_widget(idx) {
                warn!(
                    "widget {} did not fit its grid and was clamped",
                    self.widgets[idx].id
                );
            }
        }

        self.attach_widgets_beyond(self.tabs.len());

        for idx in 0..self.widgets.len() {
            self.settle_layer(idx);
        }

        self.selected_tab = self.selected_tab.min(self.tabs.len() - 1);
    }

    /// Moves widgets of tabs at or past `tab_count` to the last remaining tab.
    ///
    /// Returns the number of reassigned widgets.
    pub(super) fn attach_widgets_beyond(&mut self, tab_count: usize) -> usize {
        let last = tab_count.saturating_sub(1);

        let mut moved = Vec::new();
        for (idx, widget) in self.widgets.iter_mut().enumerate() {
            if widget.tab() > last {
                widget.tab_index = Some(last);
                moved.push(idx);
            }
        }

        for &idx in &moved {
            self.fit_widget(idx);
            self.settle_layer(idx);
        }

        if !moved.is_empty() {
            warn!("reassigned {} widgets to tab {last}", moved.len());
        }

        moved.len()
    }

    /// Clamps a widget into the grid of its tab.
    ///
    /// The origin row must exist, the widget must not extend past the last row, and
    /// `x + width` must not exceed the column count of the origin row. Returns `true` if the
    /// position changed.
    pub(super) fn fit_widget(&mut self, idx: usize) -> bool {
        let tab = self.widgets[idx].tab().min(self.tabs.len() - 1);
        let grid = &self.tabs[tab].grid_config;

        let rows = grid.row_count().max(1);
        let mut pos = self.widgets[idx].position;
        pos.y = pos.y.min(rows - 1);
        pos.height = pos.height.clamp(1, rows - pos.y);

        let cols = grid.columns_in_row(pos.y, &self.options);
        pos.width = pos.width.clamp(1, cols);
        pos.x = pos.x.min(cols - pos.width);

        let changed = pos != self.widgets[idx].position;
        self.widgets[idx].position = pos;
        changed
    }

    /// Gives a widget a fresh layer if another widget anchored at the same cell already uses
    /// its layer. Returns `true` if the layer changed.
    pub(super) fn settle_layer(&mut self, idx: usize) -> bool {
        let widget = &self.widgets[idx];
        let (id, tab, layer) = (widget.id, widget.tab(), widget.layer);
        let (x, y) = widget.origin();

        let collides = self
            .widgets
            .iter()
            .any(|w| w.id != id && w.tab() == tab && w.is_anchored_at(x, y) && w.layer == layer);
        if !collides {
            return false;
        }

        self.widgets[idx].layer = occupancy::next_layer(&self.widgets, tab, x, y, Some(id));
        true
    }

    /// Moves a widget to `rect`, keeping the grid and layer invariants.
    ///
    /// A widget arriving in an occupied cell goes on top of that cell's stack. Returns `true` if
    /// the widget changed.
    pub(super) fn place_widget(&mut self, idx: usize, rect: CellRect) -> bool {
        let before = self.widgets[idx].clone();

        self.widgets[idx].position = rect;
        self.fit_widget(idx);

        let widget = &self.widgets[idx];
        if widget.origin() != before.origin() {
            let (x, y) = widget.origin();
            let occupied = self.widgets.iter().any(|w| {
                w.id != widget.id && w.tab() == widget.tab() && w.is_anchored_at(x, y)
            });
            if occupied {
                let layer =
                    occupancy::next_layer(&self.widgets, widget.tab(), x, y, Some(widget.id));
                self.widgets[idx].layer = layer;
            }
        }

        self.widgets[idx] != before
    }

    pub(super) fn widget_idx(&self, id: WidgetId) -> Option<usize> {
        self.widgets.iter().position(|w| w.id == id)
    }

    pub(super) fn next_widget_id(&self) -> WidgetId {
        let max = self.widgets.iter().map(|w| w.id.0).max().unwrap_or(0);
        if let Some(next) = max.checked_add(1) {
            return WidgetId(next);
        }

        // A stored record took the highest id; fall back to the lowest free one.
        let used: HashSet<u64> = self.widgets.iter().map(|w| w.id.0).collect();
        WidgetId((1..).find(|id| !used.contains(id)).unwrap_or(0))
    }
}
