//! Read-only queries and render geometry for the LayoutSession.

use crate::layout::grid::{sizing, GridConfig};
use crate::layout::occupancy::{self, CellStack};
use crate::layout::types::{LayoutMode, WidgetGeometry, WidgetId};
use crate::layout::widget::Widget;
use crate::layout::LayoutSession;
use crate::screen::Tab;
use crate::utils::Point;

impl LayoutSession {
    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn selected_tab(&self) -> usize {
        self.selected_tab
    }

    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn grid(&self, tab: usize) -> Option<&GridConfig> {
        self.tabs.get(tab).map(|tab| &tab.grid_config)
    }

    pub fn widgets_in_tab(&self, tab: usize) -> Vec<&Widget> {
        occupancy::widgets_in_tab(&self.widgets, tab)
    }

    pub fn widgets_covering_cell(&self, tab: usize, x: usize, y: usize) -> Vec<&Widget> {
        occupancy::widgets_covering_cell(self.widgets.iter().filter(|w| w.tab() == tab), x, y)
    }

    pub fn origin_widgets_at_cell(&self, tab: usize, x: usize, y: usize) -> Vec<&Widget> {
        occupancy::origin_widgets_at_cell(self.widgets.iter().filter(|w| w.tab() == tab), x, y)
    }

    pub fn cell_stack(&self, tab: usize, x: usize, y: usize) -> CellStack {
        CellStack::at(&self.widgets, tab, x, y)
    }

    /// Frontmost widget covering a cell.
    pub fn hit_test(&self, tab: usize, x: usize, y: usize) -> Option<&Widget> {
        occupancy::hit_test(&self.widgets, tab, x, y)
    }

    /// Heights of all rows of a tab. Empty for tabs that don't exist.
    pub fn row_heights(&self, tab: usize) -> Vec<f64> {
        match self.grid(tab) {
            Some(grid) => sizing::row_heights(grid, &self.widgets, tab, &self.options),
            None => Vec::new(),
        }
    }

    pub fn row_height(&self, tab: usize, row: usize) -> f64 {
        sizing::row_height(&self.widgets, tab, row, &self.options)
    }

    pub fn row_top_offset(&self, tab: usize, row: usize) -> f64 {
        sizing::top_offset(&self.row_heights(tab), row, &self.options)
    }

    pub fn canvas_height(&self, tab: usize) -> f64 {
        sizing::canvas_height(&self.row_heights(tab))
    }

    /// Cell of the selected tab under a canvas-relative pointer position.
    ///
    /// Unlike interactive moves, nothing is clamped: positions outside the grid yield `None`.
    pub fn cell_at(&self, pointer: Point, canvas_width: f64) -> Option<(usize, usize)> {
        if !(canvas_width.is_finite() && canvas_width > 0.) {
            return None;
        }
        if pointer.x < 0. || pointer.x >= canvas_width || pointer.y < 0. {
            return None;
        }

        let tab = self.selected_tab;
        let heights = self.row_heights(tab);
        if pointer.y >= sizing::canvas_height(&heights) {
            return None;
        }

        let row = sizing::row_at_y(&heights, pointer.y);
        let cols = self.tabs[tab].grid_config.columns_in_row(row, &self.options);
        let col = ((pointer.x / (canvas_width / cols as f64)).floor() as usize).min(cols - 1);
        Some((col, row))
    }

    /// Render geometry of a widget.
    pub fn widget_geometry(&self, id: WidgetId) -> Option<WidgetGeometry> {
        let widget = self.widget(id)?;
        let tab = widget.tab();
        let grid = self.grid(tab)?;
        let heights = sizing::row_heights(grid, &self.widgets, tab, &self.options);
        let pos = widget.position;

        Some(WidgetGeometry {
            left: grid.column_left_offset(pos.y, pos.x, &self.options),
            width: grid.span_width(pos.y, pos.x, pos.width, &self.options),
            top: sizing::top_offset(&heights, pos.y, &self.options),
            height: sizing::span_height(&heights, pos.y, pos.height, &self.options),
            stack_index: CellStack::of(&self.widgets, widget)
                .index_of(id)
                .unwrap_or(0),
        })
    }
}
