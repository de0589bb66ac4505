//! Interactive moving of widgets with the pointer.
//!
//! Pointer positions are relative to the canvas top-left corner. While a move is ongoing only the
//! candidate position changes; the widget itself is updated once, on release.

use tracing::{debug, trace};

use super::types::{InteractiveMoveData, InteractiveMoveState, MoveGhost};
use crate::layout::grid::sizing;
use crate::layout::occupancy::CellStack;
use crate::layout::types::{CellRect, WidgetGeometry, WidgetId};
use crate::layout::LayoutSession;
use crate::utils::Point;

impl LayoutSession {
    /// Begins an interactive move of a widget on the selected tab.
    ///
    /// Returns `false` if another move is ongoing, the widget isn't on the selected tab, or the
    /// canvas has no width.
    pub fn interactive_move_begin(
        &mut self,
        widget_id: WidgetId,
        pointer: Point,
        canvas_width: f64,
    ) -> bool {
        if self.interactive_move.is_some() {
            return false;
        }

        if !(canvas_width.is_finite() && canvas_width > 0.) {
            return false;
        }

        let Some(idx) = self.widget_idx(widget_id) else {
            return false;
        };
        let widget = &self.widgets[idx];
        let tab = widget.tab();
        if tab != self.selected_tab {
            return false;
        }

        let grid = &self.tabs[tab].grid_config;
        let row_heights = sizing::row_heights(grid, &self.widgets, tab, &self.options);

        let pos = widget.position;
        let top_left = Point::new(
            grid.column_left_offset(pos.y, pos.x, &self.options) * canvas_width,
            sizing::top_offset(&row_heights, pos.y, &self.options),
        );

        debug!(widget = %widget_id, x = pos.x, y = pos.y, "interactive move begin");

        self.interactive_move = Some(InteractiveMoveState::Starting(InteractiveMoveData {
            widget_id,
            tab,
            pointer_offset: pointer - top_left,
            canvas_width,
            row_heights,
            original: pos,
            candidate: pos,
        }));

        true
    }

    /// Updates the candidate cell of an ongoing move from the pointer position.
    ///
    /// Returns `false` if there is no ongoing move of this widget.
    pub fn interactive_move_update(&mut self, widget_id: WidgetId, pointer: Point) -> bool {
        let Some(state) = self.interactive_move.take() else {
            return false;
        };

        if state.data().widget_id != widget_id {
            self.interactive_move = Some(state);
            return false;
        }

        let mut data = state.into_data();
        let pos = pointer - data.pointer_offset;

        let span = data.original;
        let grid = &self.tabs[data.tab].grid_config;
        let last_row = grid.row_count().saturating_sub(span.height);
        let row = sizing::row_at_y(&data.row_heights, pos.y).min(last_row);
        let cols = grid.columns_in_row(row, &self.options);

        // Columns are treated as equally wide here, regardless of their configured widths.
        let column_width = data.canvas_width / cols as f64;
        let col = if pos.x > 0. && column_width > 0. {
            ((pos.x / column_width).floor() as usize).min(cols.saturating_sub(span.width))
        } else {
            0
        };

        data.candidate = CellRect {
            x: col,
            y: row,
            ..data.original
        };
        trace!(widget = %widget_id, x = col, y = row, "interactive move candidate");

        self.interactive_move = Some(InteractiveMoveState::Moving(data));
        true
    }

    /// Ends an interactive move, committing the candidate position.
    ///
    /// Returns `true` if the widget changed. Releasing without any pointer motion is a click and
    /// changes nothing.
    pub fn interactive_move_end(&mut self, widget_id: WidgetId) -> bool {
        let Some(state) = self.interactive_move.take() else {
            return false;
        };

        if state.data().widget_id != widget_id {
            self.interactive_move = Some(state);
            return false;
        }

        let InteractiveMoveState::Moving(data) = state else {
            debug!(widget = %widget_id, "interactive move ended without motion");
            return false;
        };

        let Some(idx) = self.widget_idx(widget_id) else {
            return false;
        };

        let rect = CellRect {
            x: data.candidate.x,
            y: data.candidate.y,
            ..self.widgets[idx].position
        };
        let changed = self.place_widget(idx, rect);
        if changed {
            self.dirty = true;
        }

        let pos = self.widgets[idx].position;
        debug!(widget = %widget_id, x = pos.x, y = pos.y, changed, "interactive move end");
        changed
    }

    /// Cancels the ongoing move, leaving the widget where it was.
    ///
    /// Returns `false` if there was no ongoing move.
    pub fn interactive_move_cancel(&mut self) -> bool {
        let Some(state) = self.interactive_move.take() else {
            return false;
        };

        debug!(widget = %state.data().widget_id, "interactive move cancelled");
        true
    }

    /// Returns the widget being moved, if any.
    pub fn interactive_move_widget(&self) -> Option<WidgetId> {
        self.interactive_move.as_ref().map(|state| state.data().widget_id)
    }

    /// Returns the preview of the ongoing move once the pointer has moved.
    pub fn interactive_move_ghost(&self) -> Option<MoveGhost> {
        let data = self.interactive_move.as_ref()?.moving()?;
        let grid = &self.tabs[data.tab].grid_config;
        let rect = data.candidate;

        let stack_index = CellStack::at(&self.widgets, data.tab, rect.x, rect.y)
            .iter()
            .filter(|(_, id)| *id != data.widget_id)
            .count();

        let geometry = WidgetGeometry {
            left: grid.column_left_offset(rect.y, rect.x, &self.options),
            width: grid.span_width(rect.y, rect.x, rect.width, &self.options),
            top: sizing::top_offset(&data.row_heights, rect.y, &self.options),
            height: sizing::span_height(&data.row_heights, rect.y, rect.height, &self.options),
            stack_index,
        };

        Some(MoveGhost {
            widget_id: data.widget_id,
            original: data.original,
            candidate: rect,
            geometry,
        })
    }

    /// Drops the ongoing move when the structure it refers to changes.
    pub(super) fn cancel_interactive_move_for_edit(&mut self) {
        if let Some(state) = self.interactive_move.take() {
            debug!(
                widget = %state.data().widget_id,
                "interactive move cancelled by layout edit"
            );
        }
    }
}
