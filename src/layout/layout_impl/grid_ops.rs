//! Row and column editing.
//!
//! Removing rows or columns shifts the widgets behind them and shrinks widgets spanning the
//! removed part, then re-fits them so that no widget points outside its grid.

use tracing::debug;

use crate::layout::grid::{GridColumn, GridRow};
use crate::layout::LayoutSession;
use crate::utils::sanitize_fraction;

impl LayoutSession {
    /// Appends a row of `columns` equal-width columns to a tab.
    pub fn add_row(&mut self, tab: usize, columns: usize) -> bool {
        let Some(tab) = self.tabs.get_mut(tab) else {
            return false;
        };

        tab.grid_config.rows.push(GridRow::uniform(columns));
        self.cancel_interactive_move_for_edit();
        self.dirty = true;
        true
    }

    /// Removes a row of a tab. The last remaining row can't be removed.
    pub fn remove_row(&mut self, tab: usize, row: usize) -> bool {
        let Some(row_count) = self.grid(tab).map(|grid| grid.row_count()) else {
            return false;
        };
        if row_count <= 1 || row >= row_count {
            return false;
        }

        self.cancel_interactive_move_for_edit();
        self.tabs[tab].grid_config.rows.remove(row);

        let mut affected = Vec::new();
        for (idx, widget) in self.widgets.iter_mut().enumerate() {
            if widget.tab() != tab {
                continue;
            }

            let pos = &mut widget.position;
            if pos.y > row {
                pos.y -= 1;
                affected.push(idx);
            } else if pos.spans_row(row) {
                pos.height = pos.height.saturating_sub(1).max(1);
                affected.push(idx);
            }
        }
        self.refit(&affected);

        debug!(tab, row, "removed row");
        self.dirty = true;
        true
    }

    /// Appends a column with the default width to a row.
    pub fn add_column(&mut self, tab: usize, row: usize) -> bool {
        let width = self.options.default_column_width;
        let Some(row) = self
            .tabs
            .get_mut(tab)
            .and_then(|tab| tab.grid_config.rows.get_mut(row))
        else {
            return false;
        };

        row.columns.push(GridColumn::new(width));
        self.cancel_interactive_move_for_edit();
        self.dirty = true;
        true
    }

    /// Removes a column from a row. The last remaining column can't be removed.
    pub fn remove_column(&mut self, tab: usize, row: usize, col: usize) -> bool {
        let Some(columns) = self
            .tabs
            .get_mut(tab)
            .and_then(|tab| tab.grid_config.rows.get_mut(row))
            .map(|row| &mut row.columns)
        else {
            return false;
        };
        if columns.len() <= 1 || col >= columns.len() {
            return false;
        }

        columns.remove(col);
        self.cancel_interactive_move_for_edit();

        let mut affected = Vec::new();
        for (idx, widget) in self.widgets.iter_mut().enumerate() {
            if widget.tab() != tab || widget.position.y != row {
                continue;
            }

            let pos = &mut widget.position;
            if pos.x > col {
                pos.x -= 1;
                affected.push(idx);
            } else if pos.x + pos.width > col {
                pos.width = pos.width.saturating_sub(1).max(1);
                affected.push(idx);
            }
        }
        self.refit(&affected);

        debug!(tab, row, col, "removed column");
        self.dirty = true;
        true
    }

    /// Sets the width fraction of a column. Unusable widths fall back to the default width.
    pub fn set_column_width(&mut self, tab: usize, row: usize, col: usize, width: f64) -> bool {
        let width = sanitize_fraction(width).unwrap_or(self.options.default_column_width);
        let Some(column) = self
            .tabs
            .get_mut(tab)
            .and_then(|tab| tab.grid_config.rows.get_mut(row))
            .and_then(|row| row.columns.get_mut(col))
        else {
            return false;
        };

        if column.width == Some(width) {
            return false;
        }

        column.width = Some(width);
        self.cancel_interactive_move_for_edit();
        self.dirty = true;
        true
    }

    fn refit(&mut self, indices: &[usize]) {
        for &idx in indices {
            self.fit_widget(idx);
            self.settle_layer(idx);
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::layout::types::{CellRect, Layer, WidgetKind};
    use crate::layout::Options;
    use crate::screen::{PlaceableSource, Screen};

    fn source(id: &str) -> PlaceableSource {
        PlaceableSource {
            id: id.to_owned(),
            kind: WidgetKind::Table,
            display_name: id.to_owned(),
        }
    }

    fn session_with_rows(rows: usize) -> LayoutSession {
        let mut session = LayoutSession::new(Screen::new("scr"), Options::default());
        for _ in 1..rows {
            session.add_row(0, 4);
        }
        session
    }

    #[test]
    fn add_row_and_column() {
        let mut session = session_with_rows(1);
        assert!(session.add_row(0, 3));
        assert!(!session.add_row(1, 3));
        assert_eq!(session.grid(0).unwrap().rows[1], GridRow::uniform(3));

        assert!(session.add_column(0, 1));
        assert!(!session.add_column(0, 2));
        let grid = session.grid(0).unwrap();
        assert_eq!(grid.rows[1].columns.len(), 4);
        assert_eq!(grid.rows[1].columns[3], GridColumn::new(0.25));
    }

    #[test]
    fn last_row_and_column_are_kept() {
        let mut session = session_with_rows(1);
        assert!(!session.remove_row(0, 0));
        assert!(session.add_row(0, 1));
        assert!(!session.remove_column(0, 1, 0));
        assert!(!session.remove_column(0, 0, 4));
        assert!(!session.remove_row(0, 2));
    }

    #[test]
    fn removing_a_row_shifts_and_shrinks_widgets() {
        let mut session = session_with_rows(3);
        let below = session.add_widget(&source("below"), 1, 2).unwrap();
        let tall = session.add_widget(&source("tall"), 0, 0).unwrap();
        assert!(session.resize_widget(tall, 1, 3));
        let inside = session.add_widget(&source("inside"), 3, 1).unwrap();

        assert!(session.remove_row(0, 1));
        assert_eq!(session.grid(0).unwrap().rows.len(), 2);
        assert_eq!(session.widget(below).unwrap().position, CellRect::cell(1, 1));
        assert_eq!(session.widget(tall).unwrap().position, CellRect::new(0, 0, 1, 2));
        assert_eq!(session.widget(inside).unwrap().position, CellRect::cell(3, 1));
    }

    #[test]
    fn removing_the_last_row_pulls_widgets_up() {
        let mut session = session_with_rows(2);
        let a = session.add_widget(&source("a"), 2, 0).unwrap();
        let b = session.add_widget(&source("b"), 2, 1).unwrap();

        assert!(session.remove_row(0, 1));
        assert_eq!(session.widget(b).unwrap().position, CellRect::cell(2, 0));
        assert_eq!(session.widget(a).unwrap().layer, Layer(0));
        assert_eq!(session.widget(b).unwrap().layer, Layer(1));
    }

    #[test]
    fn removing_a_column_shifts_and_shrinks_widgets() {
        let mut session = session_with_rows(2);
        let wide = session.add_widget(&source("wide"), 0, 0).unwrap();
        assert!(session.resize_widget(wide, 3, 1));
        let right = session.add_widget(&source("right"), 3, 0).unwrap();
        let other_row = session.add_widget(&source("other"), 3, 1).unwrap();

        assert!(session.remove_column(0, 0, 1));
        assert_eq!(session.widget(wide).unwrap().position, CellRect::new(0, 0, 2, 1));
        assert_eq!(session.widget(right).unwrap().position, CellRect::cell(2, 0));
        assert_eq!(session.widget(other_row).unwrap().position, CellRect::cell(3, 1));
    }

    #[test]
    fn column_widths_are_sanitized() {
        let mut session = session_with_rows(1);
        let options = session.options().clone();

        assert!(session.set_column_width(0, 0, 1, 0.4));
        assert!(!session.set_column_width(0, 0, 1, 0.4));
        assert_abs_diff_eq!(session.grid(0).unwrap().column_width(0, 1, &options), 0.4);

        assert!(session.set_column_width(0, 0, 1, -3.));
        assert_abs_diff_eq!(session.grid(0).unwrap().column_width(0, 1, &options), 0.25);

        assert!(session.set_column_width(0, 0, 2, 7.));
        assert_abs_diff_eq!(session.grid(0).unwrap().column_width(0, 2, &options), 1.);

        assert!(!session.set_column_width(0, 3, 0, 0.5));
        assert!(!session.set_column_width(0, 0, 9, 0.5));
    }
}
