//! Plain-data captures of a [`LayoutSession`](super::LayoutSession) for golden tests.
//!
//! A snapshot holds what a user would see on the canvas: the tab list, the effective geometry of
//! every row and the cell rectangle of every widget. Its `Display` output is stable and meant to
//! be compared with `insta::assert_snapshot!`.

mod types;

pub use types::{LayoutSnapshot, MoveSnapshot, RowSnapshot, TabSnapshot, WidgetSnapshot};

use super::grid::sizing;
use super::LayoutSession;

impl LayoutSession {
    pub fn snapshot(&self) -> LayoutSnapshot {
        let options = &self.options;

        let tabs = self
            .tabs
            .iter()
            .enumerate()
            .map(|(idx, tab)| {
                let grid = &tab.grid_config;
                let heights = self.row_heights(idx);

                let rows = heights
                    .iter()
                    .enumerate()
                    .map(|(row, &height)| RowSnapshot {
                        top: sizing::top_offset(&heights, row, options),
                        height,
                        columns: (0..grid.columns_in_row(row, options))
                            .map(|col| grid.column_width(row, col, options))
                            .collect(),
                    })
                    .collect();

                let mut widgets: Vec<_> = self
                    .widgets_in_tab(idx)
                    .into_iter()
                    .map(WidgetSnapshot::from)
                    .collect();
                widgets.sort_by_key(|w| w.id);

                TabSnapshot {
                    name: tab.name.clone(),
                    rows,
                    widgets,
                }
            })
            .collect();

        LayoutSnapshot {
            mode: self.mode,
            selected_tab: self.selected_tab,
            dirty: self.dirty,
            tabs,
            interactive_move: self.interactive_move.as_ref().map(|state| {
                let data = state.data();
                MoveSnapshot {
                    widget: data.widget_id,
                    candidate: state.moving().map(|data| data.candidate),
                }
            }),
        }
    }
}
