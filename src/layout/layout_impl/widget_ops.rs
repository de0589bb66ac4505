//! Widget lifecycle, settings edits and layer sequencing.

use serde_json::{Map, Value};
use tracing::debug;

use crate::layout::occupancy;
use crate::layout::types::{CellRect, WidgetId};
use crate::layout::widget::Widget;
use crate::layout::{layers, LayoutSession};
use crate::screen::PlaceableSource;
use crate::utils::Point;

impl LayoutSession {
    /// Places a new widget bound to `source` at cell `(x, y)` of the selected tab.
    ///
    /// The widget goes on top of everything covering the cell. Returns `None` if the cell is not
    /// part of the grid.
    pub fn add_widget(&mut self, source: &PlaceableSource, x: usize, y: usize) -> Option<WidgetId> {
        let tab = self.selected_tab;
        if !self.tabs[tab].grid_config.has_cell(x, y) {
            debug!(x, y, "ignoring drop outside the grid");
            return None;
        }

        self.cancel_interactive_move_for_edit();
        let id = self.next_widget_id();
        let layer = occupancy::next_layer(&self.widgets, tab, x, y, None);
        self.widgets.push(Widget {
            id,
            kind: source.kind,
            source_id: source.id.clone(),
            label: source.display_name.clone(),
            position: CellRect::cell(x, y),
            layer,
            tab_index: Some(tab),
            config: Map::new(),
        });

        debug!(widget = %id, source = %source.id, x, y, layer = layer.0, "added widget");
        self.dirty = true;
        Some(id)
    }

    /// Places a new widget at the cell under a canvas-relative pointer position.
    pub fn add_widget_at(
        &mut self,
        source: &PlaceableSource,
        pointer: Point,
        canvas_width: f64,
    ) -> Option<WidgetId> {
        let (x, y) = self.cell_at(pointer, canvas_width)?;
        self.add_widget(source, x, y)
    }

    /// Removes a widget. Unknown ids are ignored.
    pub fn delete_widget(&mut self, id: WidgetId) -> bool {
        let Some(idx) = self.widget_idx(id) else {
            return false;
        };

        self.cancel_interactive_move_for_edit();
        self.widgets.remove(idx);
        debug!(widget = %id, "deleted widget");
        self.dirty = true;
        true
    }

    /// Changes the span of a widget.
    ///
    /// The origin cell stays put; the span is clamped to the room right of and below it.
    pub fn resize_widget(&mut self, id: WidgetId, width: usize, height: usize) -> bool {
        let Some(idx) = self.widget_idx(id) else {
            return false;
        };

        let before = self.widgets[idx].position;
        let grid = &self.tabs[self.widgets[idx].tab()].grid_config;
        let cols = grid.columns_in_row(before.y, &self.options);
        let rows = grid.row_count();

        let pos = &mut self.widgets[idx].position;
        pos.width = width.clamp(1, cols.saturating_sub(before.x).max(1));
        pos.height = height.clamp(1, rows.saturating_sub(before.y).max(1));
        self.fit_widget(idx);

        let changed = self.widgets[idx].position != before;
        if changed {
            self.cancel_interactive_move_for_edit();
            if self.widgets[idx].origin() != before.origin() {
                self.settle_layer(idx);
            }
        }
        self.dirty |= changed;
        changed
    }

    /// Moves a widget's origin to `(x, y)`, clamped to its grid.
    pub fn set_widget_position(&mut self, id: WidgetId, x: usize, y: usize) -> bool {
        let Some(idx) = self.widget_idx(id) else {
            return false;
        };

        let rect = CellRect {
            x,
            y,
            ..self.widgets[idx].position
        };
        let changed = self.place_widget(idx, rect);
        if changed {
            self.cancel_interactive_move_for_edit();
        }
        self.dirty |= changed;
        changed
    }

    pub fn set_widget_label(&mut self, id: WidgetId, label: impl Into<String>) -> bool {
        let Some(idx) = self.widget_idx(id) else {
            return false;
        };

        let label = label.into();
        if self.widgets[idx].label == label {
            return false;
        }

        self.widgets[idx].label = label;
        self.dirty = true;
        true
    }

    /// Sets a presentation setting of a widget. `Value::Null` removes the setting.
    pub fn set_widget_config(&mut self, id: WidgetId, key: &str, value: Value) -> bool {
        let Some(idx) = self.widget_idx(id) else {
            return false;
        };

        let config = &mut self.widgets[idx].config;
        let changed = if value.is_null() {
            config.remove(key).is_some()
        } else if config.get(key) == Some(&value) {
            false
        } else {
            config.insert(key.to_owned(), value);
            true
        };

        self.dirty |= changed;
        changed
    }

    /// Swaps a widget with the next-higher widget of its cell.
    pub fn move_layer_up(&mut self, id: WidgetId) -> bool {
        let changed = layers::move_layer_up(&mut self.widgets, id);
        self.dirty |= changed;
        changed
    }

    /// Swaps a widget with the next-lower widget of its cell.
    pub fn move_layer_down(&mut self, id: WidgetId) -> bool {
        let changed = layers::move_layer_down(&mut self.widgets, id);
        self.dirty |= changed;
        changed
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::layout::types::{Layer, WidgetKind};
    use crate::layout::Options;
    use crate::screen::Screen;

    fn source(id: &str) -> PlaceableSource {
        PlaceableSource {
            id: id.to_owned(),
            kind: WidgetKind::Variable,
            display_name: format!("Source {id}"),
        }
    }

    fn session() -> LayoutSession {
        LayoutSession::new(Screen::new("scr"), Options::default())
    }

    #[test]
    fn add_widget_fills_in_defaults() {
        let mut session = session();
        let id = session.add_widget(&source("pga"), 2, 0).unwrap();

        let widget = session.widget(id).unwrap();
        assert_eq!(widget.id, WidgetId(1));
        assert_eq!(widget.kind, WidgetKind::Variable);
        assert_eq!(widget.source_id, "pga");
        assert_eq!(widget.label, "Source pga");
        assert_eq!(widget.position, CellRect::cell(2, 0));
        assert_eq!(widget.layer, Layer(0));
        assert_eq!(widget.tab_index, Some(0));
        assert!(session.is_dirty());
    }

    #[test]
    fn drops_outside_the_grid_are_ignored() {
        let mut session = session();
        assert_eq!(session.add_widget(&source("a"), 4, 0), None);
        assert_eq!(session.add_widget(&source("a"), 0, 1), None);
        assert!(session.widgets().is_empty());
        assert!(!session.is_dirty());
    }

    #[test]
    fn drop_at_pointer() {
        let mut session = session();
        let src = source("a");

        let id = session
            .add_widget_at(&src, Point::new(620., 10.), 1000.)
            .unwrap();
        assert_eq!(session.widget(id).unwrap().position, CellRect::cell(2, 0));

        assert_eq!(session.add_widget_at(&src, Point::new(620., 51.), 1000.), None);
        assert_eq!(session.add_widget_at(&src, Point::new(-1., 10.), 1000.), None);
        assert_eq!(session.add_widget_at(&src, Point::new(1000., 10.), 1000.), None);
        assert_eq!(session.add_widget_at(&src, Point::new(10., 10.), 0.), None);
    }

    #[test]
    fn new_widgets_stack_above_covering_ones() {
        let mut session = session();
        let wide = session.add_widget(&source("wide"), 0, 0).unwrap();
        assert!(session.resize_widget(wide, 3, 1));

        let a = session.add_widget(&source("a"), 1, 0).unwrap();
        let b = session.add_widget(&source("b"), 1, 0).unwrap();
        assert_eq!(session.widget(a).unwrap().layer, Layer(1));
        assert_eq!(session.widget(b).unwrap().layer, Layer(2));
        assert_eq!(session.hit_test(0, 1, 0).unwrap().id, b);
    }

    #[test]
    fn ids_are_never_reused_while_present() {
        let mut session = session();
        let a = session.add_widget(&source("a"), 0, 0).unwrap();
        let b = session.add_widget(&source("b"), 1, 0).unwrap();
        assert!(session.delete_widget(a));
        let c = session.add_widget(&source("c"), 2, 0).unwrap();
        assert_ne!(c, b);
    }

    #[test]
    fn delete_unknown_widget_is_noop() {
        let mut session = session();
        assert!(!session.delete_widget(WidgetId(42)));
        assert!(!session.is_dirty());
    }

    #[test]
    fn resize_clamps_to_grid() {
        let mut session = session();
        session.add_row(0, 4);
        let id = session.add_widget(&source("a"), 2, 0).unwrap();

        assert!(session.resize_widget(id, 5, 9));
        assert_eq!(session.widget(id).unwrap().position, CellRect::new(2, 0, 2, 2));

        assert!(session.resize_widget(id, 0, 0));
        assert_eq!(session.widget(id).unwrap().position, CellRect::cell(2, 0));
        assert!(!session.resize_widget(id, 1, 1));
    }

    #[test]
    fn resize_keeps_the_origin_cell() {
        let mut session = session();
        let a = session.add_widget(&source("a"), 0, 0).unwrap();
        let b = session.add_widget(&source("b"), 2, 0).unwrap();

        assert!(session.resize_widget(b, 4, 1));
        assert_eq!(session.widget(b).unwrap().position, CellRect::new(2, 0, 2, 1));
        assert_eq!(session.widget(a).unwrap().layer, Layer(0));
        assert_eq!(session.widget(b).unwrap().layer, Layer(0));
        assert_eq!(session.cell_stack(0, 0, 0).len(), 1);
    }

    #[test]
    fn edits_drop_an_ongoing_move() {
        let mut session = session();
        let a = session.add_widget(&source("a"), 0, 0).unwrap();
        let b = session.add_widget(&source("b"), 3, 0).unwrap();
        let grab = |session: &mut LayoutSession| {
            assert!(session.interactive_move_begin(a, Point::new(10., 10.), 1000.));
            assert!(session.interactive_move_update(a, Point::new(260., 10.)));
        };

        grab(&mut session);
        assert!(session.resize_widget(a, 2, 1));
        assert_eq!(session.interactive_move_widget(), None);
        assert!(!session.interactive_move_end(a));
        assert_eq!(session.widget(a).unwrap().position, CellRect::new(0, 0, 2, 1));

        grab(&mut session);
        assert!(!session.resize_widget(a, 2, 1));
        assert_eq!(session.interactive_move_widget(), Some(a));
        session.add_widget(&source("c"), 1, 0).unwrap();
        assert_eq!(session.interactive_move_widget(), None);

        grab(&mut session);
        assert!(session.delete_widget(b));
        assert_eq!(session.interactive_move_widget(), None);

        grab(&mut session);
        assert!(session.add_row(0, 4));
        assert_eq!(session.interactive_move_widget(), None);

        grab(&mut session);
        assert!(session.add_column(0, 0));
        assert_eq!(session.interactive_move_widget(), None);

        grab(&mut session);
        assert!(session.set_column_width(0, 0, 0, 0.4));
        assert_eq!(session.interactive_move_widget(), None);
    }

    #[test]
    fn set_position_keeps_layers_unique() {
        let mut session = session();
        let a = session.add_widget(&source("a"), 0, 0).unwrap();
        let b = session.add_widget(&source("b"), 1, 0).unwrap();

        assert!(session.set_widget_position(b, 0, 0));
        assert_eq!(session.widget(a).unwrap().layer, Layer(0));
        assert_eq!(session.widget(b).unwrap().layer, Layer(1));

        assert!(session.set_widget_position(b, 7, 3));
        assert_eq!(session.widget(b).unwrap().position, CellRect::cell(3, 0));
        assert!(!session.set_widget_position(b, 3, 0));
    }

    #[test]
    fn settings_edits() {
        let mut session = session();
        let id = session.add_widget(&source("a"), 0, 0).unwrap();
        session.commit(&mut Vec::new()).unwrap();

        assert!(!session.set_widget_label(id, "Source a"));
        assert!(!session.is_dirty());
        assert!(session.set_widget_label(id, "Peak ground acceleration"));
        assert!(session.is_dirty());

        assert!(session.set_widget_config(id, "maxRows", json!(25)));
        assert!(!session.set_widget_config(id, "maxRows", json!(25)));
        assert_eq!(session.widget(id).unwrap().config["maxRows"], json!(25));
        assert!(session.set_widget_config(id, "maxRows", Value::Null));
        assert!(!session.set_widget_config(id, "maxRows", Value::Null));
        assert!(session.widget(id).unwrap().config.is_empty());

        assert!(!session.set_widget_label(WidgetId(9), "x"));
        assert!(!session.set_widget_config(WidgetId(9), "k", json!(1)));
    }

    #[test]
    fn layer_moves_mark_dirty_only_when_swapping() {
        let mut session = session();
        let a = session.add_widget(&source("a"), 0, 0).unwrap();
        let b = session.add_widget(&source("b"), 0, 0).unwrap();
        session.commit(&mut Vec::new()).unwrap();

        assert!(!session.move_layer_up(b));
        assert!(!session.is_dirty());

        assert!(session.move_layer_up(a));
        assert!(session.is_dirty());
        assert_eq!(session.widget(a).unwrap().layer, Layer(1));
        assert_eq!(session.widget(b).unwrap().layer, Layer(0));
    }
}
