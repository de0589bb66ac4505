//! Which widgets occupy which cells.
//!
//! A widget covers every cell of its rectangle but is anchored (and rendered as a stack item) only
//! at its origin cell. Widgets anchored at the same cell form a [`CellStack`], ordered by layer.

use super::types::{Layer, WidgetId};
use super::widget::Widget;

/// Widgets belonging to `tab`. Widgets without a tab index belong to tab 0.
pub fn widgets_in_tab(widgets: &[Widget], tab: usize) -> Vec<&Widget> {
    widgets.iter().filter(|w| w.tab() == tab).collect()
}

/// Widgets whose rectangle covers `(x, y)`, lowest layer first.
///
/// The last widget is the frontmost one for hit-testing.
pub fn widgets_covering_cell<'a>(
    widgets: impl IntoIterator<Item = &'a Widget>,
    x: usize,
    y: usize,
) -> Vec<&'a Widget> {
    let mut covering: Vec<_> = widgets.into_iter().filter(|w| w.covers(x, y)).collect();
    covering.sort_by_key(|w| w.layer);
    covering
}

/// Widgets anchored at `(x, y)`, lowest layer first.
pub fn origin_widgets_at_cell<'a>(
    widgets: impl IntoIterator<Item = &'a Widget>,
    x: usize,
    y: usize,
) -> Vec<&'a Widget> {
    let mut anchored: Vec<_> = widgets
        .into_iter()
        .filter(|w| w.is_anchored_at(x, y))
        .collect();
    anchored.sort_by_key(|w| w.layer);
    anchored
}

/// Frontmost widget of `tab` covering `(x, y)`.
pub fn hit_test(widgets: &[Widget], tab: usize, x: usize, y: usize) -> Option<&Widget> {
    widgets_covering_cell(widgets.iter().filter(|w| w.tab() == tab), x, y)
        .last()
        .copied()
}

/// Layer for a widget arriving at `(x, y)` of `tab`: above everything covering the cell.
///
/// `except` is left out, so a widget moving within the grid doesn't count itself.
pub fn next_layer(
    widgets: &[Widget],
    tab: usize,
    x: usize,
    y: usize,
    except: Option<WidgetId>,
) -> Layer {
    widgets
        .iter()
        .filter(|w| w.tab() == tab && Some(w.id) != except && w.covers(x, y))
        .map(|w| w.layer)
        .max()
        .map_or(Layer::BOTTOM, Layer::above)
}

/// Ordered stack of the widgets anchored at one cell.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CellStack {
    /// Ascending by layer.
    entries: Vec<(Layer, WidgetId)>,
}

impl CellStack {
    pub fn at(widgets: &[Widget], tab: usize, x: usize, y: usize) -> Self {
        let entries = origin_widgets_at_cell(widgets.iter().filter(|w| w.tab() == tab), x, y)
            .into_iter()
            .map(|w| (w.layer, w.id))
            .collect();
        Self { entries }
    }

    /// Stack of the cell `widget` is anchored at.
    pub fn of(widgets: &[Widget], widget: &Widget) -> Self {
        let (x, y) = widget.origin();
        Self::at(widgets, widget.tab(), x, y)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Layer, WidgetId)> + '_ {
        self.entries.iter().copied()
    }

    /// Position of `id` in the stack, bottom first.
    pub fn index_of(&self, id: WidgetId) -> Option<usize> {
        self.entries.iter().position(|(_, w)| *w == id)
    }

    pub fn top(&self) -> Option<(Layer, WidgetId)> {
        self.entries.last().copied()
    }

    /// The entry directly above `id`.
    pub fn above(&self, id: WidgetId) -> Option<(Layer, WidgetId)> {
        let idx = self.index_of(id)?;
        self.entries.get(idx + 1).copied()
    }

    /// The entry directly below `id`.
    pub fn below(&self, id: WidgetId) -> Option<(Layer, WidgetId)> {
        let idx = self.index_of(id)?;
        idx.checked_sub(1).map(|idx| self.entries[idx])
    }

    /// Returns whether no two entries share a layer.
    pub fn has_unique_layers(&self) -> bool {
        self.entries.windows(2).all(|pair| pair[0].0 != pair[1].0)
    }
}
