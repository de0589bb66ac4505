//! Layer sequencing within a cell.
//!
//! Moving a widget up or down swaps its layer with the neighbor in its [`CellStack`]; layers are
//! never renumbered, so the per-cell uniqueness is preserved by construction.

use super::occupancy::CellStack;
use super::types::{Layer, WidgetId};
use super::widget::Widget;

/// Swaps the layer of `id` with the next-higher widget anchored at the same cell.
///
/// Returns `false` if the widget doesn't exist or is already on top.
pub fn move_layer_up(widgets: &mut [Widget], id: WidgetId) -> bool {
    swap_with_neighbor(widgets, id, CellStack::above)
}

/// Swaps the layer of `id` with the next-lower widget anchored at the same cell.
///
/// Returns `false` if the widget doesn't exist or is already at the bottom.
pub fn move_layer_down(widgets: &mut [Widget], id: WidgetId) -> bool {
    swap_with_neighbor(widgets, id, CellStack::below)
}

fn swap_with_neighbor(
    widgets: &mut [Widget],
    id: WidgetId,
    neighbor: impl Fn(&CellStack, WidgetId) -> Option<(Layer, WidgetId)>,
) -> bool {
    let Some(idx) = widgets.iter().position(|w| w.id == id) else {
        return false;
    };

    let stack = CellStack::of(widgets, &widgets[idx]);
    let Some((other_layer, other_id)) = neighbor(&stack, id) else {
        return false;
    };
    let Some(other_idx) = widgets.iter().position(|w| w.id == other_id) else {
        return false;
    };

    widgets[other_idx].layer = widgets[idx].layer;
    widgets[idx].layer = other_layer;
    true
}
