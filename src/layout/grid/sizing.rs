//! Row heights derived from occupancy.
//!
//! Widgets anchored at the same cell stack vertically inside it, so a row grows with the deepest
//! stack of any cell it contains. A row with no stacking (or no widgets) keeps the base height;
//! stacks in one cell never inflate unrelated rows.

use std::collections::HashMap;

use super::GridConfig;
use crate::layout::widget::Widget;
use crate::layout::Options;

fn height_for_depth(depth: usize, options: &Options) -> f64 {
    options.base_row_height + depth.saturating_sub(1) as f64 * options.row_height_increment
}

/// Height of a single row of `tab`.
pub fn row_height(widgets: &[Widget], tab: usize, row: usize, options: &Options) -> f64 {
    let mut stacks: HashMap<(usize, usize), usize> = HashMap::new();
    for widget in widgets
        .iter()
        .filter(|w| w.tab() == tab && w.position.spans_row(row))
    {
        *stacks.entry(widget.origin()).or_default() += 1;
    }

    let depth = stacks.values().copied().max().unwrap_or(0);
    height_for_depth(depth, options)
}

/// Heights of all rows of `tab` in one pass over the widgets.
pub fn row_heights(
    grid: &GridConfig,
    widgets: &[Widget],
    tab: usize,
    options: &Options,
) -> Vec<f64> {
    let row_count = grid.row_count();

    // (row, origin) -> stack depth
    let mut stacks: HashMap<(usize, (usize, usize)), usize> = HashMap::new();
    for widget in widgets.iter().filter(|w| w.tab() == tab) {
        let pos = widget.position;
        for row in pos.y..pos.y.saturating_add(pos.height).min(row_count) {
            *stacks.entry((row, widget.origin())).or_default() += 1;
        }
    }

    let mut depths = vec![0; row_count];
    for ((row, _), depth) in stacks {
        depths[row] = depths[row].max(depth);
    }

    depths
        .into_iter()
        .map(|depth| height_for_depth(depth, options))
        .collect()
}

/// Distance from the top of the canvas to the top of `row`.
pub fn row_top_offset(
    grid: &GridConfig,
    widgets: &[Widget],
    tab: usize,
    row: usize,
    options: &Options,
) -> f64 {
    let heights = row_heights(grid, widgets, tab, options);
    top_offset(&heights, row, options)
}

/// Running sum of `heights` above `row`.
///
/// Rows past the end count with the base height.
pub fn top_offset(heights: &[f64], row: usize, options: &Options) -> f64 {
    let known: f64 = heights.iter().take(row).sum();
    let missing = row.saturating_sub(heights.len());
    known + missing as f64 * options.base_row_height
}

/// Sum of `heights` for `span` rows starting at `row`.
pub fn span_height(heights: &[f64], row: usize, span: usize, options: &Options) -> f64 {
    (row..row + span.max(1))
        .map(|r| heights.get(r).copied().unwrap_or(options.base_row_height))
        .sum()
}

/// Total height of the canvas.
pub fn canvas_height(heights: &[f64]) -> f64 {
    heights.iter().sum()
}

/// Index of the row whose band contains `y`, clamped to the existing rows.
pub fn row_at_y(heights: &[f64], y: f64) -> usize {
    let last = heights.len().saturating_sub(1);
    if y < 0. {
        return 0;
    }

    let mut bottom = 0.;
    for (idx, height) in heights.iter().enumerate() {
        bottom += height;
        if y < bottom {
            return idx;
        }
    }

    last
}
