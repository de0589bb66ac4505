//! Grid configuration and geometry resolution.
//!
//! A grid is an ordered list of rows, each an ordered list of columns with a fractional width.
//! Widths are not required to sum to 1. Lookups never fail: out-of-range rows resolve to a
//! default row and unusable widths resolve to the default width, so that half-edited grids keep
//! rendering.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::Options;
use crate::utils::sanitize_fraction;

pub mod sizing;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default)]
    pub rows: Vec<GridRow>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRow {
    #[serde(default)]
    pub columns: Vec<GridColumn>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridColumn {
    /// Fraction of the canvas width. `None` when the stored value was missing or not a number.
    #[serde(
        default,
        deserialize_with = "lenient_width",
        skip_serializing_if = "Option::is_none"
    )]
    pub width: Option<f64>,
}

impl GridColumn {
    pub fn new(width: f64) -> Self {
        Self { width: Some(width) }
    }
}

impl GridRow {
    /// Row of `count` equal-width columns.
    pub fn uniform(count: usize) -> Self {
        let count = count.max(1);
        let width = 1. / count as f64;
        Self {
            columns: vec![GridColumn::new(width); count],
        }
    }
}

impl GridConfig {
    /// Single row with the default column count.
    pub fn new_default(options: &Options) -> Self {
        Self {
            rows: vec![GridRow::uniform(options.default_column_count)],
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether `(x, y)` is a defined cell of this grid.
    pub fn has_cell(&self, x: usize, y: usize) -> bool {
        self.rows.get(y).is_some_and(|row| x < row.columns.len())
    }

    /// Column count of `row`, or the default count when the row doesn't exist.
    pub fn columns_in_row(&self, row: usize, options: &Options) -> usize {
        match self.rows.get(row) {
            Some(row) if !row.columns.is_empty() => row.columns.len(),
            _ => options.default_column_count,
        }
    }

    /// Configured width of a column, or the default width when absent or unusable.
    pub fn column_width(&self, row: usize, col: usize, options: &Options) -> f64 {
        self.rows
            .get(row)
            .and_then(|row| row.columns.get(col))
            .and_then(|col| col.width)
            .and_then(sanitize_fraction)
            .unwrap_or(options.default_column_width)
    }

    /// Sum of the widths of all columns strictly left of `col`.
    pub fn column_left_offset(&self, row: usize, col: usize, options: &Options) -> f64 {
        (0..col).map(|c| self.column_width(row, c, options)).sum()
    }

    /// Width of `span` columns starting at `col`.
    pub fn span_width(&self, row: usize, col: usize, span: usize, options: &Options) -> f64 {
        (col..col + span.max(1))
            .map(|c| self.column_width(row, c, options))
            .sum()
    }

    /// Restores the structural invariants: at least one row, at least one column per row.
    ///
    /// Returns `true` if anything was changed.
    pub fn repair(&mut self, options: &Options) -> bool {
        let mut changed = false;

        if self.rows.is_empty() {
            self.rows.push(GridRow::uniform(options.default_column_count));
            changed = true;
        }

        for row in &mut self.rows {
            if row.columns.is_empty() {
                *row = GridRow::uniform(options.default_column_count);
                changed = true;
            }
        }

        changed
    }
}

fn lenient_width<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}
