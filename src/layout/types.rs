//! Shared types used across layout modules.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Unique id of a placed widget within a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetId(pub u64);

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of data source a widget is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Table,
    Variable,
}

/// How the screen arranges its grids.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// A single grid.
    #[default]
    Single,
    /// Several tabs, each with its own grid.
    Tabs,
}

/// Z-order of a widget among the widgets anchored at the same cell.
///
/// Higher layers paint later and win hit-testing.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Layer(pub u32);

impl Layer {
    pub const BOTTOM: Layer = Layer(0);
    /// Highest layer accepted from stored records.
    ///
    /// Leaves room above for layers handed out while editing.
    pub const MAX_STORED: Layer = Layer(u16::MAX as u32);

    /// Returns the layer directly above this one.
    pub fn above(self) -> Layer {
        Layer(self.0.saturating_add(1))
    }
}

/// Rectangular region of the grid, in cells.
///
/// `x` and `y` are the origin cell; `width` and `height` are spans and always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    #[serde(deserialize_with = "lenient_index")]
    pub x: usize,
    #[serde(deserialize_with = "lenient_index")]
    pub y: usize,
    #[serde(default = "one", deserialize_with = "lenient_span")]
    pub width: usize,
    #[serde(default = "one", deserialize_with = "lenient_span")]
    pub height: usize,
}

impl CellRect {
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Single-cell rectangle at `(x, y)`.
    pub const fn cell(x: usize, y: usize) -> Self {
        Self::new(x, y, 1, 1)
    }

    pub fn origin(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// Returns whether the cell `(x, y)` lies within this rectangle.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.x <= x && x - self.x < self.width && self.spans_row(y)
    }

    /// Returns whether the rectangle spans row `y`.
    pub fn spans_row(&self, y: usize) -> bool {
        self.y <= y && y - self.y < self.height
    }
}

/// Render geometry of a widget.
///
/// Horizontal values are fractions of the canvas width, vertical values are logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetGeometry {
    pub left: f64,
    pub width: f64,
    pub top: f64,
    pub height: f64,
    /// Position of the widget within the stack of its origin cell, bottom first.
    pub stack_index: usize,
}

fn one() -> usize {
    1
}

// Stored records may carry negative or fractional numbers; these are clamped instead of rejected.
fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = f64::deserialize(deserializer)?;
    Ok(if value.is_finite() { value.floor() } else { 0. })
}

fn lenient_index<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let value = lenient_number(deserializer)?;
    Ok(value.max(0.) as usize)
}

fn lenient_span<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let value = lenient_number(deserializer)?;
    Ok(value.max(1.) as usize)
}

pub(crate) fn lenient_layer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Layer, D::Error> {
    let value = lenient_number(deserializer)?;
    Ok(Layer(value.clamp(0., f64::from(Layer::MAX_STORED.0)) as u32))
}

pub(crate) fn lenient_tab_index<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<usize>, D::Error> {
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.map(|value| {
        if value.is_finite() {
            value.floor().max(0.) as usize
        } else {
            0
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_rect_contains_is_half_open() {
        let rect = CellRect::new(1, 2, 2, 3);
        assert!(rect.contains(1, 2));
        assert!(rect.contains(2, 4));
        assert!(!rect.contains(3, 2));
        assert!(!rect.contains(1, 5));
        assert!(!rect.contains(0, 2));
        assert!(rect.spans_row(4));
        assert!(!rect.spans_row(1));
    }

    #[test]
    fn cell_rect_deserialization_clamps() {
        let rect: CellRect =
            serde_json::from_str(r#"{"x": -2, "y": 1.7, "width": 0, "height": -3}"#).unwrap();
        assert_eq!(rect, CellRect::new(0, 1, 1, 1));

        let rect: CellRect = serde_json::from_str(r#"{"x": 3, "y": 0}"#).unwrap();
        assert_eq!(rect, CellRect::cell(3, 0));
    }

    #[test]
    fn huge_spans_dont_overflow() {
        let rect: CellRect =
            serde_json::from_str(r#"{"x": 1, "y": 2, "width": 1e20, "height": 1e20}"#).unwrap();
        assert_eq!(rect.width, usize::MAX);
        assert!(rect.contains(5, 7));
        assert!(!rect.contains(0, 7));
        assert!(rect.spans_row(usize::MAX));
        assert!(!rect.spans_row(1));
    }

    #[test]
    fn layer_above_saturates() {
        assert_eq!(Layer::BOTTOM.above(), Layer(1));
        assert_eq!(Layer(u32::MAX).above(), Layer(u32::MAX));
    }
}
