use std::fmt;

use crate::layout::types::{CellRect, Layer, LayoutMode, WidgetId};
use crate::layout::widget::Widget;

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSnapshot {
    pub mode: LayoutMode,
    pub selected_tab: usize,
    pub dirty: bool,
    pub tabs: Vec<TabSnapshot>,
    pub interactive_move: Option<MoveSnapshot>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabSnapshot {
    pub name: String,
    pub rows: Vec<RowSnapshot>,
    /// Sorted by id.
    pub widgets: Vec<WidgetSnapshot>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowSnapshot {
    /// Distance from the top of the canvas.
    pub top: f64,
    pub height: f64,
    /// Effective width fraction of every column.
    pub columns: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetSnapshot {
    pub id: WidgetId,
    pub source: String,
    pub rect: CellRect,
    pub layer: Layer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoveSnapshot {
    pub widget: WidgetId,
    /// `None` until the pointer moves.
    pub candidate: Option<CellRect>,
}

impl From<&Widget> for WidgetSnapshot {
    fn from(widget: &Widget) -> Self {
        Self {
            id: widget.id,
            source: widget.source_id.clone(),
            rect: widget.position,
            layer: widget.layer,
        }
    }
}

fn fmt_rect(f: &mut fmt::Formatter<'_>, rect: &CellRect) -> fmt::Result {
    write!(f, "({}, {}) {}x{}", rect.x, rect.y, rect.width, rect.height)
}

impl fmt::Display for LayoutSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.mode {
            LayoutMode::Single => "single",
            LayoutMode::Tabs => "tabs",
        };
        write!(f, "{mode}, selected tab {}", self.selected_tab)?;
        if self.dirty {
            write!(f, ", dirty")?;
        }

        if let Some(ongoing) = &self.interactive_move {
            write!(f, "\nmoving {}", ongoing.widget)?;
            if let Some(candidate) = &ongoing.candidate {
                write!(f, " to ")?;
                fmt_rect(f, candidate)?;
            }
        }

        for (idx, tab) in self.tabs.iter().enumerate() {
            write!(f, "\ntab {idx} {:?}", tab.name)?;
            for (row, snap) in tab.rows.iter().enumerate() {
                write!(
                    f,
                    "\n  row {row}: top {}, height {}, columns {:?}",
                    snap.top, snap.height, snap.columns
                )?;
            }
            for widget in &tab.widgets {
                write!(f, "\n  {} {} ", widget.id, widget.source)?;
                fmt_rect(f, &widget.rect)?;
                write!(f, " layer {}", widget.layer.0)?;
            }
        }

        Ok(())
    }
}
