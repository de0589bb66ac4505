//! Data types for interactive moves.

use crate::layout::types::{CellRect, WidgetGeometry, WidgetId};
use crate::utils::Point;

/// State of an ongoing interactive widget move.
#[derive(Debug)]
pub(crate) enum InteractiveMoveState {
    /// The pointer went down over the widget but hasn't moved yet.
    ///
    /// Releasing in this state is a click and changes nothing.
    Starting(InteractiveMoveData),
    /// The pointer moved at least once; the candidate follows it.
    Moving(InteractiveMoveData),
}

/// Data for a widget that is being interactively moved.
#[derive(Debug)]
pub(crate) struct InteractiveMoveData {
    /// The widget we're moving.
    pub(crate) widget_id: WidgetId,
    /// Tab the move happens on.
    pub(crate) tab: usize,
    /// Pointer location relative to the widget's top-left corner at the start of the move.
    ///
    /// Keeps the widget from jumping under the pointer.
    pub(crate) pointer_offset: Point,
    /// Canvas width the pointer coordinates refer to.
    pub(crate) canvas_width: f64,
    /// Row heights of the tab, computed once when the move starts.
    ///
    /// The widget list doesn't change while the pointer moves, so pointer-move resolution only
    /// walks this list.
    pub(crate) row_heights: Vec<f64>,
    /// Position of the widget when the move started.
    pub(crate) original: CellRect,
    /// Position the widget would take if released now.
    pub(crate) candidate: CellRect,
}

/// Live preview of an interactive move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveGhost {
    pub widget_id: WidgetId,
    pub original: CellRect,
    pub candidate: CellRect,
    /// Render geometry of the candidate position.
    pub geometry: WidgetGeometry,
}

impl InteractiveMoveState {
    pub(crate) fn data(&self) -> &InteractiveMoveData {
        match self {
            InteractiveMoveState::Starting(data) | InteractiveMoveState::Moving(data) => data,
        }
    }

    pub(crate) fn into_data(self) -> InteractiveMoveData {
        match self {
            InteractiveMoveState::Starting(data) | InteractiveMoveState::Moving(data) => data,
        }
    }

    /// Returns the move data if the pointer has moved.
    pub(crate) fn moving(&self) -> Option<&InteractiveMoveData> {
        match self {
            InteractiveMoveState::Moving(data) => Some(data),
            _ => None,
        }
    }
}
