use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::types::{lenient_layer, lenient_tab_index, CellRect, Layer, WidgetId, WidgetKind};

/// A placed reference to a data table or variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    pub id: WidgetId,
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    /// Id of the bound table or variable.
    pub source_id: String,
    #[serde(default)]
    pub label: String,
    pub position: CellRect,
    #[serde(default, deserialize_with = "lenient_layer")]
    pub layer: Layer,
    /// Owning tab. Records created before tabs existed carry none and belong to the first tab.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_tab_index"
    )]
    pub tab_index: Option<usize>,
    /// Presentation settings such as `maxRows`. Opaque to the engine.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub config: Map<String, Value>,
}

impl Widget {
    /// Index of the tab this widget belongs to.
    pub fn tab(&self) -> usize {
        self.tab_index.unwrap_or(0)
    }

    pub fn origin(&self) -> (usize, usize) {
        self.position.origin()
    }

    pub fn covers(&self, x: usize, y: usize) -> bool {
        self.position.contains(x, y)
    }

    pub fn is_anchored_at(&self, x: usize, y: usize) -> bool {
        self.origin() == (x, y)
    }
}
