//! The screen record exchanged with the host application.
//!
//! The host owns persistence. It hands a [`Screen`] to the layout session when editing starts and
//! receives the edited record back through [`ScreenStore`] on commit. Fields the engine doesn't
//! know about are carried through untouched.

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::layout::grid::GridConfig;
use crate::layout::types::{LayoutMode, WidgetKind};
use crate::layout::widget::Widget;

/// A configurable page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub id: String,
    #[serde(default)]
    pub layout: LayoutMode,
    #[serde(default)]
    pub tabs: Vec<Tab>,
    #[serde(default)]
    pub components: Vec<Widget>,
    /// Attributes owned by the host, such as the display name.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub grid_config: GridConfig,
}

/// A table or variable that can be dropped onto the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceableSource {
    pub id: String,
    pub kind: WidgetKind,
    pub display_name: String,
}

/// Persistence collaborator receiving committed screens.
pub trait ScreenStore {
    fn save_screen(&mut self, screen: &Screen) -> anyhow::Result<()>;
}

impl ScreenStore for Vec<Screen> {
    fn save_screen(&mut self, screen: &Screen) -> anyhow::Result<()> {
        self.push(screen.clone());
        Ok(())
    }
}

impl Screen {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            layout: LayoutMode::Single,
            tabs: Vec::new(),
            components: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("error decoding screen record")
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string(self)
            .with_context(|| format!("error encoding screen record {}", self.id))
    }
}
