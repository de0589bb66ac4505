//! Screen canvas layout.
//!
//! A screen arranges widgets on a grid. In `single` layout there is one grid; in `tabs` layout
//! every tab carries its own grid. A grid is a list of rows, and every row has its own number of
//! columns with fractional widths, so two rows rarely line up.
//!
//! Widgets occupy a rectangle of cells starting at their *origin cell*. Several widgets may share
//! an origin cell: they are stacked inside it and told apart by their [`Layer`](types::Layer),
//! which is unique per origin cell. Rows are not uniformly tall. Each row grows with the deepest
//! stack found in any of its cells (see [`grid::sizing`]), which keeps dense cells readable without
//! inflating sparse rows.
//!
//! The [`LayoutSession`] owns the working copy of a screen while it is edited. Every mutation goes
//! through it so that the dirty flag stays truthful, and nothing is persisted until
//! [`LayoutSession::commit`] hands the result to the host's [`ScreenStore`].
//!
//! Interactive moves follow a small state machine: a pointer-down over a widget starts a move, the
//! pointer motion resolves a candidate cell that is only shown as a ghost, and the release commits
//! the candidate. A move can also be cancelled, which leaves the layout untouched.

use std::rc::Rc;

use screen_canvas_config::Config;
use tracing::warn;

use self::layout_impl::types::InteractiveMoveState;
use self::widget::Widget;
use crate::screen::{Screen, ScreenStore, Tab};

pub mod grid;
pub mod layers;
pub mod occupancy;
pub mod types;
pub mod widget;

mod layout_impl;
pub use layout_impl::types::MoveGhost;

#[cfg(test)]
pub mod snapshot;


/// Geometry constants and defaults of the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Height of a row without stacked widgets.
    pub base_row_height: f64,
    /// Extra height per additional widget in a row's deepest stack.
    pub row_height_increment: f64,
    /// Column count of new rows and of lookups past the last row.
    pub default_column_count: usize,
    /// Width used for columns without a usable width.
    pub default_column_width: f64,
    pub min_tab_count: usize,
    pub max_tab_count: usize,
    /// Names of the default tabs, in order.
    pub tab_names: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Options {
    pub fn from_config(config: &Config) -> Self {
        let canvas = &config.canvas;

        let default_column_count = canvas.default_column_count.max(1) as usize;
        let min_tab_count = canvas.min_tab_count.max(1) as usize;
        let mut max_tab_count = canvas.max_tab_count as usize;
        if max_tab_count < min_tab_count {
            warn!(
                "max-tab-count {max_tab_count} is below min-tab-count {min_tab_count}, \
                 using {min_tab_count}"
            );
            max_tab_count = min_tab_count;
        }

        let default_column_width = if canvas.default_column_width.0 > 0. {
            canvas.default_column_width.0
        } else {
            1. / default_column_count as f64
        };

        Self {
            base_row_height: canvas.base_row_height.0,
            row_height_increment: canvas.row_height_increment.0,
            default_column_count,
            default_column_width,
            min_tab_count,
            max_tab_count,
            tab_names: (0..max_tab_count).map(|idx| config.tab_name(idx)).collect(),
        }
    }

    /// Name of the default tab at `idx`.
    pub fn tab_name(&self, idx: usize) -> String {
        match self.tab_names.get(idx) {
            Some(name) => name.clone(),
            None => format!("Tab {}", idx + 1),
        }
    }

    /// Default tab at `idx` with a single default row.
    pub fn default_tab(&self, idx: usize) -> Tab {
        Tab {
            name: self.tab_name(idx),
            grid_config: grid::GridConfig::new_default(self),
        }
    }

    pub fn clamp_tab_count(&self, count: usize) -> usize {
        count.clamp(self.min_tab_count, self.max_tab_count)
    }
}

/// Working copy of a screen's layout while it is being edited.
#[derive(Debug)]
pub struct LayoutSession {
    /// Last committed (or initially loaded) screen.
    saved: Screen,
    mode: types::LayoutMode,
    /// Never empty. Exactly one tab in `single` mode.
    tabs: Vec<Tab>,
    widgets: Vec<Widget>,
    selected_tab: usize,
    /// Whether the working copy differs from `saved`.
    dirty: bool,
    interactive_move: Option<InteractiveMoveState>,
    options: Rc<Options>,
}

impl LayoutSession {
    pub fn new(screen: Screen, options: Options) -> Self {
        Self::with_options(screen, Rc::new(options))
    }

    pub fn with_options(screen: Screen, options: Rc<Options>) -> Self {
        let mut session = Self {
            mode: screen.layout,
            tabs: screen.tabs.clone(),
            widgets: screen.components.clone(),
            saved: screen,
            selected_tab: 0,
            dirty: false,
            interactive_move: None,
            options,
        };

        session.normalize();
        session.saved = session.to_screen();
        session
    }

    pub fn options(&self) -> &Rc<Options> {
        &self.options
    }

    /// Hands the working copy to `store` and marks the session clean.
    ///
    /// Returns `Ok(false)` without touching the store when there is nothing to save. On error the
    /// session stays dirty.
    pub fn commit<S: ScreenStore + ?Sized>(&mut self, store: &mut S) -> anyhow::Result<bool> {
        if !self.dirty {
            return Ok(false);
        }

        let screen = self.to_screen();
        store.save_screen(&screen)?;

        tracing::debug!(
            screen = %screen.id,
            widgets = screen.components.len(),
            tabs = screen.tabs.len(),
            "committed layout"
        );
        self.saved = screen;
        self.dirty = false;
        Ok(true)
    }

    /// Throws away every change since the last commit.
    pub fn discard(&mut self) {
        self.interactive_move = None;
        let saved = self.saved.clone();
        self.mode = saved.layout;
        self.tabs = saved.tabs;
        self.widgets = saved.components;
        self.selected_tab = self.selected_tab.min(self.tabs.len().saturating_sub(1));
        self.dirty = false;
    }

    /// The working copy in the shape the host persists.
    pub fn to_screen(&self) -> Screen {
        Screen {
            id: self.saved.id.clone(),
            layout: self.mode,
            tabs: self.tabs.clone(),
            components: self.widgets.clone(),
            extra: self.saved.extra.clone(),
        }
    }
}
