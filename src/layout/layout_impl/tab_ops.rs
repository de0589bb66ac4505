//! Layout mode, tab count and tab selection.

use tracing::debug;

use crate::layout::types::LayoutMode;
use crate::layout::LayoutSession;

impl LayoutSession {
    /// Switches between `single` and `tabs` layout.
    ///
    /// Entering `tabs` pads the tab list with default tabs up to the minimum tab count, so a
    /// screen without tabs gets the default skeleton. Entering `single` keeps only the first
    /// tab's grid and attaches every widget to it.
    pub fn set_layout_mode(&mut self, mode: LayoutMode) -> bool {
        if self.mode == mode {
            return false;
        }

        self.cancel_interactive_move_for_edit();
        let options = self.options.clone();

        match mode {
            LayoutMode::Tabs => {
                while self.tabs.len() < options.min_tab_count {
                    let idx = self.tabs.len();
                    self.tabs.push(options.default_tab(idx));
                }
            }
            LayoutMode::Single => {
                self.tabs.truncate(1);
                self.attach_widgets_beyond(1);
                self.selected_tab = 0;
            }
        }

        debug!(?mode, tabs = self.tabs.len(), "changed layout mode");
        self.mode = mode;
        self.dirty = true;
        true
    }

    /// Changes the number of tabs in `tabs` layout.
    ///
    /// The count is clamped to the configured range. Removed tabs hand their widgets to the last
    /// remaining tab. Does nothing in `single` layout.
    pub fn resize_tab_count(&mut self, count: usize) -> bool {
        if self.mode != LayoutMode::Tabs {
            return false;
        }

        let count = self.options.clamp_tab_count(count);
        if count == self.tabs.len() {
            return false;
        }

        self.cancel_interactive_move_for_edit();
        let options = self.options.clone();

        if count < self.tabs.len() {
            self.tabs.truncate(count);
            self.attach_widgets_beyond(count);
        } else {
            while self.tabs.len() < count {
                let idx = self.tabs.len();
                self.tabs.push(options.default_tab(idx));
            }
        }

        self.selected_tab = self.selected_tab.min(count - 1);
        debug!(count, "changed tab count");
        self.dirty = true;
        true
    }

    /// Switches the tab shown on the canvas. This is view state and doesn't dirty the session.
    pub fn select_tab(&mut self, tab: usize) -> bool {
        if tab >= self.tabs.len() || tab == self.selected_tab {
            return false;
        }

        self.cancel_interactive_move_for_edit();
        self.selected_tab = tab;
        true
    }

    pub fn rename_tab(&mut self, tab: usize, name: impl Into<String>) -> bool {
        let Some(tab) = self.tabs.get_mut(tab) else {
            return false;
        };

        let name = name.into();
        if tab.name == name {
            return false;
        }

        tab.name = name;
        self.dirty = true;
        true
    }
}
