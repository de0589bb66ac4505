//! Configuration for the screen canvas layout engine.
//!
//! The engine never hard-codes its geometry constants; they are read from a KDL document:
//!
//! ```kdl
//! canvas {
//!     base-row-height 50
//!     row-height-increment 50
//!     default-column-count 4
//!     default-column-width 0.25
//!     min-tab-count 2
//!     max-tab-count 10
//! }
//!
//! tab "General"
//! tab "Details"
//! ```
//!
//! Every node is optional. Missing values fall back to [`Canvas::default()`], and missing `tab`
//! nodes fall back to generated names (`Tab 1`, `Tab 2`, ...).

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use miette::{Context as _, IntoDiagnostic as _};
use tracing::debug;

mod tab;
pub mod utils;

pub use crate::tab::{TabConfig, TabName};
pub use crate::utils::FloatOrInt;

#[derive(knuffel::Decode, Debug, Default, Clone, PartialEq)]
pub struct Config {
    #[knuffel(child, default)]
    pub canvas: Canvas,
    #[knuffel(children(name = "tab"))]
    pub tabs: Vec<TabConfig>,
}

/// Geometry constants of the grid canvas.
#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    /// Height of a row without stacked widgets.
    #[knuffel(child, unwrap(argument), default = Self::default().base_row_height)]
    pub base_row_height: FloatOrInt<1, 65535>,
    /// Extra height per widget stacked in the deepest cell of a row.
    #[knuffel(child, unwrap(argument), default = Self::default().row_height_increment)]
    pub row_height_increment: FloatOrInt<0, 65535>,
    /// Column count of generated rows and of out-of-range row lookups.
    #[knuffel(child, unwrap(argument), default = Self::default().default_column_count)]
    pub default_column_count: u32,
    /// Width fraction used when a column has no usable width.
    #[knuffel(child, unwrap(argument), default = Self::default().default_column_width)]
    pub default_column_width: FloatOrInt<0, 1>,
    #[knuffel(child, unwrap(argument), default = Self::default().min_tab_count)]
    pub min_tab_count: u32,
    #[knuffel(child, unwrap(argument), default = Self::default().max_tab_count)]
    pub max_tab_count: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            base_row_height: FloatOrInt(50.),
            row_height_increment: FloatOrInt(50.),
            default_column_count: 4,
            default_column_width: FloatOrInt(0.25),
            min_tab_count: 2,
            max_tab_count: 10,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> miette::Result<Self> {
        let contents = fs::read_to_string(path)
            .into_diagnostic()
            .with_context(|| format!("error reading {path:?}"))?;

        let filename = path
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or("config.kdl");
        let config = Self::parse(filename, &contents).context("error parsing")?;
        debug!("loaded config from {path:?}");
        Ok(config)
    }

    pub fn parse(filename: &str, text: &str) -> Result<Self, knuffel::Error> {
        knuffel::parse(filename, text)
    }

    /// Returns the name of the default tab at `idx`.
    pub fn tab_name(&self, idx: usize) -> String {
        match self.tabs.get(idx) {
            Some(tab) => tab.name.0.clone(),
            None => format!("Tab {}", idx + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[track_caller]
    fn do_parse(text: &str) -> Config {
        Config::parse("test.kdl", text)
            .map_err(miette::Report::new)
            .unwrap()
    }

    #[test]
    fn empty_config_is_default() {
        assert_eq!(do_parse(""), Config::default());
    }

    #[test]
    fn parse_full() {
        let parsed = do_parse(
            r#"
            canvas {
                base-row-height 40
                row-height-increment 32.5
                default-column-count 3
                default-column-width 0.5
                min-tab-count 1
                max-tab-count 6
            }

            tab "General"
            tab "Seismic Data"
            "#,
        );

        assert_eq!(
            parsed,
            Config {
                canvas: Canvas {
                    base_row_height: FloatOrInt(40.),
                    row_height_increment: FloatOrInt(32.5),
                    default_column_count: 3,
                    default_column_width: FloatOrInt(0.5),
                    min_tab_count: 1,
                    max_tab_count: 6,
                },
                tabs: vec![
                    TabConfig {
                        name: TabName(String::from("General")),
                    },
                    TabConfig {
                        name: TabName(String::from("Seismic Data")),
                    },
                ],
            }
        );
    }

    #[test]
    fn partial_canvas_keeps_defaults() {
        let parsed = do_parse(
            r#"
            canvas {
                row-height-increment 20
            }
            "#,
        );

        assert_eq!(
            parsed.canvas,
            Canvas {
                row_height_increment: FloatOrInt(20.),
                ..Canvas::default()
            }
        );
    }

    #[test]
    fn duplicate_tab_names_are_rejected() {
        let res = Config::parse(
            "test.kdl",
            r#"
            tab "Main"
            tab "main"
            "#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn out_of_range_column_width_is_rejected() {
        let res = Config::parse(
            "test.kdl",
            r#"
            canvas {
                default-column-width 2
            }
            "#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn tab_names_fall_back_to_numbered() {
        let config = do_parse(r#"tab "General""#);
        assert_eq!(config.tab_name(0), "General");
        assert_eq!(config.tab_name(1), "Tab 2");
        assert_eq!(config.tab_name(4), "Tab 5");
    }
}
