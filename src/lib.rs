//! Grid canvas layout engine for configurable data-entry screens.
//!
//! The engine places widgets bound to data tables or variables onto a per-tab grid, resolves
//! overlapping placements into stacked layers, sizes rows from their occupancy, and turns pointer
//! drags into grid cells. Persistence and presentation stay with the host application: it hands a
//! [`Screen`] to a [`LayoutSession`] and receives the edited [`Screen`] back through a
//! [`ScreenStore`] on commit.

pub mod layout;
pub mod screen;
pub mod utils;

pub use layout::{LayoutSession, Options};
pub use screen::{PlaceableSource, Screen, ScreenStore};
