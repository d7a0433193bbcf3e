//! Grid occupancy, nearest-empty search and point-to-cell hit testing.
//!
//! ## Key Types
//!
//! - `GridModel`: owned rows x columns matrix with bounds-checked access
//! - `CellIndex`: a (row, column) position
//! - `NearestEmptySearch`: finds a cell to relocate a displaced item into
//! - `CellLocator`: maps a drop point to a cell

pub mod model;
pub mod search;
pub mod locator;

pub use model::{CellIndex, Direction, GridModel};
pub use search::NearestEmptySearch;
pub use locator::{CellLocator, CellRect, Point};
