//! Core engine types: ids, configuration, RNG, errors.
//!
//! These are the building blocks shared by the grid, item and board
//! modules. Hosts configure board size and item types via `BoardConfig`.

pub mod entity;
pub mod rng;
pub mod config;
pub mod error;

pub use entity::{ItemId, Sign};
pub use rng::{BoardRng, BoardRngState, RandomSource};
pub use config::{BoardConfig, CellLayout};
pub use error::{BoardError, ConfigError, DropError, GridError, InvariantError, LocatorError};
