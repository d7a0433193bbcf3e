//! # merge-grid
//!
//! Grid state machine and drop resolution for merge puzzles.
//!
//! Items sit on a fixed rows x columns grid. A player drags an item onto a
//! cell and the engine decides whether the drop merges two similar items,
//! displaces an occupant, moves into an empty cell, or is rejected.
//!
//! ## Design Principles
//!
//! 1. **Grid is authoritative**: `GridModel` owns occupancy. Item positions
//!    are cached views updated in the same step as the grid.
//!
//! 2. **Atomic drops**: every drop resolves to exactly one outcome. Errors
//!    are detected before the first write.
//!
//! 3. **Injectable randomness**: seeding draws from a `RandomSource`, so
//!    boards are reproducible from a seed.
//!
//! Rendering, input capture and level visuals live outside this crate.
//!
//! ## Modules
//!
//! - `core`: ids, configuration, RNG, errors
//! - `grid`: occupancy grid, nearest-empty search, point-to-cell locator
//! - `items`: items and the live item set
//! - `board`: seeding, drop resolution and the owning `Board`

pub mod core;
pub mod grid;
pub mod items;
pub mod board;

// Re-export commonly used types
pub use crate::core::{
    ItemId, Sign,
    BoardConfig, CellLayout,
    BoardRng, BoardRngState, RandomSource,
    BoardError, ConfigError, DropError, GridError, InvariantError, LocatorError,
};

pub use crate::grid::{CellIndex, CellLocator, CellRect, Direction, GridModel, NearestEmptySearch, Point};

pub use crate::items::{Item, ItemSet};

pub use crate::board::{Board, BoardInitializer, DropGesture, DropOutcome, DropResolver};
