//! Error types for the board engine.
//!
//! Dropping an item outside every cell is *not* an error: it resolves to
//! `DropOutcome::Cancelled`. The errors here signal caller bugs or
//! corrupt state and never leave the board half-mutated.

use thiserror::Error;

use super::entity::ItemId;
use crate::grid::CellIndex;

/// Grid accessor errors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({row}, {column}) is outside the {rows}x{columns} grid")]
    OutOfRange {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    #[error("{rows}x{columns} grid needs {expected} cells, got {actual}")]
    CellCount {
        rows: usize,
        columns: usize,
        expected: usize,
        actual: usize,
    },

    #[error("{count} cells exceed the item id space")]
    TooManyCells { count: usize },
}

/// Invalid `BoardConfig` values.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    ZeroDimension { field: &'static str },

    #[error("{rows}x{columns} cells exceed the item id space")]
    TooManyCells { rows: usize, columns: usize },

    #[error("at least 2 signs are required (got {count})")]
    TooFewSigns { count: u16 },

    #[error("level_visuals must be greater than zero")]
    NoLevelVisuals,

    #[error("{field} must be positive and finite (got {value})")]
    InvalidCellSize { field: &'static str, value: f32 },

    #[error("gap must be non-negative and finite (got {value})")]
    InvalidGap { value: f32 },
}

/// Errors building a `CellLocator` from explicit rectangles.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LocatorError {
    #[error("expected {expected} cell rectangles, got {actual}")]
    RectCount { expected: usize, actual: usize },

    #[error("locator covers {rows}x{columns} cells, grid is {expected_rows}x{expected_columns}")]
    Dimensions {
        rows: usize,
        columns: usize,
        expected_rows: usize,
        expected_columns: usize,
    },
}

/// Errors building a board.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum BoardError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Locator(#[from] LocatorError),

    #[error(transparent)]
    Invariant(#[from] InvariantError),

    #[error("grid is {rows}x{columns}, config expects {expected_rows}x{expected_columns}")]
    GridShape {
        rows: usize,
        columns: usize,
        expected_rows: usize,
        expected_columns: usize,
    },

    #[error("{item} is at level {level}, above the cap of {max_level}")]
    LevelAboveCap {
        item: ItemId,
        level: u32,
        max_level: u32,
    },

    #[error("layout has {actual} rows, config expects {expected}")]
    RowCount { expected: usize, actual: usize },

    #[error("layout row {row} has {actual} columns, config expects {expected}")]
    ColumnCount {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("sign {sign} at ({row}, {column}) exceeds sign_count {sign_count}")]
    UnknownSign {
        row: usize,
        column: usize,
        sign: u16,
        sign_count: u16,
    },
}

/// Errors resolving a drop.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DropError {
    #[error("{0} is not on the board")]
    UnknownItem(ItemId),

    #[error("cell {0} is occupied but no item claims it")]
    Unclaimed(CellIndex),

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Broken grid/item-set consistency, reported by `Board::check_invariants`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("{occupied} occupied cells but {items} live items")]
    CountMismatch { occupied: usize, items: usize },

    #[error("{item} claims cell {cell} which holds {found:?}")]
    ItemCellMismatch {
        item: ItemId,
        cell: CellIndex,
        found: Option<u16>,
    },

    #[error("cell {cell} is claimed by both {first} and {second}")]
    DuplicateClaim {
        cell: CellIndex,
        first: ItemId,
        second: ItemId,
    },

    #[error("{item} is stored under {key}")]
    MisfiledItem { key: ItemId, item: ItemId },

    #[error(transparent)]
    Grid(#[from] GridError),
}
