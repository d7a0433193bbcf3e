//! The occupancy grid.
//!
//! `GridModel` is the single source of truth for which sign sits where.
//! Item positions elsewhere are cached views and must be kept in step
//! with it by every mutation path.
//!
//! ```
//! use merge_grid::core::Sign;
//! use merge_grid::grid::{CellIndex, GridModel};
//!
//! let mut grid = GridModel::new(3, 2);
//! let cell = CellIndex::new(2, 1);
//!
//! grid.set(cell, Sign::PRIMARY).unwrap();
//! assert_eq!(grid.get(cell).unwrap(), Some(Sign::PRIMARY));
//! assert!(grid.get(CellIndex::new(3, 0)).is_err());
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{GridError, Sign};

/// A (row, column) position on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellIndex {
    pub row: usize,
    pub column: usize,
}

impl CellIndex {
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Convert a row-major flat index.
    ///
    /// # Panics
    ///
    /// Panics if `columns` is zero.
    #[must_use]
    pub const fn from_flat(index: usize, columns: usize) -> Self {
        assert!(columns > 0, "from_flat needs at least one column");
        Self {
            row: index / columns,
            column: index % columns,
        }
    }

    /// Row-major flat index.
    #[must_use]
    pub const fn flat(self, columns: usize) -> usize {
        self.row * columns + self.column
    }
}

impl std::fmt::Display for CellIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Neighbour directions. Rows grow southwards, columns eastwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    North,
    NorthEast,
}

impl Direction {
    /// Fixed enumeration order used by the nearest-empty search.
    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
    ];

    /// `(row delta, column delta)`.
    #[must_use]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::East => (0, 1),
            Direction::SouthEast => (1, 1),
            Direction::South => (1, 0),
            Direction::SouthWest => (1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (-1, -1),
            Direction::North => (-1, 0),
            Direction::NorthEast => (-1, 1),
        }
    }
}

/// Fixed-size matrix of cell occupancy. `None` is an empty cell.
///
/// Deserializing checks that `cells` holds exactly `rows * columns` entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridModelRaw")]
pub struct GridModel {
    rows: usize,
    columns: usize,
    cells: Vec<Option<Sign>>,
}

/// Unchecked wire form of `GridModel`.
#[derive(Deserialize)]
struct GridModelRaw {
    rows: usize,
    columns: usize,
    cells: Vec<Option<Sign>>,
}

impl TryFrom<GridModelRaw> for GridModel {
    type Error = GridError;

    fn try_from(raw: GridModelRaw) -> Result<Self, Self::Error> {
        let GridModelRaw { rows, columns, cells } = raw;
        let expected = rows.checked_mul(columns);
        if expected != Some(cells.len()) {
            return Err(GridError::CellCount {
                rows,
                columns,
                expected: expected.unwrap_or(usize::MAX),
                actual: cells.len(),
            });
        }
        Ok(Self { rows, columns, cells })
    }
}

impl GridModel {
    /// Create an empty `rows` x `columns` grid.
    #[must_use]
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![None; rows * columns],
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Pure bounds check on signed coordinates.
    #[must_use]
    pub fn in_range(&self, row: isize, column: isize) -> bool {
        row >= 0 && column >= 0 && (row as usize) < self.rows && (column as usize) < self.columns
    }

    /// Bounds check for an unsigned cell index.
    #[must_use]
    pub fn contains(&self, cell: CellIndex) -> bool {
        cell.row < self.rows && cell.column < self.columns
    }

    fn slot(&self, cell: CellIndex) -> Result<usize, GridError> {
        if self.contains(cell) {
            Ok(cell.flat(self.columns))
        } else {
            Err(GridError::OutOfRange {
                row: cell.row,
                column: cell.column,
                rows: self.rows,
                columns: self.columns,
            })
        }
    }

    /// Sign at `cell`, or `None` if empty.
    pub fn get(&self, cell: CellIndex) -> Result<Option<Sign>, GridError> {
        let slot = self.slot(cell)?;
        Ok(self.cells[slot])
    }

    /// Place `sign` at `cell`, overwriting whatever is there.
    pub fn set(&mut self, cell: CellIndex, sign: Sign) -> Result<(), GridError> {
        let slot = self.slot(cell)?;
        self.cells[slot] = Some(sign);
        Ok(())
    }

    /// Empty `cell`.
    pub fn clear(&mut self, cell: CellIndex) -> Result<(), GridError> {
        let slot = self.slot(cell)?;
        self.cells[slot] = None;
        Ok(())
    }

    pub fn is_empty(&self, cell: CellIndex) -> Result<bool, GridError> {
        Ok(self.get(cell)?.is_none())
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Step one cell in `direction`, or `None` if that leaves the grid.
    #[must_use]
    pub fn neighbor(&self, cell: CellIndex, direction: Direction) -> Option<CellIndex> {
        let (dr, dc) = direction.offset();
        let row = cell.row as isize + dr;
        let column = cell.column as isize + dc;
        if self.in_range(row, column) {
            Some(CellIndex::new(row as usize, column as usize))
        } else {
            None
        }
    }

    /// In-bounds neighbours of `cell` in `Direction::ALL` order.
    #[must_use]
    pub fn neighbors(&self, cell: CellIndex) -> SmallVec<[CellIndex; 8]> {
        Direction::ALL
            .iter()
            .filter_map(|&d| self.neighbor(cell, d))
            .collect()
    }

    /// All cells with their contents, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (CellIndex, Option<Sign>)> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &sign)| (CellIndex::from_flat(i, columns), sign))
    }

    /// Raw integer matrix, 0 for empty cells.
    #[must_use]
    pub fn rows_snapshot(&self) -> Vec<Vec<u16>> {
        self.cells
            .chunks(self.columns.max(1))
            .map(|row| row.iter().map(|c| c.map_or(0, Sign::raw)).collect())
            .collect()
    }
}
