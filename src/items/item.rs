//! Items - the pieces sitting on the board.
//!
//! An `Item` caches its board position. The grid is authoritative; only
//! the board's mutation paths move an item, and they update the grid in
//! the same step.

use serde::{Deserialize, Serialize};

use crate::core::{ItemId, Sign};
use crate::grid::CellIndex;

/// A live item on the board.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    sign: Sign,
    level: u32,
    cell: CellIndex,
}

impl Item {
    /// Create a level-0 item at `cell`.
    #[must_use]
    pub fn new(id: ItemId, sign: Sign, cell: CellIndex) -> Self {
        Self {
            id,
            sign,
            level: 0,
            cell,
        }
    }

    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }

    #[must_use]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Merges absorbed so far, capped at the level-visual count.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Current board position.
    #[must_use]
    pub fn cell(&self) -> CellIndex {
        self.cell
    }

    #[must_use]
    pub fn row(&self) -> usize {
        self.cell.row
    }

    #[must_use]
    pub fn column(&self) -> usize {
        self.cell.column
    }

    /// Two items are similar iff their signs match.
    #[must_use]
    pub fn is_similar(&self, other: &Item) -> bool {
        self.sign == other.sign
    }

    /// Raise the level by one unless already at `max_level`.
    ///
    /// Returns whether the level changed.
    pub(crate) fn level_up(&mut self, max_level: u32) -> bool {
        if self.level >= max_level {
            return false;
        }
        self.level += 1;
        true
    }

    pub(crate) fn set_cell(&mut self, cell: CellIndex) {
        self.cell = cell;
    }
}
