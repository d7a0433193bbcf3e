//! Board seeding.
//!
//! Every cell receives an item: a random permutation of the cell indices
//! is drawn and walked in order. All placements get `Sign::PRIMARY`
//! except the last, which gets `Sign::SECONDARY`.

use tracing::debug;

use crate::core::{GridError, ItemId, RandomSource, Sign};
use crate::grid::{CellIndex, GridModel};
use crate::items::{Item, ItemSet};

/// Seeds a grid and item set.
pub struct BoardInitializer;

impl BoardInitializer {
    /// Random permutation of `0..count`.
    ///
    /// Draw-without-replacement: each step picks a uniform index into the
    /// remaining pool and removes it. Quadratic in `count`, fine for board
    /// sizes.
    pub fn permutation(rng: &mut impl RandomSource, count: usize) -> Vec<usize> {
        let mut remaining: Vec<usize> = (0..count).collect();
        let mut order = Vec::with_capacity(count);

        while !remaining.is_empty() {
            let pick = rng.next_index(remaining.len());
            order.push(remaining.remove(pick));
        }

        order
    }

    /// Fill an empty grid, returning the seeded item set.
    ///
    /// Item ids follow placement order, starting at 0. Fails with
    /// `GridError::TooManyCells` before drawing if the grid has more cells
    /// than there are ids.
    pub fn seed(grid: &mut GridModel, rng: &mut impl RandomSource) -> Result<ItemSet, GridError> {
        let columns = grid.columns();
        let count = grid.cell_count();
        if u32::try_from(count).is_err() {
            return Err(GridError::TooManyCells { count });
        }
        let order = Self::permutation(rng, count);
        let last = order.len().saturating_sub(1);
        let mut items = ItemSet::new();

        for (id, (i, &flat)) in (0u32..).zip(order.iter().enumerate()) {
            let cell = CellIndex::from_flat(flat, columns);
            let sign = if i == last { Sign::SECONDARY } else { Sign::PRIMARY };

            grid.set(cell, sign)?;
            items.insert(Item::new(ItemId::new(id), sign, cell));
        }

        debug!(
            rows = grid.rows(),
            columns,
            items = items.len(),
            secondary = ?order.last().map(|&f| CellIndex::from_flat(f, columns)),
            "board seeded"
        );

        Ok(items)
    }
}
