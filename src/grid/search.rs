//! Nearest-empty search used to relocate displaced items.
//!
//! ## Traversal
//!
//! Depth-first from the start cell, with an explicit LIFO frontier.
//! Neighbours are generated in `Direction::ALL` order and only empty
//! cells are ever pushed, so the result is the first empty cell in that
//! order - not necessarily the geometrically closest one. The last
//! candidate pushed is the first one tested.
//!
//! The start cell is never returned as a hit. When nothing qualifies the
//! search returns a caller-supplied fallback, which the caller guarantees
//! is empty.

use rustc_hash::FxHashSet;
use tracing::trace;

use super::model::{CellIndex, GridModel};
use crate::core::GridError;

/// Stack-based search over a borrowed grid.
#[derive(Clone, Copy, Debug)]
pub struct NearestEmptySearch<'a> {
    grid: &'a GridModel,
}

impl<'a> NearestEmptySearch<'a> {
    #[must_use]
    pub fn new(grid: &'a GridModel) -> Self {
        Self { grid }
    }

    /// Find an empty cell starting from `start`, falling back to `start`.
    ///
    /// The caller must already have cleared `start`.
    pub fn find_empty(&self, start: CellIndex) -> Result<CellIndex, GridError> {
        self.find_empty_or(start, start)
    }

    /// Find an empty cell starting from `start`, falling back to `fallback`.
    pub fn find_empty_or(
        &self,
        start: CellIndex,
        fallback: CellIndex,
    ) -> Result<CellIndex, GridError> {
        // Validates `start` up front so a bad origin fails loudly
        self.grid.get(start)?;

        let mut frontier: Vec<CellIndex> = vec![start];
        let mut queued: FxHashSet<CellIndex> = FxHashSet::default();
        let mut visited: FxHashSet<CellIndex> = FxHashSet::default();
        queued.insert(start);

        let mut is_origin = true;

        while let Some(cell) = frontier.pop() {
            queued.remove(&cell);

            if is_origin {
                is_origin = false;
            } else if self.grid.is_empty(cell)? {
                trace!(%start, found = %cell, "nearest empty cell");
                return Ok(cell);
            }

            visited.insert(cell);

            for next in self.grid.neighbors(cell) {
                if visited.contains(&next) || queued.contains(&next) {
                    continue;
                }
                if !self.grid.is_empty(next)? {
                    continue;
                }
                frontier.push(next);
                queued.insert(next);
            }
        }

        trace!(%start, %fallback, "no empty neighbour reachable, using fallback");
        Ok(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Sign;

    fn grid_from(rows: &[&[u16]]) -> GridModel {
        let mut grid = GridModel::new(rows.len(), rows[0].len());
        for (r, row) in rows.iter().enumerate() {
            for (c, &raw) in row.iter().enumerate() {
                if let Some(sign) = Sign::new(raw) {
                    grid.set(CellIndex::new(r, c), sign).unwrap();
                }
            }
        }
        grid
    }

    #[test]
    fn test_last_pushed_candidate_wins() {
        // Every neighbour of the centre is empty; NorthEast is pushed last.
        let grid = grid_from(&[&[0, 0, 0], &[0, 0, 0], &[0, 0, 0]]);
        let found = NearestEmptySearch::new(&grid)
            .find_empty(CellIndex::new(1, 1))
            .unwrap();
        assert_eq!(found, CellIndex::new(0, 2));
    }

    #[test]
    fn test_start_is_never_a_hit() {
        let grid = grid_from(&[&[0, 1], &[1, 1]]);
        let search = NearestEmptySearch::new(&grid);
        // (0,0) is empty but is the origin; no other cell is empty.
        assert_eq!(
            search.find_empty_or(CellIndex::new(0, 0), CellIndex::new(1, 1)).unwrap(),
            CellIndex::new(1, 1)
        );
    }

    #[test]
    fn test_occupied_neighbours_are_skipped() {
        let grid = grid_from(&[&[1, 1, 0], &[1, 2, 1], &[0, 1, 1]]);
        let found = NearestEmptySearch::new(&grid)
            .find_empty(CellIndex::new(1, 1))
            .unwrap();
        // Only SouthWest (2,0) and NorthEast (0,2) are empty; NorthEast is pushed last.
        assert_eq!(found, CellIndex::new(0, 2));
    }

    #[test]
    fn test_full_board_falls_back_to_start() {
        let grid = grid_from(&[&[1, 1], &[1, 2]]);
        let found = NearestEmptySearch::new(&grid)
            .find_empty(CellIndex::new(1, 1))
            .unwrap();
        assert_eq!(found, CellIndex::new(1, 1));
    }

    #[test]
    fn test_unreachable_empty_cell_uses_fallback() {
        // (0,0) is empty but separated from the origin by an occupied cell.
        let grid = grid_from(&[&[0, 2, 2]]);
        let found = NearestEmptySearch::new(&grid)
            .find_empty_or(CellIndex::new(0, 2), CellIndex::new(0, 0))
            .unwrap();
        assert_eq!(found, CellIndex::new(0, 0));
    }

    #[test]
    fn test_bad_start_is_out_of_range() {
        let grid = GridModel::new(2, 2);
        let result = NearestEmptySearch::new(&grid).find_empty(CellIndex::new(2, 0));
        assert!(matches!(result, Err(GridError::OutOfRange { row: 2, .. })));
    }
}
