//! The board - single owner of grid, items and hit-testing.
//!
//! ## Usage
//!
//! ```
//! use merge_grid::board::{Board, DropGesture};
//! use merge_grid::core::{BoardConfig, BoardRng};
//!
//! let mut board = Board::new(BoardConfig::default(), &mut BoardRng::new(42)).unwrap();
//! assert_eq!(board.items().count(), 6);
//!
//! let item = board.items().next().unwrap().id();
//! let target = board.locator().rect(board.item(item).unwrap().cell()).unwrap().center;
//!
//! // Dropping an item back onto its own cell changes nothing
//! let outcome = board.drop_item(DropGesture::new(item, target)).unwrap();
//! assert!(!outcome.is_mutation());
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::init::BoardInitializer;
use super::resolver::{DropOutcome, DropResolver};
use crate::core::{
    BoardConfig, BoardError, DropError, InvariantError, ItemId, LocatorError, RandomSource, Sign,
};
use crate::grid::{CellIndex, CellLocator, GridModel, Point};
use crate::items::{Item, ItemSet};

/// End-of-drag event from the input collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DropGesture {
    pub item: ItemId,
    pub point: Point,
}

impl DropGesture {
    #[must_use]
    pub const fn new(item: ItemId, point: Point) -> Self {
        Self { item, point }
    }
}

/// A merge-puzzle board.
///
/// Cloning is cheap for the item set (persistent map) and linear in cell
/// count for the grid. A deserialized board passes the same checks as one
/// built with `from_layout`, plus `check_invariants`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "BoardRaw")]
pub struct Board {
    config: BoardConfig,
    grid: GridModel,
    items: ItemSet,
    locator: CellLocator,
}

#[derive(Deserialize)]
struct BoardRaw {
    config: BoardConfig,
    grid: GridModel,
    items: ItemSet,
    locator: CellLocator,
}

impl TryFrom<BoardRaw> for Board {
    type Error = BoardError;

    fn try_from(raw: BoardRaw) -> Result<Self, Self::Error> {
        let BoardRaw {
            config,
            grid,
            items,
            locator,
        } = raw;
        config.validate()?;

        if grid.rows() != config.rows || grid.columns() != config.columns {
            return Err(BoardError::GridShape {
                rows: grid.rows(),
                columns: grid.columns(),
                expected_rows: config.rows,
                expected_columns: config.columns,
            });
        }
        check_locator(&grid, &locator)?;

        for (cell, sign) in grid.cells() {
            if let Some(sign) = sign.filter(|s| s.raw() > config.sign_count) {
                return Err(BoardError::UnknownSign {
                    row: cell.row,
                    column: cell.column,
                    sign: sign.raw(),
                    sign_count: config.sign_count,
                });
            }
        }

        let max_level = config.max_level();
        if let Some(item) = items.iter().find(|i| i.level() > max_level) {
            return Err(BoardError::LevelAboveCap {
                item: item.id(),
                level: item.level(),
                max_level,
            });
        }

        let board = Self {
            config,
            grid,
            items,
            locator,
        };
        board.check_invariants()?;
        Ok(board)
    }
}

/// The locator must cover the same rows and columns as the grid.
fn check_locator(grid: &GridModel, locator: &CellLocator) -> Result<(), LocatorError> {
    if locator.rows() != grid.rows() || locator.columns() != grid.columns() {
        return Err(LocatorError::Dimensions {
            rows: locator.rows(),
            columns: locator.columns(),
            expected_rows: grid.rows(),
            expected_columns: grid.columns(),
        });
    }
    Ok(())
}

impl Board {
    /// Create a board and seed every cell from `rng`.
    pub fn new(config: BoardConfig, rng: &mut impl RandomSource) -> Result<Self, BoardError> {
        config.validate()?;

        let mut grid = GridModel::new(config.rows, config.columns);
        let items = BoardInitializer::seed(&mut grid, rng)?;
        let locator = CellLocator::centered(config.rows, config.columns, config.layout);

        debug!(rows = config.rows, columns = config.columns, "board created");

        Ok(Self {
            config,
            grid,
            items,
            locator,
        })
    }

    /// Create a board from an explicit matrix of raw signs, 0 for empty.
    ///
    /// Items get ids in row-major order starting at 0.
    pub fn from_layout(config: BoardConfig, layout: &[Vec<u16>]) -> Result<Self, BoardError> {
        config.validate()?;

        if layout.len() != config.rows {
            return Err(BoardError::RowCount {
                expected: config.rows,
                actual: layout.len(),
            });
        }

        let mut grid = GridModel::new(config.rows, config.columns);
        let mut items = ItemSet::new();
        let mut next_id = 0u32;

        for (row, cells) in layout.iter().enumerate() {
            if cells.len() != config.columns {
                return Err(BoardError::ColumnCount {
                    row,
                    expected: config.columns,
                    actual: cells.len(),
                });
            }

            for (column, &raw) in cells.iter().enumerate() {
                if raw > config.sign_count {
                    return Err(BoardError::UnknownSign {
                        row,
                        column,
                        sign: raw,
                        sign_count: config.sign_count,
                    });
                }
                let Some(sign) = Sign::new(raw) else {
                    continue;
                };

                let cell = CellIndex::new(row, column);
                grid.set(cell, sign)?;
                items.insert(Item::new(ItemId::new(next_id), sign, cell));
                next_id += 1;
            }
        }

        let locator = CellLocator::centered(config.rows, config.columns, config.layout);

        Ok(Self {
            config,
            grid,
            items,
            locator,
        })
    }

    /// Replace the hit-testing geometry.
    ///
    /// The locator must cover the same rows and columns as the grid.
    pub fn set_locator(&mut self, locator: CellLocator) -> Result<(), BoardError> {
        check_locator(&self.grid, &locator)?;
        self.locator = locator;
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    #[must_use]
    pub fn locator(&self) -> &CellLocator {
        &self.locator
    }

    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    #[must_use]
    pub fn item_at(&self, cell: CellIndex) -> Option<&Item> {
        self.items.at(cell)
    }

    /// Live items in id order.
    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Locate the gesture's point and resolve the drop.
    pub fn drop_item(&mut self, gesture: DropGesture) -> Result<DropOutcome, DropError> {
        let target = self.locator.locate(gesture.point);
        self.resolve_drop(gesture.item, target)
    }

    /// Resolve a drop against an already-located target cell.
    pub fn resolve_drop(
        &mut self,
        item: ItemId,
        target: Option<CellIndex>,
    ) -> Result<DropOutcome, DropError> {
        let resolver = DropResolver::new(self.config.max_level());
        let outcome = resolver.resolve(&mut self.grid, &mut self.items, item, target)?;

        debug_assert!(
            self.check_invariants().is_ok(),
            "board inconsistent after {:?}: {:?}",
            outcome,
            self.check_invariants()
        );

        Ok(outcome)
    }

    /// What `drop_item` would do, without changing this board.
    pub fn preview(&self, gesture: DropGesture) -> Result<DropOutcome, DropError> {
        self.clone().drop_item(gesture)
    }

    /// Verify the grid and item set agree.
    ///
    /// Checks that occupied cells and live items are equal in number and
    /// that each item's cell holds its sign with no cell claimed twice.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let occupied = self.grid.occupied_count();
        if occupied != self.items.len() {
            return Err(InvariantError::CountMismatch {
                occupied,
                items: self.items.len(),
            });
        }

        let mut claims: FxHashMap<CellIndex, ItemId> = FxHashMap::default();
        for item in self.items.iter() {
            let found = self.grid.get(item.cell())?;
            if found != Some(item.sign()) {
                return Err(InvariantError::ItemCellMismatch {
                    item: item.id(),
                    cell: item.cell(),
                    found: found.map(Sign::raw),
                });
            }
            if let Some(first) = claims.insert(item.cell(), item.id()) {
                return Err(InvariantError::DuplicateClaim {
                    cell: item.cell(),
                    first,
                    second: item.id(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardRng, CellLayout, ConfigError};

    fn layout(rows: &[&[u16]]) -> Vec<Vec<u16>> {
        rows.iter().map(|r| r.to_vec()).collect()
    }

    #[test]
    fn test_new_board_is_full_and_consistent() {
        let board = Board::new(BoardConfig::new(4, 4), &mut BoardRng::new(1)).unwrap();
        assert_eq!(board.item_count(), 16);
        assert_eq!(board.grid().occupied_count(), 16);
        assert!(board.check_invariants().is_ok());
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let result = Board::new(BoardConfig::new(0, 3), &mut BoardRng::new(1));
        assert!(matches!(result, Err(BoardError::Config(_))));
    }

    #[test]
    fn test_from_layout() {
        let board =
            Board::from_layout(BoardConfig::new(2, 2), &layout(&[&[1, 0], &[0, 2]])).unwrap();
        assert_eq!(board.item_count(), 2);
        assert_eq!(board.item_at(CellIndex::new(1, 1)).unwrap().id(), ItemId::new(1));
        assert!(board.check_invariants().is_ok());
    }

    #[test]
    fn test_from_layout_validates_shape_and_signs() {
        let config = BoardConfig::new(2, 2);
        assert_eq!(
            Board::from_layout(config.clone(), &layout(&[&[1, 0]])).unwrap_err(),
            BoardError::RowCount { expected: 2, actual: 1 }
        );
        assert_eq!(
            Board::from_layout(config.clone(), &layout(&[&[1, 0], &[1]])).unwrap_err(),
            BoardError::ColumnCount { row: 1, expected: 2, actual: 1 }
        );
        assert_eq!(
            Board::from_layout(config, &layout(&[&[1, 3], &[0, 0]])).unwrap_err(),
            BoardError::UnknownSign { row: 0, column: 1, sign: 3, sign_count: 2 }
        );
    }

    #[test]
    fn test_drop_outside_cancels() {
        let mut board =
            Board::from_layout(BoardConfig::new(1, 2), &layout(&[&[1, 0]])).unwrap();
        let outcome = board
            .drop_item(DropGesture::new(ItemId::new(0), Point::new(5000.0, 0.0)))
            .unwrap();
        assert_eq!(
            outcome,
            DropOutcome::Cancelled { item: ItemId::new(0), origin: CellIndex::new(0, 0) }
        );
        assert_eq!(outcome.resting_cell(), CellIndex::new(0, 0));
    }

    #[test]
    fn test_drop_locates_target_cell() {
        let mut board =
            Board::from_layout(BoardConfig::new(1, 2), &layout(&[&[1, 0]])).unwrap();
        let point = board.locator().rect(CellIndex::new(0, 1)).unwrap().center;

        let outcome = board.drop_item(DropGesture::new(ItemId::new(0), point)).unwrap();

        assert_eq!(outcome.resting_cell(), CellIndex::new(0, 1));
        assert_eq!(board.grid().rows_snapshot(), vec![vec![0, 1]]);
    }

    #[test]
    fn test_preview_leaves_board_untouched() {
        let board =
            Board::from_layout(BoardConfig::new(1, 2), &layout(&[&[1, 1]])).unwrap();
        let point = board.locator().rect(CellIndex::new(0, 1)).unwrap().center;

        let outcome = board.preview(DropGesture::new(ItemId::new(0), point)).unwrap();

        assert!(matches!(outcome, DropOutcome::Merged { level: 1, .. }));
        assert_eq!(board.item_count(), 2);
        assert_eq!(board.item(ItemId::new(0)).unwrap().level(), 0);
    }

    #[test]
    fn test_set_locator_checks_dimensions() {
        let mut board = Board::new(BoardConfig::new(2, 3), &mut BoardRng::new(5)).unwrap();
        let wrong = CellLocator::centered(3, 3, CellLayout::default());
        assert_eq!(
            board.set_locator(wrong).unwrap_err(),
            BoardError::Locator(LocatorError::Dimensions {
                rows: 3,
                columns: 3,
                expected_rows: 2,
                expected_columns: 3,
            })
        );

        let right = CellLocator::centered(2, 3, CellLayout::new(10.0, 10.0, 0.0));
        board.set_locator(right).unwrap();
        assert_eq!(board.locator().rect(CellIndex::new(0, 0)).unwrap().width, 10.0);
    }

    #[test]
    fn test_invariant_violation_detected() {
        let mut board =
            Board::from_layout(BoardConfig::new(1, 2), &layout(&[&[1, 0]])).unwrap();
        board.grid.set(CellIndex::new(0, 1), Sign::SECONDARY).unwrap();
        assert_eq!(
            board.check_invariants(),
            Err(InvariantError::CountMismatch { occupied: 2, items: 1 })
        );
    }

    #[test]
    fn test_board_serde() {
        let board = Board::new(BoardConfig::default(), &mut BoardRng::new(8)).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.grid(), board.grid());
        assert!(restored.check_invariants().is_ok());
    }

    fn board_json(rows: &[&[u16]]) -> serde_json::Value {
        let config = BoardConfig::new(rows.len(), rows[0].len());
        let board = Board::from_layout(config, &layout(rows)).unwrap();
        serde_json::to_value(&board).unwrap()
    }

    fn load(value: serde_json::Value) -> Result<Board, String> {
        serde_json::from_str(&value.to_string()).map_err(|e| e.to_string())
    }

    #[test]
    fn test_deserialize_rejects_unclaimed_cells() {
        let mut value = board_json(&[&[1, 1]]);
        value["items"]["items"] = serde_json::json!({});

        let err = load(value).unwrap_err();
        assert!(err.contains("2 occupied cells but 0 live items"), "{err}");
    }

    #[test]
    fn test_deserialize_rejects_item_off_its_cell() {
        let mut value = board_json(&[&[1, 0]]);
        value["items"]["items"]["0"]["cell"]["column"] = serde_json::json!(1);

        let err = load(value).unwrap_err();
        assert!(err.contains("Item(0) claims cell (0, 1) which holds None"), "{err}");
    }

    #[test]
    fn test_deserialize_rejects_short_grid() {
        let mut value = board_json(&[&[1, 0], &[0, 2]]);
        value["grid"]["cells"] = serde_json::json!([1]);

        let err = load(value).unwrap_err();
        assert!(err.contains("2x2 grid needs 4 cells, got 1"), "{err}");
    }

    #[test]
    fn test_deserialize_rejects_grid_config_mismatch() {
        let mut value = board_json(&[&[1, 0]]);
        value["config"]["columns"] = serde_json::json!(3);

        let err = load(value).unwrap_err();
        assert!(err.contains("grid is 1x2, config expects 1x3"), "{err}");
    }

    #[test]
    fn test_deserialize_rejects_mismatched_locator() {
        let mut value = board_json(&[&[1, 0]]);
        value["locator"] =
            serde_json::to_value(CellLocator::centered(2, 2, CellLayout::default())).unwrap();
        let err = load(value).unwrap_err();
        assert!(err.contains("locator covers 2x2 cells, grid is 1x2"), "{err}");

        let mut value = board_json(&[&[1, 0]]);
        value["locator"]["rects"] = serde_json::json!([]);
        let err = load(value).unwrap_err();
        assert!(err.contains("expected 2 cell rectangles, got 0"), "{err}");
    }

    #[test]
    fn test_deserialize_rejects_out_of_range_sign_and_level() {
        let mut value = board_json(&[&[1, 0]]);
        value["grid"]["cells"][0] = serde_json::json!(3);
        value["items"]["items"]["0"]["sign"] = serde_json::json!(3);
        let err = load(value).unwrap_err();
        assert!(err.contains("sign 3 at (0, 0) exceeds sign_count 2"), "{err}");

        let mut value = board_json(&[&[1, 0]]);
        value["items"]["items"]["0"]["level"] = serde_json::json!(9);
        let err = load(value).unwrap_err();
        assert!(err.contains("Item(0) is at level 9, above the cap of 4"), "{err}");
    }

    #[test]
    fn test_new_rejects_board_beyond_id_space() {
        // Rejected by config validation before any cell is allocated
        let result = Board::new(BoardConfig::new(70_000, 70_000), &mut BoardRng::new(1));
        assert!(matches!(
            result,
            Err(BoardError::Config(ConfigError::TooManyCells { .. }))
        ));
    }
}
