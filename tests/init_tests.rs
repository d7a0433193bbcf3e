//! Board seeding tests.

use merge_grid::board::{Board, BoardInitializer};
use merge_grid::core::{BoardConfig, BoardRng, Sign};
use merge_grid::grid::CellIndex;

/// A 3x2 board gets five sign-1 items and one sign-2 item, on the last
/// index the permutation drew.
#[test]
fn test_three_by_two_seeding() {
    let config = BoardConfig::new(3, 2);

    let order = BoardInitializer::permutation(&mut BoardRng::new(42), config.cell_count());
    let board = Board::new(config, &mut BoardRng::new(42)).unwrap();

    let signs: Vec<u16> = board.grid().cells().map(|(_, s)| s.map_or(0, Sign::raw)).collect();
    assert_eq!(signs.iter().filter(|&&s| s == 1).count(), 5);
    assert_eq!(signs.iter().filter(|&&s| s == 2).count(), 1);
    assert_eq!(board.grid().occupied_count(), 6);
    assert_eq!(board.item_count(), 6);

    let last = CellIndex::from_flat(*order.last().unwrap(), 2);
    assert_eq!(board.grid().get(last).unwrap(), Some(Sign::SECONDARY));
    assert_eq!(board.item_at(last).unwrap().sign(), Sign::SECONDARY);
}

#[test]
fn test_same_seed_same_board() {
    let a = Board::new(BoardConfig::new(5, 5), &mut BoardRng::new(7)).unwrap();
    let b = Board::new(BoardConfig::new(5, 5), &mut BoardRng::new(7)).unwrap();
    assert_eq!(a.grid(), b.grid());
}

#[test]
fn test_restored_rng_reproduces_board() {
    let mut rng = BoardRng::new(11);
    let _first = Board::new(BoardConfig::new(3, 3), &mut rng).unwrap();

    let state = rng.state();
    let second = Board::new(BoardConfig::new(3, 3), &mut rng).unwrap();
    let replay = Board::new(BoardConfig::new(3, 3), &mut BoardRng::from_state(&state)).unwrap();

    assert_eq!(second.grid(), replay.grid());
}

#[test]
fn test_single_cell_board_gets_secondary_sign() {
    let board = Board::new(BoardConfig::new(1, 1), &mut BoardRng::new(0)).unwrap();
    assert_eq!(board.grid().rows_snapshot(), vec![vec![2]]);
}

#[test]
fn test_items_start_at_level_zero() {
    let board = Board::new(BoardConfig::new(4, 2), &mut BoardRng::new(3)).unwrap();
    assert!(board.items().all(|i| i.level() == 0));
    assert!(board.check_invariants().is_ok());
}
