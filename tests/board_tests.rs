//! Board tests - placement, movement and row compaction through the public API

use blockfall::core::{Board, ConfigError, Position, Tetromino};
use blockfall::types::{Cell, Color, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

const STACK: Cell = Cell::Filled(Color::Red);

fn fill_row(board: &mut Board, row: usize) {
    for col in 0..board.width() {
        board.set(row as i32, col as i32, STACK);
    }
}

fn filled_count(board: &Board) -> usize {
    board.cells().iter().filter(|c| c.is_filled()).count()
}

#[test]
fn test_board_new_empty() {
    let board = Board::new(BOARD_HEIGHT, BOARD_WIDTH).unwrap();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert!(board.cells().iter().all(Cell::is_empty));
    assert!(board.active().is_none());
}

#[test]
fn test_board_rejects_small_dimensions() {
    assert!(matches!(
        Board::new(3, 10),
        Err(ConfigError::BoardTooSmall { height: 3, width: 10, .. })
    ));
    assert!(Board::new(4, 4).is_ok());
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new(BOARD_HEIGHT, BOARD_WIDTH).unwrap();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_HEIGHT as i32, 0), None);
    assert_eq!(board.get(0, BOARD_WIDTH as i32), None);
    assert!(!board.is_free(0, -1));
}

#[test]
fn test_insert_centers_piece_on_top_row() {
    let mut board = Board::new(BOARD_HEIGHT, BOARD_WIDTH).unwrap();
    assert_eq!(board.spawn_position(), Position::new(0, 3));
    assert!(board.insert(Tetromino::new(PieceKind::I)));

    for col in 3..7 {
        assert_eq!(board.get(1, col), Some(Cell::Filled(Color::Cyan)));
    }
    assert_eq!(filled_count(&board), 4);
}

#[test]
fn test_blocked_spawn_writes_nothing() {
    let mut board = Board::new(BOARD_HEIGHT, BOARD_WIDTH).unwrap();
    board.set(1, 4, STACK);
    let before = board.cells().to_vec();

    assert!(!board.insert(Tetromino::new(PieceKind::I)));
    assert_eq!(board.cells(), &before[..]);
    assert!(board.active().is_none());
}

#[test]
fn test_move_stops_at_walls() {
    let mut board = Board::new(BOARD_HEIGHT, BOARD_WIDTH).unwrap();
    board.insert(Tetromino::new(PieceKind::I));

    for _ in 0..3 {
        assert!(board.move_left());
    }
    let at_wall = board.cells().to_vec();
    assert!(!board.move_left());
    assert_eq!(board.cells(), &at_wall[..]);
    assert_eq!(board.active().unwrap().pos, Position::new(0, 0));

    for _ in 0..6 {
        assert!(board.move_right());
    }
    assert!(!board.move_right());
    assert_eq!(board.get(1, 9), Some(Cell::Filled(Color::Cyan)));
}

#[test]
fn test_blocked_rotation_leaves_board_unchanged() {
    let mut board = Board::new(BOARD_HEIGHT, BOARD_WIDTH).unwrap();
    board.insert(Tetromino::new(PieceKind::T));
    // East state of T needs (2, 4) relative to the spawn anchor (0, 3).
    board.set(2, 4, STACK);
    let before = board.cells().to_vec();

    assert!(!board.rotate());
    assert_eq!(board.cells(), &before[..]);
    assert_eq!(board.active().unwrap().piece.rotation, Rotation::North);
}

#[test]
fn test_four_rotations_return_to_spawn_state() {
    let mut board = Board::new(BOARD_HEIGHT, BOARD_WIDTH).unwrap();
    board.insert(Tetromino::new(PieceKind::L));
    board.move_down();
    let start = board.cells().to_vec();

    for _ in 0..4 {
        assert!(board.rotate());
        assert_eq!(filled_count(&board), 4);
    }
    assert_eq!(board.cells(), &start[..]);
}

#[test]
fn test_drop_to_bottom_distance() {
    let mut board = Board::new(BOARD_HEIGHT, BOARD_WIDTH).unwrap();
    board.insert(Tetromino::new(PieceKind::I));
    assert_eq!(board.drop_to_bottom(), 20);
    assert!(!board.move_down());
    for col in 3..7 {
        assert!(board.is_occupied(21, col));
    }
}

#[test]
fn test_lock_keeps_cells_as_stack() {
    let mut board = Board::new(BOARD_HEIGHT, BOARD_WIDTH).unwrap();
    board.insert(Tetromino::new(PieceKind::O));
    board.drop_to_bottom();
    assert!(board.lock().is_some());
    assert!(board.active().is_none());
    assert_eq!(filled_count(&board), 4);
    // Nothing to move any more.
    assert!(!board.move_left());
}

#[test]
fn test_clear_without_full_rows_is_identity() {
    let mut board = Board::new(BOARD_HEIGHT, BOARD_WIDTH).unwrap();
    for col in 0..9 {
        board.set(21, col, STACK);
    }
    board.set(20, 2, STACK);
    let before = board.cells().to_vec();

    assert_eq!(board.clear_full_rows(), 0);
    assert_eq!(board.cells(), &before[..]);
}

#[test]
fn test_clear_two_bottom_rows_shifts_stack_down() {
    let mut board = Board::new(BOARD_HEIGHT, BOARD_WIDTH).unwrap();
    fill_row(&mut board, 21);
    fill_row(&mut board, 20);
    board.set(19, 0, STACK);
    board.set(19, 7, STACK);

    assert_eq!(board.clear_full_rows(), 2);
    assert!(board.is_occupied(21, 0));
    assert!(board.is_occupied(21, 7));
    assert_eq!(filled_count(&board), 2);
    assert!(board.is_row_empty(0));
    assert!(board.is_row_empty(1));
    assert!(board.is_row_empty(20));
}

#[test]
fn test_clear_non_adjacent_rows() {
    let mut board = Board::new(8, 4).unwrap();
    fill_row(&mut board, 7);
    board.set(6, 1, STACK);
    fill_row(&mut board, 5);
    board.set(4, 3, STACK);

    assert_eq!(board.clear_full_rows(), 2);
    assert!(board.is_occupied(7, 1));
    assert!(board.is_occupied(6, 3));
    assert_eq!(filled_count(&board), 2);
}

#[test]
fn test_clear_full_board_empties_top_row() {
    let mut board = Board::new(4, 4).unwrap();
    for row in 0..4 {
        fill_row(&mut board, row);
    }
    assert_eq!(board.clear_full_rows(), 4);
    assert!(board.cells().iter().all(Cell::is_empty));
}

#[test]
fn test_clear_locks_active_piece() {
    let mut board = Board::new(BOARD_HEIGHT, BOARD_WIDTH).unwrap();
    for col in 0..BOARD_WIDTH as i32 {
        if !(3..7).contains(&col) {
            board.set(21, col, STACK);
        }
    }
    board.insert(Tetromino::new(PieceKind::I));
    board.drop_to_bottom();

    assert_eq!(board.clear_full_rows(), 1);
    assert!(board.active().is_none());
    assert!(board.cells().iter().all(Cell::is_empty));
}
