//! Board tests - grid access, collision, clearing, queue and hold

use blockfall::core::{Board, HoldOutcome, Piece, SimpleRng};
use blockfall::types::{Cell, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row(board: &mut Board, y: i8, kind: PieceKind) {
    for x in 1..=10 {
        assert!(board.set_cell(x, y, Cell::Occupied(kind)));
    }
}

// ============== Grid Tests ==============

#[test]
fn test_new_board_has_walls_and_floor() {
    let board = Board::default();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..24 {
        assert_eq!(board.cell(0, y), Some(Cell::Wall));
        assert_eq!(board.cell(11, y), Some(Cell::Wall));
    }
    for x in 0..12 {
        assert_eq!(board.cell(x, 23), Some(Cell::Wall));
    }
    for y in 0..23 {
        for x in 1..=10 {
            assert_eq!(board.cell(x, y), Some(Cell::Empty));
        }
    }
}

#[test]
fn test_out_of_bounds_access() {
    let mut board = Board::default();
    assert_eq!(board.cell(-1, 0), None);
    assert_eq!(board.cell(12, 0), None);
    assert_eq!(board.cell(0, 24), None);
    assert!(!board.set_cell(0, 5, Cell::Occupied(PieceKind::T)));
    assert!(!board.set_cell(5, 23, Cell::Occupied(PieceKind::T)));
    assert!(!board.set_cell(5, 5, Cell::Wall));
    assert!(!board.set_cell(40, 5, Cell::Empty));
}

#[test]
fn test_cells_copy_is_detached() {
    let mut board = Board::default();
    let before = board.cells();
    board.set_cell(3, 3, Cell::Occupied(PieceKind::S));
    assert_eq!(before[3][3], Cell::Empty);
    assert_eq!(board.cells()[3][3], Cell::Occupied(PieceKind::S));
}

// ============== Collision Tests ==============

#[test]
fn test_spawned_pieces_fit_on_empty_board() {
    let board = Board::default();
    for kind in PieceKind::ALL {
        for rotation in Rotation::ALL {
            let mut piece = Piece::spawn(kind);
            piece.set_rotation(rotation);
            assert!(!board.collides(&piece), "{kind:?} {rotation:?}");
        }
    }
}

#[test]
fn test_walls_and_floor_block() {
    let board = Board::default();
    let piece = Piece::spawn(PieceKind::O);
    // O covers x..=x+1
    assert!(!board.has_collision(&piece, 1, 5, Rotation::North));
    assert!(board.has_collision(&piece, 0, 5, Rotation::North));
    assert!(!board.has_collision(&piece, 9, 5, Rotation::North));
    assert!(board.has_collision(&piece, 10, 5, Rotation::North));
    assert!(!board.has_collision(&piece, 4, 21, Rotation::North));
    assert!(board.has_collision(&piece, 4, 22, Rotation::North));
}

#[test]
fn test_above_the_grid_collides() {
    let board = Board::default();
    let piece = Piece::spawn(PieceKind::O);
    assert!(board.has_collision(&piece, 4, -1, Rotation::North));
}

#[test]
fn test_occupied_cells_block() {
    let mut board = Board::default();
    board.set_cell(5, 10, Cell::Occupied(PieceKind::Z));
    let piece = Piece::spawn(PieceKind::O);
    assert!(board.has_collision(&piece, 4, 9, Rotation::North));
    assert!(!board.has_collision(&piece, 6, 9, Rotation::North));
}

#[test]
fn test_collision_check_does_not_mutate() {
    let mut board = Board::default();
    fill_row(&mut board, 20, PieceKind::L);
    let before = board.cells();
    let piece = Piece::spawn(PieceKind::I);
    for y in -2..26 {
        let _ = board.has_collision(&piece, 3, y, Rotation::East);
    }
    assert_eq!(board.cells(), before);
}

// ============== Placement and Ghost Tests ==============

#[test]
fn test_ghost_lands_on_floor_and_stack() {
    let mut board = Board::default();
    let piece = Piece::spawn(PieceKind::O);
    assert_eq!(board.ghost_y(&piece), 21);

    board.set_cell(5, 15, Cell::Occupied(PieceKind::J));
    assert_eq!(board.ghost_y(&piece), 13);
}

#[test]
fn test_place_writes_kind() {
    let mut board = Board::default();
    let mut piece = Piece::spawn(PieceKind::T);
    piece.y = board.ghost_y(&piece);
    board.place(&piece);
    for (x, y) in piece.cells() {
        assert_eq!(board.cell(x, y), Some(Cell::Occupied(PieceKind::T)));
    }
}

// ============== Line Clear Tests ==============

#[test]
fn test_single_full_row_clears() {
    let mut board = Board::default();
    fill_row(&mut board, 22, PieceKind::I);
    board.set_cell(4, 21, Cell::Occupied(PieceKind::O));

    assert_eq!(board.clear_lines(), 1);
    assert_eq!(board.cell(4, 22), Some(Cell::Occupied(PieceKind::O)));
    assert_eq!(board.cell(4, 21), Some(Cell::Empty));
    assert_eq!(board.cell(0, 22), Some(Cell::Wall));
}

#[test]
fn test_non_adjacent_rows_clear_and_keep_order() {
    let mut board = Board::default();
    fill_row(&mut board, 5, PieceKind::I);
    fill_row(&mut board, 7, PieceKind::I);
    board.set_cell(2, 4, Cell::Occupied(PieceKind::S));
    board.set_cell(3, 6, Cell::Occupied(PieceKind::Z));
    board.set_cell(4, 8, Cell::Occupied(PieceKind::J));

    assert_eq!(board.clear_lines(), 2);
    // Row 8 was below both clears and stays put.
    assert_eq!(board.cell(4, 8), Some(Cell::Occupied(PieceKind::J)));
    // Row 6 dropped past one cleared row, row 4 past two.
    assert_eq!(board.cell(3, 7), Some(Cell::Occupied(PieceKind::Z)));
    assert_eq!(board.cell(2, 6), Some(Cell::Occupied(PieceKind::S)));
    assert_eq!(board.cell(3, 6), Some(Cell::Empty));
    assert_eq!(board.cell(2, 4), Some(Cell::Empty));
}

#[test]
fn test_four_rows_clear() {
    let mut board = Board::default();
    for y in 19..23 {
        fill_row(&mut board, y, PieceKind::I);
    }
    assert_eq!(board.clear_lines(), 4);
    assert_eq!(board.cells(), Board::default().cells());
}

#[test]
fn test_nearly_full_row_stays() {
    let mut board = Board::default();
    for x in 1..10 {
        board.set_cell(x, 22, Cell::Occupied(PieceKind::T));
    }
    assert_eq!(board.clear_lines(), 0);
    assert_eq!(board.cell(1, 22), Some(Cell::Occupied(PieceKind::T)));
}

// ============== Queue and Hold Tests ==============

#[test]
fn test_peek_is_idempotent_and_matches_draws() {
    let mut board = Board::new(SimpleRng::new(99));
    let first = board.peek_pieces(4);
    assert_eq!(board.peek_pieces(4), first);
    assert_eq!(board.preview(), first);
    for expected in first {
        assert_eq!(board.next_piece(), expected);
    }
}

#[test]
fn test_peek_is_capped_by_preview_size() {
    let board = Board::with_preview_size(SimpleRng::new(3), 2);
    assert_eq!(board.preview_size(), 2);
    assert_eq!(board.peek_pieces(4).len(), 2);
    assert_eq!(board.peek_pieces(0).len(), 0);
}

#[test]
fn test_hold_is_single_use_until_placement() {
    let mut board = Board::default();
    assert_eq!(board.hold_swap(PieceKind::T), HoldOutcome::Stored);
    assert!(!board.can_hold());
    assert_eq!(board.hold_swap(PieceKind::I), HoldOutcome::Rejected);
    assert_eq!(board.held_piece(), Some(PieceKind::T));

    let mut piece = Piece::spawn(PieceKind::I);
    piece.y = board.ghost_y(&piece);
    board.place(&piece);
    assert!(board.can_hold());
    assert_eq!(board.hold_swap(PieceKind::S), HoldOutcome::Swapped(PieceKind::T));
    assert_eq!(board.held_piece(), Some(PieceKind::S));
}

#[test]
fn test_spawn_blocked_and_reset() {
    let mut board = Board::default();
    assert!(!board.is_spawn_blocked());
    board.set_cell(6, 2, Cell::Occupied(PieceKind::L));
    assert!(board.is_spawn_blocked());

    board.hold_swap(PieceKind::O);
    board.reset();
    assert!(!board.is_spawn_blocked());
    assert_eq!(board.held_piece(), None);
    assert!(board.can_hold());
}
