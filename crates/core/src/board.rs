//! Board module - the grid, collision, line clears, sequencing and hold
//!
//! The board is a 12x24 grid that carries its own border: wall columns at
//! `x = 0` and `x = 11`, and a floor row at `y = 23`. Border cells are written
//! once at construction and never touched again, so collision needs no special
//! casing for walls.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x grows to the right and y grows downward.

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::hold::{HoldOutcome, HoldSlot};
use crate::pieces::Piece;
use crate::rng::{PieceQueue, Randomizer, SimpleRng};
use crate::types::{
    Cell, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, PREVIEW_SIZE, SPAWN_X, SPAWN_Y,
};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Total number of cells on the board
const BOARD_SIZE: usize = WIDTH * HEIGHT;

/// Row-major copy of the whole grid, borders included
pub type Grid = [[Cell; WIDTH]; HEIGHT];

/// Interior columns checked for a blocked spawn.
const SPAWN_REGION_X: std::ops::RangeInclusive<i8> = (SPAWN_X - 1)..=(SPAWN_X + 1);
/// Interior rows checked for a blocked spawn.
const SPAWN_REGION_Y: std::ops::RangeInclusive<i8> = SPAWN_Y..=(SPAWN_Y + 1);

/// Border-only grid: side walls plus floor.
fn bordered_cells() -> [Cell; BOARD_SIZE] {
    let mut cells = [Cell::Empty; BOARD_SIZE];
    for y in 0..HEIGHT {
        cells[y * WIDTH] = Cell::Wall;
        cells[y * WIDTH + WIDTH - 1] = Cell::Wall;
    }
    for cell in &mut cells[(HEIGHT - 1) * WIDTH..] {
        *cell = Cell::Wall;
    }
    cells
}

/// The game board: grid, upcoming-piece queue and hold slot
#[derive(Debug, Clone)]
pub struct Board<R: Randomizer = SimpleRng> {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
    queue: PieceQueue<R>,
    hold: HoldSlot,
}

impl<R: Randomizer> Board<R> {
    /// Create an empty bordered board with the full preview window
    pub fn new(rng: R) -> Self {
        Self::with_preview_size(rng, PREVIEW_SIZE)
    }

    /// Create an empty bordered board exposing `preview_size` upcoming kinds
    pub fn with_preview_size(rng: R, preview_size: usize) -> Self {
        Self {
            cells: bordered_cells(),
            queue: PieceQueue::new(rng, preview_size),
            hold: HoldSlot::new(),
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y), `None` if out of bounds
    pub fn cell(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Copy of the whole grid, borders included.
    pub fn cells(&self) -> Grid {
        let mut grid = [[Cell::Empty; WIDTH]; HEIGHT];
        for (row, chunk) in grid.iter_mut().zip(self.cells.chunks_exact(WIDTH)) {
            row.copy_from_slice(chunk);
        }
        grid
    }

    /// True for cells pieces may occupy, i.e. not border and not out of bounds
    pub fn is_in_playable_area(&self, x: i8, y: i8) -> bool {
        x >= 1 && x < BOARD_WIDTH as i8 - 1 && y >= 0 && y < BOARD_HEIGHT as i8 - 1
    }

    /// Overwrite an interior cell. Border and out-of-bounds writes, and
    /// attempts to write a wall, are refused.
    pub fn set_cell(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        if cell == Cell::Wall || !self.is_in_playable_area(x, y) {
            return false;
        }
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Would `piece` collide if it were at `(x, y)` in `rotation`?
    ///
    /// A cell collides when it is out of bounds or the grid cell under it is
    /// not empty (wall or occupied). Never mutates the board.
    pub fn has_collision(&self, piece: &Piece, x: i8, y: i8, rotation: Rotation) -> bool {
        piece
            .cells_at(x, y, rotation)
            .iter()
            .any(|&(cx, cy)| !matches!(self.cell(cx, cy), Some(Cell::Empty)))
    }

    /// Collision at the piece's own pose
    pub fn collides(&self, piece: &Piece) -> bool {
        self.has_collision(piece, piece.x, piece.y, piece.rotation)
    }

    /// Lock a piece into the grid and re-arm hold.
    ///
    /// The caller checks for collision first. Only interior cells are written,
    /// so a bad caller can never damage the border.
    pub fn place(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            if self.is_in_playable_area(x, y) {
                if let Some(idx) = Self::index(x, y) {
                    self.cells[idx] = Cell::Occupied(piece.kind);
                }
            }
        }
        self.hold.rearm();
        debug!(kind = %piece.kind, x = piece.x, y = piece.y, "piece placed");
    }

    /// Every interior column of row `y` is occupied
    fn is_row_full(&self, y: usize) -> bool {
        let start = y * WIDTH;
        self.cells[start + 1..start + WIDTH - 1]
            .iter()
            .all(|cell| matches!(cell, Cell::Occupied(_)))
    }

    /// Remove row `y`, shifting everything above it down by one.
    fn collapse_row(&mut self, y: usize) {
        // Rows above the floor share an identical wall layout, so whole rows
        // can be moved without disturbing the border.
        for row in (1..=y).rev() {
            let src = (row - 1) * WIDTH;
            self.cells.copy_within(src..src + WIDTH, row * WIDTH);
        }
        for cell in &mut self.cells[1..WIDTH - 1] {
            *cell = Cell::Empty;
        }
    }

    /// Clear every full row and return how many went.
    ///
    /// Rows are scanned bottom to top above the floor. After a collapse the
    /// same index is examined again because a new row has shifted into it.
    pub fn clear_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = HEIGHT - 1;
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.collapse_row(row);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        if cleared > 0 {
            info!(lines = cleared, "lines cleared");
        }
        cleared
    }

    /// Resting row of `piece` if dropped straight down from its current pose
    pub fn ghost_y(&self, piece: &Piece) -> i8 {
        let mut y = piece.y;
        while y < BOARD_HEIGHT as i8 && !self.has_collision(piece, piece.x, y + 1, piece.rotation) {
            y += 1;
        }
        y
    }

    /// Pop the next kind from the queue
    pub fn next_piece(&mut self) -> PieceKind {
        self.queue.draw()
    }

    /// Read-only view of the next `min(n, preview_size, len)` kinds
    pub fn peek_pieces(&self, n: usize) -> ArrayVec<PieceKind, PREVIEW_SIZE> {
        self.queue.peek(n)
    }

    pub fn preview(&self) -> ArrayVec<PieceKind, PREVIEW_SIZE> {
        self.queue.preview()
    }

    pub fn preview_size(&self) -> usize {
        self.queue.preview_size()
    }

    /// Put `current` on hold. See [`HoldOutcome`] for the three results.
    pub fn hold_swap(&mut self, current: PieceKind) -> HoldOutcome {
        let outcome = self.hold.swap(current);
        debug!(kind = %current, ?outcome, "hold");
        outcome
    }

    pub fn held_piece(&self) -> Option<PieceKind> {
        self.hold.held()
    }

    pub fn can_hold(&self) -> bool {
        self.hold.can_hold()
    }

    /// Any occupied interior cell in the spawn region
    pub fn is_spawn_blocked(&self) -> bool {
        SPAWN_REGION_Y
            .flat_map(|y| SPAWN_REGION_X.map(move |x| (x, y)))
            .any(|(x, y)| matches!(self.cell(x, y), Some(Cell::Occupied(_))))
    }

    /// Back to an empty bordered grid with a fresh queue and an empty hold slot
    pub fn reset(&mut self) {
        self.cells = bordered_cells();
        self.queue.reset();
        self.hold.clear();
        debug!("board reset");
    }
}

impl Default for Board<SimpleRng> {
    fn default() -> Self {
        Self::new(SimpleRng::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PLAYABLE_HEIGHT, PLAYABLE_WIDTH};

    fn fill_row(board: &mut Board, y: i8, kind: PieceKind) {
        for x in 1..=PLAYABLE_WIDTH as i8 {
            assert!(board.set_cell(x, y, Cell::Occupied(kind)));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::<SimpleRng>::index(0, 0), Some(0));
        assert_eq!(Board::<SimpleRng>::index(11, 0), Some(11));
        assert_eq!(Board::<SimpleRng>::index(0, 1), Some(12));
        assert_eq!(Board::<SimpleRng>::index(11, 23), Some(287));
        assert_eq!(Board::<SimpleRng>::index(-1, 0), None);
        assert_eq!(Board::<SimpleRng>::index(12, 0), None);
        assert_eq!(Board::<SimpleRng>::index(0, 24), None);
    }

    #[test]
    fn new_board_has_border_and_empty_interior() {
        let board = Board::default();
        for y in 0..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                let expected = if board.is_in_playable_area(x, y) {
                    Cell::Empty
                } else {
                    Cell::Wall
                };
                assert_eq!(board.cell(x, y), Some(expected), "({x}, {y})");
            }
        }
        assert_eq!(board.cell(-1, 0), None);
        assert_eq!(board.cell(0, BOARD_HEIGHT as i8), None);
    }

    #[test]
    fn set_cell_refuses_border_and_walls() {
        let mut board = Board::default();
        assert!(!board.set_cell(0, 5, Cell::Occupied(PieceKind::I)));
        assert!(!board.set_cell(5, 23, Cell::Empty));
        assert!(!board.set_cell(5, 5, Cell::Wall));
        assert!(board.set_cell(5, 5, Cell::Occupied(PieceKind::I)));
        assert_eq!(board.cell(0, 5), Some(Cell::Wall));
    }

    #[test]
    fn walls_and_floor_collide() {
        let board = Board::default();
        let piece = Piece::new(PieceKind::I, 1, 5);
        assert!(!board.collides(&piece));
        // I row occupies x..x+3 at y+1
        assert!(board.has_collision(&piece, 0, 5, Rotation::North));
        assert!(board.has_collision(&piece, 8, 5, Rotation::North));
        assert!(board.has_collision(&piece, 1, 22, Rotation::North));
        assert!(!board.has_collision(&piece, 1, 21, Rotation::North));
    }

    #[test]
    fn out_of_bounds_collides() {
        let board = Board::default();
        let piece = Piece::new(PieceKind::O, 5, -1);
        assert!(board.collides(&piece));
    }

    #[test]
    fn place_writes_kind_and_rearms_hold() {
        let mut board = Board::default();
        assert_eq!(board.hold_swap(PieceKind::T), HoldOutcome::Stored);
        assert!(!board.can_hold());

        let piece = Piece::new(PieceKind::O, 4, 20);
        board.place(&piece);
        for (x, y) in piece.cells() {
            assert_eq!(board.cell(x, y), Some(Cell::Occupied(PieceKind::O)));
        }
        assert!(board.can_hold());
        assert!(board.collides(&piece));
    }

    #[test]
    fn place_never_touches_border() {
        let mut board = Board::default();
        board.place(&Piece::new(PieceKind::I, -1, 5));
        assert_eq!(board.cell(0, 6), Some(Cell::Wall));
        assert_eq!(board.cell(1, 6), Some(Cell::Occupied(PieceKind::I)));
    }

    #[test]
    fn clear_single_bottom_row() {
        let mut board = Board::default();
        let bottom = PLAYABLE_HEIGHT as i8 - 1;
        fill_row(&mut board, bottom, PieceKind::I);
        board.set_cell(3, bottom - 1, Cell::Occupied(PieceKind::T));

        assert_eq!(board.clear_lines(), 1);
        assert_eq!(board.cell(3, bottom), Some(Cell::Occupied(PieceKind::T)));
        assert_eq!(board.cell(4, bottom), Some(Cell::Empty));
        assert_eq!(board.cell(3, bottom - 1), Some(Cell::Empty));
        assert_eq!(board.cell(0, bottom), Some(Cell::Wall));
    }

    #[test]
    fn adjacent_full_rows_are_rechecked() {
        let mut board = Board::default();
        let bottom = PLAYABLE_HEIGHT as i8 - 1;
        for y in bottom - 3..=bottom {
            fill_row(&mut board, y, PieceKind::L);
        }
        assert_eq!(board.clear_lines(), 4);
        for y in 0..PLAYABLE_HEIGHT as i8 {
            for x in 1..=PLAYABLE_WIDTH as i8 {
                assert_eq!(board.cell(x, y), Some(Cell::Empty));
            }
        }
    }

    #[test]
    fn partial_row_is_not_cleared() {
        let mut board = Board::default();
        fill_row(&mut board, 10, PieceKind::S);
        board.set_cell(6, 10, Cell::Empty);
        assert_eq!(board.clear_lines(), 0);
    }

    #[test]
    fn full_top_row_clears() {
        let mut board = Board::default();
        fill_row(&mut board, 0, PieceKind::Z);
        assert_eq!(board.clear_lines(), 1);
        assert_eq!(board.cell(5, 0), Some(Cell::Empty));
    }

    #[test]
    fn ghost_rests_on_stack() {
        let mut board = Board::default();
        let piece = Piece::spawn(PieceKind::O);
        // O occupies y..y+1; floor at 23 means it rests with origin at 21
        assert_eq!(board.ghost_y(&piece), 21);

        board.set_cell(SPAWN_X, 15, Cell::Occupied(PieceKind::J));
        assert_eq!(board.ghost_y(&piece), 13);
        assert_eq!(piece.y, SPAWN_Y);
    }

    #[test]
    fn peek_is_idempotent_and_matches_next_piece() {
        let mut board = Board::new(SimpleRng::new(2024));
        let first = board.peek_pieces(3);
        assert_eq!(first, board.peek_pieces(3));
        for kind in first {
            assert_eq!(board.next_piece(), kind);
        }
    }

    #[test]
    fn spawn_region_detection() {
        let mut board = Board::default();
        assert!(!board.is_spawn_blocked());
        board.set_cell(SPAWN_X + 2, SPAWN_Y, Cell::Occupied(PieceKind::I));
        assert!(!board.is_spawn_blocked());
        board.set_cell(SPAWN_X - 1, SPAWN_Y + 1, Cell::Occupied(PieceKind::I));
        assert!(board.is_spawn_blocked());
    }

    #[test]
    fn reset_clears_grid_and_hold() {
        let mut board = Board::default();
        fill_row(&mut board, 20, PieceKind::T);
        board.hold_swap(PieceKind::I);
        board.reset();
        assert_eq!(board.cells(), Board::default().cells());
        assert_eq!(board.held_piece(), None);
        assert!(board.can_hold());
    }

    #[test]
    fn cells_copy_is_detached() {
        let mut board = Board::default();
        let before = board.cells();
        board.set_cell(2, 2, Cell::Occupied(PieceKind::O));
        assert_eq!(before[2][2], Cell::Empty);
        assert_eq!(board.cells()[2][2], Cell::Occupied(PieceKind::O));
    }

    #[test]
    fn extreme_poses_collide_without_overflow() {
        let board = Board::default();
        let piece = Piece::spawn(PieceKind::I);
        for (x, y) in [(126, 0), (i8::MAX, i8::MAX), (i8::MIN, i8::MIN), (4, 125)] {
            for rotation in Rotation::ALL {
                assert!(board.has_collision(&piece, x, y, rotation), "({x}, {y})");
            }
        }
    }
}
