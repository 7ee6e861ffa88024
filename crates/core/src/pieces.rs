//! Pieces module - piece geometry and the movable piece instance
//!
//! Every kind has four rotation states. Each state is four `(x, y)` offsets
//! inside a 4x4 frame whose top-left corner is the piece origin. The table is
//! immutable static data; nothing here knows about the board, so moves and
//! rotations are unchecked and collision is left to [`crate::Board`].

use crate::types::{EngineError, PieceKind, Rgb, Rotation, SPAWN_X, SPAWN_Y};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Shape table indexed by `[kind][rotation]`.
const SHAPES: [[PieceShape; 4]; 7] = [
    // I
    [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(1, 0), (1, 1), (1, 2), (1, 3)],
    ],
    // J
    [
        [(0, 1), (1, 1), (2, 1), (2, 0)],
        [(1, 0), (1, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 2)],
        [(1, 0), (1, 1), (1, 2), (0, 0)],
    ],
    // L
    [
        [(0, 1), (1, 1), (2, 1), (2, 2)],
        [(1, 0), (1, 1), (1, 2), (0, 2)],
        [(0, 1), (1, 1), (2, 1), (0, 0)],
        [(1, 0), (1, 1), (1, 2), (2, 0)],
    ],
    // O (identical in every state)
    [
        [(0, 0), (0, 1), (1, 0), (1, 1)],
        [(0, 0), (0, 1), (1, 0), (1, 1)],
        [(0, 0), (0, 1), (1, 0), (1, 1)],
        [(0, 0), (0, 1), (1, 0), (1, 1)],
    ],
    // S
    [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(0, 0), (0, 1), (1, 1), (1, 2)],
    ],
    // T
    [
        [(1, 0), (0, 1), (1, 1), (2, 1)],
        [(1, 0), (0, 1), (1, 1), (1, 2)],
        [(0, 1), (1, 1), (2, 1), (1, 2)],
        [(1, 0), (1, 1), (2, 1), (1, 2)],
    ],
    // Z
    [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(1, 0), (0, 1), (1, 1), (0, 2)],
    ],
];

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    SHAPES[kind.index()][rotation.index()]
}

/// Shape lookup from a raw rotation index.
///
/// Rejects rotation indices outside `0..=3` instead of wrapping them.
pub fn shape_at(kind: PieceKind, rotation: u8) -> Result<PieceShape, EngineError> {
    let rotation = Rotation::try_from(rotation)?;
    Ok(get_shape(kind, rotation))
}

/// A piece on (or about to enter) the board
///
/// Plain `Copy` data: duplicating a piece never shares state with the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece at `(x, y)` in rotation state 0
    pub fn new(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x,
            y,
        }
    }

    /// Create a piece at the spawn origin
    pub fn spawn(kind: PieceKind) -> Self {
        Self::new(kind, SPAWN_X, SPAWN_Y)
    }

    /// Create a piece from a raw kind index, rejecting values outside `0..7`.
    pub fn from_raw(kind: u8, x: i8, y: i8) -> Result<Self, EngineError> {
        Ok(Self::new(PieceKind::try_from(kind)?, x, y))
    }

    /// Offsets for the current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Board-space cells of the current pose
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.cells_at(self.x, self.y, self.rotation)
    }

    /// Board-space cells of a hypothetical pose of this piece
    ///
    /// Coordinates saturate at the `i8` limits, which lie far outside any
    /// board, so an extreme pose still reads as out of bounds.
    pub fn cells_at(&self, x: i8, y: i8, rotation: Rotation) -> [(i8, i8); 4] {
        get_shape(self.kind, rotation)
            .map(|(dx, dy)| (x.saturating_add(dx), y.saturating_add(dy)))
    }

    pub fn color(&self) -> Rgb {
        self.kind.color()
    }

    pub fn rotate_cw(&mut self) {
        self.rotation = self.rotation.cw();
    }

    pub fn rotate_ccw(&mut self) {
        self.rotation = self.rotation.ccw();
    }

    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    /// Translate the origin, saturating at the `i8` limits. No bounds checking.
    pub fn move_by(&mut self, dx: i8, dy: i8) {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
    }

    pub fn set_position(&mut self, x: i8, y: i8) {
        self.x = x;
        self.y = y;
    }
}
