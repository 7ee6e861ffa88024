//! Snapshot module - detached, read-only views of a game for presenters
//!
//! Everything here is plain data copied out of the live board and progression,
//! so a renderer holding a snapshot never sees a later mutation.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::board::Grid;
use crate::pieces::Piece;
use crate::types::{Cell, Phase, PieceKind, Rotation, PREVIEW_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl ActiveSnapshot {
    /// Board-space cells of the snapshotted pose
    pub fn cells(&self) -> [(i8, i8); 4] {
        Piece::from(*self).cells()
    }
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

impl From<ActiveSnapshot> for Piece {
    fn from(value: ActiveSnapshot) -> Self {
        let mut piece = Piece::new(value.kind, value.x, value.y);
        piece.set_rotation(value.rotation);
        piece
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct ProgressionSnapshot {
    pub phase: Phase,
    pub countdown: u8,
    pub score: u64,
    pub level: u32,
    pub lines_total: u32,
    pub lines_in_level: u32,
    pub histogram: [u32; 4],
    pub pieces: u64,
    pub elapsed_ms: u64,
    pub drop_delay_ms: u32,
}

/// Everything a presenter needs for one frame, detached from the live game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    pub cells: Grid,
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub preview: ArrayVec<PieceKind, PREVIEW_SIZE>,
    pub held: Option<PieceKind>,
    pub can_hold: bool,
    pub progression: ProgressionSnapshot,
}

impl GameSnapshot {
    /// Cell at `(x, y)`, `None` out of bounds
    pub fn cell(&self, x: i8, y: i8) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.cells
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
    }

    /// The active piece's cells at its ghost row
    pub fn ghost_cells(&self) -> Option<[(i8, i8); 4]> {
        let active = self.active?;
        let ghost_y = self.ghost_y?;
        Some(Piece::from(active).cells_at(active.x, ghost_y, active.rotation))
    }

    pub fn phase(&self) -> Phase {
        self.progression.phase
    }

    pub fn playable(&self) -> bool {
        self.progression.phase == Phase::Active
    }
}
