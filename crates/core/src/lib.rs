//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the game and nothing else. It has no
//! dependency on terminals, input devices or clocks: time enters only as the
//! `Instant` a caller passes in, and randomness only through a [`Randomizer`].
//!
//! # Module Structure
//!
//! - [`pieces`]: shape table and the movable [`Piece`]
//! - [`rng`]: randomizers and the bag-fair [`PieceQueue`]
//! - [`hold`]: the once-per-piece hold slot
//! - [`board`]: bordered grid with collision, placement, line clears, queue and hold
//! - [`scoring`]: line-clear, drop and gravity formulas
//! - [`progression`]: countdown / active / paused / game-over state machine
//! - [`stats`]: rates and percentages derived from progression totals
//! - [`config`]: tunable rules loaded from JSON and the environment
//! - [`snapshot`]: detached read-only views for presenters
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Board, Piece, SimpleRng};
//! use blockfall_core::types::Cell;
//!
//! let mut board = Board::new(SimpleRng::new(7));
//! let kind = board.next_piece();
//! let mut piece = Piece::spawn(kind);
//! assert!(!board.collides(&piece));
//!
//! piece.y = board.ghost_y(&piece);
//! board.place(&piece);
//! let (x, y) = piece.cells()[0];
//! assert_eq!(board.cell(x, y), Some(Cell::Occupied(kind)));
//! assert_eq!(board.clear_lines(), 0);
//! ```

pub mod board;
pub mod config;
pub mod hold;
pub mod pieces;
pub mod progression;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod stats;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Grid};
pub use config::EngineConfig;
pub use hold::{HoldOutcome, HoldSlot};
pub use pieces::{get_shape, shape_at, Piece, PieceShape};
pub use progression::Progression;
pub use rng::{PieceQueue, Randomizer, SimpleRng, ThreadRandomizer};
pub use scoring::{drop_delay_ms, drop_score, line_clear_score};
pub use snapshot::{ActiveSnapshot, GameSnapshot, ProgressionSnapshot};
pub use stats::Statistics;
