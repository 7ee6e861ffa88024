//! Game controller
//!
//! [`Game`] wires discrete [`Command`](blockfall_types::Command)s and periodic
//! ticks onto the core board and progression. It owns the falling piece and
//! decides when to spawn and lock; the rules themselves live in
//! `blockfall-core`.
//!
//! ```
//! use std::time::Instant;
//!
//! use blockfall_core::{EngineConfig, SimpleRng};
//! use blockfall_engine::{CommandOutcome, Game, TickOutcome};
//! use blockfall_types::{Command, Phase};
//!
//! let now = Instant::now();
//! let mut game = Game::new(SimpleRng::new(1), EngineConfig::default()).unwrap();
//! while game.tick(now) != TickOutcome::Started {}
//! assert_eq!(game.phase(), Phase::Active);
//!
//! assert!(matches!(game.apply(Command::HardDrop, now), CommandOutcome::Locked(_)));
//! assert!(game.progression().score() > 0);
//! ```

pub mod game;

pub use game::{CommandOutcome, Game, LockEvent, TickOutcome};
