//! Game controller - owns the board, the falling piece and the progression
//!
//! Commands and ticks are the only way in. Every call runs to completion before
//! returning, and readers only ever get copies through [`Game::snapshot`].

use std::time::{Duration, Instant};

use tracing::{debug, trace};

use blockfall_core::types::{Command, EngineError, Phase, PieceKind};
use blockfall_core::{
    Board, EngineConfig, GameSnapshot, HoldOutcome, Piece, Progression, Randomizer, SimpleRng,
    Statistics, ThreadRandomizer,
};

/// What one lock did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: usize,
    /// Line-clear points only; drop points are awarded before the lock.
    pub points: u64,
}

/// Result of [`Game::apply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Not allowed right now, or blocked. Nothing changed.
    Ignored,
    Applied,
    /// The piece locked and the next one spawned.
    Locked(LockEvent),
    /// The command ended the game.
    GameOver,
}

/// Result of [`Game::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused or over; nothing to do.
    Idle,
    /// Countdown still running, with this many ticks left.
    CountdownTick(u8),
    /// Countdown finished and the first piece spawned.
    Started,
    /// Gravity moved the piece down one row.
    Fell,
    Locked(LockEvent),
    GameOver,
}

enum LockResult {
    Continued(LockEvent),
    Ended,
}

#[derive(Debug, Clone)]
pub struct Game<R: Randomizer = SimpleRng> {
    board: Board<R>,
    current: Option<Piece>,
    progression: Progression,
}

impl Game<ThreadRandomizer> {
    /// Build a game from a validated config, seeding from `config.seed` when set
    /// and from OS entropy otherwise.
    pub fn from_config(config: EngineConfig) -> Result<Self, EngineError> {
        let rng = match config.seed {
            Some(seed) => ThreadRandomizer::seeded(seed),
            None => ThreadRandomizer::from_entropy(),
        };
        Self::new(rng, config)
    }
}

impl<R: Randomizer> Game<R> {
    pub fn new(rng: R, config: EngineConfig) -> Result<Self, EngineError> {
        let progression = Progression::new(config)?;
        Ok(Self {
            board: Board::with_preview_size(rng, config.preview_size),
            current: None,
            progression,
        })
    }

    pub fn board(&self) -> &Board<R> {
        &self.board
    }

    /// Direct board access for scenario setup.
    pub fn board_mut(&mut self) -> &mut Board<R> {
        &mut self.board
    }

    pub fn current_piece(&self) -> Option<Piece> {
        self.current
    }

    pub fn ghost_y(&self) -> Option<i8> {
        self.current.map(|piece| self.board.ghost_y(&piece))
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub fn phase(&self) -> Phase {
        self.progression.phase()
    }

    /// Current gravity interval
    pub fn drop_delay(&self) -> Duration {
        self.progression.drop_delay()
    }

    pub fn statistics(&self) -> Statistics {
        self.progression.statistics()
    }

    /// Refresh play time without moving anything, for per-frame clocks.
    pub fn update_time(&mut self, now: Instant) {
        self.progression.update_time(now);
    }

    /// Run one player command.
    pub fn apply(&mut self, command: Command, now: Instant) -> CommandOutcome {
        self.progression.update_time(now);
        match command {
            Command::Pause => applied_if(self.progression.toggle_pause(now)),
            Command::Restart => self.restart(),
            _ => {
                if !self.progression.is_active() {
                    trace!(command = command.as_str(), phase = ?self.phase(), "command ignored");
                    return CommandOutcome::Ignored;
                }
                let Some(piece) = self.current else {
                    return CommandOutcome::Ignored;
                };
                self.apply_to_piece(command, piece, now)
            }
        }
    }

    fn apply_to_piece(&mut self, command: Command, piece: Piece, now: Instant) -> CommandOutcome {
        match command {
            Command::MoveLeft => applied_if(self.try_shift(piece, -1)),
            Command::MoveRight => applied_if(self.try_shift(piece, 1)),
            Command::RotateCw => applied_if(self.try_rotate(piece, true)),
            Command::RotateCcw => applied_if(self.try_rotate(piece, false)),
            Command::SoftDrop => {
                if self.try_fall(piece) {
                    self.progression.add_soft_drop(1);
                    CommandOutcome::Applied
                } else {
                    self.lock(piece, now).into_outcome()
                }
            }
            Command::HardDrop => {
                let mut dropped = piece;
                dropped.y = self.board.ghost_y(&piece);
                let distance = (dropped.y - piece.y) as u32;
                self.progression.add_hard_drop(distance);
                self.lock(dropped, now).into_outcome()
            }
            Command::Hold => self.hold(piece, now),
            Command::Pause | Command::Restart => CommandOutcome::Ignored,
        }
    }

    /// Drive the countdown and gravity. Call once per drop delay.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        self.progression.update_time(now);
        match self.progression.phase() {
            Phase::Countdown => {
                if !self.progression.tick_countdown(now) {
                    return TickOutcome::CountdownTick(self.progression.countdown());
                }
                if self.spawn_next(now) {
                    TickOutcome::Started
                } else {
                    TickOutcome::GameOver
                }
            }
            Phase::Active => match self.current {
                Some(piece) => {
                    if self.try_fall(piece) {
                        return TickOutcome::Fell;
                    }
                    match self.lock(piece, now) {
                        LockResult::Continued(event) => TickOutcome::Locked(event),
                        LockResult::Ended => TickOutcome::GameOver,
                    }
                }
                None => {
                    if self.spawn_next(now) {
                        TickOutcome::Fell
                    } else {
                        TickOutcome::GameOver
                    }
                }
            },
            Phase::Paused | Phase::GameOver => TickOutcome::Idle,
        }
    }

    fn try_shift(&mut self, piece: Piece, dx: i8) -> bool {
        if self
            .board
            .has_collision(&piece, piece.x + dx, piece.y, piece.rotation)
        {
            trace!(dx, "move blocked");
            return false;
        }
        let mut moved = piece;
        moved.move_by(dx, 0);
        self.current = Some(moved);
        true
    }

    fn try_rotate(&mut self, piece: Piece, clockwise: bool) -> bool {
        let target = if clockwise {
            piece.rotation.cw()
        } else {
            piece.rotation.ccw()
        };
        if self.board.has_collision(&piece, piece.x, piece.y, target) {
            trace!(?target, "rotation blocked");
            return false;
        }
        let mut rotated = piece;
        rotated.set_rotation(target);
        self.current = Some(rotated);
        true
    }

    fn try_fall(&mut self, piece: Piece) -> bool {
        if self
            .board
            .has_collision(&piece, piece.x, piece.y + 1, piece.rotation)
        {
            return false;
        }
        let mut fallen = piece;
        fallen.move_by(0, 1);
        self.current = Some(fallen);
        true
    }

    fn hold(&mut self, piece: Piece, now: Instant) -> CommandOutcome {
        match self.board.hold_swap(piece.kind) {
            HoldOutcome::Rejected => CommandOutcome::Ignored,
            HoldOutcome::Stored => {
                if self.spawn_next(now) {
                    CommandOutcome::Applied
                } else {
                    CommandOutcome::GameOver
                }
            }
            HoldOutcome::Swapped(kind) => {
                if self.enter(Piece::spawn(kind), now) {
                    CommandOutcome::Applied
                } else {
                    CommandOutcome::GameOver
                }
            }
        }
    }

    /// Lock, clear, score, then either end the game or spawn the next piece.
    fn lock(&mut self, piece: Piece, now: Instant) -> LockResult {
        self.current = None;
        self.board.place(&piece);
        let lines_cleared = self.board.clear_lines();
        let points = self.progression.add_line_clear(lines_cleared);
        debug!(kind = %piece.kind, lines_cleared, points, "piece locked");

        if self.board.is_spawn_blocked() {
            self.progression.set_game_over(now);
            return LockResult::Ended;
        }
        if !self.spawn_next(now) {
            return LockResult::Ended;
        }
        LockResult::Continued(LockEvent {
            kind: piece.kind,
            lines_cleared,
            points,
        })
    }

    fn spawn_next(&mut self, now: Instant) -> bool {
        let kind = self.board.next_piece();
        if !self.enter(Piece::spawn(kind), now) {
            return false;
        }
        self.progression.record_piece_spawned();
        true
    }

    /// Make `piece` current unless it collides, which ends the game.
    fn enter(&mut self, piece: Piece, now: Instant) -> bool {
        if self.board.collides(&piece) {
            debug!(kind = %piece.kind, "spawn collided");
            self.current = None;
            self.progression.set_game_over(now);
            return false;
        }
        debug!(kind = %piece.kind, "piece spawned");
        self.current = Some(piece);
        true
    }

    fn restart(&mut self) -> CommandOutcome {
        if !self.progression.restart() {
            return CommandOutcome::Ignored;
        }
        self.board.reset();
        self.current = None;
        CommandOutcome::Applied
    }

    /// Detached copy of everything a presenter shows
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            width: self.board.width(),
            height: self.board.height(),
            cells: self.board.cells(),
            active: self.current.map(Into::into),
            ghost_y: self.ghost_y(),
            preview: self.board.preview(),
            held: self.board.held_piece(),
            can_hold: self.board.can_hold(),
            progression: self.progression.snapshot(),
        }
    }
}

impl Default for Game<SimpleRng> {
    fn default() -> Self {
        Self {
            board: Board::default(),
            current: None,
            progression: Progression::default(),
        }
    }
}

impl LockResult {
    fn into_outcome(self) -> CommandOutcome {
        match self {
            LockResult::Continued(event) => CommandOutcome::Locked(event),
            LockResult::Ended => CommandOutcome::GameOver,
        }
    }
}

fn applied_if(changed: bool) -> CommandOutcome {
    if changed {
        CommandOutcome::Applied
    } else {
        CommandOutcome::Ignored
    }
}
