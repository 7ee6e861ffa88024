//! Progression - lifecycle phase, score, level and play time
//!
//! ```text
//! Countdown --(last tick)--> Active <--(pause)--> Paused
//!                              |
//!                         (spawn blocked)
//!                              v
//!        Countdown <--(restart)-- GameOver
//! ```
//!
//! Time never comes from a clock inside this module: every time-dependent call
//! takes the caller's `now`. Play time accumulates only while `Active`.

use std::time::{Duration, Instant};

use tracing::info;

use crate::config::EngineConfig;
use crate::scoring::{drop_delay_ms, drop_score, line_clear_score};
use crate::snapshot::ProgressionSnapshot;
use crate::stats::Statistics;
use crate::types::{EngineError, Phase};

#[derive(Debug, Clone)]
pub struct Progression {
    config: EngineConfig,
    phase: Phase,
    countdown: u8,
    score: u64,
    level: u32,
    lines_total: u32,
    lines_in_level: u32,
    /// Clear events by size: singles, doubles, triples, four-line clears.
    histogram: [u32; 4],
    pieces: u64,
    /// Play time banked before the current active stretch.
    banked: Duration,
    /// Start of the current active stretch, `None` unless `Active`.
    running_since: Option<Instant>,
    /// Last measured play time.
    elapsed: Duration,
    drop_delay_ms: u32,
}

impl Progression {
    /// Fresh progression in `Countdown`. The config is validated first, so a
    /// zero `lines_per_level` can never reach the leveling loop.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: EngineConfig) -> Self {
        Self {
            config,
            phase: Phase::Countdown,
            countdown: config.countdown_ticks,
            score: 0,
            level: 1,
            lines_total: 0,
            lines_in_level: 0,
            histogram: [0; 4],
            pieces: 0,
            banked: Duration::ZERO,
            running_since: None,
            elapsed: Duration::ZERO,
            drop_delay_ms: drop_delay_ms(1, &config),
        }
    }

    /// Advance the countdown by one tick.
    ///
    /// Returns `true` exactly once: on the tick that enters `Active`.
    pub fn tick_countdown(&mut self, now: Instant) -> bool {
        if self.phase != Phase::Countdown {
            return false;
        }
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown > 0 {
            return false;
        }
        self.phase = Phase::Active;
        self.banked = Duration::ZERO;
        self.running_since = Some(now);
        self.elapsed = Duration::ZERO;
        info!("countdown finished, game active");
        true
    }

    /// Toggle `Active` and `Paused`. Any other phase is left alone.
    pub fn toggle_pause(&mut self, now: Instant) -> bool {
        match self.phase {
            Phase::Active => {
                self.update_time(now);
                self.banked = self.elapsed;
                self.running_since = None;
                self.phase = Phase::Paused;
                info!(elapsed_ms = self.elapsed.as_millis() as u64, "paused");
                true
            }
            Phase::Paused => {
                // Paused time is never banked, so resuming shifts the origin.
                self.running_since = Some(now);
                self.phase = Phase::Active;
                info!("resumed");
                true
            }
            Phase::Countdown | Phase::GameOver => false,
        }
    }

    /// Refresh the play time. No effect outside `Active`.
    pub fn update_time(&mut self, now: Instant) {
        if let (Phase::Active, Some(since)) = (self.phase, self.running_since) {
            self.elapsed = self.banked + now.saturating_duration_since(since);
        }
    }

    /// End the game, taking a final time measurement. Only from `Active`.
    pub fn set_game_over(&mut self, now: Instant) -> bool {
        if self.phase != Phase::Active {
            return false;
        }
        self.update_time(now);
        self.running_since = None;
        self.phase = Phase::GameOver;
        info!(
            score = self.score,
            level = self.level,
            lines = self.lines_total,
            "game over"
        );
        true
    }

    /// Start over from the countdown. Only from `GameOver`.
    pub fn restart(&mut self) -> bool {
        if self.phase != Phase::GameOver {
            return false;
        }
        *self = Self::with_valid_config(self.config);
        info!("restart");
        true
    }

    /// Score a clear of `lines` rows and advance the level counter.
    ///
    /// Returns the points awarded. Counts outside 1-4 and calls outside
    /// `Active` award nothing.
    pub fn add_line_clear(&mut self, lines: usize) -> u64 {
        if self.phase != Phase::Active || !(1..=4).contains(&lines) {
            return 0;
        }
        let points = line_clear_score(lines, self.level);
        self.score = self.score.saturating_add(points);
        self.histogram[lines - 1] += 1;

        let lines = lines as u32;
        self.lines_total += lines;
        self.lines_in_level += lines;
        while self.lines_in_level >= self.config.lines_per_level {
            self.lines_in_level -= self.config.lines_per_level;
            self.level += 1;
            self.drop_delay_ms = drop_delay_ms(self.level, &self.config);
            info!(level = self.level, drop_delay_ms = self.drop_delay_ms, "level up");
        }
        points
    }

    /// Points for cells moved down by a manual soft drop
    pub fn add_soft_drop(&mut self, cells: u32) -> u64 {
        self.add_drop(cells, false)
    }

    /// Points for cells traveled by a hard drop
    pub fn add_hard_drop(&mut self, cells: u32) -> u64 {
        self.add_drop(cells, true)
    }

    fn add_drop(&mut self, cells: u32, hard: bool) -> u64 {
        if self.phase != Phase::Active {
            return 0;
        }
        let points = drop_score(cells, hard);
        self.score = self.score.saturating_add(points);
        points
    }

    pub fn record_piece_spawned(&mut self) {
        if self.phase == Phase::Active {
            self.pieces += 1;
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn countdown(&self) -> u8 {
        self.countdown
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_total(&self) -> u32 {
        self.lines_total
    }

    pub fn lines_in_level(&self) -> u32 {
        self.lines_in_level
    }

    pub fn histogram(&self) -> [u32; 4] {
        self.histogram
    }

    pub fn pieces(&self) -> u64 {
        self.pieces
    }

    /// Play time as of the last [`update_time`](Self::update_time)
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn drop_delay_ms(&self) -> u32 {
        self.drop_delay_ms
    }

    pub fn drop_delay(&self) -> Duration {
        Duration::from_millis(u64::from(self.drop_delay_ms))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn statistics(&self) -> Statistics {
        Statistics {
            elapsed: self.elapsed,
            pieces: self.pieces,
            lines_total: self.lines_total,
            lines_in_level: self.lines_in_level,
            lines_per_level: self.config.lines_per_level,
            histogram: self.histogram,
        }
    }

    pub fn snapshot(&self) -> ProgressionSnapshot {
        ProgressionSnapshot {
            phase: self.phase,
            countdown: self.countdown,
            score: self.score,
            level: self.level,
            lines_total: self.lines_total,
            lines_in_level: self.lines_in_level,
            histogram: self.histogram,
            pieces: self.pieces,
            elapsed_ms: self.elapsed.as_millis() as u64,
            drop_delay_ms: self.drop_delay_ms,
        }
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::with_valid_config(EngineConfig::default())
    }
}
