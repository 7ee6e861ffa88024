//! Scoring module - line clear, drop and gravity rules
//!
//! Line clears pay a fixed base per simultaneous-clear count, multiplied by the
//! current level. Manual drops pay per cell. There are no combo, back-to-back
//! or T-spin bonuses.

use crate::config::EngineConfig;
use crate::types::{HARD_DROP_POINTS, LINE_CLEAR_POINTS, SOFT_DROP_POINTS};

/// Points for clearing `lines` rows at once (1-4) at `level` (1-based).
/// Any other line count scores nothing.
pub fn line_clear_score(lines: usize, level: u32) -> u64 {
    match lines {
        1..=4 => LINE_CLEAR_POINTS[lines - 1].saturating_mul(u64::from(level)),
        _ => 0,
    }
}

/// Calculate drop score
/// soft drop: +1 per cell
/// hard drop: +2 per cell
pub fn drop_score(cells: u32, is_hard_drop: bool) -> u64 {
    let per_cell = if is_hard_drop {
        HARD_DROP_POINTS
    } else {
        SOFT_DROP_POINTS
    };
    u64::from(cells) * per_cell
}

/// Gravity interval for a level: `max(min, initial - (level - 1) * step)`
pub fn drop_delay_ms(level: u32, config: &EngineConfig) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(config.drop_delay_step_ms);
    config
        .initial_drop_delay_ms
        .saturating_sub(reduction)
        .max(config.min_drop_delay_ms)
}
