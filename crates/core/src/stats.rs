//! Derived statistics
//!
//! Rates and percentages are computed from stored totals on demand; nothing
//! here is kept as mutable state.

use std::fmt;
use std::time::Duration;

/// Read-only totals taken from a [`Progression`](crate::Progression)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statistics {
    pub elapsed: Duration,
    pub pieces: u64,
    pub lines_total: u32,
    pub lines_in_level: u32,
    pub lines_per_level: u32,
    pub histogram: [u32; 4],
}

impl Statistics {
    /// Number of clear events of any size
    pub fn clear_events(&self) -> u32 {
        self.histogram.iter().sum()
    }

    pub fn lines_until_next_level(&self) -> u32 {
        self.lines_per_level.saturating_sub(self.lines_in_level)
    }

    pub fn lines_per_second(&self) -> f64 {
        per_second(u64::from(self.lines_total), self.elapsed)
    }

    pub fn pieces_per_second(&self) -> f64 {
        per_second(self.pieces, self.elapsed)
    }

    /// Share of clear events that removed four rows, rounded down.
    /// `None` before the first clear.
    pub fn tetris_percent(&self) -> Option<u32> {
        match self.clear_events() {
            0 => None,
            events => Some(self.histogram[3] * 100 / events),
        }
    }

    /// Play time as `MM:SS`
    pub fn format_elapsed(&self) -> String {
        format_mm_ss(self.elapsed)
    }
}

fn per_second(count: u64, elapsed: Duration) -> f64 {
    if elapsed.is_zero() {
        return 0.0;
    }
    count as f64 / elapsed.as_secs_f64()
}

/// Whole minutes and seconds, truncated
pub fn format_mm_ss(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Time: {}", self.format_elapsed())?;
        writeln!(f, "Pieces: {}", self.pieces)?;
        write!(f, "Lines: {}", self.lines_total)?;
        if let Some(percent) = self.tetris_percent() {
            writeln!(f)?;
            writeln!(f, "Singles: {}", self.histogram[0])?;
            writeln!(f, "Doubles: {}", self.histogram[1])?;
            writeln!(f, "Triples: {}", self.histogram[2])?;
            writeln!(f, "Tetrises: {}", self.histogram[3])?;
            write!(f, "Tetris%: {percent}%")?;
        }
        Ok(())
    }
}
