//! RNG module - bag-fair piece sequencing
//!
//! Upcoming pieces come from "bags": one shuffled permutation of all seven
//! kinds, appended whole to the queue. Because bags are never split or
//! interleaved, every bag-aligned window of seven draws contains each kind
//! exactly once.
//!
//! The shuffle is injected through [`Randomizer`] so sequencing can be tested
//! with a deterministic source. [`SimpleRng`] is a small LCG for tests and
//! seeded play; [`ThreadRandomizer`] wraps `rand`'s `StdRng`.

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::types::{PieceKind, BAG_SIZE, PREVIEW_SIZE, QUEUE_MIN_LEN};

/// Source of uniformly random bag permutations
pub trait Randomizer {
    /// Shuffle `bag` in place into a uniformly random permutation.
    fn shuffle_bag(&mut self, bag: &mut [PieceKind; BAG_SIZE]);
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Randomizer for SimpleRng {
    fn shuffle_bag(&mut self, bag: &mut [PieceKind; BAG_SIZE]) {
        self.shuffle(bag);
    }
}

/// `rand`-backed randomizer for normal play.
#[derive(Debug, Clone)]
pub struct ThreadRandomizer {
    rng: StdRng,
}

impl ThreadRandomizer {
    /// Seeded from operating system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Randomizer for ThreadRandomizer {
    fn shuffle_bag(&mut self, bag: &mut [PieceKind; BAG_SIZE]) {
        bag.shuffle(&mut self.rng);
    }
}

/// Queue of upcoming piece kinds, refilled one whole bag at a time
#[derive(Debug, Clone)]
pub struct PieceQueue<R: Randomizer = SimpleRng> {
    pending: VecDeque<PieceKind>,
    preview_size: usize,
    rng: R,
}

impl<R: Randomizer> PieceQueue<R> {
    /// Create a queue exposing `preview_size` upcoming kinds (clamped to `1..=PREVIEW_SIZE`).
    pub fn new(rng: R, preview_size: usize) -> Self {
        let mut queue = Self {
            pending: VecDeque::with_capacity(QUEUE_MIN_LEN + BAG_SIZE),
            preview_size: preview_size.clamp(1, PREVIEW_SIZE),
            rng,
        };
        queue.top_up();
        queue
    }

    /// Append fresh bags until the queue holds at least `QUEUE_MIN_LEN` kinds.
    fn top_up(&mut self) {
        while self.pending.len() < QUEUE_MIN_LEN {
            let mut bag = PieceKind::ALL;
            self.rng.shuffle_bag(&mut bag);
            self.pending.extend(bag);
        }
    }

    /// Pop the next kind and keep the queue stocked.
    pub fn draw(&mut self) -> PieceKind {
        loop {
            if let Some(kind) = self.pending.pop_front() {
                self.top_up();
                return kind;
            }
            self.top_up();
        }
    }

    /// Read-only view of the next `min(count, preview_size, len)` kinds.
    pub fn peek(&self, count: usize) -> ArrayVec<PieceKind, PREVIEW_SIZE> {
        let n = count.min(self.preview_size).min(self.pending.len());
        self.pending.iter().take(n).copied().collect()
    }

    /// The full preview window.
    pub fn preview(&self) -> ArrayVec<PieceKind, PREVIEW_SIZE> {
        self.peek(self.preview_size)
    }

    pub fn preview_size(&self) -> usize {
        self.preview_size
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Discard pending kinds and start again from fresh bags.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.top_up();
    }

    /// Get pending kinds for testing/debugging
    #[cfg(test)]
    pub fn pending(&self) -> Vec<PieceKind> {
        self.pending.iter().copied().collect()
    }
}
