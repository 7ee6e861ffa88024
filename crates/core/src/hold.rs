//! Hold slot - one swap per piece life

use serde::Serialize;

use crate::types::PieceKind;

/// Result of a hold request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "outcome", content = "kind")]
pub enum HoldOutcome {
    /// Hold already used since the last lock; nothing changed.
    Rejected,
    /// The slot was empty; the current kind is now held and nothing comes back.
    Stored,
    /// The current kind is now held and the previously held kind comes back.
    Swapped(PieceKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldSlot {
    held: Option<PieceKind>,
    can_hold: bool,
}

impl HoldSlot {
    pub fn new() -> Self {
        Self {
            held: None,
            can_hold: true,
        }
    }

    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    /// Store `current`, handing back whatever was held before.
    pub fn swap(&mut self, current: PieceKind) -> HoldOutcome {
        if !self.can_hold {
            return HoldOutcome::Rejected;
        }
        self.can_hold = false;
        match self.held.replace(current) {
            Some(previous) => HoldOutcome::Swapped(previous),
            None => HoldOutcome::Stored,
        }
    }

    /// Re-arm after a piece locks.
    pub fn rearm(&mut self) {
        self.can_hold = true;
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for HoldSlot {
    fn default() -> Self {
        Self::new()
    }
}
