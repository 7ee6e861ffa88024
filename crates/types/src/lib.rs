//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used by every other blockfall crate.
//! All types are plain data with no behavior beyond small conversions, so they can
//! be used from the engine, the terminal front-end and tests alike.
//!
//! # Board Dimensions
//!
//! The grid carries its own border: one wall column on each side and one floor
//! row at the bottom. Coordinates are `(x, y)` with `x` growing to the right and
//! `y` growing downward.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `PLAYABLE_WIDTH` | 10 | Interior columns |
//! | `PLAYABLE_HEIGHT` | 23 | Interior rows (row 0 is above the spawn row) |
//! | `BOARD_WIDTH` | 12 | Interior + two side walls |
//! | `BOARD_HEIGHT` | 24 | Interior + floor |
//! | `SPAWN_X`, `SPAWN_Y` | 5, 1 | Origin of freshly spawned pieces |
//!
//! # Progression Constants
//!
//! | Constant | Value |
//! |----------|-------|
//! | `LINE_CLEAR_POINTS` | 100 / 300 / 500 / 800, times level |
//! | `SOFT_DROP_POINTS` | 1 per cell |
//! | `HARD_DROP_POINTS` | 2 per cell |
//! | `LINES_PER_LEVEL` | 10 |
//! | `INITIAL_DROP_DELAY_MS` | 1000 |
//! | `DROP_DELAY_STEP_MS` | 100 per level |
//! | `MIN_DROP_DELAY_MS` | 100 |
//! | `COUNTDOWN_TICKS` | 3 |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, PieceKind, Rotation, BOARD_WIDTH};
//!
//! let kind = PieceKind::try_from(5).unwrap();
//! assert_eq!(kind, PieceKind::T);
//! assert!(PieceKind::try_from(7).is_err());
//!
//! assert_eq!(Rotation::North.cw(), Rotation::East);
//! assert!(Rotation::try_from(4).is_err());
//!
//! let cmd: Command = "hardDrop".parse().unwrap();
//! assert_eq!(cmd, Command::HardDrop);
//! assert_eq!(BOARD_WIDTH, 12);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Interior columns available to pieces.
pub const PLAYABLE_WIDTH: u8 = 10;

/// Interior rows available to pieces.
pub const PLAYABLE_HEIGHT: u8 = 23;

/// Total grid width including both side walls.
pub const BOARD_WIDTH: u8 = PLAYABLE_WIDTH + 2;

/// Total grid height including the floor row.
pub const BOARD_HEIGHT: u8 = PLAYABLE_HEIGHT + 1;

/// Spawn origin column.
pub const SPAWN_X: i8 = 5;

/// Spawn origin row.
pub const SPAWN_Y: i8 = 1;

/// Number of upcoming pieces exposed by the preview.
pub const PREVIEW_SIZE: usize = 4;

/// The queue is topped up with a fresh bag whenever it drops below this length.
pub const QUEUE_MIN_LEN: usize = PREVIEW_SIZE * 2;

/// Number of piece kinds, and therefore the size of one bag.
pub const BAG_SIZE: usize = 7;

/// Base points for clearing 1, 2, 3 and 4 rows at once. Multiplied by level.
pub const LINE_CLEAR_POINTS: [u64; 4] = [100, 300, 500, 800];

/// Points per cell of a manual soft drop.
pub const SOFT_DROP_POINTS: u64 = 1;

/// Points per cell traveled by a hard drop.
pub const HARD_DROP_POINTS: u64 = 2;

/// Cleared rows needed to advance one level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Gravity interval at level 1.
pub const INITIAL_DROP_DELAY_MS: u32 = 1000;

/// Gravity interval reduction per level.
pub const DROP_DELAY_STEP_MS: u32 = 100;

/// Fastest gravity interval.
pub const MIN_DROP_DELAY_MS: u32 = 100;

/// Countdown ticks before play starts.
pub const COUNTDOWN_TICKS: u8 = 3;

/// Errors raised for caller bugs (invalid raw input).
///
/// Normal gameplay outcomes such as collisions or a rejected hold are never
/// reported through this type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("invalid piece kind: {0}")]
    InvalidPieceKind(u8),
    #[error("invalid rotation state: {0}")]
    InvalidRotation(u8),
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Color of border cells.
pub const WALL_COLOR: Rgb = Rgb::new(64, 64, 64);

/// The seven piece kinds
///
/// Raw indices are stable and used when a kind arrives as a plain integer:
/// I=0, J=1, L=2, O=3, S=4, T=5, Z=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in raw-index order. This is also the unshuffled bag.
    pub const ALL: [PieceKind; BAG_SIZE] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Display color of the kind
    ///
    /// ```
    /// use blockfall_types::{PieceKind, Rgb};
    ///
    /// assert_eq!(PieceKind::T.color(), Rgb::new(160, 32, 240));
    /// ```
    pub fn color(self) -> Rgb {
        match self {
            PieceKind::I => Rgb::new(0, 255, 255),
            PieceKind::J => Rgb::new(0, 0, 255),
            PieceKind::L => Rgb::new(255, 165, 0),
            PieceKind::O => Rgb::new(255, 255, 0),
            PieceKind::S => Rgb::new(0, 255, 0),
            PieceKind::T => Rgb::new(160, 32, 240),
            PieceKind::Z => Rgb::new(255, 0, 0),
        }
    }

    pub fn letter(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }
}

impl TryFrom<u8> for PieceKind {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        PieceKind::ALL
            .get(value as usize)
            .copied()
            .ok_or(EngineError::InvalidPieceKind(value))
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Rotation states, numbered 0..=3 clockwise from the spawn orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Rotate clockwise (index + 1 mod 4)
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::West.cw(), Rotation::North);
    /// ```
    pub fn cw(self) -> Self {
        Self::ALL[(self.index() + 1) % 4]
    }

    /// Rotate counter-clockwise (index + 3 mod 4)
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.ccw(), Rotation::West);
    /// ```
    pub fn ccw(self) -> Self {
        Self::ALL[(self.index() + 3) % 4]
    }
}

impl TryFrom<u8> for Rotation {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rotation::ALL
            .get(value as usize)
            .copied()
            .ok_or(EngineError::InvalidRotation(value))
    }
}

/// A cell of the board grid
///
/// Walls are pre-filled at construction and never change. Only interior cells
/// move between `Empty` and `Occupied`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Occupied(PieceKind),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Display color, `None` for empty cells.
    pub fn color(self) -> Option<Rgb> {
        match self {
            Cell::Empty => None,
            Cell::Wall => Some(WALL_COLOR),
            Cell::Occupied(kind) => Some(kind.color()),
        }
    }
}

/// Discrete, already-debounced player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Rotate piece clockwise in place
    RotateCw,
    /// Rotate piece counter-clockwise in place
    RotateCcw,
    /// Move piece one row down (scores, locks when blocked)
    SoftDrop,
    /// Drop piece to its ghost row and lock
    HardDrop,
    /// Swap the current piece with the hold slot
    Hold,
    /// Toggle between active and paused
    Pause,
    /// Start over after game over
    Restart,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::Hold => "hold",
            Command::Pause => "pause",
            Command::Restart => "restart",
        }
    }
}

impl FromStr for Command {
    type Err = EngineError;

    /// Parse a command name (case-insensitive camelCase).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "moveleft" => Ok(Command::MoveLeft),
            "moveright" => Ok(Command::MoveRight),
            "rotatecw" => Ok(Command::RotateCw),
            "rotateccw" => Ok(Command::RotateCcw),
            "softdrop" => Ok(Command::SoftDrop),
            "harddrop" => Ok(Command::HardDrop),
            "hold" => Ok(Command::Hold),
            "pause" => Ok(Command::Pause),
            "restart" => Ok(Command::Restart),
            _ => Err(EngineError::UnknownCommand(s.to_string())),
        }
    }
}

/// Lifecycle phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Countdown,
    Active,
    Paused,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Countdown => "countdown",
            Phase::Active => "active",
            Phase::Paused => "paused",
            Phase::GameOver => "gameOver",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_includes_border() {
        assert_eq!(BOARD_WIDTH, 12);
        assert_eq!(BOARD_HEIGHT, 24);
        assert_eq!(QUEUE_MIN_LEN, 8);
    }

    #[test]
    fn piece_kind_raw_indices_are_stable() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(PieceKind::try_from(i as u8), Ok(*kind));
        }
        assert_eq!(
            PieceKind::try_from(7),
            Err(EngineError::InvalidPieceKind(7))
        );
        assert_eq!(
            PieceKind::try_from(255),
            Err(EngineError::InvalidPieceKind(255))
        );
    }

    #[test]
    fn rotation_wraps_both_ways() {
        let mut r = Rotation::North;
        for _ in 0..4 {
            r = r.cw();
        }
        assert_eq!(r, Rotation::North);
        assert_eq!(Rotation::North.ccw().cw(), Rotation::North);
        assert_eq!(Rotation::try_from(3), Ok(Rotation::West));
        assert_eq!(Rotation::try_from(4), Err(EngineError::InvalidRotation(4)));
    }

    #[test]
    fn cell_colors() {
        assert_eq!(Cell::Empty.color(), None);
        assert_eq!(Cell::Wall.color(), Some(WALL_COLOR));
        assert_eq!(
            Cell::Occupied(PieceKind::O).color(),
            Some(Rgb::new(255, 255, 0))
        );
        assert!(Cell::default().is_empty());
    }

    #[test]
    fn command_names_round_trip_through_parse() {
        for cmd in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::RotateCw,
            Command::RotateCcw,
            Command::SoftDrop,
            Command::HardDrop,
            Command::Hold,
            Command::Pause,
            Command::Restart,
        ] {
            assert_eq!(cmd.as_str().parse::<Command>(), Ok(cmd));
        }
        assert!(matches!(
            "jump".parse::<Command>(),
            Err(EngineError::UnknownCommand(_))
        ));
    }

    #[test]
    fn serde_names() {
        assert_eq!(serde_json::to_string(&PieceKind::T).unwrap(), "\"t\"");
        assert_eq!(serde_json::to_string(&Phase::GameOver).unwrap(), "\"gameOver\"");
        assert_eq!(
            serde_json::to_string(&Command::HardDrop).unwrap(),
            "\"hardDrop\""
        );
    }
}
