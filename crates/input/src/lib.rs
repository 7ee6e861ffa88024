//! Terminal input (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`]s. Repeat and
//! debounce timing are left to the terminal; every press becomes one command.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
