//! Terminal presentation.
//!
//! A small, game-oriented rendering layer: [`GameView`] paints a
//! [`GameSnapshot`](blockfall_core::GameSnapshot) onto a [`Canvas`], and
//! [`TerminalRenderer`] flushes canvases to the terminal with crossterm,
//! sending only what changed since the previous frame.

pub mod canvas;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use canvas::{Canvas, Glyph, Style};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff, encode_full, TerminalRenderer};
