//! Terminal blockfall runner (default binary).
//!
//! Polls crossterm input on a fixed 16 ms loop, applies each mapped command
//! straight away, and ticks the game whenever the current drop delay has
//! elapsed. Rendering goes through the canvas-based `term` crate.
//!
//! Environment:
//! - `BLOCKFALL_CONFIG`: JSON engine config file
//! - `BLOCKFALL_SEED`: fixed piece sequence seed
//! - `BLOCKFALL_LOG`: write logs to this file (no logging when unset)
//! - `BLOCKFALL_LOG_LEVEL`: trace, debug, info (default), warn or error

use std::env;
use std::fs::File;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::{info, Level};
use tracing_subscriber::prelude::*;

use blockfall::core::{EngineConfig, Randomizer};
use blockfall::engine::Game;
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{Canvas, GameView, TerminalRenderer, Viewport};

const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    init_logging()?;
    let config = EngineConfig::from_env().context("loading engine config")?;
    let mut game = Game::from_config(config)?;
    info!(?config, "starting");

    let mut term = TerminalRenderer::stdout();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.leave();
    if result.is_ok() {
        println!("{}", game.statistics());
    }
    result
}

fn init_logging() -> Result<()> {
    let Some(path) = env::var("BLOCKFALL_LOG").ok().filter(|p| !p.trim().is_empty()) else {
        return Ok(());
    };
    let level = match env::var("BLOCKFALL_LOG_LEVEL") {
        Ok(name) => Level::from_str(name.trim())
            .map_err(|_| anyhow::anyhow!("unknown BLOCKFALL_LOG_LEVEL {name:?}"))?,
        Err(_) => Level::INFO,
    };
    let file = File::create(&path).with_context(|| format!("creating log file {path}"))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();
    Ok(())
}

fn run<R: Randomizer>(term: &mut TerminalRenderer, game: &mut Game<R>) -> Result<()> {
    let view = GameView::default();
    let mut canvas = Canvas::new(0, 0);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        game.update_time(Instant::now());
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&game.snapshot(), Viewport::new(w, h), &mut canvas);
        term.draw(&canvas)?;

        // Input with timeout until next frame.
        if event::poll(FRAME)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        game.apply(command, Instant::now());
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick at the current drop delay.
        if last_tick.elapsed() >= game.drop_delay() {
            last_tick = Instant::now();
            game.tick(last_tick);
        }
    }
}
