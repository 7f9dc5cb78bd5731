//! Flash Match entry point
//!
//! Loads the deck, sets up the terminal and runs the fixed-rate game loop.
//! Logs go to stderr; run with `RUST_LOG=info 2>flash-match.log` to keep them
//! off the game screen.

use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;

use flash_match::deck::load_deck;
use flash_match::renderer::{Surface, TerminalSurface, render_frame};
use flash_match::sim::{GameState, tick};
use flash_match::{Args, Layout};

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Flash Match starting...");
    log::info!("Config: {}", serde_json::to_string(&args)?);

    let cards = load_deck(&args.deck)?;
    let seed = args.seed.unwrap_or_else(clock_seed);

    let mut surface = TerminalSurface::enter().context("failed to set up the terminal")?;
    let layout = Layout::from_window(surface.size());
    let mut state = GameState::new(
        &cards,
        |text| surface.text_size(text),
        layout,
        args.speed,
        args.match_policy(),
        seed,
    )?;

    run(&mut surface, &mut state, args.fps)?;
    drop(surface);

    let engine = &state.engine;
    log::info!(
        "Finished after {} ticks: {} / {} matched, score {}",
        state.time_ticks,
        engine.progress,
        engine.total(),
        engine.score
    );
    Ok(())
}

/// Fixed-rate loop: input, transitions and physics, then draw; until quit
fn run(surface: &mut TerminalSurface, state: &mut GameState, fps: u32) -> anyhow::Result<()> {
    let frame = Duration::from_secs_f64(1.0 / f64::from(fps));
    log::info!(
        "Running at {} steps/s in a {}x{} terminal",
        fps,
        state.layout.window.x,
        state.layout.window.y
    );

    loop {
        let started = Instant::now();

        let input = surface.poll_input()?;
        let outcome = tick(state, &input);
        if outcome.quit {
            log::info!("Quit requested");
            return Ok(());
        }
        render_frame(surface, state)?;

        if let Some(rest) = frame.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }
}

