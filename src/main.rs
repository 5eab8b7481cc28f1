//! Pong Loop entry point
//!
//! Runs a headless match between two autopilots at a simulated 60 Hz and
//! prints a JSON summary of how it ended.
//!
//! Usage: `pong-loop [CONFIG.json] [--seed N] [--frames N]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use pong_loop::autopilot::Autopilot;
use pong_loop::runtime::LogSink;
use pong_loop::sim::{Action, MatchState, PcgSpeeds, Side};
use pong_loop::{GameConfig, Store};

/// Simulated frame length (ms)
const FRAME_MS: f64 = 1000.0 / 60.0;
/// Ten simulated minutes
const DEFAULT_FRAMES: u64 = 60 * 60 * 10;

#[derive(Parser, Debug)]
#[command(name = "pong-loop")]
#[command(about = "Headless Pong match between two autopilots")]
struct Cli {
    /// Game config (JSON); defaults are used when omitted
    config: Option<PathBuf>,
    /// Seed for serve speeds and kickoff side
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,
    /// Stop after this many frames even if nobody has won
    #[arg(long, default_value_t = DEFAULT_FRAMES)]
    frames: u64,
}

#[derive(Serialize)]
struct Summary<'a> {
    seed: u64,
    frames: u64,
    elapsed_ms: f64,
    sounds_played: u64,
    reductions: u64,
    state: &'a MatchState,
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    log::info!("Starting demo match with seed {}", cli.seed);

    let mut store = Store::new(config, PcgSpeeds::new(cli.seed), LogSink::new())?;
    let mut pilots = [
        Autopilot::new(Side::Left),
        Autopilot::new(Side::Right).with_sloppiness(0.5),
    ];

    let mut now = 0.0;
    store.frame(now);
    store.dispatch(Action::Start);

    let mut frames = 0;
    while frames < cli.frames {
        for pilot in &mut pilots {
            if let Some(action) = pilot.steer(store.state(), store.config()) {
                store.dispatch(action);
            }
        }
        now += FRAME_MS;
        store.frame(now);
        frames += 1;

        if let MatchState::Won { winner, .. } = store.state() {
            log::info!("{} player won after {:.1}s", winner.as_str(), now / 1000.0);
            break;
        }
    }
    if !matches!(store.state(), MatchState::Won { .. }) {
        log::warn!("Frame limit reached before the match ended");
    }

    let summary = Summary {
        seed: cli.seed,
        frames,
        elapsed_ms: now,
        sounds_played: store.sink().played(),
        reductions: store.reductions(),
        state: store.state(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}
