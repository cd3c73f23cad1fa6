//! Kenny Games - Unified CLI
//!
//! Terminal mini-games hub with a headless simulation mode.

#![warn(missing_docs)]

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use kenny_games::{Cli, Command, GameId, HubConfig, Theme, run_tui, simulate};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            theme,
            seed,
        } => run_play(config, theme, seed).await,
        Command::Simulate { game, seed } => run_simulate(game, seed),
    }
}

/// Run the terminal UI
#[instrument(skip_all, fields(config_path = %config.display()))]
async fn run_play(config: PathBuf, theme: Option<Theme>, seed: Option<u64>) -> Result<()> {
    let mut hub_config = HubConfig::load_or_default(&config)?;
    if let Some(theme) = theme {
        hub_config = hub_config.with_theme(theme);
    }
    if let Some(seed) = seed {
        hub_config = hub_config.with_seed(seed);
    }
    run_tui(hub_config).await
}

/// Play one headless match and print the summary
#[instrument]
fn run_simulate(game: GameId, seed: Option<u64>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(%game, "Starting simulation");
    let report = simulate(game, seed);
    println!("{report}");
    Ok(())
}
