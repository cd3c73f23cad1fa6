//! Command-line interface for kenny_games.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_FILE;
use crate::games::GameId;
use crate::theme::Theme;

/// Kenny Games - casual mini-games in the terminal
#[derive(Parser, Debug)]
#[command(name = "kenny_games")]
#[command(about = "Casual mini-games hub for the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the terminal UI
    Play {
        /// Path to the config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Theme override (emerald, blue, purple, pink)
        #[arg(long)]
        theme: Option<Theme>,

        /// Seed for reproducible matches
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Play one match headlessly and print the result
    Simulate {
        /// Game to play (pong, naval, thunder, archery)
        game: GameId,

        /// Seed for reproducible matches
        #[arg(long)]
        seed: Option<u64>,
    },
}
