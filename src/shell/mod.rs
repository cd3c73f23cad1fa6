//! Terminal shell: screen routing, the event loop and terminal setup.

mod clipboard;
mod controller;
mod screen;
mod screens;
mod widgets;

pub use clipboard::{Clipboard, TerminalClipboard};
pub use controller::{ActiveScreen, Shell, run_shell};
pub use screen::{HomeTab, Screen, ScreenTransition, ShellContext};
pub use screens::{
    ArcheryScreen, AuthScreen, HOUSE_OPPONENT, HomeScreen, LobbyScreen, NavalScreen, PongScreen,
    ThunderScreen,
};
pub use widgets::{Mark, center_rect, plot};

use std::io;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info, instrument};

use crate::config::HubConfig;

/// Runs the terminal UI with `config`.
///
/// Logs go to the configured file so they never draw over the UI.
#[instrument(skip(config))]
pub async fn run_tui(config: HubConfig) -> anyhow::Result<()> {
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(theme = %config.theme(), "Starting Kenny Games TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut shell = Shell::new(*config.theme(), *config.seed());
    let res = run_shell(&mut shell, &mut terminal, config.tick_rate()).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &res {
        error!(error = %e, "Hub exited with an error");
    }
    res
}
