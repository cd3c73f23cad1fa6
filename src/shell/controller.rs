//! Shell controller: the screen state machine and the terminal event loop.

use std::time::Instant;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::{Frame, Terminal, backend::Backend};
use tokio::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::games::GameId;
use crate::shell::clipboard::{Clipboard, TerminalClipboard};
use crate::shell::screen::{HomeTab, Screen, ScreenTransition, ShellContext};
use crate::shell::screens::{
    ArcheryScreen, AuthScreen, HomeScreen, LobbyScreen, NavalScreen, PongScreen, ThunderScreen,
};
use crate::theme::Theme;

/// Active screen in the hub state machine.
#[derive(Debug)]
pub enum ActiveScreen {
    /// Sign-in form.
    Auth(AuthScreen),
    /// Tabbed home.
    Home(HomeScreen),
    /// Pre-game lobby.
    Lobby(LobbyScreen),
    /// Rosé Pong match.
    Pong(PongScreen),
    /// Naval match.
    Naval(NavalScreen),
    /// Thunder duel.
    Thunder(ThunderScreen),
    /// Archery match.
    Archery(ArcheryScreen),
}

impl ActiveScreen {
    fn as_screen(&self) -> &dyn Screen {
        match self {
            Self::Auth(s) => s,
            Self::Home(s) => s,
            Self::Lobby(s) => s,
            Self::Pong(s) => s,
            Self::Naval(s) => s,
            Self::Thunder(s) => s,
            Self::Archery(s) => s,
        }
    }

    fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::Auth(s) => s,
            Self::Home(s) => s,
            Self::Lobby(s) => s,
            Self::Pong(s) => s,
            Self::Naval(s) => s,
            Self::Thunder(s) => s,
            Self::Archery(s) => s,
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Auth(_) => "auth",
            Self::Home(_) => "home",
            Self::Lobby(_) => "lobby",
            Self::Pong(_) => "pong",
            Self::Naval(_) => "naval",
            Self::Thunder(_) => "thunder",
            Self::Archery(_) => "archery",
        }
    }
}

/// The hub: session context plus the screen on display.
///
/// Drive it with [`Shell::handle_key`] and [`Shell::tick`]; both return
/// `false` once the user has quit.
#[derive(Debug)]
pub struct Shell {
    context: ShellContext,
    screen: ActiveScreen,
    clipboard: Box<dyn Clipboard>,
}

impl Shell {
    /// Starts on the sign-in screen, copying through the terminal on stdout.
    pub fn new(theme: Theme, seed: Option<u64>) -> Self {
        Self::with_clipboard(theme, seed, Box::new(TerminalClipboard::stdout()))
    }

    /// Starts on the sign-in screen with a custom clipboard.
    #[instrument(skip(clipboard))]
    pub fn with_clipboard(theme: Theme, seed: Option<u64>, clipboard: Box<dyn Clipboard>) -> Self {
        info!("Creating Shell");
        Self {
            context: ShellContext::new(theme, seed),
            screen: ActiveScreen::Auth(AuthScreen::new()),
            clipboard,
        }
    }

    /// Session context.
    pub fn context(&self) -> &ShellContext {
        &self.context
    }

    /// Screen on display.
    pub fn screen(&self) -> &ActiveScreen {
        &self.screen
    }

    /// Draws the active screen.
    pub fn render(&self, frame: &mut Frame) {
        self.screen.as_screen().render(frame, &self.context);
    }

    /// Routes a key press to the active screen.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let transition = self.screen.as_screen_mut().handle_key(key, &self.context);
        self.apply(transition)
    }

    /// Feeds elapsed time to the active screen.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        let transition = self.screen.as_screen_mut().tick(elapsed);
        self.apply(transition)
    }

    fn apply(&mut self, transition: ScreenTransition) -> bool {
        if transition == ScreenTransition::Stay {
            return true;
        }
        debug!(transition = ?transition, from = self.screen.name(), "Applying screen transition");
        let next = match transition {
            ScreenTransition::Stay => return true,
            ScreenTransition::SetTheme(theme) => {
                self.context.theme_mut().set_theme(theme);
                return true;
            }
            ScreenTransition::CopyToClipboard(text) => {
                if let Err(e) = self.clipboard.copy(&text) {
                    warn!(error = %e, "Clipboard write failed");
                }
                return true;
            }
            ScreenTransition::SwitchTab(tab) => {
                if let ActiveScreen::Home(home) = &mut self.screen {
                    home.set_tab(tab);
                    return true;
                }
                ActiveScreen::Home(HomeScreen::new(tab))
            }
            ScreenTransition::SignedIn(user) => {
                info!(user = %user.name(), "Signed in");
                self.context.set_user(Some(user));
                ActiveScreen::Home(HomeScreen::new(HomeTab::Play))
            }
            ScreenTransition::OpenLobby(game) => {
                ActiveScreen::Lobby(LobbyScreen::new(game, &self.context))
            }
            ScreenTransition::LaunchGame(game) => self.game_screen(game),
            ScreenTransition::BackToHome => ActiveScreen::Home(HomeScreen::new(HomeTab::Play)),
            ScreenTransition::Logout => {
                info!("Logged out");
                self.context.set_user(None);
                ActiveScreen::Auth(AuthScreen::new())
            }
            ScreenTransition::Quit => {
                self.screen.as_screen_mut().unmount();
                info!("Hub quitting");
                return false;
            }
        };
        self.screen.as_screen_mut().unmount();
        info!(from = self.screen.name(), to = next.name(), "Screen changed");
        self.screen = next;
        true
    }

    fn game_screen(&self, game: GameId) -> ActiveScreen {
        match game {
            GameId::Pong => ActiveScreen::Pong(PongScreen::new(&self.context)),
            GameId::Naval => ActiveScreen::Naval(NavalScreen::new(&self.context)),
            GameId::Thunder => ActiveScreen::Thunder(ThunderScreen::new(&self.context)),
            GameId::Archery => ActiveScreen::Archery(ArcheryScreen::new(&self.context)),
        }
    }
}

/// Runs the hub event loop on `terminal` until the user quits.
#[instrument(skip(shell, terminal))]
pub async fn run_shell<B: Backend>(
    shell: &mut Shell,
    terminal: &mut Terminal<B>,
    tick_rate: Duration,
) -> anyhow::Result<()>
where
    <B as Backend>::Error: Send + Sync + 'static,
{
    info!("Starting hub event loop");
    let mut last = Instant::now();

    loop {
        terminal.draw(|f| shell.render(f))?;

        if event::poll(tick_rate)?
            && let Event::Key(key) = event::read()?
            && key.kind != KeyEventKind::Release
            && !shell.handle_key(key)
        {
            return Ok(());
        }

        let now = Instant::now();
        if !shell.tick(now.duration_since(last)) {
            return Ok(());
        }
        last = now;

        tokio::task::yield_now().await;
    }
}
