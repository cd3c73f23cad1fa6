//! Screen trait and transition type for the hub state machine.

use std::time::Duration;

use crossterm::event::KeyEvent;
use derive_getters::Getters;
use ratatui::Frame;

use crate::auth::User;
use crate::games::GameId;
use crate::theme::{Theme, ThemeContext};

/// Tabs of the home screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum HomeTab {
    /// Friends list and requests.
    Friends,
    /// Game picker.
    #[default]
    Play,
    /// Stats and theme picker.
    Profile,
}

impl HomeTab {
    /// Every tab, left to right.
    pub const ALL: [HomeTab; 3] = [HomeTab::Friends, HomeTab::Play, HomeTab::Profile];

    /// Tab to the right, wrapping.
    pub fn next(self) -> Self {
        match self {
            Self::Friends => Self::Play,
            Self::Play => Self::Profile,
            Self::Profile => Self::Friends,
        }
    }
}

/// The result of handling input or time on a screen.
///
/// Screens return this from [`Screen::handle_key`] and [`Screen::tick`] to
/// drive the [`Shell`](crate::Shell) state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Sign-in finished; go home.
    SignedIn(User),
    /// Show another home tab.
    SwitchTab(HomeTab),
    /// Open the lobby for a game.
    OpenLobby(GameId),
    /// Start a game.
    LaunchGame(GameId),
    /// Back to the Play tab.
    BackToHome,
    /// Change the active theme.
    SetTheme(Theme),
    /// Put text on the system clipboard.
    CopyToClipboard(String),
    /// Forget the user and show the sign-in form.
    Logout,
    /// Exit the hub.
    Quit,
}

/// Session-wide state handed to every screen.
#[derive(Debug, Clone, Getters)]
pub struct ShellContext {
    theme: ThemeContext,
    user: Option<User>,
    seed: Option<u64>,
}

impl ShellContext {
    /// Context with no user signed in.
    pub fn new(theme: Theme, seed: Option<u64>) -> Self {
        Self {
            theme: ThemeContext::new(theme),
            user: None,
            seed,
        }
    }

    /// Display name of the signed-in user.
    pub fn player_name(&self) -> &str {
        self.user.as_ref().map_or("You", |u| u.name().as_str())
    }

    pub(crate) fn theme_mut(&mut self) -> &mut ThemeContext {
        &mut self.theme
    }

    pub(crate) fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    /// Seed for the `n`th random source of a screen, if seeding is on.
    pub fn derived_seed(&self, n: u64) -> Option<u64> {
        self.seed.map(|s| s.wrapping_add(n))
    }
}

/// Trait implemented by each screen of the hub.
///
/// Each screen owns its own state, renders its UI, and handles key events
/// and elapsed time. The shell calls these methods in the event loop.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame, ctx: &ShellContext);

    /// Handles a key event and returns the resulting [`ScreenTransition`].
    fn handle_key(&mut self, key: KeyEvent, ctx: &ShellContext) -> ScreenTransition;

    /// Advances timed state by `elapsed`.
    fn tick(&mut self, _elapsed: Duration) -> ScreenTransition {
        ScreenTransition::Stay
    }

    /// Called once before the screen is dropped; cancels pending timers.
    fn unmount(&mut self) {}
}
