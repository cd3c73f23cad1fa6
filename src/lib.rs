//! Kenny Games library - casual mini-games hub for the terminal
//!
//! A mock sign-in, a tabbed home, a lobby with a readiness countdown and
//! four mini-games played against a synthetic opponent.
//!
//! # Architecture
//!
//! - **Games**: timed phase machines for Rosé Pong, Naval, Thunder and Archery
//! - **Lobby**: seats, ready flags and the launch countdown
//! - **Shell**: screen router and terminal event loop
//! - **Theme**: color themes passed to every render call
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use kenny_games::{ArcheryGame, SyntheticOpponent};
//!
//! let opponent = SyntheticOpponent::new("Sandy", Some(7));
//! let mut game = ArcheryGame::new(Box::new(opponent), Some(7)).with_wind(0);
//! game.release();
//! game.tick(Duration::from_millis(800));
//! assert_eq!(*game.state().attempts_remaining(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod auth;
mod cli;
mod config;
mod games;
mod icons;
mod invariants;
mod lobby;
mod shell;
mod simulate;
mod social;
mod theme;

// Crate-level exports - CLI and configuration
pub use cli::{Cli, Command};
pub use config::{ConfigError, DEFAULT_CONFIG_FILE, HubConfig};

// Crate-level exports - Auth and social data
pub use auth::{AuthError, AuthMode, AuthStub, Credentials, SIGN_IN_DELAY, User, fabricate_user};
pub use social::{
    ActiveMatch, Friend, FriendsFilter, GameRecord, GlobalStats, Presence, RecentResult, Rivalry,
    filter_friends, sample_active_matches, sample_friends, sample_global_stats,
    sample_recent_results, sample_records, sample_rivalries,
};

// Crate-level exports - Theme and icons
pub use icons::game_icon;
pub use theme::{Rgb, Theme, ThemeColors, ThemeContext};

// Crate-level exports - Shared game pieces
pub use games::GameId;
pub use games::geometry::{Point, SURFACE_MAX, SURFACE_MIN, clamp_percent};
pub use games::match_state::{MatchState, TurnOwner};
pub use games::opponent::{Opponent, SyntheticOpponent, seeded_rng};
pub use games::timing::Delay;
pub use invariants::Invariant;

// Crate-level exports - Games
pub use games::archery::{ArcheryGame, ArcheryPhase, landing_point, score_for_distance};
pub use games::naval::{
    AttackError, Board, Cell, CellState, Coord, FleetIntact, GRID_SIZE, IncomingShot, NavalGame,
    NavalPhase, Orientation, PlacementError, ShipKind, ShotOutcome,
};
pub use games::pong::{Cup, PongGame, PongPhase, Rack, Swipe};
pub use games::thunder::{Shot, ThunderGame, ThunderPhase, solve_shot};

/// Tuning constants for each game.
pub mod tuning {
    pub use crate::games::archery::{
        ARROWS_PER_ROUND, JITTER as ARCHERY_JITTER, ROUNDS, WIND_MAX as ARCHERY_WIND_MAX,
        WIND_MIN as ARCHERY_WIND_MIN,
    };
    pub use crate::games::opponent::{
        ARCHERY_VOLLEY_MAX, ARCHERY_VOLLEY_MIN, PONG_HIT_CHANCE, THUNDER_HIT_CHANCE,
    };
    pub use crate::games::pong::{
        CUPS_PER_RACK, HIT_POWER, LAUNCH_POINT, MAX_DEVIATION, MAX_POWER, MIN_SWIPE, POWER_SCALE,
        TRAJECTORY_STEPS,
    };
    pub use crate::games::thunder::{
        ANGLE_DEFAULT, ANGLE_MAX, ANGLE_MIN, CANNON, ENEMY_X, HIT_RADIUS, POWER_DEFAULT,
        POWER_MAX, POWER_MIN, STARTING_HEALTH, WIND_MAX as THUNDER_WIND_MAX,
        WIND_MIN as THUNDER_WIND_MIN,
    };
}

// Crate-level exports - Lobby
pub use lobby::{
    COPIED_FOR, COUNTDOWN_FROM, COUNTDOWN_STEP, CountdownGate, INVITE_BASE, INVITE_CODE_LEN,
    InviteLink, Lobby, LobbyError, LobbyEvent, LobbyPhase, MIN_READY, ReadyWithinOccupied, Roster,
    SLOT_COUNT, Slot,
};

// Crate-level exports - Shell
pub use shell::{
    ActiveScreen, ArcheryScreen, AuthScreen, Clipboard, HOUSE_OPPONENT, HomeScreen, HomeTab,
    LobbyScreen, Mark, NavalScreen, PongScreen, Screen, ScreenTransition, Shell, ShellContext,
    TerminalClipboard, ThunderScreen, center_rect, plot, run_shell, run_tui,
};

// Crate-level exports - Headless play
pub use simulate::{SIMULATED_OPPONENT, SimulationReport, simulate};
