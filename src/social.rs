//! Mock social data for the home tabs.
//!
//! The hub has no backend; friends and stats are fixed sample data.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::games::GameId;

/// Presence of a friend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Presence {
    /// Online, possibly in a game.
    Online {
        /// Game being played, if any.
        playing: Option<GameId>,
    },
    /// Offline since the given human-readable time.
    Offline {
        /// e.g. "2h ago".
        last_seen: String,
    },
    /// Friend request waiting for an answer.
    Pending,
}

/// An entry in the friends list.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Friend {
    name: String,
    presence: Presence,
}

impl Friend {
    fn new(name: &str, presence: Presence) -> Self {
        Self {
            name: name.to_string(),
            presence,
        }
    }

    /// Whether the friend is online.
    pub fn is_online(&self) -> bool {
        matches!(self.presence, Presence::Online { .. })
    }

    /// Whether this is an unanswered request.
    pub fn is_pending(&self) -> bool {
        self.presence == Presence::Pending
    }
}

/// Sub-tabs of the Friends tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::EnumIter)]
pub enum FriendsFilter {
    /// Online friends.
    #[default]
    Online,
    /// Every accepted friend.
    All,
    /// Requests.
    Pending,
}

impl FriendsFilter {
    /// Next sub-tab, wrapping.
    pub fn next(self) -> Self {
        match self {
            Self::Online => Self::All,
            Self::All => Self::Pending,
            Self::Pending => Self::Online,
        }
    }
}

/// The sample friends list.
#[instrument]
pub fn sample_friends() -> Vec<Friend> {
    vec![
        Friend::new(
            "Kenny",
            Presence::Online {
                playing: Some(GameId::Pong),
            },
        ),
        Friend::new("Sandy", Presence::Online { playing: None }),
        Friend::new(
            "Léa",
            Presence::Online {
                playing: Some(GameId::Archery),
            },
        ),
        Friend::new(
            "Nour",
            Presence::Offline {
                last_seen: "2h ago".to_string(),
            },
        ),
        Friend::new(
            "Alex",
            Presence::Offline {
                last_seen: "yesterday".to_string(),
            },
        ),
        Friend::new("Martin", Presence::Pending),
        Friend::new("Sophie", Presence::Pending),
    ]
}

/// Friends matching `filter` whose name contains `query`, case-insensitively.
#[instrument(skip(friends), fields(count = friends.len()))]
pub fn filter_friends<'a>(
    friends: &'a [Friend],
    filter: FriendsFilter,
    query: &str,
) -> Vec<&'a Friend> {
    let needle = query.trim().to_lowercase();
    friends
        .iter()
        .filter(|f| match filter {
            FriendsFilter::Online => f.is_online(),
            FriendsFilter::All => !f.is_pending(),
            FriendsFilter::Pending => f.is_pending(),
        })
        .filter(|f| needle.is_empty() || f.name.to_lowercase().contains(&needle))
        .collect()
}

/// Wins and losses in one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameRecord {
    game: GameId,
    wins: u32,
    losses: u32,
}

impl GameRecord {
    /// Creates a record.
    pub fn new(game: GameId, wins: u32, losses: u32) -> Self {
        Self { game, wins, losses }
    }

    /// Games played.
    pub fn total(&self) -> u32 {
        self.wins + self.losses
    }

    /// Win rate as a percentage (0.0–100.0).
    #[instrument(skip(self))]
    pub fn win_rate(&self) -> f64 {
        win_percentage(self.wins, self.losses)
    }
}

fn win_percentage(wins: u32, losses: u32) -> f64 {
    let total = wins + losses;
    if total == 0 {
        0.0
    } else {
        f64::from(wins) / f64::from(total) * 100.0
    }
}

/// The sample per-game record shown on the Profile tab.
#[instrument]
pub fn sample_records() -> Vec<GameRecord> {
    vec![
        GameRecord::new(GameId::Pong, 24, 8),
        GameRecord::new(GameId::Archery, 31, 12),
        GameRecord::new(GameId::Thunder, 18, 9),
        GameRecord::new(GameId::Naval, 16, 5),
    ]
}

/// A match still running against a friend, shown on the Play tab.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ActiveMatch {
    game: GameId,
    opponent: String,
    my_turn: bool,
    my_score: u32,
    opponent_score: u32,
}

impl ActiveMatch {
    fn new(game: GameId, opponent: &str, my_turn: bool, score: (u32, u32)) -> Self {
        Self {
            game,
            opponent: opponent.to_string(),
            my_turn,
            my_score: score.0,
            opponent_score: score.1,
        }
    }
}

/// The sample matches in progress, in display order.
#[instrument]
pub fn sample_active_matches() -> Vec<ActiveMatch> {
    vec![
        ActiveMatch::new(GameId::Pong, "Kenny", true, (3, 2)),
        ActiveMatch::new(GameId::Archery, "Léa", false, (45, 52)),
        ActiveMatch::new(GameId::Thunder, "Sandy", true, (1, 2)),
        ActiveMatch::new(GameId::Naval, "Nour", false, (0, 0)),
    ]
}

/// Totals across every game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GlobalStats {
    wins: u32,
    losses: u32,
    current_streak: u32,
    best_streak: u32,
}

impl GlobalStats {
    /// Win rate as a percentage (0.0–100.0).
    pub fn win_rate(&self) -> f64 {
        win_percentage(self.wins, self.losses)
    }
}

/// The sample all-games totals.
#[instrument]
pub fn sample_global_stats() -> GlobalStats {
    GlobalStats {
        wins: 89,
        losses: 34,
        current_streak: 5,
        best_streak: 12,
    }
}

/// Head-to-head record against one friend.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Rivalry {
    opponent: String,
    wins: u32,
    losses: u32,
}

impl Rivalry {
    fn new(opponent: &str, wins: u32, losses: u32) -> Self {
        Self {
            opponent: opponent.to_string(),
            wins,
            losses,
        }
    }

    /// Whether the player has won more often than the rival.
    pub fn is_ahead(&self) -> bool {
        self.wins > self.losses
    }
}

/// The sample rivalries.
#[instrument]
pub fn sample_rivalries() -> Vec<Rivalry> {
    vec![
        Rivalry::new("Kenny", 15, 8),
        Rivalry::new("Léa", 12, 10),
        Rivalry::new("Sandy", 18, 6),
    ]
}

/// A finished match on the Profile tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct RecentResult {
    game: GameId,
    my_score: u32,
    opponent_score: u32,
}

impl RecentResult {
    /// Whether the player won.
    pub fn won(&self) -> bool {
        self.my_score > self.opponent_score
    }
}

/// The sample latest results, newest first.
#[instrument]
pub fn sample_recent_results() -> Vec<RecentResult> {
    [(GameId::Pong, 10, 7), (GameId::Thunder, 3, 5), (GameId::Naval, 5, 0)]
        .into_iter()
        .map(|(game, my_score, opponent_score)| RecentResult {
            game,
            my_score,
            opponent_score,
        })
        .collect()
}
