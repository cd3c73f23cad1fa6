//! Mini-game state machines and the pieces they share.

pub mod archery;
pub mod geometry;
pub mod match_state;
pub mod naval;
pub mod opponent;
pub mod pong;
pub mod thunder;
pub mod timing;

use serde::{Deserialize, Serialize};

/// Identifies one of the mini-games in the hub.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum GameId {
    /// Rosé Pong.
    Pong,
    /// Naval battle.
    Naval,
    /// Artillery duel.
    Thunder,
    /// Target archery.
    Archery,
}

impl GameId {
    /// Every game, in menu order.
    pub const ALL: [GameId; 4] = [GameId::Pong, GameId::Naval, GameId::Thunder, GameId::Archery];

    /// Name shown on cards and headers.
    pub fn title(self) -> &'static str {
        match self {
            GameId::Pong => "Rosé Pong",
            GameId::Naval => "Naval",
            GameId::Thunder => "Thunder",
            GameId::Archery => "Archery",
        }
    }

    /// One-line pitch shown under the title.
    pub fn subtitle(self) -> &'static str {
        match self {
            GameId::Pong => "Swipe the ball into their cups",
            GameId::Naval => "Hide your fleet, sink theirs",
            GameId::Thunder => "Angle, power, and a lot of wind",
            GameId::Archery => "Three rounds, three arrows, mind the wind",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(GameId::from_str("Naval").ok(), Some(GameId::Naval));
        assert_eq!(GameId::from_str("THUNDER").ok(), Some(GameId::Thunder));
        assert!(GameId::from_str("chess").is_err());
    }

    #[test]
    fn test_iteration_matches_menu_order() {
        assert_eq!(GameId::iter().collect::<Vec<_>>(), GameId::ALL.to_vec());
        assert_eq!(GameId::Pong.to_string(), "pong");
    }
}
