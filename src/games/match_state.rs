//! Score and turn bookkeeping shared by every mini-game.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Who is expected to act next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum TurnOwner {
    /// The local player.
    #[strum(to_string = "You")]
    Player,
    /// The synthetic opponent.
    #[strum(to_string = "Opponent")]
    Opponent,
}

impl TurnOwner {
    /// Returns the other side.
    pub fn other(self) -> Self {
        match self {
            Self::Player => Self::Opponent,
            Self::Opponent => Self::Player,
        }
    }
}

/// Match state for one mounted game screen.
///
/// Created when the game starts and dropped with it. Nothing here is
/// persisted and no winner is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MatchState {
    my_score: u32,
    opponent_score: u32,
    turn_owner: TurnOwner,
    attempts_remaining: u32,
    round: u32,
}

impl MatchState {
    /// Starts round 1 with the player to act.
    #[instrument]
    pub fn new(attempts_per_round: u32) -> Self {
        Self {
            my_score: 0,
            opponent_score: 0,
            turn_owner: TurnOwner::Player,
            attempts_remaining: attempts_per_round,
            round: 1,
        }
    }

    /// Adds points to the player.
    pub fn award_player(&mut self, points: u32) {
        self.my_score += points;
    }

    /// Adds points to the opponent.
    pub fn award_opponent(&mut self, points: u32) {
        self.opponent_score += points;
    }

    /// Uses one attempt, saturating at zero.
    pub fn spend_attempt(&mut self) {
        self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
    }

    /// Hands the turn to `owner`.
    pub fn pass_turn_to(&mut self, owner: TurnOwner) {
        self.turn_owner = owner;
    }

    /// Moves to the next round with a fresh set of attempts.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn next_round(&mut self, attempts_per_round: u32) {
        self.round += 1;
        self.attempts_remaining = attempts_per_round;
        self.turn_owner = TurnOwner::Player;
        debug!(round = self.round, "Round advanced");
    }

    /// Side currently ahead, if any.
    pub fn leader(&self) -> Option<TurnOwner> {
        use std::cmp::Ordering;
        match self.my_score.cmp(&self.opponent_score) {
            Ordering::Greater => Some(TurnOwner::Player),
            Ordering::Less => Some(TurnOwner::Opponent),
            Ordering::Equal => None,
        }
    }
}
