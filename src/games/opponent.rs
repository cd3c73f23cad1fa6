//! Opponent strategies.
//!
//! Games never roll dice for the other side themselves; they ask an
//! [`Opponent`]. The only implementation shipped is [`SyntheticOpponent`],
//! which draws uniformly at random with no skill model. A networked or AI
//! opponent can be swapped in without touching any board logic.

use std::fmt;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::games::naval::Coord;

/// Lowest synthetic archery volley total.
pub const ARCHERY_VOLLEY_MIN: u32 = 5;

/// Highest synthetic archery volley total.
pub const ARCHERY_VOLLEY_MAX: u32 = 29;

/// Chance that a synthetic pong throw lands in a cup.
pub const PONG_HIT_CHANCE: f64 = 0.6;

/// Chance that a synthetic artillery shell hits.
pub const THUNDER_HIT_CHANCE: f64 = 0.5;

/// The other side of a match.
pub trait Opponent: fmt::Debug + Send {
    /// Display name shown on the scoreboard.
    fn name(&self) -> &str;

    /// Total points scored by a full archery volley.
    fn archery_volley(&mut self) -> u32;

    /// Picks the cup knocked out by a pong throw, or `None` on a miss.
    ///
    /// `standing` lists the ids of the player's cups still in play.
    fn pong_throw(&mut self, standing: &[usize]) -> Option<usize>;

    /// Whether an artillery shell hits the player's tank.
    fn thunder_shot(&mut self) -> bool;

    /// Picks a naval target among the cells not attacked yet.
    fn naval_shot(&mut self, open: &[Coord]) -> Option<Coord>;
}

/// Builds the generator used for shot jitter and opponent draws.
///
/// `Some(seed)` gives reproducible matches, `None` seeds from the OS.
#[instrument]
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Opponent whose every decision is a uniform random draw.
#[derive(Debug)]
pub struct SyntheticOpponent {
    name: String,
    rng: StdRng,
}

impl SyntheticOpponent {
    /// Creates a synthetic opponent, optionally seeded.
    #[instrument(skip(name), fields(name = %name.as_ref()))]
    pub fn new(name: impl AsRef<str>, seed: Option<u64>) -> Self {
        Self {
            name: name.as_ref().to_string(),
            rng: seeded_rng(seed),
        }
    }
}

impl Opponent for SyntheticOpponent {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self), fields(opponent = %self.name))]
    fn archery_volley(&mut self) -> u32 {
        let points = self
            .rng
            .random_range(ARCHERY_VOLLEY_MIN..=ARCHERY_VOLLEY_MAX);
        debug!(points, "Synthetic volley");
        points
    }

    #[instrument(skip(self, standing), fields(opponent = %self.name, standing = standing.len()))]
    fn pong_throw(&mut self, standing: &[usize]) -> Option<usize> {
        if standing.is_empty() || !self.rng.random_bool(PONG_HIT_CHANCE) {
            debug!("Synthetic throw missed");
            return None;
        }
        let cup = standing.choose(&mut self.rng).copied();
        debug!(?cup, "Synthetic throw landed");
        cup
    }

    #[instrument(skip(self), fields(opponent = %self.name))]
    fn thunder_shot(&mut self) -> bool {
        self.rng.random_bool(THUNDER_HIT_CHANCE)
    }

    #[instrument(skip(self, open), fields(opponent = %self.name, open = open.len()))]
    fn naval_shot(&mut self, open: &[Coord]) -> Option<Coord> {
        open.choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volley_stays_in_range() {
        let mut opponent = SyntheticOpponent::new("Sandy", Some(7));
        for _ in 0..200 {
            let points = opponent.archery_volley();
            assert!((ARCHERY_VOLLEY_MIN..=ARCHERY_VOLLEY_MAX).contains(&points));
        }
    }

    #[test]
    fn test_pong_throw_only_picks_standing_cups() {
        let mut opponent = SyntheticOpponent::new("Sandy", Some(11));
        let standing = [2, 5, 9];
        for _ in 0..100 {
            if let Some(cup) = opponent.pong_throw(&standing) {
                assert!(standing.contains(&cup));
            }
        }
    }

    #[test]
    fn test_no_targets_means_no_shot() {
        let mut opponent = SyntheticOpponent::new("Sandy", Some(3));
        assert_eq!(opponent.pong_throw(&[]), None);
        assert_eq!(opponent.naval_shot(&[]), None);
    }

    #[test]
    fn test_same_seed_same_decisions() {
        let mut a = SyntheticOpponent::new("A", Some(42));
        let mut b = SyntheticOpponent::new("B", Some(42));
        let left: Vec<u32> = (0..10).map(|_| a.archery_volley()).collect();
        let right: Vec<u32> = (0..10).map(|_| b.archery_volley()).collect();
        assert_eq!(left, right);
    }
}
