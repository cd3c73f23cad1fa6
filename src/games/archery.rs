//! Archery: three rounds of three arrows at a target, with wind drift.

use std::time::Duration;

use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument};

use crate::games::geometry::Point;
use crate::games::match_state::{MatchState, TurnOwner};
use crate::games::opponent::{Opponent, seeded_rng};
use crate::games::timing::Delay;

/// Arrows available in each round.
pub const ARROWS_PER_ROUND: u32 = 3;

/// Rounds in a match.
pub const ROUNDS: u32 = 3;

/// Lowest wind value drawn for a match.
pub const WIND_MIN: i32 = -8;

/// Highest wind value drawn for a match.
pub const WIND_MAX: i32 = 7;

/// Half-width of the per-shot jitter on each axis.
pub const JITTER: f64 = 1.5;

const FLIGHT_MS: u64 = 800;
const HIT_DISPLAY_MS: u64 = 2000;
const OPPONENT_DELAY_MS: u64 = 1000;

/// Upper distance bound (exclusive) and points for each target ring.
const SCORE_BRACKETS: [(f64, u32); 8] = [
    (4.0, 10),
    (8.0, 9),
    (12.0, 8),
    (16.0, 7),
    (20.0, 6),
    (24.0, 5),
    (28.0, 4),
    (32.0, 3),
];

/// Maps a distance from the bullseye to the points it is worth.
///
/// Anything at 32 or beyond (and `NaN`) scores zero.
#[instrument]
pub fn score_for_distance(distance: f64) -> u32 {
    SCORE_BRACKETS
        .iter()
        .find(|(bound, _)| distance < *bound)
        .map(|(_, points)| *points)
        .unwrap_or(0)
}

/// Where an arrow released at `aim` lands.
///
/// Wind pushes the arrow sideways by `wind / 10 * 5`; `jitter` is the
/// per-shot imprecision on each axis.
#[instrument]
pub fn landing_point(aim: Point, wind: i32, jitter: (f64, f64)) -> Point {
    let drift = f64::from(wind) / 10.0 * 5.0;
    Point::new(aim.x + drift + jitter.0, aim.y + jitter.1)
}

/// Phase of an archery match.
#[derive(Debug, Clone, PartialEq)]
pub enum ArcheryPhase {
    /// Waiting for the player to release an arrow.
    Aiming,
    /// Arrow travelling towards the target.
    ArrowInFlight {
        /// Time until it lands.
        delay: Delay,
    },
    /// Landed arrow and its points on display.
    ShowingHit {
        /// Points scored by the arrow.
        points: u32,
        /// Time until the display clears.
        delay: Delay,
    },
    /// Opponent shooting its volley.
    OpponentVolley {
        /// Time until the volley is scored.
        delay: Delay,
    },
    /// All rounds played.
    Finished,
    /// Screen left; no further transitions.
    Abandoned,
}

/// An archery match against an [`Opponent`].
#[derive(Debug)]
pub struct ArcheryGame {
    state: MatchState,
    wind: i32,
    aim: Point,
    arrow: Option<Point>,
    last_hit: Option<u32>,
    phase: ArcheryPhase,
    rng: StdRng,
    opponent: Box<dyn Opponent>,
}

impl ArcheryGame {
    /// Starts a match. The wind for the whole match is drawn here.
    #[instrument(skip(opponent), fields(opponent = %opponent.name()))]
    pub fn new(opponent: Box<dyn Opponent>, seed: Option<u64>) -> Self {
        let mut rng = seeded_rng(seed);
        let wind = rng.random_range(WIND_MIN..=WIND_MAX);
        info!(wind, "Archery match started");
        Self {
            state: MatchState::new(ARROWS_PER_ROUND),
            wind,
            aim: Point::center(),
            arrow: None,
            last_hit: None,
            phase: ArcheryPhase::Aiming,
            rng,
            opponent,
        }
    }

    /// Replaces the drawn wind, clamped to the allowed range.
    pub fn with_wind(mut self, wind: i32) -> Self {
        self.wind = wind.clamp(WIND_MIN, WIND_MAX);
        self
    }

    /// Score and round bookkeeping.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Current phase.
    pub fn phase(&self) -> &ArcheryPhase {
        &self.phase
    }

    /// Wind for this match.
    pub fn wind(&self) -> i32 {
        self.wind
    }

    /// Current aim point.
    pub fn aim(&self) -> Point {
        self.aim
    }

    /// Arrow on the target, while one is shown.
    pub fn arrow(&self) -> Option<Point> {
        self.arrow
    }

    /// Points of the arrow on display.
    pub fn last_hit(&self) -> Option<u32> {
        self.last_hit
    }

    /// Name of the opponent.
    pub fn opponent_name(&self) -> &str {
        self.opponent.name()
    }

    /// Whether the player may act right now.
    pub fn accepts_input(&self) -> bool {
        self.phase == ArcheryPhase::Aiming && *self.state.attempts_remaining() > 0
    }

    /// Moves the aim point; coordinates are clamped to the surface.
    pub fn aim_at(&mut self, x: f64, y: f64) {
        if self.accepts_input() {
            self.aim = Point::clamped(x, y);
        }
    }

    /// Moves the aim point relative to where it is.
    pub fn nudge_aim(&mut self, dx: f64, dy: f64) {
        if self.accepts_input() {
            self.aim = self.aim.nudged(dx, dy);
        }
    }

    /// Releases an arrow at the current aim point.
    ///
    /// Returns `false` when input is locked.
    #[instrument(skip(self), fields(round = self.state.round(), arrows = self.state.attempts_remaining()))]
    pub fn release(&mut self) -> bool {
        if !self.accepts_input() {
            debug!("Release ignored while input is locked");
            return false;
        }
        self.state.spend_attempt();
        let jitter = (
            self.rng.random_range(-JITTER..JITTER),
            self.rng.random_range(-JITTER..JITTER),
        );
        let landing = landing_point(self.aim, self.wind, jitter);
        debug!(x = landing.x, y = landing.y, "Arrow released");
        self.arrow = Some(landing);
        self.phase = ArcheryPhase::ArrowInFlight {
            delay: Delay::millis(FLIGHT_MS),
        };
        true
    }

    /// Advances timed transitions by `elapsed`.
    pub fn tick(&mut self, elapsed: Duration) {
        let mut budget = elapsed;
        loop {
            let leftover = match &mut self.phase {
                ArcheryPhase::ArrowInFlight { delay }
                | ArcheryPhase::ShowingHit { delay, .. }
                | ArcheryPhase::OpponentVolley { delay } => match delay.advance(budget) {
                    Some(leftover) => leftover,
                    None => return,
                },
                ArcheryPhase::Aiming | ArcheryPhase::Finished | ArcheryPhase::Abandoned => return,
            };
            self.complete_phase();
            budget = leftover;
        }
    }

    /// Cancels every pending transition.
    #[instrument(skip(self))]
    pub fn abandon(&mut self) {
        debug!("Archery match abandoned");
        self.phase = ArcheryPhase::Abandoned;
    }

    fn complete_phase(&mut self) {
        match self.phase {
            ArcheryPhase::ArrowInFlight { .. } => {
                let distance = self
                    .arrow
                    .map(|arrow| arrow.distance_to(Point::center()))
                    .unwrap_or(f64::INFINITY);
                let points = score_for_distance(distance);
                debug!(distance, points, "Arrow landed");
                self.state.award_player(points);
                self.last_hit = Some(points);
                self.phase = ArcheryPhase::ShowingHit {
                    points,
                    delay: Delay::millis(HIT_DISPLAY_MS),
                };
            }
            ArcheryPhase::ShowingHit { .. } => {
                self.arrow = None;
                self.last_hit = None;
                if *self.state.attempts_remaining() > 0 {
                    self.phase = ArcheryPhase::Aiming;
                } else {
                    self.state.pass_turn_to(TurnOwner::Opponent);
                    self.phase = ArcheryPhase::OpponentVolley {
                        delay: Delay::millis(OPPONENT_DELAY_MS),
                    };
                }
            }
            ArcheryPhase::OpponentVolley { .. } => {
                let points = self.opponent.archery_volley();
                self.state.award_opponent(points);
                if *self.state.round() < ROUNDS {
                    self.state.next_round(ARROWS_PER_ROUND);
                    self.phase = ArcheryPhase::Aiming;
                } else {
                    self.state.pass_turn_to(TurnOwner::Player);
                    info!(
                        me = self.state.my_score(),
                        opponent = self.state.opponent_score(),
                        "Archery match finished"
                    );
                    self.phase = ArcheryPhase::Finished;
                }
            }
            ArcheryPhase::Aiming | ArcheryPhase::Finished | ArcheryPhase::Abandoned => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracket_edges() {
        assert_eq!(score_for_distance(0.0), 10);
        assert_eq!(score_for_distance(3.999), 10);
        assert_eq!(score_for_distance(4.0), 9);
        assert_eq!(score_for_distance(31.9), 3);
        assert_eq!(score_for_distance(32.0), 0);
        assert_eq!(score_for_distance(f64::NAN), 0);
    }

    #[test]
    fn test_wind_drifts_right() {
        let landing = landing_point(Point::center(), 4, (0.0, 0.0));
        assert!((landing.x - 52.0).abs() < 1e-9);
        assert!((landing.y - 50.0).abs() < 1e-9);
    }
}
