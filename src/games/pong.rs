//! Rosé Pong: swipe to throw a ball into the opponent's cup rack.

use std::f64::consts::FRAC_PI_2;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::games::geometry::Point;
use crate::games::match_state::{MatchState, TurnOwner};
use crate::games::opponent::{Opponent, seeded_rng};
use crate::games::timing::Delay;

/// Cups in each rack.
pub const CUPS_PER_RACK: usize = 10;

/// Swipes shorter than this are treated as taps and ignored.
pub const MIN_SWIPE: f64 = 5.0;

/// Swipe length giving a power of 1.0.
pub const POWER_SCALE: f64 = 50.0;

/// Power cap.
pub const MAX_POWER: f64 = 1.5;

/// Power window (exclusive) that lands in a cup.
pub const HIT_POWER: (f64, f64) = (0.5, 1.2);

/// Largest deviation from straight up, in radians, that lands in a cup.
pub const MAX_DEVIATION: f64 = 0.5;

/// Segments in a drawn trajectory.
pub const TRAJECTORY_STEPS: usize = 40;

/// Where the ball leaves the player's hand.
pub const LAUNCH_POINT: Point = Point::new(50.0, 85.0);

const STEP_MS: u64 = 25;
const SETTLE_MS: u64 = 500;
const OPPONENT_WINDUP_MS: u64 = 1000;
const OPPONENT_SETTLE_MS: u64 = 800;
const THROWS_PER_TURN: u32 = 1;

/// Cup positions in rack units: a 4-3-2-1 triangle.
const RACK_LAYOUT: [(f64, f64); CUPS_PER_RACK] = [
    (0.0, 0.0),
    (1.0, 0.0),
    (2.0, 0.0),
    (3.0, 0.0),
    (0.5, 1.0),
    (1.5, 1.0),
    (2.5, 1.0),
    (1.0, 2.0),
    (2.0, 2.0),
    (1.5, 3.0),
];

/// A cup in a rack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cup {
    /// Position in the rack, 0..10.
    pub id: usize,
    /// Column in rack units.
    pub x: f64,
    /// Row in rack units.
    pub y: f64,
    /// Whether the cup has been knocked out.
    pub hit: bool,
}

/// A full rack of cups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rack {
    cups: Vec<Cup>,
}

impl Rack {
    /// A rack with every cup standing.
    pub fn new() -> Self {
        let cups = RACK_LAYOUT
            .iter()
            .enumerate()
            .map(|(id, &(x, y))| Cup { id, x, y, hit: false })
            .collect();
        Self { cups }
    }

    /// Every cup, standing or not.
    pub fn cups(&self) -> &[Cup] {
        &self.cups
    }

    /// Ids of cups still standing.
    pub fn standing(&self) -> Vec<usize> {
        self.cups.iter().filter(|c| !c.hit).map(|c| c.id).collect()
    }

    /// Whether every cup is down.
    pub fn is_cleared(&self) -> bool {
        self.cups.iter().all(|c| c.hit)
    }

    /// Knocks out cup `id`. Returns `false` if it was already down or unknown.
    pub fn knock(&mut self, id: usize) -> bool {
        match self.cups.get_mut(id) {
            Some(cup) if !cup.hit => {
                cup.hit = true;
                true
            }
            _ => false,
        }
    }
}

impl Default for Rack {
    fn default() -> Self {
        Self::new()
    }
}

/// A drag gesture from `start` to `end` on the play surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Swipe {
    start: Point,
    end: Point,
}

impl Swipe {
    /// Creates a swipe; both ends are clamped to the surface.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start: Point::clamped(start.x, start.y),
            end: Point::clamped(end.x, end.y),
        }
    }

    /// Swipe starting at the launch point and moving by `(dx, dy)`.
    pub fn from_launch(dx: f64, dy: f64) -> Self {
        Self::new(LAUNCH_POINT, LAUNCH_POINT.nudged(dx, dy))
    }

    /// End point of the drag.
    pub fn end(&self) -> Point {
        self.end
    }

    /// Drag length in surface units.
    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }

    /// Throw power, capped at [`MAX_POWER`].
    pub fn power(&self) -> f64 {
        (self.length() / POWER_SCALE).min(MAX_POWER)
    }

    /// Angle away from straight up, in radians; positive leans right.
    pub fn deviation(&self) -> f64 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        dx.atan2(-dy)
    }

    /// Whether this swipe lands in a cup.
    pub fn is_on_target(&self) -> bool {
        let power = self.power();
        power > HIT_POWER.0 && power < HIT_POWER.1 && self.deviation().abs() < MAX_DEVIATION
    }

    /// Ball positions from release to landing.
    #[instrument]
    pub fn trajectory(&self) -> Vec<Point> {
        let power = self.power();
        let heading = FRAC_PI_2 - self.deviation();
        (0..=TRAJECTORY_STEPS)
            .map(|i| {
                let t = i as f64 / TRAJECTORY_STEPS as f64;
                Point::new(
                    LAUNCH_POINT.x + heading.cos() * power * t * 40.0,
                    LAUNCH_POINT.y - heading.sin() * power * t * 80.0 + t * t * 40.0,
                )
            })
            .collect()
    }
}

/// Phase of a pong match.
#[derive(Debug, Clone, PartialEq)]
pub enum PongPhase {
    /// Player's throw.
    Aiming,
    /// Player's ball in the air.
    BallInFlight {
        /// Time until it lands.
        delay: Delay,
        /// Whether it will land in a cup.
        on_target: bool,
    },
    /// Pause after the player's throw.
    Settling {
        /// Time until the opponent steps up.
        delay: Delay,
    },
    /// Opponent lining up its throw.
    OpponentWindup {
        /// Time until the opponent throws.
        delay: Delay,
    },
    /// Pause after the opponent's throw.
    OpponentSettling {
        /// Time until the player's turn.
        delay: Delay,
    },
    /// A rack has been cleared.
    Finished,
    /// Screen left; no further transitions.
    Abandoned,
}

/// A pong match against an [`Opponent`].
#[derive(Debug)]
pub struct PongGame {
    state: MatchState,
    opponent_rack: Rack,
    my_rack: Rack,
    ball_path: Vec<Point>,
    phase: PongPhase,
    rng: StdRng,
    opponent: Box<dyn Opponent>,
}

impl PongGame {
    /// Starts a match with two full racks.
    #[instrument(skip(opponent), fields(opponent = %opponent.name()))]
    pub fn new(opponent: Box<dyn Opponent>, seed: Option<u64>) -> Self {
        info!("Pong match started");
        Self {
            state: MatchState::new(THROWS_PER_TURN),
            opponent_rack: Rack::new(),
            my_rack: Rack::new(),
            ball_path: Vec::new(),
            phase: PongPhase::Aiming,
            rng: seeded_rng(seed),
            opponent,
        }
    }

    /// Score and turn bookkeeping. Each round is one exchange of throws.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Current phase.
    pub fn phase(&self) -> &PongPhase {
        &self.phase
    }

    /// The rack the player throws at.
    pub fn opponent_rack(&self) -> &Rack {
        &self.opponent_rack
    }

    /// The rack the opponent throws at.
    pub fn my_rack(&self) -> &Rack {
        &self.my_rack
    }

    /// Name of the opponent.
    pub fn opponent_name(&self) -> &str {
        self.opponent.name()
    }

    /// Whether the player may throw.
    pub fn accepts_input(&self) -> bool {
        self.phase == PongPhase::Aiming
    }

    /// Where the ball is drawn, while it is in flight.
    pub fn ball_position(&self) -> Option<Point> {
        let PongPhase::BallInFlight { delay, .. } = &self.phase else {
            return None;
        };
        let flight = Duration::from_millis(STEP_MS * TRAJECTORY_STEPS as u64);
        let flown = flight.saturating_sub(delay.remaining());
        let step = (flown.as_millis() / u128::from(STEP_MS)) as usize;
        self.ball_path
            .get(step.min(self.ball_path.len().saturating_sub(1)))
            .copied()
    }

    /// Throws with `swipe`.
    ///
    /// Returns `false` when input is locked or the swipe is too short.
    #[instrument(skip(self))]
    pub fn throw(&mut self, swipe: Swipe) -> bool {
        if !self.accepts_input() {
            debug!("Throw ignored while input is locked");
            return false;
        }
        if swipe.length() < MIN_SWIPE {
            debug!(length = swipe.length(), "Swipe too short");
            return false;
        }
        self.state.spend_attempt();
        self.ball_path = swipe.trajectory();
        let on_target = swipe.is_on_target();
        debug!(
            power = swipe.power(),
            deviation = swipe.deviation(),
            on_target,
            "Ball thrown"
        );
        self.phase = PongPhase::BallInFlight {
            delay: Delay::millis(STEP_MS * TRAJECTORY_STEPS as u64),
            on_target,
        };
        true
    }

    /// Advances timed transitions by `elapsed`.
    pub fn tick(&mut self, elapsed: Duration) {
        let mut budget = elapsed;
        loop {
            let leftover = match &mut self.phase {
                PongPhase::BallInFlight { delay, .. }
                | PongPhase::Settling { delay }
                | PongPhase::OpponentWindup { delay }
                | PongPhase::OpponentSettling { delay } => match delay.advance(budget) {
                    Some(leftover) => leftover,
                    None => return,
                },
                PongPhase::Aiming | PongPhase::Finished | PongPhase::Abandoned => return,
            };
            self.complete_phase();
            budget = leftover;
        }
    }

    /// Cancels every pending transition.
    #[instrument(skip(self))]
    pub fn abandon(&mut self) {
        debug!("Pong match abandoned");
        self.phase = PongPhase::Abandoned;
    }

    fn complete_phase(&mut self) {
        match self.phase {
            PongPhase::BallInFlight { on_target, .. } => {
                self.ball_path.clear();
                if on_target
                    && let Some(&cup) = self.opponent_rack.standing().choose(&mut self.rng)
                {
                    self.opponent_rack.knock(cup);
                    self.state.award_player(1);
                    debug!(cup, "Player sank a cup");
                }
                let next = if self.opponent_rack.is_cleared() {
                    self.finish()
                } else {
                    PongPhase::Settling {
                        delay: Delay::millis(SETTLE_MS),
                    }
                };
                self.phase = next;
            }
            PongPhase::Settling { .. } => {
                self.state.pass_turn_to(TurnOwner::Opponent);
                self.phase = PongPhase::OpponentWindup {
                    delay: Delay::millis(OPPONENT_WINDUP_MS),
                };
            }
            PongPhase::OpponentWindup { .. } => {
                let standing = self.my_rack.standing();
                if let Some(cup) = self.opponent.pong_throw(&standing)
                    && self.my_rack.knock(cup)
                {
                    self.state.award_opponent(1);
                    debug!(cup, "Opponent sank a cup");
                }
                let next = if self.my_rack.is_cleared() {
                    self.finish()
                } else {
                    PongPhase::OpponentSettling {
                        delay: Delay::millis(OPPONENT_SETTLE_MS),
                    }
                };
                self.phase = next;
            }
            PongPhase::OpponentSettling { .. } => {
                self.state.next_round(THROWS_PER_TURN);
                self.phase = PongPhase::Aiming;
            }
            PongPhase::Aiming | PongPhase::Finished | PongPhase::Abandoned => {}
        }
    }

    fn finish(&mut self) -> PongPhase {
        self.state.pass_turn_to(TurnOwner::Player);
        info!(
            me = self.state.my_score(),
            opponent = self.state.opponent_score(),
            "Pong match finished"
        );
        PongPhase::Finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_up_swipe_has_no_deviation() {
        let swipe = Swipe::from_launch(0.0, -40.0);
        assert!(swipe.deviation().abs() < 1e-9);
        assert!((swipe.power() - 0.8).abs() < 1e-9);
        assert!(swipe.is_on_target());
    }

    #[test]
    fn test_power_is_capped() {
        let swipe = Swipe::new(Point::new(0.0, 100.0), Point::new(100.0, 0.0));
        assert_eq!(swipe.power(), MAX_POWER);
    }

    #[test]
    fn test_trajectory_starts_at_launch_point() {
        let path = Swipe::from_launch(0.0, -40.0).trajectory();
        assert_eq!(path.len(), TRAJECTORY_STEPS + 1);
        assert_eq!(path[0], LAUNCH_POINT);
    }

    #[test]
    fn test_rack_knock_once() {
        let mut rack = Rack::new();
        assert!(rack.knock(3));
        assert!(!rack.knock(3));
        assert!(!rack.knock(42));
        assert_eq!(rack.standing().len(), CUPS_PER_RACK - 1);
    }
}
