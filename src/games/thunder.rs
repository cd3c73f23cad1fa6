//! Thunder: an artillery duel tuned with angle and power sliders.

use std::time::Duration;

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::games::geometry::Point;
use crate::games::match_state::{MatchState, TurnOwner};
use crate::games::opponent::{Opponent, seeded_rng};
use crate::games::timing::Delay;

/// Hits each tank can take.
pub const STARTING_HEALTH: u32 = 3;

/// Smallest barrel angle in degrees.
pub const ANGLE_MIN: u32 = 10;
/// Largest barrel angle in degrees.
pub const ANGLE_MAX: u32 = 80;
/// Barrel angle at the start of a match.
pub const ANGLE_DEFAULT: u32 = 45;

/// Weakest charge.
pub const POWER_MIN: u32 = 20;
/// Strongest charge.
pub const POWER_MAX: u32 = 100;
/// Charge at the start of a match.
pub const POWER_DEFAULT: u32 = 50;

/// Lowest wind value drawn for a match.
pub const WIND_MIN: i32 = -15;
/// Highest wind value drawn for a match.
pub const WIND_MAX: i32 = 14;

/// Where the player's shell leaves the barrel.
pub const CANNON: Point = Point::new(10.0, 70.0);

/// Horizontal position of the enemy tank.
pub const ENEMY_X: f64 = 85.0;

/// Distance from [`ENEMY_X`] that still counts as a hit.
pub const HIT_RADIUS: f64 = 5.0;

/// Half-width of the per-shot landing jitter.
pub const JITTER: f64 = 1.5;

const VELOCITY_SCALE: f64 = 0.12;
const GRAVITY: f64 = 1.3;
const WIND_SCALE: f64 = 0.3 / 15.0;
const SAMPLE_STEP: f64 = 0.25;
const SAMPLE_MS: u64 = 20;
const RELOAD_MS: u64 = 1500;
const SHOTS_PER_TURN: u32 = 1;

/// A computed shot: the drawn path and where it comes down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    /// Shell positions sampled every quarter time unit, ending at the landing.
    pub trajectory: Vec<Point>,
    /// Horizontal landing position, jitter included.
    pub landing_x: f64,
    /// Whether the shell lands within [`HIT_RADIUS`] of the enemy.
    pub hit: bool,
}

/// Solves the flight of a shell fired from [`CANNON`].
///
/// `angle` is in degrees above the horizon. Wind adds a constant sideways
/// velocity; `jitter` shifts the landing point.
#[instrument]
pub fn solve_shot(angle: u32, power: u32, wind: i32, jitter: f64) -> Shot {
    let theta = f64::from(angle).to_radians();
    let speed = f64::from(power) * VELOCITY_SCALE;
    let vx = speed * theta.cos() + f64::from(wind) * WIND_SCALE;
    let vy = speed * theta.sin();
    let airtime = 2.0 * vy / GRAVITY;

    let samples = (airtime / SAMPLE_STEP).ceil().max(1.0) as usize;
    let mut trajectory: Vec<Point> = (0..samples)
        .map(|i| {
            let t = i as f64 * SAMPLE_STEP;
            Point::new(
                CANNON.x + vx * t,
                CANNON.y - (vy * t - GRAVITY * t * t / 2.0),
            )
        })
        .collect();

    let landing_x = CANNON.x + vx * airtime + jitter;
    trajectory.push(Point::new(landing_x, CANNON.y));
    let hit = (landing_x - ENEMY_X).abs() <= HIT_RADIUS;
    Shot {
        trajectory,
        landing_x,
        hit,
    }
}

/// Phase of a Thunder duel.
#[derive(Debug, Clone, PartialEq)]
pub enum ThunderPhase {
    /// Player adjusting the sliders.
    Aiming,
    /// Player's shell in the air.
    ShellInFlight {
        /// Time until it lands.
        delay: Delay,
    },
    /// Enemy tank loading its return shot.
    EnemyReloading {
        /// Time until it fires.
        delay: Delay,
    },
    /// A tank is out of health.
    Finished,
    /// Screen left; no further transitions.
    Abandoned,
}

/// A Thunder duel against an [`Opponent`].
#[derive(Debug)]
pub struct ThunderGame {
    state: MatchState,
    my_health: u32,
    enemy_health: u32,
    angle: u32,
    power: u32,
    wind: i32,
    shot: Option<Shot>,
    phase: ThunderPhase,
    rng: StdRng,
    opponent: Box<dyn Opponent>,
}

impl ThunderGame {
    /// Starts a duel. The wind for the whole match is drawn here.
    #[instrument(skip(opponent), fields(opponent = %opponent.name()))]
    pub fn new(opponent: Box<dyn Opponent>, seed: Option<u64>) -> Self {
        let mut rng = seeded_rng(seed);
        let wind = rng.random_range(WIND_MIN..=WIND_MAX);
        info!(wind, "Thunder duel started");
        Self {
            state: MatchState::new(SHOTS_PER_TURN),
            my_health: STARTING_HEALTH,
            enemy_health: STARTING_HEALTH,
            angle: ANGLE_DEFAULT,
            power: POWER_DEFAULT,
            wind,
            shot: None,
            phase: ThunderPhase::Aiming,
            rng,
            opponent,
        }
    }

    /// Replaces the drawn wind, clamped to the allowed range.
    pub fn with_wind(mut self, wind: i32) -> Self {
        self.wind = wind.clamp(WIND_MIN, WIND_MAX);
        self
    }

    /// Score and turn bookkeeping. Scores count hits landed.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Current phase.
    pub fn phase(&self) -> &ThunderPhase {
        &self.phase
    }

    /// Player tank health.
    pub fn my_health(&self) -> u32 {
        self.my_health
    }

    /// Enemy tank health.
    pub fn enemy_health(&self) -> u32 {
        self.enemy_health
    }

    /// Barrel angle in degrees.
    pub fn angle(&self) -> u32 {
        self.angle
    }

    /// Charge.
    pub fn power(&self) -> u32 {
        self.power
    }

    /// Wind for this match.
    pub fn wind(&self) -> i32 {
        self.wind
    }

    /// Name of the opponent.
    pub fn opponent_name(&self) -> &str {
        self.opponent.name()
    }

    /// Side left standing, once finished.
    pub fn winner(&self) -> Option<TurnOwner> {
        match self.phase {
            ThunderPhase::Finished if self.enemy_health == 0 => Some(TurnOwner::Player),
            ThunderPhase::Finished => Some(TurnOwner::Opponent),
            _ => None,
        }
    }

    /// Whether the player may act right now.
    pub fn accepts_input(&self) -> bool {
        self.phase == ThunderPhase::Aiming
    }

    /// Sets the barrel angle, clamped to its slider range.
    pub fn set_angle(&mut self, angle: u32) {
        if self.accepts_input() {
            self.angle = angle.clamp(ANGLE_MIN, ANGLE_MAX);
        }
    }

    /// Moves the angle slider by `delta` degrees.
    pub fn adjust_angle(&mut self, delta: i32) {
        self.set_angle(self.angle.saturating_add_signed(delta));
    }

    /// Sets the charge, clamped to its slider range.
    pub fn set_power(&mut self, power: u32) {
        if self.accepts_input() {
            self.power = power.clamp(POWER_MIN, POWER_MAX);
        }
    }

    /// Moves the power slider by `delta`.
    pub fn adjust_power(&mut self, delta: i32) {
        self.set_power(self.power.saturating_add_signed(delta));
    }

    /// Where the shell is drawn, while it is in flight.
    pub fn shell_position(&self) -> Option<Point> {
        let (ThunderPhase::ShellInFlight { delay }, Some(shot)) = (&self.phase, &self.shot) else {
            return None;
        };
        let flight = flight_time(shot);
        let flown = flight.saturating_sub(delay.remaining());
        let sample = (flown.as_millis() / u128::from(SAMPLE_MS)) as usize;
        shot.trajectory
            .get(sample.min(shot.trajectory.len().saturating_sub(1)))
            .copied()
    }

    /// The last shot fired by the player.
    pub fn last_shot(&self) -> Option<&Shot> {
        self.shot.as_ref()
    }

    /// Fires with the current sliders.
    ///
    /// Returns `false` when input is locked.
    #[instrument(skip(self), fields(angle = self.angle, power = self.power, wind = self.wind))]
    pub fn fire(&mut self) -> bool {
        if !self.accepts_input() {
            debug!("Fire ignored while input is locked");
            return false;
        }
        self.state.spend_attempt();
        let jitter = self.rng.random_range(-JITTER..JITTER);
        let shot = solve_shot(self.angle, self.power, self.wind, jitter);
        debug!(landing = shot.landing_x, hit = shot.hit, "Shell fired");
        let delay = Delay::new(flight_time(&shot));
        self.shot = Some(shot);
        self.phase = ThunderPhase::ShellInFlight { delay };
        true
    }

    /// Advances timed transitions by `elapsed`.
    pub fn tick(&mut self, elapsed: Duration) {
        let mut budget = elapsed;
        loop {
            let leftover = match &mut self.phase {
                ThunderPhase::ShellInFlight { delay } | ThunderPhase::EnemyReloading { delay } => {
                    match delay.advance(budget) {
                        Some(leftover) => leftover,
                        None => return,
                    }
                }
                ThunderPhase::Aiming | ThunderPhase::Finished | ThunderPhase::Abandoned => return,
            };
            self.complete_phase();
            budget = leftover;
        }
    }

    /// Cancels every pending transition.
    #[instrument(skip(self))]
    pub fn abandon(&mut self) {
        debug!("Thunder duel abandoned");
        self.phase = ThunderPhase::Abandoned;
    }

    fn complete_phase(&mut self) {
        match self.phase {
            ThunderPhase::ShellInFlight { .. } => {
                if self.shot.as_ref().is_some_and(|shot| shot.hit) {
                    self.enemy_health = self.enemy_health.saturating_sub(1);
                    self.state.award_player(1);
                    debug!(enemy_health = self.enemy_health, "Enemy tank hit");
                }
                if self.enemy_health == 0 {
                    self.finish();
                } else {
                    self.state.pass_turn_to(TurnOwner::Opponent);
                    self.phase = ThunderPhase::EnemyReloading {
                        delay: Delay::millis(RELOAD_MS),
                    };
                }
            }
            ThunderPhase::EnemyReloading { .. } => {
                if self.opponent.thunder_shot() {
                    self.my_health = self.my_health.saturating_sub(1);
                    self.state.award_opponent(1);
                    debug!(my_health = self.my_health, "Player tank hit");
                }
                if self.my_health == 0 {
                    self.finish();
                } else {
                    self.state.next_round(SHOTS_PER_TURN);
                    self.phase = ThunderPhase::Aiming;
                }
            }
            ThunderPhase::Aiming | ThunderPhase::Finished | ThunderPhase::Abandoned => {}
        }
    }

    fn finish(&mut self) {
        self.state.pass_turn_to(TurnOwner::Player);
        info!(
            my_health = self.my_health,
            enemy_health = self.enemy_health,
            "Thunder duel finished"
        );
        self.phase = ThunderPhase::Finished;
    }
}

fn flight_time(shot: &Shot) -> Duration {
    let samples = shot.trajectory.len().saturating_sub(1) as u64;
    Duration::from_millis(SAMPLE_MS * samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trajectory_starts_at_cannon_and_ends_on_ground() {
        let shot = solve_shot(45, 50, 0, 0.0);
        assert_eq!(shot.trajectory.first().copied(), Some(CANNON));
        let last = shot.trajectory.last().copied().unwrap();
        assert_eq!(last.y, CANNON.y);
        assert_eq!(last.x, shot.landing_x);
    }

    #[test]
    fn test_default_sliders_fall_short() {
        let shot = solve_shot(ANGLE_DEFAULT, POWER_DEFAULT, 0, 0.0);
        assert!(shot.landing_x < ENEMY_X - HIT_RADIUS);
        assert!(!shot.hit);
    }

    #[test]
    fn test_tailwind_carries_further() {
        let calm = solve_shot(45, 70, 0, 0.0);
        let tail = solve_shot(45, 70, 14, 0.0);
        assert!(tail.landing_x > calm.landing_x);
    }
}
