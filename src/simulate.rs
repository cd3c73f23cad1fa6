//! Headless matches played by a scripted player.
//!
//! Used by the `simulate` command to exercise a game end to end without a
//! terminal.

use std::time::Duration;

use derive_getters::Getters;
use tracing::{debug, info, instrument};

use crate::games::GameId;
use crate::games::archery::{ArcheryGame, ArcheryPhase};
use crate::games::match_state::{MatchState, TurnOwner};
use crate::games::naval::{CellState, Coord, NavalGame, ShipKind};
use crate::games::opponent::SyntheticOpponent;
use crate::games::pong::{PongGame, PongPhase, Swipe};
use crate::games::thunder::{ThunderGame, ThunderPhase};

/// Opponent name used in simulated matches.
pub const SIMULATED_OPPONENT: &str = "Sandy";

const STEP: Duration = Duration::from_millis(100);
const MAX_STEPS: usize = 10_000;

/// Outcome of a simulated match.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_more::Display)]
#[display(
    "{} vs {}: {} - {} after {} round(s), {}",
    game,
    opponent,
    my_score,
    opponent_score,
    rounds,
    verdict
)]
pub struct SimulationReport {
    game: GameId,
    opponent: String,
    my_score: u32,
    opponent_score: u32,
    rounds: u32,
    verdict: String,
}

impl SimulationReport {
    fn from_state(game: GameId, opponent: &str, state: &MatchState) -> Self {
        let verdict = match state.leader() {
            Some(TurnOwner::Player) => "you lead".to_string(),
            Some(TurnOwner::Opponent) => format!("{opponent} leads"),
            None => "tied".to_string(),
        };
        Self {
            game,
            opponent: opponent.to_string(),
            my_score: *state.my_score(),
            opponent_score: *state.opponent_score(),
            rounds: *state.round(),
            verdict,
        }
    }
}

/// Plays one match of `game` with a scripted player.
#[instrument]
pub fn simulate(game: GameId, seed: Option<u64>) -> SimulationReport {
    let opponent = Box::new(SyntheticOpponent::new(
        SIMULATED_OPPONENT,
        seed.map(|s| s.wrapping_add(1)),
    ));
    let report = match game {
        GameId::Archery => {
            let mut match_ = ArcheryGame::new(opponent, seed);
            for _ in 0..MAX_STEPS {
                if *match_.phase() == ArcheryPhase::Finished {
                    break;
                }
                match_.release();
                match_.tick(STEP);
            }
            SimulationReport::from_state(game, match_.opponent_name(), match_.state())
        }
        GameId::Pong => {
            let mut match_ = PongGame::new(opponent, seed);
            let swipe = Swipe::from_launch(0.0, -40.0);
            for _ in 0..MAX_STEPS {
                if *match_.phase() == PongPhase::Finished {
                    break;
                }
                match_.throw(swipe);
                match_.tick(STEP);
            }
            SimulationReport::from_state(game, match_.opponent_name(), match_.state())
        }
        GameId::Thunder => {
            let mut match_ = ThunderGame::new(opponent, seed).with_wind(0);
            match_.set_angle(45);
            match_.set_power(82);
            for _ in 0..MAX_STEPS {
                if *match_.phase() == ThunderPhase::Finished {
                    break;
                }
                match_.fire();
                match_.tick(STEP);
            }
            SimulationReport::from_state(game, match_.opponent_name(), match_.state())
        }
        GameId::Naval => simulate_naval(NavalGame::new(opponent, seed)),
    };
    info!(%report, "Simulation finished");
    report
}

fn simulate_naval(mut match_: NavalGame) -> SimulationReport {
    let fleet_cells: u32 = ShipKind::ALL.iter().map(|s| s.length() as u32).sum();
    match_.auto_place_remaining();
    match_.start_battle();
    let mut targets = Coord::all();
    for _ in 0..MAX_STEPS {
        let state = match_.state();
        if *state.my_score() >= fleet_cells || *state.opponent_score() >= fleet_cells {
            break;
        }
        if !match_.awaiting_opponent() {
            let Some(target) = targets.find(|&c| match_.opponent_view(c) == CellState::Empty)
            else {
                break;
            };
            if let Ok(outcome) = match_.attack(target) {
                debug!(cell = %target.label(), ?outcome, "Scripted shot");
            }
        }
        match_.tick(STEP);
    }
    SimulationReport::from_state(GameId::Naval, match_.opponent_name(), match_.state())
}
