//! Naval match state machine: `Placement` → `Playing`.
//!
//! There is no sink detection and no victory condition; the match runs
//! until the screen is left.

use std::time::Duration;

use derive_more::{Display, Error};
use rand::rngs::StdRng;
use tracing::{debug, info, instrument, warn};

use crate::games::match_state::{MatchState, TurnOwner};
use crate::games::naval::board::{Board, CellState, Coord, FleetIntact, GRID_SIZE, ShotOutcome};
use crate::games::naval::fleet::{Orientation, ShipKind};
use crate::games::opponent::{Opponent, seeded_rng};
use crate::games::timing::Delay;
use crate::invariants::Invariant;

const OPPONENT_DELAY_MS: u64 = 1000;

/// Why a placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum PlacementError {
    /// Part of the footprint falls off the board.
    #[display("Ship at ({}, {}) does not fit on the board", row, col)]
    OutOfBounds {
        /// Origin row.
        row: usize,
        /// Origin column.
        col: usize,
    },
    /// The footprint crosses a ship already placed.
    #[display("Ship at ({}, {}) overlaps another ship", row, col)]
    Overlap {
        /// Origin row.
        row: usize,
        /// Origin column.
        col: usize,
    },
    /// The ship is already on the board.
    #[display("{} is already placed", ship)]
    AlreadyPlaced {
        /// The ship.
        ship: ShipKind,
    },
    /// Every ship has been placed.
    #[display("No ship selected")]
    NoShipSelected,
    /// The battle has started.
    #[display("Ships can only be placed before the battle")]
    WrongPhase,
}

/// Why an attack was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum AttackError {
    /// The cell was attacked before.
    #[display("{} was already targeted", coord.label())]
    AlreadyTargeted {
        /// The cell.
        coord: Coord,
    },
    /// Still placing ships.
    #[display("The battle has not started")]
    WrongPhase,
    /// The opponent has not answered the previous shot.
    #[display("Waiting for the opponent")]
    AwaitingOpponent,
}

/// Phase of a naval match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum NavalPhase {
    /// Player arranging the fleet.
    Placement,
    /// Attacks under way.
    Playing,
    /// Screen left; no further transitions.
    Abandoned,
}

/// The opponent's most recent shot at the player board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncomingShot {
    /// Cell attacked.
    pub coord: Coord,
    /// What it struck.
    pub outcome: ShotOutcome,
}

/// A naval match against an [`Opponent`].
///
/// The opponent fleet is fully stored here; views of it must go through
/// [`NavalGame::opponent_view`], which hides unstruck ships.
#[derive(Debug)]
pub struct NavalGame {
    phase: NavalPhase,
    my_board: Board,
    opponent_board: Board,
    selected: Option<ShipKind>,
    orientation: Orientation,
    placed: Vec<ShipKind>,
    opponent_turn: Option<Delay>,
    last_incoming: Option<IncomingShot>,
    state: MatchState,
    rng: StdRng,
    opponent: Box<dyn Opponent>,
}

impl NavalGame {
    /// Starts a match in placement with the opponent fleet laid out at random.
    #[instrument(skip(opponent), fields(opponent = %opponent.name()))]
    pub fn new(opponent: Box<dyn Opponent>, seed: Option<u64>) -> Self {
        let mut rng = seeded_rng(seed);
        let opponent_board = Board::random_fleet(&mut rng);
        info!("Naval match started");
        Self {
            phase: NavalPhase::Placement,
            my_board: Board::new(),
            opponent_board,
            selected: Some(ShipKind::ALL[0]),
            orientation: Orientation::Horizontal,
            placed: Vec::new(),
            opponent_turn: None,
            last_incoming: None,
            state: MatchState::new((GRID_SIZE * GRID_SIZE) as u32),
            rng,
            opponent,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> NavalPhase {
        self.phase
    }

    /// Hit counts and turn bookkeeping. Attempts count unattacked
    /// opponent cells.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// The player's own board, ships visible.
    pub fn my_board(&self) -> &Board {
        &self.my_board
    }

    /// What the player may see of the opponent board.
    pub fn opponent_view(&self, coord: Coord) -> CellState {
        self.opponent_board.fogged_state(coord)
    }

    /// Ship currently selected for placement.
    pub fn selected(&self) -> Option<ShipKind> {
        self.selected
    }

    /// Orientation used for the next placement.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Ships already on the player board, in placement order.
    pub fn placed(&self) -> &[ShipKind] {
        &self.placed
    }

    /// The opponent's last shot, if any.
    pub fn last_incoming(&self) -> Option<IncomingShot> {
        self.last_incoming
    }

    /// Whether the opponent is about to fire.
    pub fn awaiting_opponent(&self) -> bool {
        self.opponent_turn.is_some()
    }

    /// Name of the opponent.
    pub fn opponent_name(&self) -> &str {
        self.opponent.name()
    }

    /// Whether all five ships are on the board.
    pub fn all_placed(&self) -> bool {
        self.placed.len() == ShipKind::ALL.len()
    }

    /// Selects a ship for placement.
    ///
    /// Placed ships are not selectable: returns `false` and leaves the
    /// selection untouched.
    #[instrument(skip(self))]
    pub fn select_ship(&mut self, ship: ShipKind) -> bool {
        if self.phase != NavalPhase::Placement || self.placed.contains(&ship) {
            debug!(%ship, "Selection ignored");
            return false;
        }
        self.selected = Some(ship);
        true
    }

    /// Flips between horizontal and vertical placement.
    pub fn toggle_orientation(&mut self) {
        self.orientation = self.orientation.toggle();
    }

    /// Whether the selected ship fits at `(row, col)` in the current
    /// orientation.
    pub fn can_place(&self, row: usize, col: usize) -> bool {
        match self.selected {
            Some(ship) if self.phase == NavalPhase::Placement => {
                self.my_board
                    .can_place(row, col, self.orientation, ship.length())
            }
            _ => false,
        }
    }

    /// Places the selected ship with its origin at `(row, col)`.
    ///
    /// On success the selection moves to the first ship not yet placed.
    ///
    /// # Errors
    ///
    /// Any [`PlacementError`]; the board and selection are unchanged.
    #[instrument(skip(self), fields(orientation = %self.orientation))]
    pub fn place_selected(&mut self, row: usize, col: usize) -> Result<ShipKind, PlacementError> {
        if self.phase != NavalPhase::Placement {
            return Err(PlacementError::WrongPhase);
        }
        let ship = self.selected.ok_or(PlacementError::NoShipSelected)?;
        if self.placed.contains(&ship) {
            return Err(PlacementError::AlreadyPlaced { ship });
        }
        self.my_board.place(ship, row, col, self.orientation)?;
        self.placed.push(ship);
        self.selected = self.next_unplaced();
        debug_assert!(FleetIntact::holds(&self.my_board), "{}", FleetIntact::description());
        debug!(%ship, next = ?self.selected, "Ship placed");
        Ok(ship)
    }

    /// Lays out every remaining ship at random.
    #[instrument(skip(self))]
    pub fn auto_place_remaining(&mut self) {
        if self.phase != NavalPhase::Placement {
            return;
        }
        for ship in ShipKind::ALL {
            if !self.placed.contains(&ship) {
                self.my_board.place_randomly(ship, &mut self.rng);
                self.placed.push(ship);
            }
        }
        self.selected = None;
    }

    /// Enters the battle once the whole fleet is placed.
    #[instrument(skip(self))]
    pub fn start_battle(&mut self) -> bool {
        if self.phase != NavalPhase::Placement || !self.all_placed() {
            debug!(placed = self.placed.len(), "Battle cannot start yet");
            return false;
        }
        info!("Naval battle started");
        self.phase = NavalPhase::Playing;
        true
    }

    /// Fires at an opponent cell. The opponent answers after a delay.
    ///
    /// # Errors
    ///
    /// [`AttackError::WrongPhase`] before the battle,
    /// [`AttackError::AwaitingOpponent`] while the opponent's answer is
    /// pending, [`AttackError::AlreadyTargeted`] for a repeated cell.
    #[instrument(skip(self), fields(cell = %coord.label()))]
    pub fn attack(&mut self, coord: Coord) -> Result<ShotOutcome, AttackError> {
        if self.phase != NavalPhase::Playing {
            return Err(AttackError::WrongPhase);
        }
        if self.opponent_turn.is_some() {
            return Err(AttackError::AwaitingOpponent);
        }
        let outcome = self.opponent_board.receive_attack(coord)?;
        if outcome == ShotOutcome::Hit {
            self.state.award_player(1);
        }
        self.state.spend_attempt();
        self.state.pass_turn_to(TurnOwner::Opponent);
        self.opponent_turn = Some(Delay::millis(OPPONENT_DELAY_MS));
        debug!(%outcome, "Player shot resolved");
        Ok(outcome)
    }

    /// Advances the pending opponent answer by `elapsed`.
    pub fn tick(&mut self, elapsed: Duration) {
        if self.phase != NavalPhase::Playing {
            return;
        }
        let Some(delay) = self.opponent_turn.as_mut() else {
            return;
        };
        if delay.advance(elapsed).is_none() {
            return;
        }
        self.opponent_turn = None;
        self.opponent_fires();
    }

    /// Cancels the pending opponent answer and freezes the match.
    #[instrument(skip(self))]
    pub fn abandon(&mut self) {
        debug!("Naval match abandoned");
        self.opponent_turn = None;
        self.phase = NavalPhase::Abandoned;
    }

    fn opponent_fires(&mut self) {
        let open = self.my_board.open_cells();
        match self.opponent.naval_shot(&open) {
            Some(coord) => match self.my_board.receive_attack(coord) {
                Ok(outcome) => {
                    if outcome == ShotOutcome::Hit {
                        self.state.award_opponent(1);
                    }
                    debug!(cell = %coord.label(), %outcome, "Opponent shot resolved");
                    self.last_incoming = Some(IncomingShot { coord, outcome });
                }
                Err(e) => warn!(error = %e, "Opponent chose an attacked cell"),
            },
            None => debug!("Opponent has no cell left to attack"),
        }
        self.state.pass_turn_to(TurnOwner::Player);
    }

    fn next_unplaced(&self) -> Option<ShipKind> {
        ShipKind::ALL
            .into_iter()
            .find(|ship| !self.placed.contains(ship))
    }
}
