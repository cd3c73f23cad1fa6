//! Naval battle: fleet placement, then alternating attacks on 10×10 boards.

mod board;
mod fleet;
mod game;

pub use board::{Board, Cell, CellState, Coord, FleetIntact, GRID_SIZE, ShotOutcome};
pub use fleet::{Orientation, ShipKind};
pub use game::{AttackError, IncomingShot, NavalGame, NavalPhase, PlacementError};
