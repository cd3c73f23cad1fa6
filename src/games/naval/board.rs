//! 10×10 naval board.

use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

use crate::games::naval::fleet::{Orientation, ShipKind};
use crate::games::naval::game::{AttackError, PlacementError};
use crate::invariants::Invariant;

/// Rows and columns on a board.
pub const GRID_SIZE: usize = 10;

const COLUMN_LABELS: &[u8; GRID_SIZE] = b"ABCDEFGHIJ";

/// A cell address on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    row: usize,
    col: usize,
}

impl Coord {
    /// Creates a coordinate, or `None` if it lies off the board.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        (row < GRID_SIZE && col < GRID_SIZE).then_some(Self { row, col })
    }

    /// Row index, top to bottom.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Column index, left to right.
    pub fn col(&self) -> usize {
        self.col
    }

    /// Label such as `A1` (column letter, 1-based row).
    pub fn label(&self) -> String {
        format!("{}{}", COLUMN_LABELS[self.col] as char, self.row + 1)
    }

    /// Every cell of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..GRID_SIZE).flat_map(|row| (0..GRID_SIZE).map(move |col| Coord { row, col }))
    }
}

/// What a cell currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    /// Open water, never attacked.
    #[default]
    Empty,
    /// Part of a ship, never attacked.
    Ship,
    /// Attacked ship cell.
    Hit,
    /// Attacked open water.
    Miss,
}

impl CellState {
    /// Whether the cell has already been attacked.
    pub fn is_attacked(self) -> bool {
        matches!(self, Self::Hit | Self::Miss)
    }
}

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Current state.
    pub state: CellState,
    /// Ship covering the cell, if any. Kept after the cell is hit.
    pub ship: Option<ShipKind>,
}

/// Result of an attack on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum ShotOutcome {
    /// A ship cell was struck.
    Hit,
    /// Open water.
    Miss,
}

/// A 10×10 board with its fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; GRID_SIZE]; GRID_SIZE],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            cells: [[Cell::default(); GRID_SIZE]; GRID_SIZE],
        }
    }

    /// Places the whole fleet at random legal positions.
    #[instrument(skip(rng))]
    pub fn random_fleet<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut board = Self::new();
        for ship in ShipKind::iter() {
            board.place_randomly(ship, rng);
        }
        debug_assert!(FleetIntact::holds(&board), "{}", FleetIntact::description());
        board
    }

    /// Places `ship` at a random legal position.
    ///
    /// Retries until a free footprint is found; an empty 10×10 board always
    /// has room for the fixed fleet.
    pub fn place_randomly<R: Rng + ?Sized>(&mut self, ship: ShipKind, rng: &mut R) {
        loop {
            let orientation = if rng.random_bool(0.5) {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let row = rng.random_range(0..GRID_SIZE);
            let col = rng.random_range(0..GRID_SIZE);
            if self.place(ship, row, col, orientation).is_ok() {
                debug!(%ship, row, col, %orientation, "Ship placed at random");
                return;
            }
        }
    }

    /// Cell at `coord`.
    pub fn cell(&self, coord: Coord) -> Cell {
        self.cells[coord.row][coord.col]
    }

    /// Cells a ship of `length` would cover from `(row, col)`.
    ///
    /// Returns `None` if any of them falls off the board.
    pub fn footprint(
        row: usize,
        col: usize,
        orientation: Orientation,
        length: usize,
    ) -> Option<Vec<Coord>> {
        (0..length)
            .map(|i| match orientation {
                Orientation::Horizontal => col.checked_add(i).and_then(|c| Coord::new(row, c)),
                Orientation::Vertical => row.checked_add(i).and_then(|r| Coord::new(r, col)),
            })
            .collect()
    }

    /// Whether a ship of `length` fits at `(row, col)`: fully on the board
    /// and not overlapping any ship already placed.
    #[instrument(skip(self))]
    pub fn can_place(&self, row: usize, col: usize, orientation: Orientation, length: usize) -> bool {
        match Self::footprint(row, col, orientation, length) {
            Some(cells) => cells.iter().all(|&c| self.cell(c).ship.is_none()),
            None => false,
        }
    }

    /// Places `ship` with its origin at `(row, col)`.
    ///
    /// # Errors
    ///
    /// [`PlacementError::AlreadyPlaced`] if the ship is on the board,
    /// [`PlacementError::OutOfBounds`] or [`PlacementError::Overlap`] if the
    /// footprint does not fit. The board is unchanged on error.
    #[instrument(skip(self))]
    pub fn place(
        &mut self,
        ship: ShipKind,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<(), PlacementError> {
        if self.contains_ship(ship) {
            return Err(PlacementError::AlreadyPlaced { ship });
        }
        let cells = Self::footprint(row, col, orientation, ship.length())
            .ok_or(PlacementError::OutOfBounds { row, col })?;
        if cells.iter().any(|&c| self.cell(c).ship.is_some()) {
            return Err(PlacementError::Overlap { row, col });
        }
        for c in cells {
            self.cells[c.row][c.col] = Cell {
                state: CellState::Ship,
                ship: Some(ship),
            };
        }
        Ok(())
    }

    /// Whether `ship` has been placed.
    pub fn contains_ship(&self, ship: ShipKind) -> bool {
        Coord::all().any(|c| self.cell(c).ship == Some(ship))
    }

    /// Attacks `coord`: ship becomes hit, open water becomes miss.
    ///
    /// # Errors
    ///
    /// [`AttackError::AlreadyTargeted`] if the cell was attacked before.
    #[instrument(skip(self), fields(cell = %coord.label()))]
    pub fn receive_attack(&mut self, coord: Coord) -> Result<ShotOutcome, AttackError> {
        let cell = &mut self.cells[coord.row][coord.col];
        match cell.state {
            CellState::Hit | CellState::Miss => Err(AttackError::AlreadyTargeted { coord }),
            CellState::Ship => {
                cell.state = CellState::Hit;
                Ok(ShotOutcome::Hit)
            }
            CellState::Empty => {
                cell.state = CellState::Miss;
                Ok(ShotOutcome::Miss)
            }
        }
    }

    /// Cells that have not been attacked yet.
    pub fn open_cells(&self) -> Vec<Coord> {
        Coord::all()
            .filter(|&c| !self.cell(c).state.is_attacked())
            .collect()
    }

    /// Number of ship cells struck.
    pub fn hits(&self) -> usize {
        self.count(CellState::Hit)
    }

    /// Number of attacks on open water.
    pub fn misses(&self) -> usize {
        self.count(CellState::Miss)
    }

    /// State as seen by the other side: unattacked ships look like water.
    pub fn fogged_state(&self, coord: Coord) -> CellState {
        match self.cell(coord).state {
            CellState::Ship => CellState::Empty,
            other => other,
        }
    }

    fn count(&self, state: CellState) -> usize {
        Coord::all().filter(|&c| self.cell(c).state == state).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Every placed ship covers exactly its length in cells, and every cell
/// whose state is ship or hit belongs to a ship.
pub struct FleetIntact;

impl Invariant<Board> for FleetIntact {
    fn holds(board: &Board) -> bool {
        let lengths_match = ShipKind::iter().all(|ship| {
            let covered = Coord::all()
                .filter(|&c| board.cell(c).ship == Some(ship))
                .count();
            covered == 0 || covered == ship.length()
        });
        let states_match = Coord::all().all(|c| {
            let cell = board.cell(c);
            match cell.state {
                CellState::Ship | CellState::Hit => cell.ship.is_some(),
                CellState::Empty | CellState::Miss => cell.ship.is_none(),
            }
        });
        lengths_match && states_match
    }

    fn description() -> &'static str {
        "Placed ships cover exactly their length and ship cells carry a ship id"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footprint_off_board() {
        assert!(Board::footprint(0, 6, Orientation::Horizontal, 5).is_none());
        assert!(Board::footprint(6, 0, Orientation::Vertical, 5).is_none());
        assert_eq!(
            Board::footprint(0, 5, Orientation::Horizontal, 5).map(|c| c.len()),
            Some(5)
        );
    }

    #[test]
    fn test_coord_labels() {
        assert_eq!(Coord::new(0, 0).map(|c| c.label()), Some("A1".to_string()));
        assert_eq!(Coord::new(9, 9).map(|c| c.label()), Some("J10".to_string()));
        assert!(Coord::new(10, 0).is_none());
    }

    #[test]
    fn test_fleet_invariant_holds_after_placement() {
        let mut board = Board::new();
        board
            .place(ShipKind::Cruiser, 2, 2, Orientation::Vertical)
            .expect("placement fits");
        assert!(FleetIntact::holds(&board));
    }
}
