//! Fixed-size roster of lobby seats.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::invariants::Invariant;

/// Seats in a lobby.
pub const SLOT_COUNT: usize = 4;

/// Fewest ready players needed to start.
pub const MIN_READY: usize = 2;

/// Roster operation failures.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum LobbyError {
    /// Every seat is taken.
    #[display("Lobby is full")]
    RosterFull,
    /// The seat has nobody in it.
    #[display("Slot {slot} is empty")]
    EmptySlot {
        /// Seat index.
        slot: usize,
    },
    /// No such seat.
    #[display("Slot {slot} is out of range")]
    SlotOutOfRange {
        /// Seat index.
        slot: usize,
    },
}

/// One seat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    /// Nobody here.
    #[default]
    Empty,
    /// A player and their ready flag.
    Occupied {
        /// Player name.
        name: String,
        /// Whether they pressed ready.
        ready: bool,
    },
}

impl Slot {
    /// Whether someone sits here.
    pub fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied { .. })
    }

    /// Whether someone sits here and is ready.
    pub fn is_ready(&self) -> bool {
        matches!(self, Slot::Occupied { ready: true, .. })
    }
}

/// The lobby seats.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    slots: [Slot; SLOT_COUNT],
}

impl Roster {
    /// Empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// All seats, in order.
    pub fn slots(&self) -> &[Slot; SLOT_COUNT] {
        &self.slots
    }

    /// Seats the player in the first empty slot and returns its index.
    ///
    /// # Errors
    ///
    /// Returns [`LobbyError::RosterFull`] when no slot is free.
    #[instrument(skip(self, name), fields(name = %name.as_ref()))]
    pub fn join(&mut self, name: impl AsRef<str>) -> Result<usize, LobbyError> {
        let index = self
            .slots
            .iter()
            .position(|s| !s.is_occupied())
            .ok_or(LobbyError::RosterFull)?;
        self.slots[index] = Slot::Occupied {
            name: name.as_ref().to_string(),
            ready: false,
        };
        debug!(slot = index, "Player joined");
        Ok(index)
    }

    /// Empties `slot`.
    ///
    /// # Errors
    ///
    /// Fails if the slot is out of range or already empty.
    #[instrument(skip(self))]
    pub fn leave(&mut self, slot: usize) -> Result<(), LobbyError> {
        let seat = self.occupied_mut(slot)?;
        *seat = Slot::Empty;
        debug!("Player left");
        Ok(())
    }

    /// Sets the ready flag of the player in `slot`.
    ///
    /// # Errors
    ///
    /// Fails if the slot is out of range or empty.
    #[instrument(skip(self))]
    pub fn set_ready(&mut self, slot: usize, value: bool) -> Result<(), LobbyError> {
        if let Slot::Occupied { ready, .. } = self.occupied_mut(slot)? {
            *ready = value;
        }
        Ok(())
    }

    /// Flips the ready flag of the player in `slot` and returns the new value.
    ///
    /// # Errors
    ///
    /// Fails if the slot is out of range or empty.
    #[instrument(skip(self))]
    pub fn toggle_ready(&mut self, slot: usize) -> Result<bool, LobbyError> {
        match self.occupied_mut(slot)? {
            Slot::Occupied { ready, .. } => {
                *ready = !*ready;
                Ok(*ready)
            }
            Slot::Empty => Err(LobbyError::EmptySlot { slot }),
        }
    }

    /// Seats with a player.
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_occupied()).count()
    }

    /// Seats with a ready player.
    pub fn ready_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_ready()).count()
    }

    /// At least [`MIN_READY`] players are ready and nobody seated is unready.
    pub fn all_ready(&self) -> bool {
        let ready = self.ready_count();
        ready >= MIN_READY && ready == self.occupied_count()
    }

    fn occupied_mut(&mut self, slot: usize) -> Result<&mut Slot, LobbyError> {
        let seat = self
            .slots
            .get_mut(slot)
            .ok_or(LobbyError::SlotOutOfRange { slot })?;
        if seat.is_occupied() {
            Ok(seat)
        } else {
            Err(LobbyError::EmptySlot { slot })
        }
    }
}

/// Ready count never exceeds the occupied count.
pub struct ReadyWithinOccupied;

impl Invariant<Roster> for ReadyWithinOccupied {
    fn holds(roster: &Roster) -> bool {
        roster.ready_count() <= roster.occupied_count() && roster.occupied_count() <= SLOT_COUNT
    }

    fn description() -> &'static str {
        "Ready players are a subset of seated players"
    }
}
