//! The fixed fleet every naval board carries.

use serde::{Deserialize, Serialize};

/// One of the five ships of a fleet.
///
/// Each kind appears exactly once per board, so the kind doubles as the
/// ship id stored in board cells.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum ShipKind {
    /// Five cells.
    Carrier,
    /// Four cells.
    Battleship,
    /// Three cells.
    Cruiser,
    /// Three cells.
    Submarine,
    /// Two cells.
    Destroyer,
}

impl ShipKind {
    /// The whole fleet in selection order.
    pub const ALL: [ShipKind; 5] = [
        Self::Carrier,
        Self::Battleship,
        Self::Cruiser,
        Self::Submarine,
        Self::Destroyer,
    ];

    /// Number of cells the ship covers.
    pub fn length(self) -> usize {
        match self {
            Self::Carrier => 5,
            Self::Battleship => 4,
            Self::Cruiser | Self::Submarine => 3,
            Self::Destroyer => 2,
        }
    }

    /// One-letter marker used when drawing the board.
    pub fn marker(self) -> char {
        match self {
            Self::Carrier => 'C',
            Self::Battleship => 'B',
            Self::Cruiser => 'R',
            Self::Submarine => 'S',
            Self::Destroyer => 'D',
        }
    }

    /// Ship for a 1-based selection key.
    pub fn from_index(index: usize) -> Option<Self> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

/// Direction a ship extends from its origin cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display)]
pub enum Orientation {
    /// Extends to the right (increasing column).
    #[default]
    Horizontal,
    /// Extends downwards (increasing row).
    Vertical,
}

impl Orientation {
    /// The other orientation.
    pub fn toggle(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}
