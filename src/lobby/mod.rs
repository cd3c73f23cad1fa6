//! Pre-game lobby: seats, ready flags, and the launch countdown.

mod readiness;
mod roster;

pub use readiness::{
    COPIED_FOR, COUNTDOWN_FROM, COUNTDOWN_STEP, CountdownGate, INVITE_BASE, INVITE_CODE_LEN,
    InviteLink, Lobby, LobbyEvent, LobbyPhase,
};
pub use roster::{LobbyError, MIN_READY, ReadyWithinOccupied, Roster, SLOT_COUNT, Slot};
