//! The lobby readiness state machine.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info, instrument};

use crate::games::GameId;
use crate::games::opponent::seeded_rng;
use crate::games::timing::Delay;
use crate::invariants::Invariant;
use super::roster::{LobbyError, ReadyWithinOccupied, Roster};

/// First number shown by the countdown.
pub const COUNTDOWN_FROM: u32 = 3;

/// Time each countdown number stays on screen.
pub const COUNTDOWN_STEP: Duration = Duration::from_secs(1);

/// Base of every invite link.
pub const INVITE_BASE: &str = "https://kennygames.app/j/";

/// Characters in an invite code.
pub const INVITE_CODE_LEN: usize = 6;

/// How long the link shows as copied.
pub const COPIED_FOR: Duration = Duration::from_millis(2000);

const INVITE_ALPHABET: &[u8] = b"abcdefghijkmnpqrstuvwxyz23456789";

/// Where the lobby is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LobbyPhase {
    /// Waiting for everyone to be ready.
    Waiting,
    /// Everyone is ready; the game starts when this runs out.
    CountingDown {
        /// Number on screen.
        remaining: u32,
        /// Time until the number drops.
        delay: Delay,
    },
    /// The game has been started.
    Launched,
}

/// Something the screen has to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LobbyEvent {
    /// Start the game.
    Launch(GameId),
}

/// Shareable link to a lobby.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteLink {
    code: String,
    copied: Option<Delay>,
}

impl InviteLink {
    /// Link with a random code.
    #[instrument(skip(rng))]
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let code = (0..INVITE_CODE_LEN)
            .map(|_| char::from(INVITE_ALPHABET[rng.random_range(0..INVITE_ALPHABET.len())]))
            .collect();
        Self { code, copied: None }
    }

    /// The code part of the link.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Full link.
    pub fn url(&self) -> String {
        format!("{INVITE_BASE}{}", self.code)
    }

    /// Shows the copied notice for [`COPIED_FOR`].
    ///
    /// Writing [`InviteLink::url`] to the clipboard is up to the caller.
    #[instrument(skip(self), fields(code = %self.code))]
    pub fn copy(&mut self) {
        debug!("Invite link copy notice shown");
        self.copied = Some(Delay::new(COPIED_FOR));
    }

    /// Whether the copied notice is showing.
    pub fn is_copied(&self) -> bool {
        self.copied.is_some()
    }

    fn tick(&mut self, elapsed: Duration) {
        if let Some(delay) = self.copied.as_mut()
            && delay.advance(elapsed).is_some()
        {
            self.copied = None;
        }
    }
}

/// A lobby for one game.
#[derive(Debug, Clone)]
pub struct Lobby {
    game: GameId,
    roster: Roster,
    phase: LobbyPhase,
    invite: InviteLink,
}

impl Lobby {
    /// Empty lobby for `game`.
    #[instrument]
    pub fn new(game: GameId, seed: Option<u64>) -> Self {
        let mut rng = seeded_rng(seed);
        Self {
            game,
            roster: Roster::new(),
            phase: LobbyPhase::Waiting,
            invite: InviteLink::generate(&mut rng),
        }
    }

    /// Game this lobby starts.
    pub fn game(&self) -> GameId {
        self.game
    }

    /// Seats.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Current phase.
    pub fn phase(&self) -> &LobbyPhase {
        &self.phase
    }

    /// Invite link.
    pub fn invite(&self) -> &InviteLink {
        &self.invite
    }

    /// Number on the countdown, while it runs.
    pub fn countdown(&self) -> Option<u32> {
        match self.phase {
            LobbyPhase::CountingDown { remaining, .. } => Some(remaining),
            _ => None,
        }
    }

    /// See [`Roster::join`].
    ///
    /// # Errors
    ///
    /// Returns [`LobbyError::RosterFull`] when no slot is free.
    pub fn join(&mut self, name: impl AsRef<str>) -> Result<usize, LobbyError> {
        let slot = self.roster.join(name)?;
        self.reevaluate();
        Ok(slot)
    }

    /// See [`Roster::leave`].
    ///
    /// # Errors
    ///
    /// Fails if the slot is out of range or empty.
    pub fn leave(&mut self, slot: usize) -> Result<(), LobbyError> {
        self.roster.leave(slot)?;
        self.reevaluate();
        Ok(())
    }

    /// See [`Roster::set_ready`].
    ///
    /// # Errors
    ///
    /// Fails if the slot is out of range or empty.
    pub fn set_ready(&mut self, slot: usize, ready: bool) -> Result<(), LobbyError> {
        self.roster.set_ready(slot, ready)?;
        self.reevaluate();
        Ok(())
    }

    /// See [`Roster::toggle_ready`].
    ///
    /// # Errors
    ///
    /// Fails if the slot is out of range or empty.
    pub fn toggle_ready(&mut self, slot: usize) -> Result<bool, LobbyError> {
        let ready = self.roster.toggle_ready(slot)?;
        self.reevaluate();
        Ok(ready)
    }

    /// Shows the copied notice on the invite link.
    pub fn copy_invite(&mut self) {
        self.invite.copy();
    }

    /// Advances the countdown and the copied notice.
    ///
    /// Returns [`LobbyEvent::Launch`] exactly once, on the tick that ends
    /// the countdown.
    pub fn tick(&mut self, elapsed: Duration) -> Option<LobbyEvent> {
        self.invite.tick(elapsed);
        self.reevaluate();
        let mut budget = elapsed;
        loop {
            let LobbyPhase::CountingDown { remaining, delay } = &mut self.phase else {
                return None;
            };
            budget = delay.advance(budget)?;
            if *remaining > 1 {
                *remaining -= 1;
                *delay = Delay::new(COUNTDOWN_STEP);
                debug!(remaining = *remaining, "Countdown");
            } else {
                info!(game = %self.game, "Lobby launched");
                self.phase = LobbyPhase::Launched;
                return Some(LobbyEvent::Launch(self.game));
            }
        }
    }

    fn reevaluate(&mut self) {
        debug_assert!(
            ReadyWithinOccupied::holds(&self.roster),
            "{}",
            ReadyWithinOccupied::description()
        );
        let ready = CountdownGate::holds(&self.roster);
        match self.phase {
            LobbyPhase::Waiting if ready => {
                info!(
                    players = self.roster.occupied_count(),
                    "Everyone ready, countdown started"
                );
                self.phase = LobbyPhase::CountingDown {
                    remaining: COUNTDOWN_FROM,
                    delay: Delay::new(COUNTDOWN_STEP),
                };
            }
            LobbyPhase::CountingDown { .. } if !ready => {
                info!("Countdown cancelled");
                self.phase = LobbyPhase::Waiting;
            }
            _ => {}
        }
    }
}

/// The countdown may run only while at least two players are seated and
/// every seated player is ready.
pub struct CountdownGate;

impl Invariant<Roster> for CountdownGate {
    fn holds(roster: &Roster) -> bool {
        roster.all_ready()
    }

    fn description() -> &'static str {
        "At least two seated players and every seated player ready"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invite_code_shape() {
        let lobby = Lobby::new(GameId::Naval, Some(5));
        let code = lobby.invite().code();
        assert_eq!(code.len(), INVITE_CODE_LEN);
        assert!(code.bytes().all(|b| INVITE_ALPHABET.contains(&b)));
        assert!(lobby.invite().url().starts_with(INVITE_BASE));
    }
}
