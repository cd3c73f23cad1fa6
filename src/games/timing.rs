//! Timed transitions for the game phase machines.
//!
//! Every game advances through named phases. A phase that waits carries a
//! [`Delay`]; the owning state machine feeds it elapsed time through
//! `tick` and moves on once the delay reports completion. Time left over
//! after a delay completes is handed back so a single large tick can run a
//! whole sequence of phases.

use std::time::Duration;

use tracing::instrument;

/// A countdown to the next phase transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delay {
    remaining: Duration,
}

impl Delay {
    /// Creates a delay that completes after `duration`.
    #[instrument]
    pub fn new(duration: Duration) -> Self {
        Self {
            remaining: duration,
        }
    }

    /// Creates a delay of `millis` milliseconds.
    pub fn millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// Time still to wait.
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Consumes `elapsed` from the delay.
    ///
    /// Returns `Some(leftover)` once the delay has completed, where
    /// `leftover` is the part of `elapsed` not needed to finish it.
    /// Returns `None` while the delay is still pending.
    pub fn advance(&mut self, elapsed: Duration) -> Option<Duration> {
        if elapsed >= self.remaining {
            let leftover = elapsed - self.remaining;
            self.remaining = Duration::ZERO;
            Some(leftover)
        } else {
            self.remaining -= elapsed;
            None
        }
    }
}
