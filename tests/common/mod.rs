//! Shared helpers for integration tests.

#![allow(dead_code)]

use kenny_games::{Coord, Opponent};

/// Opponent with fixed, predictable decisions.
#[derive(Debug, Clone)]
pub struct ScriptedOpponent {
    pub volley: u32,
    pub pong_hits: bool,
    pub thunder_hits: bool,
}

impl ScriptedOpponent {
    /// Never scores.
    pub fn harmless() -> Self {
        Self {
            volley: 0,
            pong_hits: false,
            thunder_hits: false,
        }
    }

    /// Always scores.
    pub fn deadly() -> Self {
        Self {
            volley: 20,
            pong_hits: true,
            thunder_hits: true,
        }
    }
}

impl Opponent for ScriptedOpponent {
    fn name(&self) -> &str {
        "Script"
    }

    fn archery_volley(&mut self) -> u32 {
        self.volley
    }

    fn pong_throw(&mut self, standing: &[usize]) -> Option<usize> {
        if self.pong_hits {
            standing.first().copied()
        } else {
            None
        }
    }

    fn thunder_shot(&mut self) -> bool {
        self.thunder_hits
    }

    fn naval_shot(&mut self, open: &[Coord]) -> Option<Coord> {
        open.first().copied()
    }
}
