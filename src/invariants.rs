//! First-class invariants for the game and lobby state machines.
//!
//! Invariants are logical properties that must hold after every state
//! transition. They are asserted in debug builds and tested directly.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}
