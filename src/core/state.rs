//! Automaton state identifiers.
//!
//! States are opaque to everything outside the automaton. After renumbering
//! they are dense indices `0..n`, which lets an RL loop size a discrete
//! observation space directly from the automaton.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one automaton state.
///
/// # Example
///
/// ```rust
/// use temporal_reward::core::StateId;
///
/// let state = StateId::new(3);
/// assert_eq!(state.index(), 3);
/// assert_eq!(state.to_string(), "q3");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(usize);

impl StateId {
    /// Create an identifier from a dense state index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Dense index of this state, suitable for indexing per-state tables.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for StateId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}
