//! Simulation error types.

use crate::core::{Interpretation, StateId};
use thiserror::Error;

/// Errors raised while driving a reward automaton.
///
/// Both variants are programming errors in the caller or upstream of it.
/// Neither is recovered from by substituting a default state or reward.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationError {
    /// The transition function has no entry for this pair; the automaton
    /// was not completed over the interpretations the caller produces.
    #[error("No transition from state {state} on interpretation {interpretation}")]
    UndefinedTransition {
        state: StateId,
        interpretation: Interpretation,
    },

    /// A reward was requested before any step since the last reset.
    #[error("Reward observed before any step since reset")]
    NoPreviousState,
}
