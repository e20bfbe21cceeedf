//! Build errors for DFAs and reward automata.

use crate::automaton::DfaViolation;
use crate::core::Interpretation;
use thiserror::Error;

/// Errors that can occur when building a DFA or a reward automaton.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("Alphabet not specified. Call .alphabet(alphabet) before .build()")]
    MissingAlphabet,

    #[error("State {state} has two different transitions on {interpretation}")]
    Nondeterministic {
        state: String,
        interpretation: Interpretation,
    },

    #[error("State {state} has more than one fallback target")]
    ConflictingFallback { state: String },

    #[error("Invalid automaton: {}", summarize(.0))]
    InvalidDfa(Vec<DfaViolation>),

    #[error("Terminal reward must be finite, got {0}")]
    NonFiniteReward(f64),
}

fn summarize(violations: &[DfaViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
