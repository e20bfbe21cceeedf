//! Structural validation of a DFA using `Validation`.
//!
//! Every check runs and every violation is reported, so a broken automaton
//! coming out of a formula compiler is diagnosed in a single pass instead of
//! one missing transition at a time.

use super::dfa::Dfa;
use crate::core::{Interpretation, StateId};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A single reason a DFA is unusable as a reward automaton.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DfaViolation {
    #[error("Automaton has no states")]
    NoStates,

    #[error("Alphabet is empty")]
    EmptyAlphabet,

    #[error("Initial state {0} is not a state of the automaton")]
    UnknownInitialState(StateId),

    #[error("Accepting state {0} is not a state of the automaton")]
    UnknownAcceptingState(StateId),

    #[error("Missing transition from {state} on {interpretation}")]
    MissingTransition {
        state: StateId,
        interpretation: Interpretation,
    },

    #[error("Transition from {state} on {interpretation} targets unknown state {target}")]
    DanglingTransition {
        state: StateId,
        interpretation: Interpretation,
        target: StateId,
    },

    #[error("Transition from {state} on {interpretation} is outside the alphabet")]
    ForeignInterpretation {
        state: StateId,
        interpretation: Interpretation,
    },
}

type Check = Validation<(), NonEmptyVec<DfaViolation>>;

fn check(ok: bool, violation: impl FnOnce() -> DfaViolation) -> Check {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

/// Check `dfa` is total over its alphabet and internally consistent.
pub(crate) fn validate(dfa: &Dfa) -> Check {
    let num_states = dfa.num_states();
    let in_range = |state: StateId| state.index() < num_states;

    let mut checks: Vec<Check> = vec![
        check(num_states > 0, || DfaViolation::NoStates),
        check(!dfa.alphabet().is_empty(), || DfaViolation::EmptyAlphabet),
        check(in_range(dfa.initial_state()), || {
            DfaViolation::UnknownInitialState(dfa.initial_state())
        }),
    ];

    for &state in dfa.accepting_states() {
        checks.push(check(in_range(state), || {
            DfaViolation::UnknownAcceptingState(state)
        }));
    }

    for state in dfa.states() {
        for interpretation in dfa.alphabet().iter() {
            checks.push(check(
                dfa.transition(state, interpretation).is_some(),
                || DfaViolation::MissingTransition {
                    state,
                    interpretation: interpretation.clone(),
                },
            ));
        }

        for (interpretation, &target) in dfa.transitions_from(state).into_iter().flatten() {
            checks.push(check(in_range(target), || DfaViolation::DanglingTransition {
                state,
                interpretation: interpretation.clone(),
                target,
            }));
            checks.push(check(dfa.alphabet().contains(interpretation), || {
                DfaViolation::ForeignInterpretation {
                    state,
                    interpretation: interpretation.clone(),
                }
            }));
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

/// Flatten a failed validation into an owned list of violations.
pub(crate) fn into_violations(result: Check) -> Result<(), Vec<DfaViolation>> {
    match result {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => Err(errors.iter().cloned().collect()),
    }
}
