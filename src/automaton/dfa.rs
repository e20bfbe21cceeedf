//! Deterministic finite automaton over propositional interpretations.

use super::validation::{self, DfaViolation};
use crate::core::{Alphabet, Interpretation, StateId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A DFA with dense state numbering.
///
/// States are `0..transitions.len()`; row `i` of the transition table holds
/// the outgoing edges of state `i`. A map per row makes the automaton
/// deterministic by construction. Totality is not assumed: call
/// [`Dfa::validate`] (or build a [`RewardAutomaton`](super::RewardAutomaton),
/// which does so) before relying on it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dfa {
    alphabet: Alphabet,
    initial: StateId,
    accepting: BTreeSet<StateId>,
    transitions: Vec<BTreeMap<Interpretation, StateId>>,
}

impl Dfa {
    pub fn new(
        alphabet: Alphabet,
        initial: StateId,
        accepting: BTreeSet<StateId>,
        transitions: Vec<BTreeMap<Interpretation, StateId>>,
    ) -> Self {
        Self {
            alphabet,
            initial,
            accepting,
            transitions,
        }
    }

    /// Check the DFA is complete over its alphabet and every referenced
    /// state exists. All violations are reported together.
    pub fn validate(&self) -> Result<(), Vec<DfaViolation>> {
        validation::into_violations(validation::validate(self))
    }

    pub fn num_states(&self) -> usize {
        self.transitions.len()
    }

    pub fn states(&self) -> impl Iterator<Item = StateId> {
        (0..self.transitions.len()).map(StateId::new)
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn initial_state(&self) -> StateId {
        self.initial
    }

    pub fn accepting_states(&self) -> &BTreeSet<StateId> {
        &self.accepting
    }

    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.contains(&state)
    }

    pub fn transition(&self, state: StateId, interpretation: &Interpretation) -> Option<StateId> {
        self.transitions
            .get(state.index())
            .and_then(|row| row.get(interpretation))
            .copied()
    }

    /// Outgoing edges of `state`, or `None` if the state does not exist.
    pub fn transitions_from(&self, state: StateId) -> Option<&BTreeMap<Interpretation, StateId>> {
        self.transitions.get(state.index())
    }

    /// Redirect every edge of `state` back to itself.
    pub(crate) fn make_absorbing(&mut self, state: StateId) {
        if let Some(row) = self.transitions.get_mut(state.index()) {
            *row = self
                .alphabet
                .iter()
                .map(|interpretation| (interpretation.clone(), state))
                .collect();
        }
    }
}
