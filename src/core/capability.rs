//! Capability traits shared by automata and simulators.
//!
//! Simulation code is written against these traits rather than a concrete
//! automaton type, so alternative goal representations can drive the same
//! reward loop.

use super::interpretation::{Alphabet, Interpretation, Symbol};
use super::state::StateId;
use crate::simulator::SimulationError;
use std::collections::BTreeSet;

/// A complete goal automaton annotated with distance-to-goal levels.
///
/// Implementations are immutable once built and are shared read-only
/// between simulators, hence the `Send + Sync` bound.
pub trait Automaton: Send + Sync {
    /// Number of states; states are `0..num_states()`.
    fn num_states(&self) -> usize;

    fn initial_state(&self) -> StateId;

    /// Interpretations the transition function is keyed on.
    fn alphabet(&self) -> &Alphabet;

    /// Successor of `state` on `interpretation`, or `None` when the
    /// transition function has no entry for the pair.
    fn transition(&self, state: StateId, interpretation: &Interpretation) -> Option<StateId>;

    fn is_accepting(&self, state: StateId) -> bool;

    /// True when no accepting state is reachable from `state`.
    fn is_failure(&self, state: StateId) -> bool;

    /// Reachability level of every state, indexed by [`StateId::index`].
    fn levels(&self) -> &[usize];

    /// Reward granted once when an episode ends in an accepting state.
    fn reward(&self) -> f64;

    /// Shaping potential of `state`; zero once the episode has ended.
    fn potential(&self, state: StateId, is_terminal: bool) -> f64;

    /// Propositions the transition function reads.
    fn propositions(&self) -> BTreeSet<Symbol> {
        self.alphabet().propositions()
    }

    /// True when a single step on some interpretation leads from `from` to `to`.
    fn can_step(&self, from: StateId, to: StateId) -> bool {
        self.alphabet()
            .iter()
            .any(|interpretation| self.transition(from, interpretation) == Some(to))
    }
}

/// Stateful driver that advances an automaton one interpretation at a time.
pub trait Simulator {
    /// Return to the initial state and forget the episode.
    fn reset(&mut self);

    /// Advance on `interpretation`, returning the new current state.
    fn step(&mut self, interpretation: &Interpretation) -> Result<StateId, SimulationError>;

    fn current_state(&self) -> StateId;

    /// Shaped reward for the most recent transition.
    fn observe_reward(&self, is_terminal: bool) -> Result<f64, SimulationError>;

    fn is_failed(&self) -> bool;

    /// True when the current state is accepting.
    fn is_true(&self) -> bool;

    /// Episode end from the automaton's point of view.
    fn is_terminal(&self) -> bool {
        self.is_true() || self.is_failed()
    }

    /// Cardinality of the discrete observation space over automaton states.
    fn state_space_size(&self) -> usize;
}
