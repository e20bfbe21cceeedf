//! Reward automaton: a validated DFA plus a terminal reward and cached levels.

use super::dfa::Dfa;
use super::levels::{compute_levels, Levels};
use crate::builder::BuildError;
use crate::core::{Alphabet, Automaton, Interpretation, StateId};
use std::collections::BTreeSet;
use tracing::{info, warn};

/// Goal automaton annotated for potential-based reward shaping.
///
/// Built once from a complete DFA and then shared read-only (typically behind
/// an `Arc`) by every simulator running an episode against the same goal.
/// Failure states are turned into absorbing sinks during construction, so a
/// simulator that enters one stays there.
///
/// # Example
///
/// ```rust
/// use std::collections::{BTreeMap, BTreeSet};
/// use temporal_reward::automaton::{Dfa, RewardAutomaton};
/// use temporal_reward::core::{Alphabet, Automaton, Interpretation, StateId};
///
/// let a = Interpretation::from_iter(["a"]);
/// let dfa = Dfa::new(
///     Alphabet::new([a.clone()]),
///     StateId::new(0),
///     BTreeSet::from([StateId::new(2)]),
///     vec![
///         BTreeMap::from([(a.clone(), StateId::new(1))]),
///         BTreeMap::from([(a.clone(), StateId::new(2))]),
///         BTreeMap::from([(a, StateId::new(2))]),
///     ],
/// );
///
/// let automaton = RewardAutomaton::new(dfa, 10.0).unwrap();
/// assert_eq!(automaton.levels(), &[2, 1, 0]);
/// assert_eq!(automaton.potential(StateId::new(1), false), 5.0);
/// ```
#[derive(Clone, Debug)]
pub struct RewardAutomaton {
    dfa: Dfa,
    reward: f64,
    levels: Levels,
}

impl RewardAutomaton {
    /// Validate `dfa`, compute its levels and make failure states absorbing.
    ///
    /// Fails if the DFA is not total over its alphabet, references unknown
    /// states, or if `reward` is not finite.
    pub fn new(mut dfa: Dfa, reward: f64) -> Result<Self, BuildError> {
        if !reward.is_finite() {
            return Err(BuildError::NonFiniteReward(reward));
        }
        dfa.validate().map_err(BuildError::InvalidDfa)?;

        let levels = compute_levels(&dfa);
        for &state in &levels.failure_states {
            dfa.make_absorbing(state);
        }

        match levels.max_level {
            Some(max_level) => info!(
                states = dfa.num_states(),
                max_level,
                failure_states = levels.failure_states.len(),
                "built reward automaton"
            ),
            None => warn!(
                states = dfa.num_states(),
                "reward automaton has no reachable accepting state; every state is a failure state"
            ),
        }

        Ok(Self { dfa, reward, levels })
    }

    /// The underlying DFA, with failure states already made absorbing.
    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }

    pub fn accepting_states(&self) -> &BTreeSet<StateId> {
        self.dfa.accepting_states()
    }

    /// Level of `state`, or `None` for a state outside the automaton.
    pub fn level(&self, state: StateId) -> Option<usize> {
        self.levels.levels.get(state.index()).copied()
    }

    /// Highest finite level, `None` for an unsatisfiable goal (no state can
    /// reach acceptance).
    pub fn max_level(&self) -> Option<usize> {
        self.levels.max_level
    }

    /// Level assigned to failure states: `max_level + 1`, or 0 when
    /// `max_level` is undefined.
    pub fn failure_level(&self) -> usize {
        self.levels.failure_level()
    }

    pub fn failure_states(&self) -> &BTreeSet<StateId> {
        &self.levels.failure_states
    }

    /// True when no state can reach acceptance.
    pub fn is_unsatisfiable(&self) -> bool {
        self.levels.max_level.is_none()
    }
}

impl Automaton for RewardAutomaton {
    fn num_states(&self) -> usize {
        self.dfa.num_states()
    }

    fn initial_state(&self) -> StateId {
        self.dfa.initial_state()
    }

    fn alphabet(&self) -> &Alphabet {
        self.dfa.alphabet()
    }

    fn transition(&self, state: StateId, interpretation: &Interpretation) -> Option<StateId> {
        self.dfa.transition(state, interpretation)
    }

    fn is_accepting(&self, state: StateId) -> bool {
        self.dfa.is_accepting(state)
    }

    fn is_failure(&self, state: StateId) -> bool {
        self.levels.failure_states.contains(&state)
    }

    fn levels(&self) -> &[usize] {
        &self.levels.levels
    }

    fn reward(&self) -> f64 {
        self.reward
    }

    /// `reward * (L0 - level(state)) / L0` where `L0` is the initial level.
    ///
    /// Zero at episode end. When the initial state is already accepting
    /// (`L0 == 0`) there is no progress to shape and the potential is zero
    /// everywhere. States outside the automaton are scored as failure states.
    fn potential(&self, state: StateId, is_terminal: bool) -> f64 {
        if is_terminal {
            return 0.0;
        }
        let initial_level = self.level(self.initial_state()).unwrap_or(0);
        if initial_level == 0 {
            return 0.0;
        }
        let level = self.level(state).unwrap_or_else(|| self.failure_level());
        let progress = initial_level as f64 - level as f64;
        self.reward * progress / initial_level as f64
    }
}
