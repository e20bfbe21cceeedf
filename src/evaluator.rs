//! Glue between an RL environment and a reward simulator.
//!
//! The evaluator turns raw observations into interpretations through an
//! injected feature extractor, advances the simulator, and exposes the
//! automaton state and shaped reward to the training loop.

use crate::config::{ConfigError, ShapingConfig};
use crate::core::{Automaton, EpisodeTrace, Interpretation, Simulator, StateId, Symbol};
use crate::simulator::{RewardSimulator, SimulationError};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Maps an environment observation and the action that produced it to the
/// propositions true at this step.
pub type FeatureExtractor<O, A> = Box<dyn Fn(&O, &A) -> Interpretation + Send + Sync>;

/// Per-worker evaluator for one temporal goal.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use temporal_reward::builder::{reward_automaton, DfaBuilder};
/// use temporal_reward::config::ShapingConfig;
/// use temporal_reward::core::{Alphabet, Interpretation};
/// use temporal_reward::evaluator::{FeatureExtractor, TemporalEvaluator};
/// use temporal_reward::interpretation;
///
/// // Goal: eventually reach x >= 3.
/// let builder = DfaBuilder::new()
///     .alphabet(Alphabet::power_set(["at_goal"]))
///     .initial("away")
///     .accepting("done")
///     .transition("away", interpretation!["at_goal"], "done")
///     .otherwise("away", "away")
///     .otherwise("done", "done");
/// let (automaton, _) = reward_automaton(builder, 1.0).unwrap();
///
/// let extractor: FeatureExtractor<i32, ()> = Box::new(|x: &i32, _action: &()| {
///     let mut now = Interpretation::empty();
///     if *x >= 3 {
///         now.insert("at_goal");
///     }
///     now
/// });
/// let mut evaluator =
///     TemporalEvaluator::from_automaton(Arc::new(automaton), ShapingConfig::default(), extractor)
///         .unwrap();
///
/// evaluator.update(&(), &1).unwrap();
/// assert!(!evaluator.is_terminal());
/// evaluator.update(&(), &3).unwrap();
/// assert!(evaluator.is_true());
/// assert_eq!(evaluator.reward(true).unwrap(), 1.0);
/// ```
pub struct TemporalEvaluator<O, A, S: Simulator = RewardSimulator> {
    simulator: S,
    propositions: BTreeSet<Symbol>,
    extractor: FeatureExtractor<O, A>,
}

impl<O, A, S: Simulator> TemporalEvaluator<O, A, S> {
    /// Wrap an existing simulator. Extracted symbols outside `propositions`
    /// are dropped before stepping.
    pub fn new(
        simulator: S,
        propositions: BTreeSet<Symbol>,
        extractor: FeatureExtractor<O, A>,
    ) -> Self {
        Self {
            simulator,
            propositions,
            extractor,
        }
    }

    /// Feed one environment step into the automaton.
    ///
    /// Returns the new automaton state.
    pub fn update(&mut self, action: &A, observation: &O) -> Result<StateId, SimulationError> {
        let interpretation = (self.extractor)(observation, action).restrict_to(&self.propositions);
        self.simulator.step(&interpretation)
    }

    /// Shaped reward for the last [`update`](Self::update).
    pub fn reward(&self, is_terminal: bool) -> Result<f64, SimulationError> {
        self.simulator.observe_reward(is_terminal)
    }

    pub fn state(&self) -> StateId {
        self.simulator.current_state()
    }

    /// Number of automaton states, for sizing a discrete observation space.
    pub fn state_space_size(&self) -> usize {
        self.simulator.state_space_size()
    }

    pub fn reset(&mut self) {
        self.simulator.reset();
    }

    pub fn is_failed(&self) -> bool {
        self.simulator.is_failed()
    }

    pub fn is_true(&self) -> bool {
        self.simulator.is_true()
    }

    pub fn is_terminal(&self) -> bool {
        self.simulator.is_terminal()
    }

    pub fn propositions(&self) -> &BTreeSet<Symbol> {
        &self.propositions
    }

    pub fn simulator(&self) -> &S {
        &self.simulator
    }
}

impl<O, A, Auto: Automaton> TemporalEvaluator<O, A, RewardSimulator<Auto>> {
    /// Evaluator over a fresh simulator for `automaton`, reading the
    /// propositions the automaton's alphabet mentions.
    pub fn from_automaton(
        automaton: Arc<Auto>,
        config: ShapingConfig,
        extractor: FeatureExtractor<O, A>,
    ) -> Result<Self, ConfigError> {
        let propositions = automaton.propositions();
        let simulator = RewardSimulator::with_config(automaton, config)?;
        Ok(Self::new(simulator, propositions, extractor))
    }

    pub fn automaton(&self) -> &Arc<Auto> {
        self.simulator.automaton()
    }

    pub fn trace(&self) -> &EpisodeTrace {
        self.simulator.trace()
    }
}
