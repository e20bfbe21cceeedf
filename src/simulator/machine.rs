//! Simulator that drives a reward automaton through an episode.

use crate::automaton::RewardAutomaton;
use crate::checkpoint::{CheckpointError, SimulatorCheckpoint, CHECKPOINT_VERSION};
use crate::config::{ConfigError, ShapingConfig};
use crate::core::{Automaton, EpisodeTrace, Interpretation, Simulator, StateId};
use crate::simulator::error::SimulationError;
use chrono::Utc;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, trace};

/// Per-episode driver over a shared reward automaton.
///
/// Stepping and reward observation are separate calls: the RL loop usually
/// decides whether the episode ended (time limit, environment done flag,
/// [`Simulator::is_terminal`]) between the two.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use temporal_reward::builder::{reward_automaton, DfaBuilder};
/// use temporal_reward::core::{Alphabet, Simulator};
/// use temporal_reward::interpretation;
/// use temporal_reward::simulator::RewardSimulator;
///
/// let builder = DfaBuilder::new()
///     .alphabet(Alphabet::power_set(["a"]))
///     .initial(0)
///     .accepting(2)
///     .transition(0, interpretation!["a"], 1)
///     .transition(1, interpretation!["a"], 2)
///     .otherwise(0, 0)
///     .otherwise(1, 1)
///     .otherwise(2, 2);
/// let (automaton, _) = reward_automaton(builder, 10.0).unwrap();
///
/// let mut simulator = RewardSimulator::new(Arc::new(automaton));
/// simulator.step(&interpretation!["a"]).unwrap();
/// assert_eq!(simulator.observe_reward(false).unwrap(), 5.0);
///
/// simulator.step(&interpretation!["a"]).unwrap();
/// assert!(simulator.is_true());
/// assert_eq!(simulator.observe_reward(true).unwrap(), 5.0);
/// ```
#[derive(Debug)]
pub struct RewardSimulator<A: Automaton = RewardAutomaton> {
    automaton: Arc<A>,
    config: ShapingConfig,
    current: StateId,
    previous: Option<StateId>,
    visited: BTreeSet<StateId>,
    trace: EpisodeTrace,
}

impl<A: Automaton> RewardSimulator<A> {
    /// Create a simulator in the automaton's initial state with the default
    /// (undiscounted, shaped) configuration.
    pub fn new(automaton: Arc<A>) -> Self {
        let initial = automaton.initial_state();
        Self {
            automaton,
            config: ShapingConfig::default(),
            current: initial,
            previous: None,
            visited: BTreeSet::from([initial]),
            trace: EpisodeTrace::new(),
        }
    }

    pub fn with_config(automaton: Arc<A>, config: ShapingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut simulator = Self::new(automaton);
        simulator.config = config;
        Ok(simulator)
    }

    pub fn automaton(&self) -> &Arc<A> {
        &self.automaton
    }

    pub fn config(&self) -> &ShapingConfig {
        &self.config
    }

    /// State before the most recent step; `None` right after a reset.
    pub fn previous_state(&self) -> Option<StateId> {
        self.previous
    }

    /// Every state occupied since the last reset, the initial one included.
    pub fn visited_states(&self) -> &BTreeSet<StateId> {
        &self.visited
    }

    pub fn trace(&self) -> &EpisodeTrace {
        &self.trace
    }

    /// Snapshot the episode so it can be resumed with [`restore`](Self::restore).
    pub fn checkpoint(&self) -> SimulatorCheckpoint {
        SimulatorCheckpoint {
            version: CHECKPOINT_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            num_states: self.automaton.num_states(),
            current_state: self.current,
            previous_state: self.previous,
            visited_states: self.visited.clone(),
            trace: self.trace.clone(),
            config: self.config,
        }
    }

    /// Rebuild a simulator from a checkpoint taken against `automaton`.
    ///
    /// The checkpoint must come from an automaton with the same number of
    /// states, and every state it mentions must exist. A recorded trace is
    /// replayed against `automaton`; without one, the last step must still be
    /// a transition `automaton` can take.
    pub fn restore(
        automaton: Arc<A>,
        checkpoint: SimulatorCheckpoint,
    ) -> Result<Self, CheckpointError> {
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: checkpoint.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        let num_states = automaton.num_states();
        if checkpoint.num_states != num_states {
            return Err(CheckpointError::StateCountMismatch {
                checkpoint: checkpoint.num_states,
                automaton: num_states,
            });
        }

        let mentioned = std::iter::once(checkpoint.current_state)
            .chain(checkpoint.previous_state)
            .chain(checkpoint.visited_states.iter().copied())
            .chain(
                checkpoint
                    .trace
                    .records()
                    .iter()
                    .flat_map(|r| [r.from, r.to]),
            );
        for state in mentioned {
            if state.index() >= num_states {
                return Err(CheckpointError::UnknownState(state));
            }
        }

        checkpoint.config.validate()?;
        verify_episode(&*automaton, &checkpoint)?;

        Ok(Self {
            automaton,
            config: checkpoint.config,
            current: checkpoint.current_state,
            previous: checkpoint.previous_state,
            visited: checkpoint.visited_states,
            trace: checkpoint.trace,
        })
    }
}

fn inconsistent(reason: String) -> CheckpointError {
    CheckpointError::InconsistentTrace(reason)
}

/// Check that the episode stored in `checkpoint` is one `automaton` can
/// produce. State ids are already known to be in range.
fn verify_episode<A: Automaton>(
    automaton: &A,
    checkpoint: &SimulatorCheckpoint,
) -> Result<(), CheckpointError> {
    let initial = automaton.initial_state();
    let records = checkpoint.trace.records();

    let Some(last) = records.last() else {
        return match checkpoint.previous_state {
            None if checkpoint.current_state != initial => Err(inconsistent(format!(
                "episode has no steps but sits in {} instead of {initial}",
                checkpoint.current_state
            ))),
            None if checkpoint.visited_states != BTreeSet::from([initial]) => Err(inconsistent(
                "episode has no steps but visited other states".to_string(),
            )),
            None => Ok(()),
            Some(_) if checkpoint.config.record_trace => Err(inconsistent(
                "trace recording is enabled but the trace is empty".to_string(),
            )),
            Some(previous) => {
                if !automaton.can_step(previous, checkpoint.current_state) {
                    return Err(inconsistent(format!(
                        "no transition from {previous} to {}",
                        checkpoint.current_state
                    )));
                }
                let required = [initial, previous, checkpoint.current_state];
                match required
                    .iter()
                    .find(|state| !checkpoint.visited_states.contains(*state))
                {
                    Some(missing) => Err(inconsistent(format!(
                        "state {missing} is missing from the visited set"
                    ))),
                    None => Ok(()),
                }
            }
        };
    };

    let mut expected_from = initial;
    for (index, record) in records.iter().enumerate() {
        if record.step != index {
            return Err(inconsistent(format!(
                "record {index} is numbered {}",
                record.step
            )));
        }
        if record.from != expected_from {
            return Err(inconsistent(format!(
                "step {index} starts in {} but the episode was in {expected_from}",
                record.from
            )));
        }
        let target = automaton.transition(record.from, &record.interpretation);
        if target != Some(record.to) {
            return Err(inconsistent(format!(
                "step {index} goes {} -> {} on {}, automaton does not",
                record.from, record.to, record.interpretation
            )));
        }
        expected_from = record.to;
    }

    if checkpoint.current_state != last.to {
        return Err(inconsistent(format!(
            "current state {} differs from last recorded state {}",
            checkpoint.current_state, last.to
        )));
    }
    if checkpoint.previous_state != Some(last.from) {
        return Err(inconsistent(
            "previous state differs from the last recorded step".to_string(),
        ));
    }
    let path: BTreeSet<StateId> = checkpoint.trace.path().into_iter().collect();
    if checkpoint.visited_states != path {
        return Err(inconsistent(
            "visited states differ from the recorded path".to_string(),
        ));
    }
    Ok(())
}

impl<A: Automaton> Simulator for RewardSimulator<A> {
    fn reset(&mut self) {
        self.current = self.automaton.initial_state();
        self.previous = None;
        self.visited = BTreeSet::from([self.current]);
        self.trace.clear();
    }

    /// On an undefined transition the simulator is left untouched.
    fn step(&mut self, interpretation: &Interpretation) -> Result<StateId, SimulationError> {
        let from = self.current;
        let to = self
            .automaton
            .transition(from, interpretation)
            .ok_or_else(|| SimulationError::UndefinedTransition {
                state: from,
                interpretation: interpretation.clone(),
            })?;

        if from != to {
            debug!(%from, %to, %interpretation, "automaton transition");
        } else {
            trace!(state = %from, %interpretation, "automaton self-loop");
        }

        self.previous = Some(from);
        self.current = to;
        self.visited.insert(to);
        if self.config.record_trace {
            self.trace.record(from, to, interpretation.clone());
        }
        Ok(to)
    }

    fn current_state(&self) -> StateId {
        self.current
    }

    /// `bonus + discount * Φ(current, is_terminal) - Φ(previous, false)`.
    ///
    /// `bonus` is the automaton's reward when `is_terminal` holds and the
    /// current state is accepting. With shaping disabled only `bonus` is
    /// returned.
    fn observe_reward(&self, is_terminal: bool) -> Result<f64, SimulationError> {
        let previous = self.previous.ok_or(SimulationError::NoPreviousState)?;

        let bonus = if is_terminal && self.is_true() {
            self.automaton.reward()
        } else {
            0.0
        };
        if !self.config.reward_shaping {
            return Ok(bonus);
        }

        let current_potential = self.automaton.potential(self.current, is_terminal);
        let previous_potential = self.automaton.potential(previous, false);
        let reward = bonus + self.config.discount * current_potential - previous_potential;

        trace!(
            from = %previous,
            to = %self.current,
            is_terminal,
            reward,
            "observed shaped reward"
        );
        Ok(reward)
    }

    fn is_failed(&self) -> bool {
        self.automaton.is_failure(self.current)
    }

    fn is_true(&self) -> bool {
        self.automaton.is_accepting(self.current)
    }

    fn state_space_size(&self) -> usize {
        self.automaton.num_states()
    }
}
