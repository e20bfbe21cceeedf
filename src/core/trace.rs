//! Per-episode transition trace.
//!
//! With trace recording enabled, the simulator appends one [`StepRecord`]
//! per successful step and clears the trace on reset. Traces are serializable so they can travel inside
//! checkpoints or be dumped for offline inspection of what the agent did.

use super::interpretation::Interpretation;
use super::state::StateId;
use serde::{Deserialize, Serialize};

/// One automaton transition taken during an episode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Zero-based step number within the episode
    pub step: usize,
    /// The state being transitioned from
    pub from: StateId,
    /// The state being transitioned to
    pub to: StateId,
    /// Interpretation that drove the transition
    pub interpretation: Interpretation,
}

/// Ordered record of the transitions of one episode.
///
/// # Example
///
/// ```rust
/// use temporal_reward::core::{EpisodeTrace, Interpretation, StateId};
///
/// let mut trace = EpisodeTrace::new();
/// trace.record(StateId::new(0), StateId::new(1), Interpretation::from_iter(["a"]));
/// trace.record(StateId::new(1), StateId::new(2), Interpretation::from_iter(["a"]));
///
/// assert_eq!(trace.path(), vec![StateId::new(0), StateId::new(1), StateId::new(2)]);
/// assert_eq!(trace.first_visit(StateId::new(2)), Some(2));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeTrace {
    records: Vec<StepRecord>,
}

impl EpisodeTrace {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a transition; the step number is assigned from the trace length.
    pub fn record(&mut self, from: StateId, to: StateId, interpretation: Interpretation) {
        let step = self.records.len();
        self.records.push(StepRecord {
            step,
            from,
            to,
            interpretation,
        });
    }

    /// States traversed in order: the first source, then each target.
    pub fn path(&self) -> Vec<StateId> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.first() {
            path.push(first.from);
        }
        path.extend(self.records.iter().map(|r| r.to));
        path
    }

    /// Number of steps after which `state` was first occupied.
    ///
    /// The starting state of the trace is visited at step 0.
    pub fn first_visit(&self, state: StateId) -> Option<usize> {
        self.path().iter().position(|&s| s == state)
    }

    /// Number of steps whose target differs from their source.
    pub fn state_changes(&self) -> usize {
        self.records.iter().filter(|r| r.from != r.to).count()
    }

    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
