//! Checkpoint and resume for simulators.
//!
//! Long episodes (or evaluation runs interrupted by a worker restart) can be
//! snapshotted mid-episode and resumed later against the same automaton.
//! The automaton itself is not stored; it is rebuilt from the goal formula
//! and checked against the snapshot on restore.

use crate::config::ShapingConfig;
use crate::core::{EpisodeTrace, StateId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a simulator's episode state.
///
/// Created by [`RewardSimulator::checkpoint`](crate::simulator::RewardSimulator::checkpoint)
/// and consumed by [`RewardSimulator::restore`](crate::simulator::RewardSimulator::restore).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulatorCheckpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// State count of the automaton the checkpoint was taken against
    pub num_states: usize,

    pub current_state: StateId,

    pub previous_state: Option<StateId>,

    pub visited_states: BTreeSet<StateId>,

    /// Transitions of the episode so far
    pub trace: EpisodeTrace,

    pub config: ShapingConfig,
}

impl SimulatorCheckpoint {
    /// Human-readable encoding.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Compact encoding.
    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Interpretation;

    fn sample() -> SimulatorCheckpoint {
        let mut trace = EpisodeTrace::new();
        trace.record(
            StateId::new(0),
            StateId::new(1),
            Interpretation::from_iter(["a"]),
        );
        SimulatorCheckpoint {
            version: CHECKPOINT_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            num_states: 3,
            current_state: StateId::new(1),
            previous_state: Some(StateId::new(0)),
            visited_states: BTreeSet::from([StateId::new(0), StateId::new(1)]),
            trace,
            config: ShapingConfig::default(),
        }
    }

    #[test]
    fn json_preserves_episode_state() {
        let checkpoint = sample();

        let json = checkpoint.to_json().unwrap();
        let restored = SimulatorCheckpoint::from_json(&json).unwrap();

        assert_eq!(restored.id, checkpoint.id);
        assert_eq!(restored.current_state, checkpoint.current_state);
        assert_eq!(restored.previous_state, checkpoint.previous_state);
        assert_eq!(restored.visited_states, checkpoint.visited_states);
        assert_eq!(restored.trace, checkpoint.trace);
    }

    #[test]
    fn binary_preserves_episode_state() {
        let checkpoint = sample();

        let bytes = checkpoint.to_binary().unwrap();
        let restored = SimulatorCheckpoint::from_binary(&bytes).unwrap();

        assert_eq!(restored.id, checkpoint.id);
        assert_eq!(restored.trace, checkpoint.trace);
        assert_eq!(restored.config, checkpoint.config);
    }

    #[test]
    fn garbage_fails_to_deserialize() {
        assert!(matches!(
            SimulatorCheckpoint::from_json("not json"),
            Err(CheckpointError::Json(_))
        ));
        assert!(matches!(
            SimulatorCheckpoint::from_binary(&[0xff, 0x01]),
            Err(CheckpointError::Binary(_))
        ));
    }
}
