//! Checkpoint error types.

use crate::config::ConfigError;
use crate::core::StateId;
use thiserror::Error;

/// Errors that can occur while encoding, decoding or restoring a checkpoint
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("JSON checkpoint encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Binary checkpoint encoding failed: {0}")]
    Binary(#[from] bincode::Error),

    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The checkpoint was taken against a different automaton
    #[error("Checkpoint was taken against {checkpoint} states, automaton has {automaton}")]
    StateCountMismatch { checkpoint: usize, automaton: usize },

    #[error("Checkpoint mentions state {0}, which the automaton does not have")]
    UnknownState(StateId),

    /// The recorded episode cannot have been produced by the automaton
    #[error("Checkpoint episode is inconsistent with the automaton: {0}")]
    InconsistentTrace(String),

    #[error("Checkpoint carries an invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}
