//! Episode simulation over reward automata.
//!
//! One [`RewardAutomaton`](crate::automaton::RewardAutomaton) is built per
//! goal and shared through an `Arc`; every environment worker owns its own
//! [`RewardSimulator`]. Simulators never mutate the automaton, so no locking
//! is involved.

mod error;
mod machine;

pub use error::SimulationError;
pub use machine::RewardSimulator;
