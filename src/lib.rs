//! Temporal reward: potential-based reward shaping from goal automata.
//!
//! Non-Markovian goals such as "pick up the key, then open the door, and
//! never touch lava" cannot be written as a per-step reward. Compiled to a
//! deterministic finite automaton, they can: the automaton tracks progress
//! through the episode, and each automaton transition is scored with a
//! potential-based shaping term that leaves the optimal policy of the sparse
//! task unchanged.
//!
//! # Core Concepts
//!
//! - **Interpretation**: the set of propositions true at one step
//! - **RewardAutomaton**: a complete DFA plus a terminal reward, annotated
//!   with each state's distance to the goal and the states that can no
//!   longer reach it
//! - **RewardSimulator**: per-episode driver that steps the automaton and
//!   reports shaped rewards and success / failure
//!
//! Formula parsing and compilation to a DFA happen upstream; this crate
//! starts from the compiled automaton.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use temporal_reward::builder::{reward_automaton, DfaBuilder};
//! use temporal_reward::core::{Alphabet, Automaton, Simulator};
//! use temporal_reward::interpretation;
//! use temporal_reward::simulator::RewardSimulator;
//!
//! // "eventually key, then eventually door"
//! let builder = DfaBuilder::new()
//!     .alphabet(Alphabet::power_set(["key", "door"]))
//!     .initial("start")
//!     .accepting("done")
//!     .transition("start", interpretation!["key"], "has_key")
//!     .transition("has_key", interpretation!["door"], "done")
//!     .otherwise("start", "start")
//!     .otherwise("has_key", "has_key")
//!     .otherwise("done", "done");
//! let (automaton, _) = reward_automaton(builder, 1.0).unwrap();
//! let automaton = Arc::new(automaton);
//! assert_eq!(automaton.levels()[0], 2);
//!
//! let mut simulator = RewardSimulator::new(Arc::clone(&automaton));
//! simulator.step(&interpretation!["key"]).unwrap();
//! assert_eq!(simulator.observe_reward(false).unwrap(), 0.5);
//!
//! simulator.step(&interpretation!["door"]).unwrap();
//! assert!(simulator.is_terminal());
//! assert_eq!(simulator.observe_reward(true).unwrap(), 0.5);
//! ```

pub mod automaton;
pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod evaluator;
pub mod simulator;

// Re-export commonly used types
pub use crate::automaton::{Dfa, RewardAutomaton};
pub use crate::config::ShapingConfig;
pub use crate::core::{Alphabet, Automaton, Interpretation, Simulator, StateId, Symbol};
pub use crate::simulator::{RewardSimulator, SimulationError};
