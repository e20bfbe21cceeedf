//! Core vocabulary of the crate.
//!
//! This module holds the types every other module speaks in:
//! - State identifiers and propositional interpretations
//! - The `Automaton` and `Simulator` capability traits
//! - Per-episode transition traces
//!
//! Nothing here performs I/O.

mod capability;
mod interpretation;
mod state;
mod trace;

pub use capability::{Automaton, Simulator};
pub use interpretation::{Alphabet, Interpretation, Symbol};
pub use state::StateId;
pub use trace::{EpisodeTrace, StepRecord};
