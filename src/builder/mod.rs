//! Builder API for ergonomic automaton construction.
//!
//! Formula compilers rarely hand out densely numbered states. The builder
//! accepts any hashable labels, renumbers them, and validates the result
//! before a [`RewardAutomaton`](crate::automaton::RewardAutomaton) is made
//! from it.

pub mod dfa;
pub mod error;
pub mod macros;

pub use dfa::{DfaBuilder, LabeledDfa};
pub use error::BuildError;

use crate::automaton::RewardAutomaton;
use crate::core::StateId;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Build a reward automaton straight from a builder.
///
/// # Example
///
/// ```
/// use temporal_reward::builder::{reward_automaton, DfaBuilder};
/// use temporal_reward::core::{Alphabet, Automaton};
/// use temporal_reward::interpretation;
///
/// let builder = DfaBuilder::new()
///     .alphabet(Alphabet::power_set(["goal"]))
///     .initial("searching")
///     .accepting("reached")
///     .transition("searching", interpretation!["goal"], "reached")
///     .otherwise("searching", "searching")
///     .otherwise("reached", "reached");
///
/// let (automaton, labeled) = reward_automaton(builder, 1.0).unwrap();
/// assert_eq!(automaton.num_states(), 2);
/// assert!(automaton.is_accepting(labeled["reached"]));
/// ```
pub fn reward_automaton<L>(
    builder: DfaBuilder<L>,
    reward: f64,
) -> Result<(RewardAutomaton, HashMap<L, StateId>), BuildError>
where
    L: Clone + Eq + Hash + Debug,
{
    let labeled = builder.build()?;
    let automaton = RewardAutomaton::new(labeled.dfa, reward)?;
    Ok((automaton, labeled.ids))
}
