//! Goal automata and their reward annotation.
//!
//! - [`Dfa`]: densely numbered DFA over propositional interpretations
//! - [`DfaViolation`]: everything that can make a DFA unusable
//! - [`RewardAutomaton`]: validated DFA with terminal reward, levels and
//!   failure states

mod dfa;
mod levels;
mod reward;
mod validation;

pub use dfa::Dfa;
pub use reward::RewardAutomaton;
pub use validation::DfaViolation;
