//! Propositional symbols, interpretations and alphabets.
//!
//! An [`Interpretation`] is the set of propositions true at one time step.
//! Automata built from propositional temporal formulas read one
//! interpretation per step, so their alphabet is a set of interpretations
//! rather than a set of single characters.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

/// Name of a single proposition.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Set of propositions that hold at one time step.
///
/// # Example
///
/// ```rust
/// use temporal_reward::core::Interpretation;
///
/// let now = Interpretation::from_iter(["door_open", "holding_key"]);
/// assert!(now.contains("door_open"));
/// assert!(!now.contains("at_goal"));
/// assert_eq!(now.to_string(), "{door_open, holding_key}");
/// ```
#[derive(
    Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Interpretation(BTreeSet<Symbol>);

impl Interpretation {
    /// The interpretation in which every proposition is false.
    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.0.contains(symbol)
    }

    pub fn insert(&mut self, symbol: impl Into<Symbol>) -> bool {
        self.0.insert(symbol.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.0.iter()
    }

    /// Keep only the symbols in `propositions`.
    ///
    /// Feature extractors may report facts the goal formula never mentions;
    /// projecting onto the automaton's propositions drops them.
    pub fn restrict_to(&self, propositions: &BTreeSet<Symbol>) -> Self {
        Self(self.0.intersection(propositions).cloned().collect())
    }
}

impl<S: Into<Symbol>> FromIterator<S> for Interpretation {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, symbol) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{symbol}")?;
        }
        f.write_str("}")
    }
}

/// Finite set of interpretations an automaton's transitions are keyed on.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Alphabet {
    interpretations: BTreeSet<Interpretation>,
}

impl Alphabet {
    pub fn new(interpretations: impl IntoIterator<Item = Interpretation>) -> Self {
        Self {
            interpretations: interpretations.into_iter().collect(),
        }
    }

    /// Every subset of `propositions`, the alphabet of a propositional
    /// formula over those atoms. Grows as `2^n`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use temporal_reward::core::{Alphabet, Interpretation};
    ///
    /// let alphabet = Alphabet::power_set(["a", "b"]);
    /// assert_eq!(alphabet.len(), 4);
    /// assert!(alphabet.contains(&Interpretation::empty()));
    /// assert!(alphabet.contains(&Interpretation::from_iter(["a", "b"])));
    /// ```
    pub fn power_set<S: Into<Symbol>>(propositions: impl IntoIterator<Item = S>) -> Self {
        let atoms: BTreeSet<Symbol> = propositions.into_iter().map(Into::into).collect();
        let mut subsets = vec![Interpretation::empty()];
        for atom in atoms {
            let extended: Vec<Interpretation> = subsets
                .iter()
                .map(|subset| {
                    let mut with_atom = subset.clone();
                    with_atom.insert(atom.clone());
                    with_atom
                })
                .collect();
            subsets.extend(extended);
        }
        Self::new(subsets)
    }

    pub fn contains(&self, interpretation: &Interpretation) -> bool {
        self.interpretations.contains(interpretation)
    }

    pub fn len(&self) -> usize {
        self.interpretations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interpretations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interpretation> {
        self.interpretations.iter()
    }

    /// Union of all symbols mentioned by any interpretation.
    pub fn propositions(&self) -> BTreeSet<Symbol> {
        self.interpretations
            .iter()
            .flat_map(|i| i.iter().cloned())
            .collect()
    }
}
