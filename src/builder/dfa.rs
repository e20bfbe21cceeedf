//! Builder for constructing DFAs from labelled states.

use crate::automaton::Dfa;
use crate::builder::error::BuildError;
use crate::core::{Alphabet, Interpretation, StateId};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::Debug;
use std::hash::Hash;

/// A DFA together with the numbering assigned to its state labels.
#[derive(Clone, Debug)]
pub struct LabeledDfa<L> {
    pub dfa: Dfa,
    pub ids: HashMap<L, StateId>,
    /// Sink added by [`DfaBuilder::complete_with_sink`], if one was needed.
    pub sink: Option<StateId>,
}

impl<L: Eq + Hash> LabeledDfa<L> {
    pub fn id(&self, label: &L) -> Option<StateId> {
        self.ids.get(label).copied()
    }
}

/// Builder for DFAs with a fluent API.
///
/// States are named by arbitrary labels and renumbered densely on
/// [`build`](DfaBuilder::build): the initial state becomes `q0`, the rest
/// follow in order of first mention.
///
/// # Example
///
/// ```rust
/// use temporal_reward::builder::DfaBuilder;
/// use temporal_reward::core::{Alphabet, Interpretation};
///
/// let labeled = DfaBuilder::new()
///     .alphabet(Alphabet::power_set(["key"]))
///     .initial("search")
///     .accepting("done")
///     .transition("search", Interpretation::from_iter(["key"]), "done")
///     .otherwise("search", "search")
///     .otherwise("done", "done")
///     .build()
///     .unwrap();
///
/// assert_eq!(labeled.dfa.num_states(), 2);
/// assert_eq!(labeled.id(&"done").map(|s| s.index()), Some(1));
/// ```
pub struct DfaBuilder<L> {
    alphabet: Option<Alphabet>,
    initial: Option<L>,
    states: Vec<L>,
    accepting: Vec<L>,
    transitions: Vec<(L, Interpretation, L)>,
    defaults: Vec<(L, L)>,
    complete_with_sink: bool,
}

impl<L: Clone + Eq + Hash + Debug> DfaBuilder<L> {
    pub fn new() -> Self {
        Self {
            alphabet: None,
            initial: None,
            states: Vec::new(),
            accepting: Vec::new(),
            transitions: Vec::new(),
            defaults: Vec::new(),
            complete_with_sink: false,
        }
    }

    /// Set the alphabet (required).
    pub fn alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = Some(alphabet);
        self
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: L) -> Self {
        self.initial = Some(state);
        self
    }

    /// Declare a state that might otherwise only be implied by transitions.
    pub fn state(mut self, state: L) -> Self {
        self.states.push(state);
        self
    }

    /// Mark a state as accepting.
    pub fn accepting(mut self, state: L) -> Self {
        self.accepting.push(state);
        self
    }

    /// Add an edge on one interpretation.
    pub fn transition(mut self, from: L, interpretation: Interpretation, to: L) -> Self {
        self.transitions.push((from, interpretation, to));
        self
    }

    /// Route every interpretation without an explicit edge from `from` to `to`.
    pub fn otherwise(mut self, from: L, to: L) -> Self {
        self.defaults.push((from, to));
        self
    }

    /// Send still-missing edges to a fresh non-accepting sink instead of
    /// rejecting the automaton as incomplete.
    pub fn complete_with_sink(mut self) -> Self {
        self.complete_with_sink = true;
        self
    }

    /// Number the states, assemble the transition table and validate it.
    pub fn build(self) -> Result<LabeledDfa<L>, BuildError> {
        let alphabet = self.alphabet.ok_or(BuildError::MissingAlphabet)?;
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let mut ids: HashMap<L, StateId> = HashMap::new();
        let mut number = |label: &L| -> StateId {
            let next = StateId::new(ids.len());
            *ids.entry(label.clone()).or_insert(next)
        };

        let initial_id = number(&initial);
        self.states.iter().for_each(|s| {
            number(s);
        });
        let accepting: BTreeSet<StateId> = self.accepting.iter().map(&mut number).collect();
        let edges: Vec<(StateId, &L, &Interpretation, StateId)> = self
            .transitions
            .iter()
            .map(|(from, interpretation, to)| (number(from), from, interpretation, number(to)))
            .collect();
        let defaults: Vec<(StateId, &L, StateId)> = self
            .defaults
            .iter()
            .map(|(from, to)| (number(from), from, number(to)))
            .collect();

        let mut table: Vec<BTreeMap<Interpretation, StateId>> = vec![BTreeMap::new(); ids.len()];

        for (from, label, interpretation, to) in edges {
            match table[from.index()].entry(interpretation.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(to);
                }
                Entry::Occupied(existing) if *existing.get() == to => {}
                Entry::Occupied(_) => {
                    return Err(BuildError::Nondeterministic {
                        state: format!("{label:?}"),
                        interpretation: interpretation.clone(),
                    });
                }
            }
        }

        let mut fallback: HashMap<StateId, StateId> = HashMap::new();
        for (from, label, to) in defaults {
            if let Some(&previous) = fallback.get(&from) {
                if previous != to {
                    return Err(BuildError::ConflictingFallback {
                        state: format!("{label:?}"),
                    });
                }
            }
            fallback.insert(from, to);
        }
        for (from, to) in fallback {
            let row = &mut table[from.index()];
            for interpretation in alphabet.iter() {
                row.entry(interpretation.clone()).or_insert(to);
            }
        }

        let mut sink = None;
        if self.complete_with_sink {
            let incomplete = table
                .iter()
                .any(|row| alphabet.iter().any(|i| !row.contains_key(i)));
            if incomplete {
                let sink_id = StateId::new(table.len());
                table.push(BTreeMap::new());
                for row in table.iter_mut() {
                    for interpretation in alphabet.iter() {
                        row.entry(interpretation.clone()).or_insert(sink_id);
                    }
                }
                sink = Some(sink_id);
            }
        }

        let dfa = Dfa::new(alphabet, initial_id, accepting, table);
        dfa.validate().map_err(BuildError::InvalidDfa)?;

        Ok(LabeledDfa { dfa, ids, sink })
    }
}

impl<L: Clone + Eq + Hash + Debug> Default for DfaBuilder<L> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::DfaViolation;

    fn a() -> Interpretation {
        Interpretation::from_iter(["a"])
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = DfaBuilder::<&str>::new().initial("start").build();
        assert!(matches!(result, Err(BuildError::MissingAlphabet)));

        let result = DfaBuilder::<&str>::new()
            .alphabet(Alphabet::power_set(["a"]))
            .build();
        assert!(matches!(result, Err(BuildError::MissingInitialState)));
    }

    #[test]
    fn initial_state_is_numbered_first() {
        let labeled = DfaBuilder::new()
            .alphabet(Alphabet::new([a()]))
            .state("other")
            .initial("start")
            .transition("other", a(), "start")
            .transition("start", a(), "other")
            .build()
            .unwrap();

        assert_eq!(labeled.id(&"start"), Some(StateId::new(0)));
        assert_eq!(labeled.id(&"other"), Some(StateId::new(1)));
        assert_eq!(labeled.dfa.initial_state(), StateId::new(0));
        assert!(labeled.sink.is_none());
    }

    #[test]
    fn missing_edges_are_rejected_without_sink() {
        let result = DfaBuilder::new()
            .alphabet(Alphabet::power_set(["a"]))
            .initial(0)
            .transition(0, a(), 0)
            .build();

        match result {
            Err(BuildError::InvalidDfa(violations)) => {
                assert_eq!(
                    violations,
                    vec![DfaViolation::MissingTransition {
                        state: StateId::new(0),
                        interpretation: Interpretation::empty(),
                    }]
                );
            }
            other => panic!("Expected InvalidDfa, got {other:?}"),
        }
    }

    #[test]
    fn sink_completes_missing_edges() {
        let labeled = DfaBuilder::new()
            .alphabet(Alphabet::power_set(["a"]))
            .initial(0)
            .accepting(1)
            .transition(0, a(), 1)
            .complete_with_sink()
            .build()
            .unwrap();

        let sink = labeled.sink.unwrap();
        assert_eq!(sink, StateId::new(2));
        assert_eq!(
            labeled.dfa.transition(StateId::new(0), &Interpretation::empty()),
            Some(sink)
        );
        assert_eq!(labeled.dfa.transition(sink, &a()), Some(sink));
        assert!(!labeled.dfa.is_accepting(sink));
    }

    #[test]
    fn sink_is_not_added_when_complete() {
        let labeled = DfaBuilder::new()
            .alphabet(Alphabet::new([a()]))
            .initial(0)
            .transition(0, a(), 0)
            .complete_with_sink()
            .build()
            .unwrap();

        assert!(labeled.sink.is_none());
        assert_eq!(labeled.dfa.num_states(), 1);
    }

    #[test]
    fn otherwise_fills_remaining_interpretations() {
        let labeled = DfaBuilder::new()
            .alphabet(Alphabet::power_set(["a", "b"]))
            .initial("s")
            .transition("s", a(), "t")
            .otherwise("s", "s")
            .otherwise("t", "t")
            .build()
            .unwrap();

        let s = labeled.id(&"s").unwrap();
        let t = labeled.id(&"t").unwrap();
        assert_eq!(labeled.dfa.transition(s, &a()), Some(t));
        assert_eq!(
            labeled
                .dfa
                .transition(s, &Interpretation::from_iter(["a", "b"])),
            Some(s)
        );
    }

    #[test]
    fn conflicting_edges_are_nondeterministic() {
        let result = DfaBuilder::new()
            .alphabet(Alphabet::new([a()]))
            .initial("s")
            .transition("s", a(), "s")
            .transition("s", a(), "t")
            .build();

        assert!(matches!(result, Err(BuildError::Nondeterministic { .. })));
    }

    #[test]
    fn repeated_identical_edge_is_accepted() {
        let result = DfaBuilder::new()
            .alphabet(Alphabet::new([a()]))
            .initial("s")
            .transition("s", a(), "s")
            .transition("s", a(), "s")
            .build();

        assert!(result.is_ok());
    }

    #[test]
    fn conflicting_fallbacks_are_rejected() {
        let result = DfaBuilder::new()
            .alphabet(Alphabet::new([a()]))
            .initial("s")
            .otherwise("s", "s")
            .otherwise("s", "t")
            .build();

        assert!(matches!(
            result,
            Err(BuildError::ConflictingFallback { .. })
        ));
    }
}
