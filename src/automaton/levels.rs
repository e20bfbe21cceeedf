//! Distance-to-goal levels.
//!
//! The level of a state is the length of the shortest transition sequence
//! leading from it to any accepting state. Levels come from one
//! multi-source breadth-first search seeded with the accepting states and
//! run over the reversed transition graph. States the search never reaches
//! cannot reach the goal; they share the level `max_level + 1`.

use super::dfa::Dfa;
use crate::core::StateId;
use std::collections::{BTreeSet, VecDeque};

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Levels {
    pub(crate) levels: Vec<usize>,
    /// Highest finite level; `None` when no state can reach the goal.
    pub(crate) max_level: Option<usize>,
    pub(crate) failure_states: BTreeSet<StateId>,
}

impl Levels {
    /// Level shared by every failure state.
    pub(crate) fn failure_level(&self) -> usize {
        self.max_level.map_or(0, |max| max + 1)
    }
}

/// Compute levels for a validated DFA.
pub(crate) fn compute_levels(dfa: &Dfa) -> Levels {
    let num_states = dfa.num_states();

    let mut predecessors: Vec<Vec<StateId>> = vec![Vec::new(); num_states];
    for source in dfa.states() {
        for &target in dfa.transitions_from(source).into_iter().flat_map(|row| row.values()) {
            if let Some(incoming) = predecessors.get_mut(target.index()) {
                incoming.push(source);
            }
        }
    }

    let mut distance: Vec<Option<usize>> = vec![None; num_states];
    let mut queue = VecDeque::new();
    for &goal in dfa.accepting_states() {
        if goal.index() < num_states && distance[goal.index()].is_none() {
            distance[goal.index()] = Some(0);
            queue.push_back((goal, 0));
        }
    }

    while let Some((state, level)) = queue.pop_front() {
        for &predecessor in &predecessors[state.index()] {
            if distance[predecessor.index()].is_none() {
                distance[predecessor.index()] = Some(level + 1);
                queue.push_back((predecessor, level + 1));
            }
        }
    }

    let max_level = distance.iter().flatten().copied().max();
    let failure_level = max_level.map_or(0, |max| max + 1);

    let failure_states = dfa
        .states()
        .filter(|state| distance[state.index()].is_none())
        .collect();
    let levels = distance
        .into_iter()
        .map(|d| d.unwrap_or(failure_level))
        .collect();

    Levels {
        levels,
        max_level,
        failure_states,
    }
}
