//! End-to-end episodes against small goal automata.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::thread;

use temporal_reward::automaton::{Dfa, RewardAutomaton};
use temporal_reward::builder::{reward_automaton, BuildError, DfaBuilder};
use temporal_reward::core::{Alphabet, Automaton, Interpretation, Simulator, StateId};
use temporal_reward::interpretation;
use temporal_reward::simulator::{RewardSimulator, SimulationError};

fn s(index: usize) -> StateId {
    StateId::new(index)
}

/// States {0,1,2}, alphabet {a}, 0 -> 1 -> 2 -> 2, accepting {2}, reward 10.
fn three_state_chain() -> Arc<RewardAutomaton> {
    let a = interpretation!["a"];
    let dfa = Dfa::new(
        Alphabet::new([a.clone()]),
        s(0),
        BTreeSet::from([s(2)]),
        vec![
            BTreeMap::from([(a.clone(), s(1))]),
            BTreeMap::from([(a.clone(), s(2))]),
            BTreeMap::from([(a, s(2))]),
        ],
    );
    Arc::new(RewardAutomaton::new(dfa, 10.0).unwrap())
}

#[test]
fn three_state_chain_levels_and_potentials() {
    let automaton = three_state_chain();

    assert_eq!(automaton.level(s(2)), Some(0));
    assert_eq!(automaton.level(s(1)), Some(1));
    assert_eq!(automaton.level(s(0)), Some(2));
    assert!(automaton.failure_states().is_empty());

    assert_eq!(automaton.potential(s(0), false), 0.0);
    assert_eq!(automaton.potential(s(1), false), 5.0);
    assert_eq!(automaton.potential(s(2), false), 10.0);
}

#[test]
fn three_state_chain_episode_pays_exactly_the_terminal_reward() {
    let mut simulator = RewardSimulator::new(three_state_chain());
    let a = interpretation!["a"];

    simulator.step(&a).unwrap();
    let first = simulator.observe_reward(false).unwrap();
    simulator.step(&a).unwrap();
    let second = simulator.observe_reward(true).unwrap();

    assert_eq!(first, 5.0);
    assert_eq!(second, 5.0);
    assert_eq!(first + second, 10.0);
}

/// `a` leads toward the goal, `b` from the start leads into a dead loop.
fn branching_goal() -> Arc<RewardAutomaton> {
    let builder = DfaBuilder::new()
        .alphabet(Alphabet::new([interpretation!["a"], interpretation!["b"]]))
        .initial("start")
        .accepting("goal")
        .transition("start", interpretation!["a"], "near")
        .transition("start", interpretation!["b"], "dead")
        .transition("near", interpretation!["a"], "goal")
        .transition("near", interpretation!["b"], "near")
        .otherwise("goal", "goal")
        .otherwise("dead", "dead_loop")
        .otherwise("dead_loop", "dead");
    Arc::new(reward_automaton(builder, 1.0).unwrap().0)
}

#[test]
fn dead_branch_is_classified_as_failure() {
    let automaton = branching_goal();
    let failure_level = automaton.max_level().unwrap() + 1;

    assert_eq!(automaton.max_level(), Some(2));
    assert_eq!(automaton.failure_states().len(), 2);
    for &state in automaton.failure_states() {
        assert_eq!(automaton.level(state), Some(failure_level));
        assert!(!automaton.is_accepting(state));
    }

    let mut simulator = RewardSimulator::new(automaton);
    assert!(!simulator.is_failed());
    simulator.step(&interpretation!["b"]).unwrap();
    assert!(simulator.is_failed());
    assert!(simulator.is_terminal());
    assert!(simulator.observe_reward(true).unwrap() <= 0.0);
}

#[test]
fn levels_are_zero_exactly_on_accepting_states() {
    let automaton = branching_goal();
    for (index, &level) in automaton.levels().iter().enumerate() {
        assert_eq!(level == 0, automaton.is_accepting(s(index)));
    }
}

#[test]
fn accepting_initial_state_is_trivially_satisfied() {
    let a = interpretation!["a"];
    let dfa = Dfa::new(
        Alphabet::new([a.clone()]),
        s(0),
        BTreeSet::from([s(0)]),
        vec![BTreeMap::from([(a.clone(), s(0))])],
    );
    let automaton = Arc::new(RewardAutomaton::new(dfa, 5.0).unwrap());

    assert_eq!(automaton.max_level(), Some(0));
    assert!(automaton.failure_states().is_empty());
    assert_eq!(automaton.potential(s(0), false), 0.0);

    let mut simulator = RewardSimulator::new(automaton);
    assert!(simulator.is_terminal());
    simulator.step(&a).unwrap();
    assert_eq!(simulator.observe_reward(true).unwrap(), 5.0);
}

#[test]
fn reset_without_step_sits_in_initial_state() {
    let automaton = three_state_chain();
    let mut simulator = RewardSimulator::new(Arc::clone(&automaton));
    simulator.step(&interpretation!["a"]).unwrap();

    simulator.reset();

    assert_eq!(simulator.current_state(), automaton.initial_state());
    assert!(!simulator.is_terminal());
    assert_eq!(
        simulator.observe_reward(false),
        Err(SimulationError::NoPreviousState)
    );
}

#[test]
fn incomplete_compiler_output_fails_fast() {
    let builder = DfaBuilder::new()
        .alphabet(Alphabet::power_set(["a"]))
        .initial(0)
        .accepting(1)
        .transition(0, interpretation!["a"], 1);

    let result = reward_automaton(builder, 1.0);

    match result {
        Err(BuildError::InvalidDfa(violations)) => assert_eq!(violations.len(), 3),
        other => panic!("Expected InvalidDfa, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn one_automaton_many_parallel_simulators() {
    let automaton = three_state_chain();

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let automaton = Arc::clone(&automaton);
            thread::spawn(move || {
                let mut simulator = RewardSimulator::new(automaton);
                let a = Interpretation::from_iter(["a"]);
                let mut total = 0.0;
                for _ in 0..=worker % 3 {
                    simulator.reset();
                    total = 0.0;
                    while !simulator.is_terminal() {
                        simulator.step(&a).unwrap();
                        total += simulator.observe_reward(simulator.is_terminal()).unwrap();
                    }
                }
                total
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 10.0);
    }
}
