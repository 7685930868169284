use afarust_automata::accepts;
use afarust_automata::random_automaton;
use afarust_automata::random_dfa;
use afarust_automata::run_deterministic;
use afarust_automata::run_fixed_point;
use afarust_automata::run_subset;
use afarust_automata::Automaton;
use afarust_automata::AutomatonBuilder;
use afarust_automata::Evaluator;
use afarust_automata::StateIndex;
use afarust_utilities::random_generator;
use afarust_utilities::random_word;
use rand::seq::SliceRandom;
use rand::Rng;
use test_case::test_case;

#[test_case(1 ; "seed 1")]
#[test_case(2 ; "seed 2")]
#[test_case(3 ; "seed 3")]
fn test_random_dfa_simulation(seed: u64) {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut rng = random_generator(Some(seed));
    for _ in 0..20 {
        let automaton = random_dfa(&mut rng, 8, &['a', 'b']);

        for _ in 0..50 {
            // The c is never part of the automaton, so it must reject.
            let word = random_word(&mut rng, &['a', 'b', 'c'], 0, 10);
            assert_eq!(
                Ok(accepts(&automaton, &word)),
                run_deterministic(&automaton, &word),
                "Verdicts differ on {word:?} for automaton {automaton:?}"
            );
        }
    }
}

#[test_case(4 ; "seed 4")]
#[test_case(5 ; "seed 5")]
#[test_case(6 ; "seed 6")]
fn test_random_nfa_simulation(seed: u64) {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut rng = random_generator(Some(seed));
    for _ in 0..20 {
        let automaton = random_automaton(&mut rng, 8, &['a', 'b'], 4, 0.0);

        for _ in 0..50 {
            let word = random_word(&mut rng, &['a', 'b', 'c'], 0, 10);
            assert_eq!(
                Ok(accepts(&automaton, &word)),
                run_subset(&automaton, &word),
                "Verdicts differ on {word:?} for automaton {automaton:?}"
            );
        }
    }
}

/// Returns the same automaton where the states are declared in a random
/// order, so that they are numbered differently.
fn permuted<R: Rng>(automaton: &Automaton, rng: &mut R) -> Automaton {
    let mut order: Vec<StateIndex> = automaton.iter_states().collect();
    order.shuffle(rng);

    let mut builder = AutomatonBuilder::new(automaton.name(automaton.initial_state()));
    builder.alphabet(automaton.alphabet().iter().copied());

    for state in &order {
        let name = automaton.name(*state);
        if automaton.contains(*state) {
            builder.state(name).kind(name, automaton.kind(*state));
        }

        if automaton.is_accepting(*state) {
            builder.accepting(name);
        }
    }

    for from in order {
        for (symbol, to) in automaton.outgoing_transitions(from) {
            builder.transition(automaton.name(from), *symbol, automaton.name(*to));
        }
    }

    builder.build()
}

#[test_case(7 ; "seed 7")]
#[test_case(8 ; "seed 8")]
#[test_case(9 ; "seed 9")]
fn test_random_alternating_fixed_point(seed: u64) {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut rng = random_generator(Some(seed));
    for _ in 0..50 {
        // Dense enough that most automata contain epsilon cycles.
        let automaton = random_automaton(&mut rng, 8, &['a', 'b'], 5, 0.5);
        let copy = permuted(&automaton, &mut rng);

        for _ in 0..20 {
            let word = random_word(&mut rng, &['a', 'b'], 0, 8);

            let expected = run_fixed_point(&automaton, &word);
            assert_eq!(
                accepts(&automaton, &word),
                expected,
                "Verdicts differ on {word:?} for automaton {automaton:?}"
            );
            assert_eq!(
                accepts(&copy, &word),
                expected,
                "Verdicts depend on the state order on {word:?} for automaton {copy:?}"
            );

            // Results settled by earlier queries do not depend on which
            // query came first.
            let mut evaluator = Evaluator::new(&automaton, &word);
            for state in automaton.iter_states().collect::<Vec<_>>().into_iter().rev() {
                for pos in 0..=word.len() {
                    let mut fresh = Evaluator::new(&automaton, &word);
                    assert_eq!(evaluator.satisfied(state, pos), fresh.satisfied(state, pos));
                }
            }
        }
    }
}
