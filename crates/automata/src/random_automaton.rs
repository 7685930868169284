use rand::seq::IndexedRandom;
use rand::Rng;

use crate::Automaton;
use crate::AutomatonBuilder;
use crate::StateKind;
use crate::Symbol;

/// Returns the name used for the state with the given index in random automata.
fn state_name(index: usize) -> String {
    format!("s{index}")
}

/// Generates an automaton with the desired number of states where every
/// state has a transition for every character of the alphabet, which makes it
/// a complete deterministic automaton. Without states the initial state is
/// undeclared and nothing is accepted.
pub fn random_dfa<R: Rng>(rng: &mut R, num_of_states: usize, alphabet: &[char]) -> Automaton {
    let mut builder = AutomatonBuilder::new(&state_name(0));
    builder.alphabet(alphabet.iter().copied());

    for index in 0..num_of_states {
        let name = state_name(index);
        builder.state(&name);

        if rng.random_bool(0.5) {
            builder.accepting(&name);
        }

        for c in alphabet {
            let to = rng.random_range(0..num_of_states);
            builder.transition(&name, Symbol::Char(*c), &state_name(to));
        }
    }

    builder.build()
}

/// Generates an automaton with the desired number of states and at most
/// `outdegree` outgoing transitions per state. Transitions are labelled with
/// characters of the alphabet, epsilon or the wildcard.
///
/// Every state is universal with the given probability, so a probability of
/// zero yields a nondeterministic automaton.
pub fn random_automaton<R: Rng>(
    rng: &mut R,
    num_of_states: usize,
    alphabet: &[char],
    outdegree: usize,
    and_probability: f64,
) -> Automaton {
    let mut symbols = vec![Symbol::Epsilon, Symbol::Wildcard];
    symbols.extend(alphabet.iter().map(|c| Symbol::Char(*c)));

    let mut builder = AutomatonBuilder::new(&state_name(0));
    builder.alphabet(alphabet.iter().copied());

    for index in 0..num_of_states {
        let name = state_name(index);
        builder.state(&name);

        if rng.random_bool(0.5) {
            builder.accepting(&name);
        }

        if rng.random_bool(and_probability) {
            builder.kind(&name, StateKind::And);
        }

        // Introduce outgoing transitions for this state based on the desired out degree.
        for _ in 0..rng.random_range(0..=outdegree) {
            if let Some(symbol) = symbols.choose(rng) {
                let to = rng.random_range(0..num_of_states);
                builder.transition(&name, *symbol, &state_name(to));
            }
        }
    }

    builder.build()
}
