//! Three automata for the language `((aa|ba)(ab)*(bb)*)*` over `{a, b}`,
//! written as a deterministic, a nondeterministic and an alternating
//! automaton, together with regular expressions for the same language.

use crate::Automaton;
use crate::AutomatonBuilder;
use crate::StateKind;
use crate::Symbol;

/// The reference expression, it must be matched against the whole word.
pub const REFERENCE_PATTERN: &str = "((aa|ba)(ab)*(bb)*)*";

/// An equivalent expression where the first letter of a block is a class.
pub const ALTERNATIVE_PATTERN: &str = "([ab]a(ab)*(bb)*)*";

/// Adds a transition for every letter and every target of the (from, letters,
/// targets) entries, targets are separated by whitespace.
fn add_transitions(builder: &mut AutomatonBuilder, transitions: &[(&str, &str, &str)]) {
    for (from, letters, targets) in transitions {
        for c in letters.chars() {
            for to in targets.split_whitespace() {
                builder.transition(from, Symbol::Char(c), to);
            }
        }
    }
}

pub fn dfa() -> Automaton {
    let mut builder = AutomatonBuilder::new("q0");
    builder.alphabet(['a', 'b']);

    for state in ["q0", "q1", "q2", "q3", "q4", "q5", "q6"] {
        builder.state(state);
    }

    for state in ["q0", "q2", "q6"] {
        builder.accepting(state);
    }

    add_transitions(
        &mut builder,
        &[
            ("q0", "ab", "q1"),
            ("q1", "a", "q2"),
            ("q1", "b", "q3"),
            ("q2", "a", "q4"),
            ("q2", "b", "q5"),
            ("q3", "ab", "q3"),
            ("q4", "ab", "q2"),
            ("q5", "a", "q2"),
            ("q5", "b", "q6"),
            ("q6", "a", "q1"),
            ("q6", "b", "q5"),
        ],
    );

    builder.build()
}

pub fn nfa() -> Automaton {
    let mut builder = AutomatonBuilder::new("q0");
    builder.alphabet(['a', 'b']);

    for state in ["q0", "q1", "q2", "q3", "q4", "q5"] {
        builder.state(state);
    }

    for state in ["q0", "q2", "q5"] {
        builder.accepting(state);
    }

    add_transitions(
        &mut builder,
        &[
            ("q0", "ab", "q1"),
            ("q1", "a", "q2"),
            ("q2", "a", "q1 q3"),
            ("q2", "b", "q1 q4"),
            ("q3", "b", "q2"),
            ("q4", "b", "q5"),
            ("q5", "a", "q1"),
            ("q5", "b", "q1 q4"),
        ],
    );

    builder.build()
}

/// The universal initial state `&` requires that the word is accepted from
/// `q0` and that its second letter is an `a`.
pub fn afa() -> Automaton {
    let mut builder = AutomatonBuilder::new("&");
    builder.alphabet(['a', 'b']);

    for state in ["&", "p0", "q0", "q1", "q2", "q3"] {
        builder.state(state);
    }

    for state in ["&", "q0", "q3"] {
        builder.accepting(state);
    }

    builder
        .kind("&", StateKind::And)
        .transition("&", Symbol::Epsilon, "q0");

    add_transitions(
        &mut builder,
        &[
            ("&", "ab", "p0"),
            ("p0", "a", "q0"),
            ("q0", "a", "q1"),
            ("q0", "b", "q2"),
            ("q1", "ab", "q0"),
            ("q2", "a", "q0"),
            ("q2", "b", "q3"),
            ("q3", "a", "p0"),
            ("q3", "b", "q2"),
        ],
    );

    builder.build()
}
