use log::trace;

use crate::Automaton;
use crate::AutomatonError;
use crate::StateIndex;
use crate::StateKind;
use crate::Symbol;

/// Checks that a state can be part of a deterministic run.
fn check_deterministic(automaton: &Automaton, state: StateIndex) -> Result<(), AutomatonError> {
    if automaton.kind(state) == StateKind::And {
        return Err(AutomatonError::AlternatingState(automaton.name(state).to_string()));
    }

    if !automaton.delta(state, Symbol::Epsilon).is_empty() {
        return Err(AutomatonError::EpsilonTransition(automaton.name(state).to_string()));
    }

    Ok(())
}

/// Runs the automaton as a deterministic automaton, following the single
/// successor for every character of the word. A missing successor rejects.
///
/// Fails when a visited state is universal, has an epsilon transition or has
/// more than one successor for the character that is read.
pub fn run_deterministic(automaton: &Automaton, word: &str) -> Result<bool, AutomatonError> {
    let mut current = automaton.initial_state();

    for c in word.chars() {
        if !automaton.contains(current) {
            return Ok(false);
        }
        check_deterministic(automaton, current)?;

        current = match automaton.delta(current, Symbol::Char(c)).as_slice() {
            [] => return Ok(false),
            [next] => *next,
            _ => {
                return Err(AutomatonError::NotDeterministic {
                    state: automaton.name(current).to_string(),
                    symbol: c,
                })
            }
        };
    }

    if !automaton.contains(current) {
        return Ok(false);
    }
    check_deterministic(automaton, current)?;

    Ok(automaton.is_accepting(current))
}

/// Computes the set of declared states reachable by epsilon transitions from
/// the given states, including the given states themselves.
fn epsilon_closure(
    automaton: &Automaton,
    states: impl IntoIterator<Item = StateIndex>,
) -> Result<Vec<StateIndex>, AutomatonError> {
    // Keep track of already visited states.
    let mut visited = vec![false; automaton.num_of_states()];
    let mut stack: Vec<StateIndex> = Vec::new();
    let mut closure = Vec::new();

    for state in states {
        if automaton.contains(state) && !visited[state] {
            visited[state] = true;
            stack.push(state);
        }
    }

    while let Some(state) = stack.pop() {
        if automaton.kind(state) == StateKind::And {
            return Err(AutomatonError::AlternatingState(automaton.name(state).to_string()));
        }

        closure.push(state);

        // Explore all the states reachable with epsilon transitions.
        for next in automaton.delta(state, Symbol::Epsilon) {
            if automaton.contains(next) && !visited[next] {
                visited[next] = true;
                stack.push(next);
            }
        }
    }

    closure.sort_unstable();
    Ok(closure)
}

/// Runs the automaton as a nondeterministic automaton by tracking the set of
/// reachable states, closed under epsilon transitions.
///
/// Fails when a reachable state is universal.
pub fn run_subset(automaton: &Automaton, word: &str) -> Result<bool, AutomatonError> {
    let mut current = epsilon_closure(automaton, [automaton.initial_state()])?;

    for c in word.chars() {
        trace!("Reading {c} in states {current:?}");

        let next: Vec<StateIndex> = current
            .iter()
            .flat_map(|state| automaton.delta(*state, Symbol::Char(c)))
            .collect();

        current = epsilon_closure(automaton, next)?;
        if current.is_empty() {
            return Ok(false);
        }
    }

    Ok(current.iter().any(|state| automaton.is_accepting(*state)))
}

/// Decides acceptance of alternating automata by computing the least fixed
/// point of the OR/AND equations for every (state, position) pair, starting
/// from false and iterating until no value changes.
///
/// Quadratic in the number of pairs, but independent of any evaluation order.
pub fn run_fixed_point(automaton: &Automaton, word: &str) -> bool {
    let word: Vec<char> = word.chars().collect();
    let positions = word.len() + 1;
    let mut values = vec![false; automaton.num_of_states() * positions];

    let value = |values: &[bool], state: StateIndex, pos: usize| -> bool {
        automaton.contains(state) && values[state * positions + pos]
    };

    let mut changed = true;
    let mut rounds = 0;
    while changed {
        changed = false;
        rounds += 1;

        for pos in (0..positions).rev() {
            let at_end = pos == word.len();

            for state in automaton.iter_states().filter(|state| automaton.contains(*state)) {
                let key = state * positions + pos;
                if values[key] {
                    continue;
                }

                let epsilon = automaton.delta(state, Symbol::Epsilon);
                let symbol = match word.get(pos) {
                    Some(c) => automaton.delta(state, Symbol::Char(*c)),
                    None => Default::default(),
                };

                let result = match automaton.kind(state) {
                    StateKind::Or => {
                        (at_end && automaton.is_accepting(state))
                            || epsilon.iter().any(|next| value(&values, *next, pos))
                            || (!at_end && symbol.iter().any(|next| value(&values, *next, pos + 1)))
                    }
                    StateKind::And => {
                        if !epsilon.iter().all(|next| value(&values, *next, pos)) {
                            false
                        } else if at_end {
                            automaton.is_accepting(state)
                        } else if !symbol.is_empty() {
                            symbol.iter().all(|next| value(&values, *next, pos + 1))
                        } else {
                            !epsilon.is_empty()
                        }
                    }
                };

                if result {
                    values[key] = true;
                    changed = true;
                }
            }
        }
    }

    trace!("Fixed point reached after {rounds} rounds");
    value(&values, automaton.initial_state(), 0)
}
