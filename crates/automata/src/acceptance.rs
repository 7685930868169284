use log::debug;
use log::trace;

use crate::Automaton;
use crate::StateIndex;
use crate::StateKind;
use crate::Successors;
use crate::Symbol;

/// The memoized result of a (state, position) query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Memo {
    #[default]
    Unvisited,
    /// The query belongs to a component that is still being evaluated, the
    /// value is the visit index used to detect the root of that component.
    InProgress(usize),
    Settled(bool),
}

/// The value of a query together with the lowest visit index of an
/// unsettled query that it depends on.
type Query = (bool, usize);

/// Evaluates the acceptance relation of an automaton for a single word.
///
/// The result is the least fixed point of the OR/AND equations over all
/// (state, position) pairs. Queries that depend on each other form a strongly
/// connected component, which is found as in Tarjan's algorithm and
/// re-evaluated until its values are stable before any of them is settled.
///
/// The memo table is indexed by (state, position) and only valid for the
/// word the evaluator was created with.
pub struct Evaluator<'a> {
    automaton: &'a Automaton,
    word: Vec<char>,
    memo: Vec<Memo>,

    /// A lower bound on the result of every unsettled query, which only
    /// changes from false to true.
    approximation: Vec<bool>,

    /// Set when the approximation of an in progress query was read while it
    /// was still false.
    assumed_false: Vec<bool>,

    /// The queries of the components that are not settled yet.
    stack: Vec<usize>,
    next_index: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(automaton: &'a Automaton, word: &str) -> Evaluator<'a> {
        let word: Vec<char> = word.chars().collect();
        let num_of_keys = automaton.num_of_states() * (word.len() + 1);

        Evaluator {
            automaton,
            word,
            memo: vec![Memo::Unvisited; num_of_keys],
            approximation: vec![false; num_of_keys],
            assumed_false: vec![false; num_of_keys],
            stack: Vec::new(),
            next_index: 0,
        }
    }

    /// Returns true iff `state` accepts the suffix of the word starting at
    /// position `pos`, where `pos` ranges over `0..=len`.
    ///
    /// Unknown states and positions beyond the end of the word are not
    /// satisfied. A query that is only satisfied through itself, by a cycle
    /// of epsilon transitions, is not satisfied either.
    pub fn satisfied(&mut self, state: StateIndex, pos: usize) -> bool {
        self.query(state, pos).0
    }

    fn query(&mut self, state: StateIndex, pos: usize) -> Query {
        if !self.automaton.contains(state) || pos > self.word.len() {
            return (false, usize::MAX);
        }

        let key = state * (self.word.len() + 1) + pos;
        match self.memo[key] {
            Memo::Settled(result) => (result, usize::MAX),
            Memo::InProgress(index) => {
                let result = self.approximation[key];
                if !result {
                    trace!("Cycle on state {} at position {pos}", self.automaton.name(state));
                    self.assumed_false[key] = true;
                }

                (result, index)
            }
            Memo::Unvisited => self.visit(state, pos, key),
        }
    }

    /// Evaluates an unvisited query, and settles its component when it is
    /// the first query of that component.
    fn visit(&mut self, state: StateIndex, pos: usize, key: usize) -> Query {
        let base = self.stack.len();

        loop {
            let index = self.next_index;
            self.next_index += 1;

            self.memo[key] = Memo::InProgress(index);
            self.stack.push(key);

            let (result, low) = match self.automaton.kind(state) {
                StateKind::Or => self.satisfied_or(state, pos, index),
                StateKind::And => self.satisfied_and(state, pos, index),
            };

            self.approximation[key] |= result;
            trace!("sat({}, {pos}) >= {result}", self.automaton.name(state));

            if low < index {
                // Depends on a query that is still in progress, so the
                // component is settled by its first query.
                return (self.approximation[key], low);
            }

            let component = self.stack.split_off(base);
            let stale = component
                .iter()
                .any(|member| self.assumed_false[*member] && self.approximation[*member]);

            if stale {
                // A member was read as false but turned out to hold, so
                // evaluate the component again with the improved bounds.
                trace!("Re-evaluating a component of {} queries", component.len());
                for member in component {
                    self.memo[member] = Memo::Unvisited;
                    self.assumed_false[member] = false;
                }

                continue;
            }

            for member in component {
                self.memo[member] = Memo::Settled(self.approximation[member]);
            }

            return (self.approximation[key], usize::MAX);
        }
    }

    /// Returns the epsilon successors and, unless the word has been consumed,
    /// the successors for the symbol at the given position.
    fn successors(&self, state: StateIndex, pos: usize) -> (Successors, Successors) {
        let epsilon = self.automaton.delta(state, Symbol::Epsilon);
        let symbol = match self.word.get(pos) {
            Some(c) => self.automaton.delta(state, Symbol::Char(*c)),
            None => Successors::new(),
        };

        (epsilon, symbol)
    }

    fn satisfied_or(&mut self, state: StateIndex, pos: usize, index: usize) -> Query {
        let mut low = index;

        let at_end = pos == self.word.len();
        if at_end && self.automaton.is_accepting(state) {
            return (true, low);
        }

        let (epsilon, symbol) = self.successors(state, pos);

        for next in epsilon {
            let (result, next_low) = self.query(next, pos);
            low = low.min(next_low);
            if result {
                return (true, low);
            }
        }

        for next in symbol {
            let (result, next_low) = self.query(next, pos + 1);
            low = low.min(next_low);
            if result {
                return (true, low);
            }
        }

        (false, low)
    }

    fn satisfied_and(&mut self, state: StateIndex, pos: usize, index: usize) -> Query {
        let mut low = index;
        let (epsilon, symbol) = self.successors(state, pos);

        for next in &epsilon {
            let (result, next_low) = self.query(*next, pos);
            low = low.min(next_low);
            if !result {
                return (false, low);
            }
        }

        if pos == self.word.len() {
            // Every epsilon branch holds, so membership alone decides.
            return (self.automaton.is_accepting(state), low);
        }

        if symbol.is_empty() {
            // Without a move on the current symbol the state is only
            // satisfied through its epsilon successors, never vacuously.
            return (!epsilon.is_empty(), low);
        }

        for next in symbol {
            let (result, next_low) = self.query(next, pos + 1);
            low = low.min(next_low);
            if !result {
                return (false, low);
            }
        }

        (true, low)
    }
}

/// Returns true iff the automaton accepts the given word.
pub fn accepts(automaton: &Automaton, word: &str) -> bool {
    let result = Evaluator::new(automaton, word).satisfied(automaton.initial_state(), 0);
    debug!("Word {word:?} accepted: {result}");
    result
}
