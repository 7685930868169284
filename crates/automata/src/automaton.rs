use std::fmt;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::StateKind;
use crate::Symbol;

/// The index for a state.
pub type StateIndex = usize;

/// The destinations of a single lookup in the transition relation.
pub type Successors = SmallVec<[StateIndex; 4]>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AutomatonError {
    #[error("The automaton has no states")]
    NoStates,

    #[error("The initial state {0} is not a state of the automaton")]
    UnknownInitialState(String),

    #[error("Transition from {from} to {to} refers to an unknown state")]
    UnknownTarget { from: String, to: String },

    #[error("State {state} has more than one successor for symbol {symbol}")]
    NotDeterministic { state: String, symbol: char },

    #[error("State {0} has an epsilon transition")]
    EpsilonTransition(String),

    #[error("State {0} is a universal (AND) state")]
    AlternatingState(String),
}

/// A single state in the automaton, the outgoing transitions are stored in the
/// range `outgoing_start..outgoing_end` of the automaton's transitions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct State {
    /// False for names that only occur as a transition target or as the
    /// initial state without being declared.
    pub(crate) member: bool,
    pub(crate) accepting: bool,
    pub(crate) kind: StateKind,

    pub(crate) outgoing_start: usize,
    pub(crate) outgoing_end: usize,
}

/// Represents a possibly alternating finite automaton. Every state is either
/// an existential or a universal state, and transitions are labelled with
/// characters, epsilon or a wildcard.
///
/// Automata are constructed by the [crate::AutomatonBuilder] and are immutable
/// afterwards.
#[derive(PartialEq, Eq)]
pub struct Automaton {
    states: Vec<State>,
    transitions: Vec<(Symbol, StateIndex)>,

    names: Vec<String>,
    indices: FxHashMap<String, StateIndex>,
    alphabet: Vec<char>,

    initial_state: StateIndex,
}

impl Automaton {
    /// Creates a new automaton from the given states and transitions.
    ///
    /// The transitions are (from, symbol, to) triples, duplicates are removed.
    pub(crate) fn new(
        initial_state: StateIndex,
        mut states: Vec<State>,
        names: Vec<String>,
        indices: FxHashMap<String, StateIndex>,
        mut transitions: Vec<(StateIndex, Symbol, StateIndex)>,
        alphabet: Vec<char>,
    ) -> Automaton {
        debug_assert_eq!(states.len(), names.len(), "Every state should have a name");

        transitions.sort_unstable();
        transitions.dedup();

        // Count the number of transitions for every state
        for (from, _, _) in &transitions {
            states[*from].outgoing_end += 1;
        }

        // Track the number of transitions before every state.
        states.iter_mut().fold(0, |count, state| {
            let result = count + state.outgoing_end;
            state.outgoing_start = count;
            state.outgoing_end = count;
            result
        });

        // The triples are sorted by source, so placing them in order keeps
        // every range sorted on (symbol, target).
        let mut placed = Vec::with_capacity(transitions.len());
        for (from, symbol, to) in transitions {
            placed.push((symbol, to));
            states[from].outgoing_end += 1;
        }

        Automaton {
            states,
            transitions: placed,
            names,
            indices,
            alphabet,
            initial_state,
        }
    }

    /// Returns the index of the initial state
    pub fn initial_state(&self) -> StateIndex {
        self.initial_state
    }

    /// Returns the number of interned states, including names that are not
    /// declared as states.
    pub fn num_of_states(&self) -> usize {
        self.states.len()
    }

    /// Returns the number of transitions.
    pub fn num_of_transitions(&self) -> usize {
        self.transitions.len()
    }

    /// Iterate over all state indices, including undeclared ones.
    pub fn iter_states(&self) -> impl Iterator<Item = StateIndex> {
        0..self.states.len()
    }

    /// Returns true iff the given index is a declared state of the automaton.
    pub fn contains(&self, state: StateIndex) -> bool {
        self.states.get(state).is_some_and(|state| state.member)
    }

    /// Returns true iff the given state is accepting.
    pub fn is_accepting(&self, state: StateIndex) -> bool {
        self.states.get(state).is_some_and(|state| state.accepting)
    }

    /// Returns the kind of the given state, unknown states are existential.
    pub fn kind(&self, state: StateIndex) -> StateKind {
        self.states.get(state).map(|state| state.kind).unwrap_or_default()
    }

    /// Returns the name of the given state, or `?` for an unknown index.
    pub fn name(&self, state: StateIndex) -> &str {
        self.names.get(state).map_or("?", String::as_str)
    }

    /// Returns the index of the state with the given name.
    pub fn index_of(&self, name: &str) -> Option<StateIndex> {
        self.indices.get(name).copied()
    }

    /// Returns the characters that the automaton is intended to read.
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Returns the outgoing transitions of the given state, sorted on symbol.
    pub fn outgoing_transitions(&self, state: StateIndex) -> &[(Symbol, StateIndex)] {
        match self.states.get(state) {
            Some(state) => &self.transitions[state.outgoing_start..state.outgoing_end],
            None => &[],
        }
    }

    /// Returns the transitions of the given state labelled with exactly the
    /// given symbol.
    fn transitions_on(&self, state: StateIndex, symbol: Symbol) -> &[(Symbol, StateIndex)] {
        let outgoing = self.outgoing_transitions(state);
        let start = outgoing.partition_point(|(label, _)| *label < symbol);
        let end = outgoing.partition_point(|(label, _)| *label <= symbol);
        &outgoing[start..end]
    }

    /// Returns the set of states reachable from `state` by one `symbol` step.
    ///
    /// For a character this includes the wildcard successors, for epsilon
    /// (and the wildcard itself) only the literally labelled successors are
    /// returned. The result is sorted and contains no duplicates.
    pub fn delta(&self, state: StateIndex, symbol: Symbol) -> Successors {
        let mut result: Successors = self
            .transitions_on(state, symbol)
            .iter()
            .map(|(_, to)| *to)
            .collect();

        if symbol.is_concrete() {
            result.extend(self.transitions_on(state, Symbol::Wildcard).iter().map(|(_, to)| *to));
            result.sort_unstable();
            result.dedup();
        }

        result
    }

    /// Checks that the automaton only refers to declared states.
    ///
    /// The evaluator does not require this, it treats unknown states as
    /// rejecting, but fixtures are expected to be well-formed.
    pub fn validate(&self) -> Result<(), AutomatonError> {
        if !self.states.iter().any(|state| state.member) {
            return Err(AutomatonError::NoStates);
        }

        if !self.contains(self.initial_state) {
            return Err(AutomatonError::UnknownInitialState(self.name(self.initial_state).to_string()));
        }

        for from in self.iter_states() {
            for (_, to) in self.outgoing_transitions(from) {
                if !self.contains(from) || !self.contains(*to) {
                    return Err(AutomatonError::UnknownTarget {
                        from: self.name(from).to_string(),
                        to: self.name(*to).to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Print some information about the automaton.
        writeln!(
            f,
            "Number of states: {}",
            self.states.iter().filter(|state| state.member).count()
        )?;
        writeln!(f, "Number of transitions: {}", self.transitions.len())?;
        write!(f, "Alphabet: {}", self.alphabet.iter().collect::<String>())
    }
}

impl fmt::Debug for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self)?;
        writeln!(f, "Initial state: {}", self.name(self.initial_state))?;

        for state_index in self.iter_states() {
            let state = &self.states[state_index];
            let name = self.name(state_index);
            if state.member {
                writeln!(
                    f,
                    "{name}: {}{}",
                    state.kind,
                    if state.accepting { " accepting" } else { "" }
                )?;
            }

            for (symbol, to) in self.outgoing_transitions(state_index) {
                writeln!(f, "{name} --[{symbol}]-> {}", self.name(*to))?;
            }
        }

        Ok(())
    }
}
