use log::trace;
use rustc_hash::FxHashMap;

use crate::automaton::State;
use crate::Automaton;
use crate::StateIndex;
use crate::StateKind;
use crate::Symbol;

/// Constructs an [Automaton] from states named by strings.
///
/// Every name that is mentioned is interned to a dense [StateIndex], but only
/// names passed to [AutomatonBuilder::state] become states of the automaton.
/// Names that are only used as the initial state or as a transition target
/// are kept so that the evaluator can treat them as rejecting.
#[derive(Clone, Debug)]
pub struct AutomatonBuilder {
    indices: FxHashMap<String, StateIndex>,
    names: Vec<String>,
    states: Vec<State>,

    transitions: Vec<(StateIndex, Symbol, StateIndex)>,
    alphabet: Vec<char>,

    initial_state: StateIndex,
}

impl AutomatonBuilder {
    /// Creates a builder for an automaton with the given initial state.
    pub fn new(initial_state: &str) -> AutomatonBuilder {
        let mut builder = AutomatonBuilder {
            indices: FxHashMap::default(),
            names: Vec::new(),
            states: Vec::new(),
            transitions: Vec::new(),
            alphabet: Vec::new(),
            initial_state: 0,
        };

        builder.initial_state = builder.intern(initial_state);
        builder
    }

    /// Returns the index for the given name, introducing it when necessary.
    fn intern(&mut self, name: &str) -> StateIndex {
        if let Some(index) = self.indices.get(name) {
            return *index;
        }

        let index = self.names.len();
        self.indices.insert(name.to_string(), index);
        self.names.push(name.to_string());
        self.states.push(State::default());
        index
    }

    /// Declares a state.
    pub fn state(&mut self, name: &str) -> &mut Self {
        let index = self.intern(name);
        self.states[index].member = true;
        self
    }

    /// Marks the given state as accepting.
    pub fn accepting(&mut self, name: &str) -> &mut Self {
        let index = self.intern(name);
        self.states[index].accepting = true;
        self
    }

    /// Sets the kind of the given state, states are existential by default.
    pub fn kind(&mut self, name: &str, kind: StateKind) -> &mut Self {
        let index = self.intern(name);
        self.states[index].kind = kind;
        self
    }

    /// Changes the initial state.
    pub fn start(&mut self, name: &str) -> &mut Self {
        self.initial_state = self.intern(name);
        self
    }

    /// Adds a transition, adding the same transition twice has no effect.
    pub fn transition(&mut self, from: &str, symbol: Symbol, to: &str) -> &mut Self {
        let from = self.intern(from);
        let to = self.intern(to);
        self.transitions.push((from, symbol, to));
        self
    }

    /// Adds the given characters to the alphabet.
    pub fn alphabet(&mut self, symbols: impl IntoIterator<Item = char>) -> &mut Self {
        self.alphabet.extend(symbols);
        self.alphabet.sort_unstable();
        self.alphabet.dedup();
        self
    }

    /// Returns the automaton described by this builder.
    pub fn build(&self) -> Automaton {
        trace!(
            "Building automaton with {} states and {} transitions",
            self.states.len(),
            self.transitions.len()
        );

        Automaton::new(
            self.initial_state,
            self.states.clone(),
            self.names.clone(),
            self.indices.clone(),
            self.transitions.clone(),
            self.alphabet.clone(),
        )
    }
}
