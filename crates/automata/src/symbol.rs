use std::fmt;

/// The label of a transition.
///
/// The derived order places the two pseudo-symbols before all characters,
/// which the automaton relies on to look up transitions in sorted storage.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Symbol {
    /// A spontaneous move that does not consume input.
    Epsilon,
    /// Matches any single input character, but never an epsilon query.
    Wildcard,
    Char(char),
}

impl Symbol {
    /// Returns true iff this symbol consumes exactly one input character.
    pub fn is_concrete(&self) -> bool {
        matches!(self, Symbol::Char(_))
    }
}

impl From<char> for Symbol {
    fn from(value: char) -> Self {
        Symbol::Char(value)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Epsilon => write!(f, "eps"),
            Symbol::Wildcard => write!(f, "*"),
            Symbol::Char(c) => write!(f, "{c}"),
        }
    }
}

/// Determines how the successors of a state are combined.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum StateKind {
    /// Existential, accepts when any branch accepts.
    #[default]
    Or,
    /// Universal, accepts only when every branch accepts.
    And,
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateKind::Or => write!(f, "OR"),
            StateKind::And => write!(f, "AND"),
        }
    }
}
