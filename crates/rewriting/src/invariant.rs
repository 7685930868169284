use std::fmt;

use log::debug;
use thiserror::Error;

use crate::RewritingSystem;

/// A 3x3 integer matrix.
pub type Matrix3 = [[i64; 3]; 3];

pub const IDENTITY: Matrix3 = [[1, 0, 0], [0, 1, 0], [0, 0, 1]];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RewriteError {
    #[error("The alphabet has {alphabet} symbols but {weights} weights were given")]
    LengthMismatch { alphabet: usize, weights: usize },
}

/// Reports a rewrite step that changes the value of an invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invariant {invariant} is not preserved by {from} -> {to}: {from_value} != {to_value}")]
pub struct InvariantViolation {
    pub invariant: String,
    pub from: String,
    pub to: String,
    pub from_value: i64,
    pub to_value: i64,
}

/// The functions on words that are checked for invariance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantKind {
    /// The sum of the number of occurrences of every character times its weight.
    LinearCombination { weights: Vec<(char, i64)> },

    /// The number of occurrences of the symbol modulo two.
    CountParity { symbol: char },

    /// The trace of the product of the matrices assigned to the characters of
    /// the word, characters without a matrix are skipped.
    MatrixTrace { matrices: Vec<(char, Matrix3)> },
}

/// A named function on words that should have the same value on both sides
/// of every rewrite rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invariant {
    name: String,
    kind: InvariantKind,
}

impl Invariant {
    pub fn new(name: &str, kind: InvariantKind) -> Invariant {
        Invariant {
            name: name.to_string(),
            kind,
        }
    }

    /// Creates a linear combination where the i-th character of the alphabet
    /// has the i-th weight.
    pub fn linear(name: &str, alphabet: &[char], weights: &[i64]) -> Result<Invariant, RewriteError> {
        if alphabet.len() != weights.len() {
            return Err(RewriteError::LengthMismatch {
                alphabet: alphabet.len(),
                weights: weights.len(),
            });
        }

        Ok(Invariant::new(
            name,
            InvariantKind::LinearCombination {
                weights: alphabet.iter().copied().zip(weights.iter().copied()).collect(),
            },
        ))
    }

    pub fn parity(name: &str, symbol: char) -> Invariant {
        Invariant::new(name, InvariantKind::CountParity { symbol })
    }

    /// The matrix trace invariant for the alphabet `abcdpq`, where `a` and `c`
    /// are zero, `b` and `q` are the identity and `d` and `p` swap the first
    /// two and the last two coordinates respectively.
    pub fn matrix_trace(name: &str) -> Invariant {
        let zero = [[0; 3]; 3];
        let swap_first = [[0, 1, 0], [1, 0, 0], [0, 0, 1]];
        let swap_last = [[1, 0, 0], [0, 0, 1], [0, 1, 0]];

        Invariant::new(
            name,
            InvariantKind::MatrixTrace {
                matrices: vec![
                    ('a', zero),
                    ('c', zero),
                    ('b', IDENTITY),
                    ('q', IDENTITY),
                    ('d', swap_first),
                    ('p', swap_last),
                ],
            },
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &InvariantKind {
        &self.kind
    }

    /// Returns the value of the invariant for the given word.
    pub fn evaluate(&self, word: &str) -> i64 {
        match &self.kind {
            InvariantKind::LinearCombination { weights } => weights
                .iter()
                .map(|(symbol, weight)| count(word, *symbol) * weight)
                .sum(),
            InvariantKind::CountParity { symbol } => count(word, *symbol) % 2,
            InvariantKind::MatrixTrace { matrices } => {
                let product = word
                    .chars()
                    .filter_map(|c| matrices.iter().find(|(symbol, _)| *symbol == c))
                    .fold(IDENTITY, |result, (_, matrix)| multiply(&result, matrix));

                (0..3).map(|i| product[i][i]).sum()
            }
        }
    }

    /// Checks that the invariant has the same value for `from` and `to`.
    fn check_step(&self, from: &str, to: &str) -> Result<(), InvariantViolation> {
        let from_value = self.evaluate(from);
        let to_value = self.evaluate(to);

        if from_value != to_value {
            return Err(InvariantViolation {
                invariant: self.name.clone(),
                from: from.to_string(),
                to: to.to_string(),
                from_value,
                to_value,
            });
        }

        Ok(())
    }

    /// Checks that every rule of the system preserves the invariant.
    pub fn check_rules(&self, system: &RewritingSystem) -> Result<(), InvariantViolation> {
        for rule in system.rules() {
            self.check_step(&rule.lhs, &rule.rhs)?;
        }

        debug!("Invariant {} holds for all {} rules", self.name, system.rules().len());
        Ok(())
    }

    /// Checks that consecutive words of the rewrite path have the same value.
    pub fn check_path(&self, path: &[String]) -> Result<(), InvariantViolation> {
        for step in path.windows(2) {
            self.check_step(&step[0], &step[1])?;
        }

        Ok(())
    }
}

impl fmt::Display for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            InvariantKind::LinearCombination { weights } => {
                write!(f, "{} = ", self.name)?;
                let terms: Vec<String> = weights.iter().map(|(symbol, weight)| format!("{weight}*#{symbol}")).collect();
                write!(f, "{}", terms.join(" + "))
            }
            InvariantKind::CountParity { symbol } => write!(f, "{} = #{symbol} mod 2", self.name),
            InvariantKind::MatrixTrace { .. } => write!(f, "{} = trace of the matrix product", self.name),
        }
    }
}

/// Checks all invariants on all rules, stopping at the first violation.
pub fn check_all_rules(invariants: &[Invariant], system: &RewritingSystem) -> Result<(), InvariantViolation> {
    invariants.iter().try_for_each(|invariant| invariant.check_rules(system))
}

/// Checks all invariants on the path, stopping at the first violation.
pub fn check_all_paths(invariants: &[Invariant], path: &[String]) -> Result<(), InvariantViolation> {
    invariants.iter().try_for_each(|invariant| invariant.check_path(path))
}

fn count(word: &str, symbol: char) -> i64 {
    word.chars().filter(|c| *c == symbol).count() as i64
}

fn multiply(left: &Matrix3, right: &Matrix3) -> Matrix3 {
    let mut result = [[0; 3]; 3];
    for (i, row) in result.iter_mut().enumerate() {
        for (j, entry) in row.iter_mut().enumerate() {
            *entry = (0..3).map(|k| left[i][k] * right[k][j]).sum();
        }
    }

    result
}
