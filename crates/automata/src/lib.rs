//!
//! A crate containing (alternating) finite automata and the evaluation of
//! their acceptance relation, together with reference simulations that can be
//! used to cross-check the evaluator.
//!
//! This crate does not use unsafe code.

#![forbid(unsafe_code)]

mod acceptance;
mod automaton;
mod builder;
mod random_automaton;
mod simulation;
mod symbol;

pub mod fixtures;

pub use acceptance::*;
pub use automaton::*;
pub use builder::*;
pub use random_automaton::*;
pub use simulation::*;
pub use symbol::*;
