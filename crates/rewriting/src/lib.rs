//!
//! A crate containing string rewriting (semi-Thue) systems: the words that are
//! reachable by applying rules, shortest rewrite paths between words and
//! invariants that are preserved by the rules.
//!
//! This crate does not use unsafe code.

#![forbid(unsafe_code)]

mod invariant;
mod rewriting_system;

pub mod fixtures;

pub use invariant::*;
pub use rewriting_system::*;
