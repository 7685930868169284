//!
//! This crate defines general utility functions shared by the fuzzing tools.
//!
//! This crate does not use unsafe code.

#![forbid(unsafe_code)]

pub mod random_word;

pub use random_word::*;
