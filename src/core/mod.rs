// src/core/mod.rs

//! The protocol core: errors, value types and the DICT reply grammar.

pub mod errors;
pub mod models;
pub mod protocol;

pub use errors::{DictError, ErrorKind};
pub use models::{Database, Definition, MatchingStrategy};
