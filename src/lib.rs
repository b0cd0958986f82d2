// src/lib.rs

//! An asynchronous client for the DICT protocol (RFC 2229).

pub mod config;
pub mod connection;
pub mod core;

// Re-export
pub use crate::config::ClientConfig;
pub use crate::connection::DictConnection;
pub use crate::core::{Database, Definition, DictError, ErrorKind, MatchingStrategy};
