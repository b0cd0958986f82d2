// src/core/protocol/command.rs

//! The client-side commands and their wire representation.

use std::fmt;

/// A single request line sent to a DICT server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictCommand {
    /// `SHOW DB`
    ShowDb,
    /// `SHOW STRAT`
    ShowStrat,
    /// `MATCH <database> <strategy> "<word>"`
    Match {
        database: String,
        strategy: String,
        word: String,
    },
    /// `DEFINE <database> "<word>"`
    Define { database: String, word: String },
    /// `QUIT`
    Quit,
}

impl fmt::Display for DictCommand {
    /// Renders the command line without its terminator. The word is quoted
    /// verbatim; embedded quotes are not escaped.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictCommand::ShowDb => f.write_str("SHOW DB"),
            DictCommand::ShowStrat => f.write_str("SHOW STRAT"),
            DictCommand::Match {
                database,
                strategy,
                word,
            } => write!(f, "MATCH {database} {strategy} \"{word}\""),
            DictCommand::Define { database, word } => write!(f, "DEFINE {database} \"{word}\""),
            DictCommand::Quit => f.write_str("QUIT"),
        }
    }
}
