// src/core/models.rs

//! Value types returned by the exchanges.

use std::fmt;

/// The database name that selects every database on the server.
pub const ALL_DATABASES: &str = "*";
/// The database name that stops at the first database with a result.
pub const FIRST_MATCH: &str = "!";

/// A dictionary database advertised by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Database {
    name: String,
    description: String,
}

impl Database {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// The `*` selector: search every database.
    pub fn all() -> Self {
        Self::new(ALL_DATABASES, "All databases")
    }

    /// The `!` selector: search databases in order and stop at the first hit.
    pub fn first_match() -> Self {
        Self::new(FIRST_MATCH, "First matching database")
    }

    /// The protocol identifier used in commands.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.description)
    }
}

/// A matching strategy supported by the server, e.g. `prefix` or `soundex`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchingStrategy {
    name: String,
    description: String,
}

impl MatchingStrategy {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for MatchingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} \"{}\"", self.name, self.description)
    }
}

/// One definition of a word, as returned by a single database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    word: String,
    database: Database,
    body: String,
}

impl Definition {
    pub fn new(word: impl Into<String>, database: Database, body: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            database,
            body: body.into(),
        }
    }

    /// The word that was looked up.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// The database this definition came from.
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// The definition text. Blank lines in the server's text are kept as
    /// line separators; other lines are concatenated directly.
    pub fn body(&self) -> &str {
        &self.body
    }
}
