// src/core/protocol/status.rs

//! Parses DICT status lines of the form `<code> <details>`.

use crate::core::DictError;

/// Status codes used by the exchanges this client performs (RFC 2229, section 3).
pub mod codes {
    /// `110 n databases present`
    pub const DATABASES_PRESENT: u16 = 110;
    /// `111 n strategies available`
    pub const STRATEGIES_AVAILABLE: u16 = 111;
    /// `150 n definitions retrieved`
    pub const DEFINITIONS_RETRIEVED: u16 = 150;
    /// `151 word database name`, the header of a single definition.
    pub const WORD_DEFINITION: u16 = 151;
    /// `152 n matches found`
    pub const MATCHES_FOUND: u16 = 152;
    /// `220` greeting banner sent on connect.
    pub const BANNER: u16 = 220;
    /// `221 Closing Connection`
    pub const CLOSING: u16 = 221;
    /// `250 ok`, the trailer of every multi-line reply.
    pub const OK: u16 = 250;
    /// `552 No match`
    pub const NO_MATCH: u16 = 552;
    /// `554 No databases present`
    pub const NO_DATABASES: u16 = 554;
    /// `555 No strategies available`
    pub const NO_STRATEGIES: u16 = 555;
}

/// A single parsed reply line: a three-digit code and the free text after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub code: u16,
    pub details: String,
}

impl Status {
    /// Parses a reply line. The code must be exactly three ASCII digits in
    /// the range 100-599, followed by a single space or the end of the line.
    pub fn parse(line: &str) -> Result<Self, DictError> {
        let (code_str, details) = line.split_once(' ').unwrap_or((line, ""));

        if code_str.len() != 3 || !code_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DictError::Protocol(format!(
                "status code number expected, got '{line}'"
            )));
        }
        let code: u16 = code_str.parse().map_err(|_| {
            DictError::Protocol(format!("status code number expected, got '{line}'"))
        })?;
        if !(100..=599).contains(&code) {
            return Err(DictError::Protocol(format!(
                "status code {code} is out of range"
            )));
        }

        Ok(Self {
            code,
            details: details.to_string(),
        })
    }

    /// Reads the leading count from replies such as `152 3 matches found`.
    pub fn leading_count(&self) -> Result<usize, DictError> {
        self.details
            .split_whitespace()
            .next()
            .and_then(|token| token.parse().ok())
            .ok_or_else(|| {
                DictError::Protocol(format!(
                    "expected a count after status {}, got '{}'",
                    self.code, self.details
                ))
            })
    }

    /// Converts a status the current exchange cannot handle into an error.
    pub fn into_unexpected(self) -> DictError {
        DictError::UnexpectedStatus {
            code: self.code,
            details: self.details,
        }
    }
}
