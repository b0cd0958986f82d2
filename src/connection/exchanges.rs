// src/connection/exchanges.rs

//! The request/reply exchanges of a DICT session: `SHOW DB`, `SHOW STRAT`,
//! `MATCH` and `DEFINE`.
//!
//! Each exchange branches on the status code of the first reply line. Empty
//! results are their own status codes (552, 554, 555) and are returned
//! without reading further.

use super::session::SessionState;
use crate::core::protocol::{DictCommand, codes, split_atoms};
use crate::core::{Database, Definition, DictError, MatchingStrategy};
use indexmap::{IndexMap, IndexSet};
use std::str::FromStr;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, warn};

/// Fields in a `151` header for a word without spaces:
/// `151 "word" database "description"`.
const HEADER_FIELDS: usize = 4;

/// Caps preallocation driven by server-supplied counts.
const MAX_PREALLOCATED: usize = 1024;

/// Separator inserted for each blank line of a definition body.
#[cfg(windows)]
const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
const LINE_SEPARATOR: &str = "\n";

impl<S> SessionState<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// `SHOW DB`. Served from the cache once a non-empty list has been fetched.
    pub(crate) async fn show_databases(&mut self) -> Result<Vec<Database>, DictError> {
        self.ensure_open()?;
        if !self.databases.is_empty() {
            debug!("Serving {} databases from cache", self.databases.len());
            return Ok(self.databases.values().cloned().collect());
        }

        self.send(DictCommand::ShowDb).await?;
        let status = self.read_status().await?;
        match status.code {
            codes::DATABASES_PRESENT => {
                let mut fetched = IndexMap::new();
                let mut block = self.block();
                while let Some(line) = block.next_line().await? {
                    let Some((name, description)) = line.split_once(' ') else {
                        return Err(DictError::Protocol(format!(
                            "malformed database entry '{line}'"
                        )));
                    };
                    fetched.insert(name.to_string(), Database::new(name, description));
                }
                self.expect_ok().await?;

                debug!("Cached {} databases", fetched.len());
                self.databases = fetched;
                Ok(self.databases.values().cloned().collect())
            }
            codes::NO_DATABASES => Ok(Vec::new()),
            _ => Err(status.into_unexpected()),
        }
    }

    /// `SHOW STRAT`. Never cached.
    ///
    /// A transport failure while reading the entries ends the list early
    /// instead of failing the exchange; the sentinel and trailer are still
    /// required afterwards.
    pub(crate) async fn show_strategies(
        &mut self,
    ) -> Result<IndexSet<MatchingStrategy>, DictError> {
        self.ensure_open()?;
        self.send(DictCommand::ShowStrat).await?;
        let status = self.read_status().await?;
        match status.code {
            codes::STRATEGIES_AVAILABLE => {
                let expected = status.leading_count()?;
                let mut strategies = IndexSet::with_capacity(expected.min(MAX_PREALLOCATED));
                for index in 0..expected {
                    let line = match self.read_line().await {
                        Ok(line) => line,
                        Err(e) if e.is_transport_failure() => {
                            warn!(
                                "Strategy list truncated after {index} of {expected} entries: {e}"
                            );
                            break;
                        }
                        Err(e) => return Err(e),
                    };
                    let atoms = split_atoms(&line);
                    let [name, description, ..] = atoms.as_slice() else {
                        return Err(DictError::Protocol(format!(
                            "malformed strategy entry '{line}'"
                        )));
                    };
                    strategies.insert(MatchingStrategy::new(*name, *description));
                }
                self.expect_sentinel().await?;
                self.expect_ok().await?;
                Ok(strategies)
            }
            codes::NO_STRATEGIES => Ok(IndexSet::new()),
            _ => Err(status.into_unexpected()),
        }
    }

    /// `MATCH <db> <strategy> "<word>"`. Returns the matched headwords in
    /// server order; the database reported for each match is dropped.
    pub(crate) async fn match_words(
        &mut self,
        word: &str,
        strategy: &MatchingStrategy,
        database: &Database,
    ) -> Result<IndexSet<String>, DictError> {
        self.ensure_open()?;
        self.send(DictCommand::Match {
            database: database.name().to_string(),
            strategy: strategy.name().to_string(),
            word: word.to_string(),
        })
        .await?;

        let status = self.read_status().await?;
        match status.code {
            codes::MATCHES_FOUND => {
                let expected = status.leading_count()?;
                let mut words = IndexSet::with_capacity(expected.min(MAX_PREALLOCATED));
                for _ in 0..expected {
                    let line = self.read_line().await?;
                    let Some(headword) = split_atoms(&line).get(1).map(|w| w.to_string()) else {
                        return Err(DictError::Protocol(format!(
                            "malformed match entry '{line}'"
                        )));
                    };
                    words.insert(headword);
                }
                self.expect_sentinel().await?;
                self.expect_ok().await?;
                Ok(words)
            }
            codes::NO_MATCH => Ok(IndexSet::new()),
            _ => Err(status.into_unexpected()),
        }
    }

    /// `DEFINE <db> "<word>"`. Every definition must come from a database
    /// that `SHOW DB` reported, so the cache is filled first.
    pub(crate) async fn define(
        &mut self,
        word: &str,
        database: &Database,
    ) -> Result<Vec<Definition>, DictError> {
        self.show_databases().await?;
        self.send(DictCommand::Define {
            database: database.name().to_string(),
            word: word.to_string(),
        })
        .await?;

        let line = self.read_line().await?;
        let mut fields = line.splitn(3, ' ');
        let code: u16 = parse_number(fields.next())?;
        debug!("Received status line {line}");

        match code {
            codes::DEFINITIONS_RETRIEVED => {
                let count: usize = parse_number(fields.next())?;
                // The word reappears inside each header, one extra field per space.
                let spaces = word.matches(' ').count();
                let mut definitions = Vec::with_capacity(count.min(MAX_PREALLOCATED));
                for _ in 0..count {
                    definitions.push(self.read_definition(word, spaces).await?);
                }
                self.expect_ok().await?;
                Ok(definitions)
            }
            codes::NO_MATCH => Ok(Vec::new()),
            _ => Err(DictError::UnexpectedStatus {
                code,
                details: fields.collect::<Vec<_>>().join(" "),
            }),
        }
    }

    /// Reads one `151` header and the body block that follows it.
    async fn read_definition(&mut self, word: &str, spaces: usize) -> Result<Definition, DictError> {
        let header = self.read_line().await?;
        let field_count = HEADER_FIELDS + spaces;
        let fields: Vec<&str> = header.splitn(field_count, ' ').collect();
        if fields.len() < field_count {
            return Err(DictError::Protocol(format!(
                "invalid status line in retrieved definition: '{header}'"
            )));
        }

        let code: u16 = parse_number(fields.first().copied())?;
        if code != codes::WORD_DEFINITION {
            return Err(DictError::Protocol(format!(
                "could not get definition of {word}"
            )));
        }
        let database_name = fields[2 + spaces].to_string();

        let mut body = String::new();
        let mut block = self.block();
        while let Some(line) = block.next_line().await? {
            if line.is_empty() {
                body.push_str(LINE_SEPARATOR);
            } else {
                body.push_str(&line);
            }
        }

        let Some(database) = self.databases.get(&database_name).cloned() else {
            return Err(DictError::Protocol(format!(
                "could not get definition of {word}: unknown database '{database_name}'"
            )));
        };
        Ok(Definition::new(word, database, body))
    }
}

/// Parses a numeric field of a status line.
fn parse_number<T: FromStr>(field: Option<&str>) -> Result<T, DictError> {
    field
        .and_then(|f| f.parse().ok())
        .ok_or_else(|| DictError::Protocol("status code number expected".to_string()))
}
