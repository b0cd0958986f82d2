// src/connection/block.rs

//! A reader for the `.`-terminated blocks that carry database lists and
//! definition bodies.

use super::session::SessionState;
use crate::core::DictError;
use tokio::io::{AsyncRead, AsyncWrite};

/// The line that terminates a block.
pub(crate) const SENTINEL: &str = ".";

/// Yields the lines of one block on demand and stops exactly at the
/// sentinel, which is consumed but never returned.
pub(crate) struct BlockReader<'a, S> {
    session: &'a mut SessionState<S>,
    finished: bool,
}

impl<'a, S> BlockReader<'a, S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub(crate) fn new(session: &'a mut SessionState<S>) -> Self {
        Self {
            session,
            finished: false,
        }
    }

    /// Returns the next line of the block, or `None` once the sentinel has
    /// been read. Reads past the end of the block are never attempted.
    pub(crate) async fn next_line(&mut self) -> Result<Option<String>, DictError> {
        if self.finished {
            return Ok(None);
        }
        let line = self.session.read_line().await?;
        if line == SENTINEL {
            self.finished = true;
            return Ok(None);
        }
        Ok(Some(line))
    }
}
