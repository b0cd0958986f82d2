// src/connection/session.rs

//! Defines the state owned by a single DICT session and the line-level
//! primitives every exchange is built from.

use super::block::{BlockReader, SENTINEL};
use crate::core::protocol::{DictCommand, DictLineCodec, Status, codes};
use crate::core::{Database, DictError};
use futures::{SinkExt, StreamExt};
use indexmap::IndexMap;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::Framed;
use tracing::debug;

/// Reported when a multi-line reply is not followed by `250 ok`.
pub(crate) const LOST_AT_END: &str = "lost connection at end of database retrieval";

/// Holds everything a session owns: the transport and the database cache.
/// Access is serialized by the mutex in `DictConnection`.
pub(crate) struct SessionState<S> {
    /// The framed transport. `None` once the session has been closed.
    framed: Option<Framed<S, DictLineCodec>>,
    /// Databases from the first non-empty `SHOW DB`, in server order.
    pub(crate) databases: IndexMap<String, Database>,
    /// Optional deadline applied to every line read.
    read_timeout: Option<Duration>,
    /// Set after the transport yielded an error. `Framed` reports the next
    /// poll as end-of-stream once before it resumes reading.
    resume_after_error: bool,
}

impl<S> SessionState<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub(crate) fn new(stream: S, read_timeout: Option<Duration>) -> Self {
        Self {
            framed: Some(Framed::new(stream, DictLineCodec)),
            databases: IndexMap::new(),
            read_timeout,
            resume_after_error: false,
        }
    }

    pub(crate) fn is_open(&self) -> bool {
        self.framed.is_some()
    }

    pub(crate) fn ensure_open(&self) -> Result<(), DictError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(DictError::NotConnected)
        }
    }

    fn transport(&mut self) -> Result<&mut Framed<S, DictLineCodec>, DictError> {
        self.framed.as_mut().ok_or(DictError::NotConnected)
    }

    /// Writes one command line and flushes it.
    pub(crate) async fn send(&mut self, command: DictCommand) -> Result<(), DictError> {
        debug!("Sending command: {command}");
        self.transport()?.send(command).await
    }

    /// Reads the next line, without its terminator.
    pub(crate) async fn read_line(&mut self) -> Result<String, DictError> {
        loop {
            let read_timeout = self.read_timeout;
            let framed = self.transport()?;
            let next = match read_timeout {
                Some(limit) => tokio::time::timeout(limit, framed.next())
                    .await
                    .map_err(|_| DictError::Timeout)?,
                None => framed.next().await,
            };

            match next {
                Some(Ok(line)) => {
                    self.resume_after_error = false;
                    return Ok(line);
                }
                Some(Err(e)) => {
                    self.resume_after_error = true;
                    return Err(e);
                }
                None if self.resume_after_error => {
                    self.resume_after_error = false;
                }
                None => return Err(DictError::ConnectionClosed),
            }
        }
    }

    /// Reads and parses one status line.
    pub(crate) async fn read_status(&mut self) -> Result<Status, DictError> {
        let line = self.read_line().await?;
        let status = Status::parse(&line)?;
        debug!("Received status {} {}", status.code, status.details);
        Ok(status)
    }

    /// Consumes the `.` line that closes a counted list.
    pub(crate) async fn expect_sentinel(&mut self) -> Result<(), DictError> {
        let line = self.read_line().await?;
        if line == SENTINEL {
            Ok(())
        } else {
            Err(DictError::Protocol(format!(
                "unexpected message: expected end of list, got '{line}'"
            )))
        }
    }

    /// Consumes the `250 ok` trailer of a multi-line reply.
    pub(crate) async fn expect_ok(&mut self) -> Result<(), DictError> {
        let status = self.read_status().await?;
        if status.code == codes::OK {
            Ok(())
        } else {
            Err(DictError::Protocol(format!(
                "{LOST_AT_END} (got {} {})",
                status.code, status.details
            )))
        }
    }

    /// Returns a reader over the lines of a `.`-terminated block.
    pub(crate) fn block(&mut self) -> BlockReader<'_, S> {
        BlockReader::new(self)
    }

    /// Sends `QUIT`, reads the reply and releases the transport. Every
    /// failure is logged and swallowed; the transport is always dropped.
    pub(crate) async fn shutdown(&mut self) {
        if !self.is_open() {
            return;
        }

        match self.send(DictCommand::Quit).await {
            Ok(()) => match self.read_status().await {
                Ok(status) if status.code == codes::CLOSING => {}
                Ok(status) => debug!(
                    "Server answered QUIT with {} {}",
                    status.code, status.details
                ),
                Err(e) => debug!("Failed to read QUIT reply: {e}"),
            },
            Err(e) => debug!("Failed to send QUIT: {e}"),
        }

        if let Some(mut framed) = self.framed.take()
            && let Err(e) = framed.get_mut().shutdown().await
        {
            debug!("Failed to shut down transport: {e}");
        }
    }
}
