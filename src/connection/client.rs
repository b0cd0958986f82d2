// src/connection/client.rs

//! Defines `DictConnection`, the public handle to a DICT session.

use super::session::SessionState;
use crate::config::ClientConfig;
use crate::core::protocol::codes;
use crate::core::{Database, Definition, DictError, MatchingStrategy};
use indexmap::IndexSet;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// A connected DICT session.
///
/// The protocol is strictly request/reply over one transport, so every
/// operation takes the session lock for its whole exchange. Concurrent
/// callers sharing a connection (for example through an `Arc`) are queued,
/// never interleaved.
pub struct DictConnection<S> {
    state: Mutex<SessionState<S>>,
}

impl DictConnection<TcpStream> {
    /// Opens a TCP connection to the configured server and performs the
    /// greeting handshake.
    pub async fn connect(config: &ClientConfig) -> Result<Self, DictError> {
        let addr = format!("{}:{}", config.host, config.port);
        info!("Connecting to DICT server at {}", addr);

        let stream = tokio::time::timeout(config.connect_timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| DictError::Connection(format!("timed out connecting to {addr}")))?
            .map_err(|e| DictError::Connection(format!("failed to connect to {addr}: {e}")))?;

        Self::handshake(stream, config.read_timeout).await
    }

    /// Connects to `host:port` with default timeouts.
    pub async fn connect_to(host: &str, port: u16) -> Result<Self, DictError> {
        let config = ClientConfig {
            host: host.to_string(),
            port,
            ..ClientConfig::default()
        };
        Self::connect(&config).await
    }
}

impl<S> DictConnection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Performs the greeting handshake over an already-open transport.
    pub async fn from_stream(stream: S) -> Result<Self, DictError> {
        Self::handshake(stream, None).await
    }

    /// Performs the greeting handshake. The server must greet with `220`;
    /// on any other outcome the transport is dropped and no session exists.
    pub async fn handshake(stream: S, read_timeout: Option<Duration>) -> Result<Self, DictError> {
        let mut state = SessionState::new(stream, read_timeout);

        let greeting = state
            .read_status()
            .await
            .map_err(|e| DictError::Connection(format!("failed to read server greeting: {e}")))?;
        if greeting.code != codes::BANNER {
            return Err(DictError::Connection(format!(
                "server refused connection: {} {}",
                greeting.code, greeting.details
            )));
        }

        info!("Connected to DICT server: {}", greeting.details);
        Ok(Self {
            state: Mutex::new(state),
        })
    }

    /// Returns `false` once the session has been closed.
    pub async fn is_connected(&self) -> bool {
        self.state.lock().await.is_open()
    }

    /// Lists the server's databases in server order. The first non-empty
    /// result is cached for the life of the session.
    pub async fn database_list(&self) -> Result<Vec<Database>, DictError> {
        self.state.lock().await.show_databases().await
    }

    /// Lists the server's matching strategies. Always asks the server.
    pub async fn strategy_list(&self) -> Result<IndexSet<MatchingStrategy>, DictError> {
        self.state.lock().await.show_strategies().await
    }

    /// Looks up headwords matching `word` under `strategy` in `database`.
    ///
    /// If any argument is `None` the result is empty and nothing is sent.
    pub async fn match_list(
        &self,
        word: Option<&str>,
        strategy: Option<&MatchingStrategy>,
        database: Option<&Database>,
    ) -> Result<IndexSet<String>, DictError> {
        let (Some(word), Some(strategy), Some(database)) = (word, strategy, database) else {
            debug!("MATCH skipped: missing word, strategy or database");
            return Ok(IndexSet::new());
        };
        self.state
            .lock()
            .await
            .match_words(word, strategy, database)
            .await
    }

    /// Retrieves every definition of `word` in `database`, in server order.
    ///
    /// If either argument is `None` the result is empty and nothing is sent.
    pub async fn definitions(
        &self,
        word: Option<&str>,
        database: Option<&Database>,
    ) -> Result<Vec<Definition>, DictError> {
        let (Some(word), Some(database)) = (word, database) else {
            debug!("DEFINE skipped: missing word or database");
            return Ok(Vec::new());
        };
        self.state.lock().await.define(word, database).await
    }

    /// Sends `QUIT` and releases the transport. Never fails; calling it on
    /// a closed session does nothing.
    pub async fn close(&self) {
        let mut state = self.state.lock().await;
        if state.is_open() {
            state.shutdown().await;
            info!("DICT session closed");
        }
    }
}
