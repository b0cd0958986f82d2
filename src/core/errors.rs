// src/core/errors.rs

//! Defines the error type shared by the protocol engine and the session.

use std::sync::Arc;
use thiserror::Error;

/// The two failure categories a caller needs to tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The session could not be established, or it is no longer connected.
    Connection,
    /// The server's reply did not follow the expected grammar, or the
    /// transport failed in the middle of an exchange.
    Protocol,
}

/// The main error enum for every fallible operation on a DICT session.
#[derive(Error, Debug)]
pub enum DictError {
    #[error("IO Error: {0}")]
    Io(Arc<std::io::Error>),

    #[error("Connection Error: {0}")]
    Connection(String),

    #[error("Connection Error: session is not connected")]
    NotConnected,

    #[error("Connection closed by peer")]
    ConnectionClosed,

    #[error("Timed out waiting for a reply from the server")]
    Timeout,

    #[error("Line exceeds the maximum length of {0} bytes")]
    LineTooLong(usize),

    #[error("Protocol Error: {0}")]
    Protocol(String),

    /// The server answered with a status code the current exchange does not accept.
    #[error("Unexpected message: {code} {details}")]
    UnexpectedStatus { code: u16, details: String },
}

impl DictError {
    /// Classifies the error into its caller-facing category.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DictError::Connection(_) | DictError::NotConnected => ErrorKind::Connection,
            _ => ErrorKind::Protocol,
        }
    }

    /// True when the failure came from the transport rather than from the
    /// content of a reply.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            DictError::Io(_) | DictError::ConnectionClosed | DictError::Timeout
        )
    }
}

// `std::io::Error` is not cloneable, so the I/O variant shares it through an `Arc`.
impl Clone for DictError {
    fn clone(&self) -> Self {
        match self {
            DictError::Io(e) => DictError::Io(Arc::clone(e)),
            DictError::Connection(s) => DictError::Connection(s.clone()),
            DictError::NotConnected => DictError::NotConnected,
            DictError::ConnectionClosed => DictError::ConnectionClosed,
            DictError::Timeout => DictError::Timeout,
            DictError::LineTooLong(max) => DictError::LineTooLong(*max),
            DictError::Protocol(s) => DictError::Protocol(s.clone()),
            DictError::UnexpectedStatus { code, details } => DictError::UnexpectedStatus {
                code: *code,
                details: details.clone(),
            },
        }
    }
}

impl PartialEq for DictError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DictError::Io(e1), DictError::Io(e2)) => e1.to_string() == e2.to_string(),
            (DictError::Connection(s1), DictError::Connection(s2)) => s1 == s2,
            (DictError::LineTooLong(m1), DictError::LineTooLong(m2)) => m1 == m2,
            (DictError::Protocol(s1), DictError::Protocol(s2)) => s1 == s2,
            (
                DictError::UnexpectedStatus {
                    code: c1,
                    details: d1,
                },
                DictError::UnexpectedStatus {
                    code: c2,
                    details: d2,
                },
            ) => c1 == c2 && d1 == d2,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl From<std::io::Error> for DictError {
    fn from(e: std::io::Error) -> Self {
        DictError::Io(Arc::new(e))
    }
}
