//! Response definitions
//!
//! Represents operation results handed back to the dispatcher.

use crate::error::{LedgerError, Result};

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    NotFound,
    Error,
}

/// A response to hand back to the dispatcher
#[derive(Debug, Clone)]
pub struct Response {
    /// Status code
    pub status: Status,

    /// Optional payload (query result, or error message for ERROR)
    pub payload: Option<Vec<u8>>,
}

impl Response {
    /// Create an OK response with optional payload
    pub fn ok(payload: Option<Vec<u8>>) -> Self {
        Self {
            status: Status::Ok,
            payload,
        }
    }

    /// Create a NOT_FOUND response
    pub fn not_found(message: &str) -> Self {
        Self {
            status: Status::NotFound,
            payload: Some(message.as_bytes().to_vec()),
        }
    }

    /// Create an ERROR response
    pub fn error(message: &str) -> Self {
        Self {
            status: Status::Error,
            payload: Some(message.as_bytes().to_vec()),
        }
    }

    /// Map an operation result onto the status codes.
    ///
    /// `NotFound` gets its own status so callers can distinguish a missing
    /// entity from a real failure; everything else surfaces unmodified.
    pub fn from_result(result: Result<Option<Vec<u8>>>) -> Self {
        match result {
            Ok(payload) => Self::ok(payload),
            Err(LedgerError::NotFound(msg)) => Self::not_found(&msg),
            Err(err) => Self::error(&err.to_string()),
        }
    }
}
