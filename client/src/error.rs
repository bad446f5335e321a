//! Error types for the entries API client.
//!
//! `NotFound` gets its own variant because callers routinely branch on it, and
//! it still carries the server message.
//! Every other non-2xx response lands in `HttpError`, carrying the server's
//! message so it can be shown to the user as-is.

use thiserror::Error;

/// Errors returned by `EntryClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    #[error("deserialization failed: {0}")]
    DeserializationError(#[source] serde_json::Error),

    #[error("serialization failed: {0}")]
    SerializationError(#[source] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
