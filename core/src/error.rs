//! Error types for the user API client.
//!
//! # Design
//! Three kinds come back from the data access layer: the request never got a
//! response (`Transport`), the server answered with a non-2xx status
//! (`HttpStatus`), or the body did not decode (`Deserialization`). A 404 is
//! an `HttpStatus` like any other; there is no separate "not found" kind.

use thiserror::Error;

/// Errors returned by `UserClient`, transports and `UserService`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request did not complete: connection refused, reset, timed out.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned a status outside 2xx.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// The HTTP status code, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
