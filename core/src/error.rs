//! Error types for the UNU API client.
//!
//! # Design
//! Every failure is returned to the caller; nothing in this crate aborts the
//! host process. `Remote` is kept apart from `Transport` because callers
//! usually retry a dropped connection but not a refused operation such as
//! "not enough funds".

use thiserror::Error;

/// Errors returned by `UnuClient` calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed: connection refused, timeout, or the body
    /// could not be read.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be decoded into a `Response`.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The server answered with `success: false`.
    #[error("remote error: {message}")]
    Remote { message: String },

    /// The call was rejected before any I/O took place.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ApiError {
    /// The message reported by the server, if this is a remote failure.
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            ApiError::Remote { message } => Some(message),
            _ => None,
        }
    }
}

impl From<ureq::Error> for ApiError {
    fn from(err: ureq::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}
