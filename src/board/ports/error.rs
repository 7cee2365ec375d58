//! Error type shared by the REST API ports.

use std::sync::Arc;
use thiserror::Error;

/// Result type for API port operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by API port implementations.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The server answered with a non-success HTTP status.
    #[error("server responded with status {code}: {message}")]
    Status {
        /// HTTP status code.
        code: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The server answered with an envelope whose `success` flag is false.
    #[error("request rejected: {message}")]
    Rejected {
        /// Error message carried by the envelope.
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// The addressed resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

impl ApiError {
    /// Wraps a transport-level error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Creates a decode error from any displayable cause.
    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }
}
