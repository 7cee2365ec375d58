//! Uniform `{success, data?, error?}` result envelope.
//!
//! The REST API may wrap bodies in this envelope, and board operations hand
//! the same shape to the rendering layer so failures never escape as
//! panics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Success flag plus either a payload or an error message.
///
/// # Examples
///
/// ```
/// use sprintboard::board::domain::ApiEnvelope;
///
/// let failed: ApiEnvelope<u32> = ApiEnvelope::from_result(Err::<u32, _>("offline"));
/// assert!(!failed.success);
/// assert_eq!(failed.error.as_deref(), Some("offline"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Payload of a successful operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Message of a failed operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Wraps a successful payload.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Wraps a failure message.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Converts an operation result, rendering the error with `Display`.
    #[must_use]
    pub fn from_result<E: fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => Self::failure(err.to_string()),
        }
    }
}
