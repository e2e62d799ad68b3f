//! Error types for the Dashactyl client library.
//!
//! Every fallible operation in the entity layer returns [`DashactylError`].
//! Transport-level problems are kept separate in [`TransportError`] so that
//! alternative transports can report them without knowing about the cache.

use std::time::Duration;
use thiserror::Error;

/// Error emitted by a [`crate::transport::Transport`] implementation
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP client failed before a response was received
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with a 5xx status
    #[error("server error ({status}) from {url}")]
    Server { status: u16, url: String },
    /// The call did not complete within the configured timeout
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    /// The response body could not be read as JSON
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Error emitted by the entity cache and resolution layer
#[derive(Debug, Error)]
pub enum DashactylError {
    /// A payload was missing a required field or had a wrong-shaped one
    #[error("malformed {entity} payload: {reason}")]
    MalformedPayload { entity: &'static str, reason: String },

    /// A caller-supplied argument was out of range
    #[error("validation error: {0}")]
    Validation(String),

    /// The remote call completed but reported a non-success status
    #[error("API rejected request to {path}: {}", .message.as_deref().unwrap_or("no message"))]
    ApiRejected {
        path: String,
        message: Option<String>,
    },

    /// The remote call could not be completed
    #[error("transport failure: {0}")]
    TransportFailure(#[from] TransportError),

    /// The meta user has already been upgraded to a full user
    #[error("meta user '{username}' has already been resolved")]
    AlreadyResolved { username: String },

    /// The operation does not apply to this kind of entity
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// A cache lookup that the operation depends on came back empty
    #[error("{kind} '{key}' not found in cache")]
    NotFound { kind: &'static str, key: String },
}

impl DashactylError {
    pub(crate) fn malformed(entity: &'static str, reason: impl Into<String>) -> Self {
        DashactylError::MalformedPayload {
            entity,
            reason: reason.into(),
        }
    }

    /// Whether the error happened before any request was sent
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            DashactylError::Validation(_)
                | DashactylError::AlreadyResolved { .. }
                | DashactylError::InvalidOperation(_)
                | DashactylError::NotFound { .. }
        )
    }
}
