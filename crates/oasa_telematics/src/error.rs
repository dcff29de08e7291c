//! Telematics error types

use thiserror::Error;

/// Errors that can occur while calling the telematics service
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP request could not be completed (connection, DNS, timeout)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not valid JSON
    #[error("bad JSON in response: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    /// The service answered with a status outside the 2xx range
    #[error("HTTP {status}: {reason}")]
    ApiStatus {
        /// HTTP status code of the rejected response
        status: u16,
        /// Reason phrase of the status line
        reason: String,
    },

    /// The JSON payload had a shape the normalizer cannot interpret
    #[error("unexpected payload shape: expected {expected}, got {got}")]
    UnexpectedShape {
        /// What the normalizer was prepared to handle
        expected: &'static str,
        /// JSON type actually found
        got: &'static str,
    },
}

impl Error {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
