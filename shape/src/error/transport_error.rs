//! Transport collaborator errors.

use thiserror::Error;

/// Errors raised by a [`Transport`](crate::transport::Transport).
///
/// These represent failures to obtain any HTTP response at all. A reply with
/// a non-2xx status is not a transport error; it becomes a
/// [`ServiceError`](super::ServiceError) in the response binder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Failed to establish a connection to the service.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Request exceeded the configured timeout.
    #[error("Request timeout after {duration_ms}ms")]
    Timeout {
        /// The timeout duration in milliseconds.
        duration_ms: u64,
    },

    /// The request could not be built or sent, or the exchange broke off.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The caller cancelled the request through its retry-policy handle.
    #[error("Request cancelled")]
    Cancelled,
}

impl TransportError {
    /// Returns `true` if this error is retryable.
    ///
    /// Timeout and connection errors are retryable; cancellation never is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Connection(_))
    }

    /// Maps a reqwest failure onto the transport taxonomy.
    pub(crate) fn from_reqwest(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                duration_ms: timeout_ms,
            }
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}
