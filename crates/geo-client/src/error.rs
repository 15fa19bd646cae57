//! Client error types.

use thiserror::Error;

/// Errors returned by [`crate::GeoClient`].
///
/// Transient failures (rate limits, 5xx, network errors, timeouts) are
/// retried inside the client and only surface as [`ClientError::Api`] once
/// the retry budget is spent.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The API rejected the key (HTTP 401 or 403).
    #[error("authentication failed (HTTP {status}); check your RANKSCALE_API_KEY")]
    Auth {
        /// HTTP status code returned by the API.
        status: u16,
    },

    /// The brand or endpoint does not exist (HTTP 404).
    #[error("{endpoint}: brand ID not found (HTTP 404)")]
    NotFound {
        /// Endpoint that returned 404.
        endpoint: &'static str,
    },

    /// Any other failure: exhausted retries, unexpected status, invalid JSON.
    #[error("{endpoint}: {message}")]
    Api {
        /// Endpoint that failed.
        endpoint: &'static str,
        /// What went wrong.
        message: String,
    },
}

/// Coarse classification callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Auth,
    NotFound,
    Api,
}

impl ClientError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Auth { .. } => ErrorKind::Auth,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Api { .. } => ErrorKind::Api,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_match_variants() {
        assert_eq!(ClientError::Auth { status: 401 }.kind(), ErrorKind::Auth);
        assert_eq!(
            ClientError::NotFound { endpoint: "metricsV1Report" }.kind(),
            ErrorKind::NotFound
        );
        let api = ClientError::Api {
            endpoint: "metricsV1Report",
            message: "timeout".into(),
        };
        assert_eq!(api.kind(), ErrorKind::Api);
        assert_eq!(api.to_string(), "metricsV1Report: timeout");
    }
}
