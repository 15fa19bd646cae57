//! Status classification and backoff for API requests.
//!
//! Every response is sorted into success, a fatal [`ClientError`], or a
//! retryable failure. The request loop in [`crate::GeoClient`] owns the
//! retry budget; this module only decides which bucket a response falls in
//! and how long to wait.

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;

use crate::error::ClientError;

/// Upper bound (exclusive) of the random delay added to rate-limit retries.
const RATE_LIMIT_JITTER_MS: u32 = 500;

/// Why a single attempt failed.
#[derive(Debug)]
pub(crate) enum Failure {
    /// Give up now.
    Fatal(ClientError),
    /// Worth another attempt. `jitter` spreads out rate-limited callers.
    Retry { reason: String, jitter: bool },
}

/// Map a response status onto success or a [`Failure`].
pub(crate) fn check_status(endpoint: &'static str, status: StatusCode) -> Result<(), Failure> {
    match status.as_u16() {
        429 => Err(Failure::Retry {
            reason: "rate limited (HTTP 429)".into(),
            jitter: true,
        }),
        401 | 403 => Err(Failure::Fatal(ClientError::Auth {
            status: status.as_u16(),
        })),
        404 => Err(Failure::Fatal(ClientError::NotFound { endpoint })),
        code if status.is_server_error() => Err(Failure::Retry {
            reason: format!("server error (HTTP {code})"),
            jitter: false,
        }),
        code if !status.is_success() => Err(Failure::Fatal(ClientError::Api {
            endpoint,
            message: format!("unexpected status (HTTP {code})"),
        })),
        _ => Ok(()),
    }
}

/// Check the status, then read the body as JSON.
///
/// A body that cannot be read is retryable; a body that is not JSON is not.
pub(crate) async fn read_json(
    endpoint: &'static str,
    resp: reqwest::Response,
) -> Result<Value, Failure> {
    check_status(endpoint, resp.status())?;
    let body = resp.text().await.map_err(|e| Failure::Retry {
        reason: format!("failed to read response body: {e}"),
        jitter: false,
    })?;
    serde_json::from_str(&body).map_err(|e| {
        Failure::Fatal(ClientError::Api {
            endpoint,
            message: format!("invalid JSON response: {e}"),
        })
    })
}

/// Describe a transport error for the retry log and the final error.
pub(crate) fn transport_reason(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "request timed out".into()
    } else {
        format!("network error: {err}")
    }
}

/// Exponential backoff settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each further retry.
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_base: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// `base * 2^attempt + jitter`, saturating instead of overflowing.
    #[must_use]
    pub fn delay(&self, attempt: u32, jitter: Duration) -> Duration {
        self.backoff_base
            .saturating_mul(2_u32.saturating_pow(attempt))
            .saturating_add(jitter)
    }
}

/// Random jitter in `0..500ms`. Falls back to no jitter if the OS RNG fails.
pub(crate) fn rate_limit_jitter() -> Duration {
    let mut bytes = [0u8; 4];
    match getrandom::fill(&mut bytes) {
        Ok(()) => Duration::from_millis(u64::from(
            u32::from_le_bytes(bytes) % RATE_LIMIT_JITTER_MS,
        )),
        Err(e) => {
            tracing::debug!(%e, "no randomness for backoff jitter");
            Duration::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    const ENDPOINT: &str = "metricsV1Report";

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    fn fatal_kind(result: Result<(), Failure>) -> ErrorKind {
        match result {
            Err(Failure::Fatal(err)) => err.kind(),
            other => panic!("expected fatal failure, got {other:?}"),
        }
    }

    #[test]
    fn auth_statuses_are_fatal() {
        assert_eq!(fatal_kind(check_status(ENDPOINT, StatusCode::UNAUTHORIZED)), ErrorKind::Auth);
        assert_eq!(fatal_kind(check_status(ENDPOINT, StatusCode::FORBIDDEN)), ErrorKind::Auth);
    }

    #[test]
    fn not_found_is_fatal() {
        assert_eq!(fatal_kind(check_status(ENDPOINT, StatusCode::NOT_FOUND)), ErrorKind::NotFound);
    }

    #[test]
    fn other_client_errors_are_api_errors() {
        assert_eq!(fatal_kind(check_status(ENDPOINT, StatusCode::BAD_REQUEST)), ErrorKind::Api);
    }

    #[test]
    fn rate_limit_retries_with_jitter() {
        assert!(matches!(
            check_status(ENDPOINT, StatusCode::TOO_MANY_REQUESTS),
            Err(Failure::Retry { jitter: true, .. })
        ));
    }

    #[test]
    fn server_errors_retry_without_jitter() {
        let Err(Failure::Retry { reason, jitter }) =
            check_status(ENDPOINT, StatusCode::BAD_GATEWAY)
        else {
            panic!("502 should be retryable");
        };
        assert!(!jitter);
        assert_eq!(reason, "server error (HTTP 502)");
    }

    #[test]
    fn success_passes() {
        assert!(check_status(ENDPOINT, StatusCode::OK).is_ok());
    }

    #[tokio::test]
    async fn reads_json_body() {
        let value = read_json(ENDPOINT, mock_response(200, r#"{"score": 35}"#))
            .await
            .unwrap();
        assert_eq!(value["score"], 35);
    }

    #[tokio::test]
    async fn invalid_json_is_fatal_api_error() {
        let result = read_json(ENDPOINT, mock_response(200, "<html>oops</html>")).await;
        let Err(Failure::Fatal(err)) = result else {
            panic!("invalid JSON should not be retried");
        };
        assert_eq!(err.kind(), ErrorKind::Api);
        assert!(err.to_string().contains("invalid JSON response"));
    }

    #[tokio::test]
    async fn status_is_checked_before_body() {
        let result = read_json(ENDPOINT, mock_response(404, "{}")).await;
        assert!(matches!(
            result,
            Err(Failure::Fatal(ClientError::NotFound { endpoint: ENDPOINT }))
        ));
    }

    #[test]
    fn backoff_doubles_per_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay(0, Duration::ZERO), Duration::from_millis(1000));
        assert_eq!(policy.delay(1, Duration::ZERO), Duration::from_millis(2000));
        assert_eq!(
            policy.delay(2, Duration::from_millis(250)),
            Duration::from_millis(4250)
        );
    }

    #[test]
    fn backoff_saturates() {
        let policy = RetryPolicy {
            max_retries: 100,
            backoff_base: Duration::from_secs(1),
        };
        assert!(policy.delay(64, Duration::ZERO) >= Duration::from_secs(1 << 31));
    }

    #[test]
    fn jitter_stays_below_bound() {
        for _ in 0..50 {
            assert!(rate_limit_jitter() < Duration::from_millis(500));
        }
    }
}
