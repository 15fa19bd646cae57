//! # geo-client
//!
//! HTTP client for the Rankscale metrics API.
//!
//! Every endpoint is a cloud function under one base URL, authenticated with
//! a bearer API key. Report endpoints take `{"brandId": ...}` as a POST body.
//! Responses are returned as untyped [`serde_json::Value`]s; shaping them is
//! the job of `geo-core`'s normalizers.
//!
//! Transient failures are retried with exponential backoff (see
//! [`RetryPolicy`]). Only authentication, not-found and exhausted or
//! unrecoverable failures reach the caller, as a [`ClientError`].

mod error;
mod http;

use std::time::Duration;

use serde_json::{json, Value};

pub use error::{ClientError, ErrorKind};
pub use http::RetryPolicy;

use crate::http::{read_json, rate_limit_jitter, transport_reason, Failure};

/// Production API base URL.
pub const DEFAULT_BASE_URL: &str = "https://us-central1-rankscale-2e08e.cloudfunctions.net";

const USER_AGENT: &str = concat!("geoscope/", env!("CARGO_PKG_VERSION"));

// ── Endpoints ──────────────────────────────────────────────────────

/// The metrics API functions this client calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Brands,
    Report,
    Citations,
    Sentiment,
    SearchTermsReport,
    SearchTerms,
}

impl Endpoint {
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Brands => "metricsV1Brands",
            Self::Report => "metricsV1Report",
            Self::Citations => "metricsV1Citations",
            Self::Sentiment => "metricsV1Sentiment",
            Self::SearchTermsReport => "metricsV1SearchTermsReport",
            Self::SearchTerms => "metricsV1SearchTerms",
        }
    }

    /// Brand-scoped endpoints are POSTed a `brandId`; the brand list is a GET.
    #[must_use]
    pub const fn is_brand_scoped(self) -> bool {
        !matches!(self, Self::Brands)
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// Connection settings for [`GeoClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(15),
            retry: RetryPolicy::default(),
        }
    }
}

/// Results of the four report fetches, each independent of the others.
#[derive(Debug)]
pub struct FetchBatch {
    pub report: Result<Value, ClientError>,
    pub citations: Result<Value, ClientError>,
    pub sentiment: Result<Value, ClientError>,
    pub search_terms: Result<Value, ClientError>,
}

/// Authenticated client for the metrics API.
pub struct GeoClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    retry: RetryPolicy,
}

impl GeoClient {
    /// Create a client for `api_key`.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(api_key: impl Into<String>, settings: ClientSettings) -> Self {
        Self {
            http: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .timeout(settings.timeout)
                .build()
                .expect("reqwest client should build"),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            retry: settings.retry,
        }
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }

    /// Call `endpoint`, retrying transient failures per the [`RetryPolicy`].
    ///
    /// # Errors
    ///
    /// - [`ClientError::Auth`] on HTTP 401/403.
    /// - [`ClientError::NotFound`] on HTTP 404.
    /// - [`ClientError::Api`] once retries are exhausted, on any other
    ///   non-success status, or when the body is not JSON.
    pub async fn request(
        &self,
        endpoint: Endpoint,
        brand_id: Option<&str>,
    ) -> Result<Value, ClientError> {
        let mut attempt = 0;
        loop {
            let (reason, jitter) = match self.attempt(endpoint, brand_id).await {
                Ok(value) => return Ok(value),
                Err(Failure::Fatal(err)) => return Err(err),
                Err(Failure::Retry { reason, jitter }) => (reason, jitter),
            };

            if attempt >= self.retry.max_retries {
                return Err(ClientError::Api {
                    endpoint: endpoint.path(),
                    message: format!("{reason} after {} retries", self.retry.max_retries),
                });
            }

            let jitter = if jitter { rate_limit_jitter() } else { Duration::ZERO };
            let delay = self.retry.delay(attempt, jitter);
            tracing::debug!(
                endpoint = endpoint.path(),
                attempt,
                ?delay,
                %reason,
                "retrying request"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    async fn attempt(&self, endpoint: Endpoint, brand_id: Option<&str>) -> Result<Value, Failure> {
        let builder = if endpoint.is_brand_scoped() {
            self.http
                .post(self.url(endpoint))
                .json(&json!({ "brandId": brand_id }))
        } else {
            self.http.get(self.url(endpoint))
        };

        let resp = builder
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| Failure::Retry {
                reason: transport_reason(&e),
                jitter: false,
            })?;
        read_json(endpoint.path(), resp).await
    }

    /// List the brands on this account.
    ///
    /// # Errors
    ///
    /// See [`GeoClient::request`].
    pub async fn fetch_brands(&self) -> Result<Value, ClientError> {
        self.request(Endpoint::Brands, None).await
    }

    /// Visibility score, rank, engines and competitors.
    ///
    /// # Errors
    ///
    /// See [`GeoClient::request`].
    pub async fn fetch_report(&self, brand_id: &str) -> Result<Value, ClientError> {
        self.request(Endpoint::Report, Some(brand_id)).await
    }

    /// # Errors
    ///
    /// See [`GeoClient::request`].
    pub async fn fetch_citations(&self, brand_id: &str) -> Result<Value, ClientError> {
        self.request(Endpoint::Citations, Some(brand_id)).await
    }

    /// # Errors
    ///
    /// See [`GeoClient::request`].
    pub async fn fetch_sentiment(&self, brand_id: &str) -> Result<Value, ClientError> {
        self.request(Endpoint::Sentiment, Some(brand_id)).await
    }

    /// Search terms from the aggregated report, or the raw term list when the
    /// report endpoint fails.
    ///
    /// # Errors
    ///
    /// The raw endpoint's error when both fail.
    pub async fn fetch_search_terms(&self, brand_id: &str) -> Result<Value, ClientError> {
        match self.request(Endpoint::SearchTermsReport, Some(brand_id)).await {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::debug!(%e, "search terms report failed; trying raw search terms");
                self.request(Endpoint::SearchTerms, Some(brand_id)).await
            }
        }
    }

    /// Fetch report, citations, sentiment and search terms concurrently.
    ///
    /// Each result is independent: one failure does not cancel the others.
    pub async fn fetch_all(&self, brand_id: &str) -> FetchBatch {
        let (report, citations, sentiment, search_terms) = tokio::join!(
            self.fetch_report(brand_id),
            self.fetch_citations(brand_id),
            self.fetch_sentiment(brand_id),
            self.fetch_search_terms(brand_id),
        );
        FetchBatch {
            report,
            citations,
            sentiment,
            search_terms,
        }
    }
}
