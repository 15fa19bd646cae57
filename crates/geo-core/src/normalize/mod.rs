//! Payload normalizers, one per data domain.
//!
//! Each normalizer takes a raw JSON value that may be `None`, `null` or any
//! other shape, and returns a canonical entity from [`crate::model`]. They
//! never fail; unusable input produces the documented defaults.
//!
//! Field alias lists live as constants next to the normalizer that reads
//! them, in priority order.

mod brands;
mod citations;
mod competitors;
mod report;
mod search_terms;
mod sentiment;

pub use brands::{normalize_brands, select_brand, BrandChoice, BrandSummary, ChoiceReason};
pub use citations::normalize_citations;
pub use competitors::{normalize_competitors, COMPETITOR_SCORE_KEYS, MAX_COMPETITORS};
pub use report::{build_sentiment_from_score, normalize_report};
pub use search_terms::{normalize_search_terms, normalize_term_visibility, MAX_SEARCH_TERMS};
pub use sentiment::normalize_sentiment;

use serde_json::Value;

use crate::access::{first_truthy, truthy};

/// Drop falsy payloads so normalizers can bail out to their defaults early.
fn present(raw: Option<&Value>) -> Option<&Value> {
    raw.filter(|value| truthy(value))
}

/// Strip the optional `data` envelope the provider wraps responses in.
fn unwrap_envelope(raw: &Value) -> &Value {
    first_truthy(raw, &["data"]).unwrap_or(raw)
}
