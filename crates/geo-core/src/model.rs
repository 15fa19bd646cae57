//! Canonical GEO entities.
//!
//! All entities are built fresh from one batch of fetched payloads and are
//! not mutated afterwards. Numeric fields are always finite.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Brand name used when the report payload does not carry one.
pub const DEFAULT_BRAND_NAME: &str = "Your Brand";

// ── Report ─────────────────────────────────────────────────────────

/// Headline visibility report for one brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Visibility score, 0–100.
    pub score: f64,
    /// Position among tracked brands, when the provider ranks it.
    pub rank: Option<u32>,
    /// Week-over-week score delta.
    pub change: f64,
    pub brand_name: String,
    /// Share of queries mentioning the brand at all. `None` when unknown,
    /// which is not the same as zero.
    pub detection_rate: Option<f64>,
    /// Latest visibility sample per engine display name.
    pub engines: BTreeMap<String, f64>,
    /// Raw competitor records, before filtering and ranking.
    pub competitors: Vec<Value>,
    /// Estimates embedded in the report, used when standalone endpoints fail.
    #[serde(skip)]
    pub fallback: ReportFallback,
}

impl Default for Report {
    fn default() -> Self {
        Self {
            score: 0.0,
            rank: None,
            change: 0.0,
            brand_name: DEFAULT_BRAND_NAME.to_string(),
            detection_rate: None,
            engines: BTreeMap::new(),
            competitors: Vec::new(),
            fallback: ReportFallback::default(),
        }
    }
}

/// Citation and sentiment stand-ins derived from the report payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFallback {
    /// Citation count from the report, with detection rate as the rate proxy.
    pub citations: Citations,
    /// Breakdown synthesized from the report's composite sentiment score.
    pub sentiment: Option<Sentiment>,
}

// ── Citations / sentiment ──────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citations {
    pub count: u64,
    /// Percentage of monitored queries citing the brand, 0–100.
    pub rate: f64,
    /// Source descriptors as the provider sent them.
    pub sources: Vec<Value>,
    pub industry_avg: Option<f64>,
}

/// Three-way sentiment split in percent. The parts are expected to sum to
/// roughly 100 but nothing enforces it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

// ── Search terms / competitors ─────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchTerm {
    /// Deduplication key; never empty.
    pub query: String,
    /// Mentions summed across duplicate records of the same query.
    pub mentions: f64,
}

/// Per-term visibility, the input to term-level content gap analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermVisibility {
    pub term: String,
    /// Visibility in percent, 0–100.
    pub visibility: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub name: String,
    pub score: f64,
    /// Percentage the brand is ahead (+) or behind (-) this competitor.
    /// `None` when either score is zero or missing.
    pub delta: Option<i64>,
}

// ── Dataset ────────────────────────────────────────────────────────

/// Everything the insight rules look at, normalized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoDataset {
    pub report: Report,
    pub citations: Citations,
    pub sentiment: Sentiment,
    pub search_terms: Vec<SearchTerm>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_report_uses_placeholder_brand() {
        let report = Report::default();
        assert_eq!(report.brand_name, DEFAULT_BRAND_NAME);
        assert_eq!(report.rank, None);
        assert_eq!(report.detection_rate, None);
        assert!(report.engines.is_empty());
        assert_eq!(report.fallback, ReportFallback::default());
    }

    #[test]
    fn report_serializes_camel_case_without_fallback() {
        let json = serde_json::to_value(Report::default()).unwrap();
        assert!(json.get("brandName").is_some());
        assert!(json.get("detectionRate").is_some());
        assert!(json.get("fallback").is_none());
    }
}
