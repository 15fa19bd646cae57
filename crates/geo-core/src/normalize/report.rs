use std::collections::BTreeMap;

use serde_json::Value;

use super::{present, unwrap_envelope};
use crate::access::{
    first_present, first_text, first_truthy, round_to, safe_array, safe_fixed, safe_get,
    safe_num, safe_num_opt, to_count,
};
use crate::model::{Citations, Report, ReportFallback, Sentiment, DEFAULT_BRAND_NAME};

const OWN_SCORE_KEYS: &[&str] = &["visibilityScore", "score"];
const LEGACY_SCORE_KEYS: &[&str] = &["score", "geoScore"];
const LEGACY_CHANGE_KEYS: &[&str] = &["change", "weeklyDelta", "delta"];
const LEGACY_BRAND_KEYS: &[&str] = &["brandName", "brand"];
const ENGINE_SERIES_KEYS: &[&str] = &["daily", "weekly"];
const ENGINE_LABEL_KEYS: &[&str] = &["engineName", "engineId"];
const CITATION_RATE_PROXY_KEYS: &[&str] = &["detectionRate", "citations"];

/// Normalize a `metricsV1Report` payload.
///
/// The current shape nests brand metrics under `data.ownBrandMetrics`:
///
/// ```json
/// { "data": {
///     "ownBrandMetrics": {
///       "visibilityScore": 35, "detectionRate": 60, "sentiment": 58,
///       "citations": 12, "trends": { "visibilityScore": -8 },
///       "engineMetricsData": { "daily": [
///         { "engineId": "gpt", "engineName": "ChatGPT", "visibilityScore": [30, 41] }
///       ] }
///     },
///     "competitorMetrics": [{ "name": "Rival", "latestValue": 52 }]
/// } }
/// ```
///
/// Legacy flat payloads (`{ score, rank, change }`) are read too. Besides the
/// report itself this fills [`Report::fallback`]: a citations estimate that
/// uses the detection rate as a rate proxy, and a sentiment split synthesized
/// from the composite sentiment score.
#[must_use]
pub fn normalize_report(raw: Option<&Value>) -> Report {
    let Some(raw) = present(raw) else {
        return Report::default();
    };

    let body = unwrap_envelope(raw);
    let own = first_truthy(body, &["ownBrandMetrics"]).unwrap_or(body);

    let competitors = safe_array(
        first_truthy(body, &["competitorMetrics"]).or_else(|| safe_get(raw, "competitors")),
    )
    .to_vec();

    let change = safe_get(own, "trends.visibilityScore")
        .or_else(|| first_present(raw, LEGACY_CHANGE_KEYS));

    let score =
        first_present(own, OWN_SCORE_KEYS).or_else(|| first_present(raw, LEGACY_SCORE_KEYS));

    let brand_name = first_text(own, &["brandName"])
        .or_else(|| first_text(raw, LEGACY_BRAND_KEYS))
        .unwrap_or_else(|| DEFAULT_BRAND_NAME.to_string());

    let detection_rate = safe_num_opt(
        first_present(own, &["detectionRate"]).or_else(|| first_present(raw, &["detectionRate"])),
    )
    .map(|rate| round_to(rate, 1));

    let composite_sentiment = safe_num_opt(
        first_present(own, &["sentiment"]).or_else(|| first_present(raw, &["sentiment"])),
    );

    let fallback = ReportFallback {
        citations: Citations {
            count: to_count(safe_num(first_present(own, &["citations"]), 0.0)),
            rate: safe_num(first_present(own, CITATION_RATE_PROXY_KEYS), 0.0),
            ..Citations::default()
        },
        sentiment: composite_sentiment.map(sentiment_from_score),
    };

    Report {
        score: safe_num(score, 0.0),
        rank: rank(first_present(own, &["rank"]).or_else(|| first_present(raw, &["rank"]))),
        change: safe_fixed(change, 1, 0.0),
        brand_name,
        detection_rate,
        engines: latest_engine_scores(own),
        competitors,
        fallback,
    }
}

/// Latest visibility sample per engine, keyed by display name or id.
fn latest_engine_scores(own: &Value) -> BTreeMap<String, f64> {
    let series = first_truthy(own, &["engineMetricsData"])
        .and_then(|data| first_truthy(data, ENGINE_SERIES_KEYS));

    let mut engines = BTreeMap::new();
    for record in safe_array(series) {
        let Some(latest) = safe_array(safe_get(record, "visibilityScore")).last() else {
            continue;
        };
        let label = first_text(record, ENGINE_LABEL_KEYS).unwrap_or_else(|| "unknown".to_string());
        engines.insert(label, safe_num(Some(latest), 0.0));
    }
    engines
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rank(value: Option<&Value>) -> Option<u32> {
    safe_num_opt(value)
        .map(f64::round)
        .filter(|rank| *rank >= 1.0 && *rank <= f64::from(u32::MAX))
        .map(|rank| rank as u32)
}

/// Decompose one composite sentiment score (0–100) into a three-way split.
///
/// This is a heuristic, not a measured breakdown: the score becomes the
/// positive share and 30% of the remainder is attributed to negative
/// sentiment. String scores such as `"65"` are accepted.
#[must_use]
pub fn build_sentiment_from_score(score: &Value) -> Sentiment {
    sentiment_from_score(safe_num(Some(score), 0.0))
}

fn sentiment_from_score(score: f64) -> Sentiment {
    let positive = round_to(score, 1).clamp(0.0, 100.0);
    let negative = round_to((100.0 - positive) * 0.3, 1).max(0.0);
    let neutral = round_to(100.0 - positive - negative, 1);
    Sentiment {
        positive,
        negative,
        neutral,
    }
}
