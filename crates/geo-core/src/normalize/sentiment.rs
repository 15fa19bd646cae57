use serde_json::Value;

use super::present;
use crate::access::{first_present, round_to, safe_get, safe_num};
use crate::model::Sentiment;

const NESTED_POSITIVE: &[&str] = &["pos", "positive"];
const NESTED_NEGATIVE: &[&str] = &["neg", "negative"];
const NESTED_NEUTRAL: &[&str] = &["neu", "neutral"];

const FLAT_POSITIVE: &[&str] = &["positive", "pos"];
const FLAT_NEGATIVE: &[&str] = &["negative", "neg"];
const FLAT_NEUTRAL: &[&str] = &["neutral", "neu"];

/// Normalize a sentiment payload into percentages.
///
/// Three shapes are recognized, in priority order:
/// 1. `{ scores: { pos, neg, neu } }` (long key names accepted too). Each part
///    becomes a share of their sum; a zero sum divides by 100 instead.
/// 2. Flat fractions `{ positive: 0.61, negative: 0.10, neutral: 0.29 }`,
///    detected when every part is `<= 1` and their sum is `<= 3`. Scaled by
///    100.
/// 3. Flat percentages, rounded as-is.
///
/// The fraction heuristic is ambiguous at its boundary: `{1, 1, 1}` is read
/// as three 100% fractions, not three 1% values.
#[must_use]
pub fn normalize_sentiment(raw: Option<&Value>) -> Sentiment {
    let Some(raw) = present(raw) else {
        return Sentiment::default();
    };

    if let Some(scores) = present(safe_get(raw, "scores")) {
        let pos = safe_num(first_present(scores, NESTED_POSITIVE), 0.0);
        let neg = safe_num(first_present(scores, NESTED_NEGATIVE), 0.0);
        let neu = safe_num(first_present(scores, NESTED_NEUTRAL), 0.0);
        let sum = pos + neg + neu;
        let total = if sum == 0.0 { 100.0 } else { sum };
        return Sentiment {
            positive: round_to(pos / total * 100.0, 1),
            negative: round_to(neg / total * 100.0, 1),
            neutral: round_to(neu / total * 100.0, 1),
        };
    }

    let pos = safe_num(first_present(raw, FLAT_POSITIVE), 0.0);
    let neg = safe_num(first_present(raw, FLAT_NEGATIVE), 0.0);
    let neu = safe_num(first_present(raw, FLAT_NEUTRAL), 0.0);

    if looks_fractional(pos, neg, neu) {
        return Sentiment {
            positive: round_to(pos * 100.0, 1),
            negative: round_to(neg * 100.0, 1),
            neutral: round_to(neu * 100.0, 1),
        };
    }

    Sentiment {
        positive: round_to(pos, 1),
        negative: round_to(neg, 1),
        neutral: round_to(neu, 1),
    }
}

fn looks_fractional(pos: f64, neg: f64, neu: f64) -> bool {
    pos <= 1.0 && neg <= 1.0 && neu <= 1.0 && pos + neg + neu <= 3.0
}
