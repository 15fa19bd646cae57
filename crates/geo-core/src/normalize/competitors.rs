use serde_json::Value;

use crate::access::{first_present, first_text, round_half_up, safe_get, safe_num, truthy};
use crate::model::Competitor;

/// Number of competitors kept after ranking.
pub const MAX_COMPETITORS: usize = 3;

const NAME_KEYS: &[&str] = &["name", "brandName", "competitor"];
/// Score aliases of a raw competitor record, in priority order.
pub const COMPETITOR_SCORE_KEYS: &[&str] = &[
    "latestValue",
    "visibilityScore",
    "score",
    "geoScore",
    "visibility",
];

/// Rank raw competitor records against the brand's own score.
///
/// Drops falsy records and the brand's own entry (`isOwnBrand`), sorts by
/// score descending and keeps the top [`MAX_COMPETITORS`]. `delta` is only
/// computed when both scores are positive.
#[must_use]
pub fn normalize_competitors(raw: &[Value], brand_score: f64) -> Vec<Competitor> {
    let mut competitors: Vec<Competitor> = raw
        .iter()
        .filter(|record| truthy(record) && !safe_get(record, "isOwnBrand").is_some_and(truthy))
        .map(|record| {
            let score = safe_num(first_present(record, COMPETITOR_SCORE_KEYS), 0.0);
            Competitor {
                name: first_text(record, NAME_KEYS).unwrap_or_else(|| "Unknown".to_string()),
                score,
                delta: delta_vs(brand_score, score),
            }
        })
        .collect();

    competitors.sort_by(|a, b| b.score.total_cmp(&a.score));
    competitors.truncate(MAX_COMPETITORS);
    competitors
}

#[allow(clippy::cast_possible_truncation)]
fn delta_vs(brand_score: f64, score: f64) -> Option<i64> {
    if score > 0.0 && brand_score > 0.0 {
        Some(round_half_up((brand_score - score) / score * 100.0) as i64)
    } else {
        None
    }
}
