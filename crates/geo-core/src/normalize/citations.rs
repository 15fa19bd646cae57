use serde_json::Value;

use super::present;
use crate::access::{first_present, first_truthy, safe_array, safe_num, safe_num_opt, to_count};
use crate::model::Citations;

const COUNT_KEYS: &[&str] = &["count", "total", "citationCount"];
const RATE_KEYS: &[&str] = &["rate", "citationRate", "percentage"];
const SOURCES_KEYS: &[&str] = &["sources", "topSources"];
const INDUSTRY_AVG_KEYS: &[&str] = &["industryAvg", "benchmarkRate"];

/// Normalize a citations payload.
///
/// Accepts both `{ count, rate, industryAvg, sources }` and
/// `{ total, citationRate, benchmarkRate, topSources }`.
#[must_use]
pub fn normalize_citations(raw: Option<&Value>) -> Citations {
    let Some(raw) = present(raw) else {
        return Citations::default();
    };

    Citations {
        count: to_count(safe_num(first_present(raw, COUNT_KEYS), 0.0)),
        rate: safe_num(first_present(raw, RATE_KEYS), 0.0),
        sources: safe_array(first_truthy(raw, SOURCES_KEYS)).to_vec(),
        industry_avg: safe_num_opt(first_present(raw, INDUSTRY_AVG_KEYS)),
    }
}
