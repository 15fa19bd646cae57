use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde_json::Value;

use super::{present, unwrap_envelope};
use crate::access::{first_present, first_text, first_truthy, safe_array, safe_num, truthy};
use crate::model::{SearchTerm, TermVisibility};

/// Number of search terms kept after ranking.
pub const MAX_SEARCH_TERMS: usize = 10;

const LIST_KEYS: &[&str] = &["searchTerms", "terms", "results"];
const QUERY_KEYS: &[&str] = &["query", "term", "keyword", "name"];
const MENTION_KEYS: &[&str] = &["mentions", "count", "frequency"];
const VISIBILITY_TERM_KEYS: &[&str] = &["term", "query"];
const VISIBILITY_KEYS: &[&str] = &["visibility", "visibilityScore", "score"];

/// Resolve the term records from any of the known response shapes:
/// `{ data: { searchTerms } }`, `{ terms }`, `{ results }` or a bare array.
fn term_records(raw: Option<&Value>) -> &[Value] {
    let Some(raw) = present(raw) else {
        return &[];
    };
    let body = unwrap_envelope(raw);
    let list = first_truthy(body, LIST_KEYS).or_else(|| body.is_array().then_some(body));
    safe_array(list)
}

/// Normalize a search-terms payload into the top queries by mentions.
///
/// Records without a usable query are skipped. Mentions come from
/// `mentions`/`count`/`frequency`, or, when none of those is present, from
/// the number of entries in an `aiSearchEngines` array. Duplicate queries are
/// merged by summing their mentions. The result is sorted by mentions
/// descending and capped at [`MAX_SEARCH_TERMS`].
#[must_use]
pub fn normalize_search_terms(raw: Option<&Value>) -> Vec<SearchTerm> {
    let mut terms: Vec<SearchTerm> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in term_records(raw) {
        if !truthy(record) {
            continue;
        }
        let Some(query) = first_text(record, QUERY_KEYS) else {
            continue;
        };
        let mentions = mention_count(record);

        match positions.entry(query) {
            Entry::Occupied(slot) => terms[*slot.get()].mentions += mentions,
            Entry::Vacant(slot) => {
                let query = slot.key().clone();
                slot.insert(terms.len());
                terms.push(SearchTerm { query, mentions });
            }
        }
    }

    terms.sort_by(|a, b| b.mentions.total_cmp(&a.mentions));
    terms.truncate(MAX_SEARCH_TERMS);
    terms
}

#[allow(clippy::cast_precision_loss)]
fn mention_count(record: &Value) -> f64 {
    match first_present(record, MENTION_KEYS) {
        Some(value) => safe_num(Some(value), 0.0),
        None => record
            .get("aiSearchEngines")
            .and_then(Value::as_array)
            .map_or(0.0, |engines| engines.len() as f64),
    }
}

/// Per-term visibility from the same search-terms payload.
///
/// Only records that actually carry a visibility value are returned, so a
/// payload without visibility data yields no term-level gaps.
#[must_use]
pub fn normalize_term_visibility(raw: Option<&Value>) -> Vec<TermVisibility> {
    term_records(raw)
        .iter()
        .filter_map(|record| {
            let visibility = first_present(record, VISIBILITY_KEYS)?;
            Some(TermVisibility {
                term: first_text(record, VISIBILITY_TERM_KEYS).unwrap_or_else(|| "?".to_string()),
                visibility: safe_num(Some(visibility), 0.0),
            })
        })
        .collect()
}
