//! Assembly of the normalized dataset from one batch of endpoint payloads.

use serde_json::Value;

use crate::access::truthy;
use crate::model::{Competitor, GeoDataset};
use crate::normalize::{
    normalize_citations, normalize_competitors, normalize_report, normalize_search_terms,
    normalize_sentiment,
};

/// Raw payloads from the four report endpoints. `None` marks a failed fetch.
#[derive(Debug, Clone, Default)]
pub struct RawPayloads {
    pub report: Option<Value>,
    pub citations: Option<Value>,
    pub sentiment: Option<Value>,
    pub search_terms: Option<Value>,
}

impl GeoDataset {
    /// Normalize all four payloads.
    ///
    /// Missing citations fall back to the report's embedded estimate; missing
    /// sentiment falls back to the split synthesized from the report's
    /// composite score, or zeros when the report has none either.
    #[must_use]
    pub fn from_payloads(payloads: &RawPayloads) -> Self {
        let report = normalize_report(payloads.report.as_ref());

        let citations = match payloads.citations.as_ref().filter(|raw| truthy(raw)) {
            Some(raw) => normalize_citations(Some(raw)),
            None => {
                tracing::debug!("citations payload missing; using report estimate");
                report.fallback.citations.clone()
            }
        };

        let sentiment = match payloads.sentiment.as_ref().filter(|raw| truthy(raw)) {
            Some(raw) => normalize_sentiment(Some(raw)),
            None => {
                tracing::debug!("sentiment payload missing; using report composite score");
                report.fallback.sentiment.unwrap_or_default()
            }
        };

        let search_terms = normalize_search_terms(payloads.search_terms.as_ref());

        Self {
            report,
            citations,
            sentiment,
            search_terms,
        }
    }

    /// Top competitors ranked against the brand's score.
    #[must_use]
    pub fn competitors(&self) -> Vec<Competitor> {
        normalize_competitors(&self.report.competitors, self.report.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sentiment;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn report_payload() -> Value {
        json!({"data": {"ownBrandMetrics": {
            "visibilityScore": 35,
            "detectionRate": 60,
            "citations": 12,
            "sentiment": 70,
            "trends": {"visibilityScore": -8}
        }}})
    }

    #[test]
    fn all_payloads_missing_yields_defaults() {
        let dataset = GeoDataset::from_payloads(&RawPayloads::default());
        assert_eq!(dataset, GeoDataset::default());
    }

    #[test]
    fn standalone_payloads_win_over_report_estimates() {
        let payloads = RawPayloads {
            report: Some(report_payload()),
            citations: Some(json!({"count": 3, "rate": 44})),
            sentiment: Some(json!({"positive": 0.5, "negative": 0.2, "neutral": 0.3})),
            search_terms: Some(json!({"terms": [{"query": "x", "mentions": 1}]})),
        };
        let dataset = GeoDataset::from_payloads(&payloads);
        assert_eq!(dataset.citations.count, 3);
        assert_eq!(dataset.citations.rate, 44.0);
        assert_eq!(dataset.sentiment.positive, 50.0);
        assert_eq!(dataset.search_terms.len(), 1);
    }

    #[test]
    fn failed_endpoints_fall_back_to_report() {
        let payloads = RawPayloads {
            report: Some(report_payload()),
            ..RawPayloads::default()
        };
        let dataset = GeoDataset::from_payloads(&payloads);
        assert_eq!(dataset.report.score, 35.0);
        assert_eq!(dataset.report.change, -8.0);
        assert_eq!(dataset.citations.count, 12);
        assert_eq!(dataset.citations.rate, 60.0);
        assert!(dataset.citations.sources.is_empty());
        assert_eq!(
            dataset.sentiment,
            Sentiment {
                positive: 70.0,
                negative: 9.0,
                neutral: 21.0
            }
        );
        assert!(dataset.search_terms.is_empty());
    }

    #[test]
    fn competitors_are_ranked_against_brand_score() {
        let payloads = RawPayloads {
            report: Some(json!({"score": 50, "competitors": [
                {"name": "A", "score": 25},
                {"name": "B", "score": 100}
            ]})),
            ..RawPayloads::default()
        };
        let competitors = GeoDataset::from_payloads(&payloads).competitors();
        assert_eq!(competitors[0].name, "B");
        assert_eq!(competitors[0].delta, Some(-50));
        assert_eq!(competitors[1].delta, Some(100));
    }
}
