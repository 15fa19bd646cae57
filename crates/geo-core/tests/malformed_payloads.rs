//! Every normalizer must return a well-typed default for truncated,
//! wrong-typed or null payloads.

use geo_core::normalize::{
    normalize_brands, normalize_citations, normalize_competitors, normalize_report,
    normalize_search_terms, normalize_sentiment, normalize_term_visibility,
};
use geo_core::{Citations, GeoDataset, RawPayloads, Report, Sentiment};
use rstest::rstest;
use serde_json::{json, Value};

fn garbage() -> Vec<Value> {
    vec![
        Value::Null,
        json!(false),
        json!(0),
        json!(""),
        json!("not json at all"),
        json!(42),
        json!([]),
        json!([null, 1, "two", [3]]),
        json!({}),
        json!({"data": null}),
        json!({"data": "oops"}),
        json!({"data": {"ownBrandMetrics": null, "searchTerms": 5}}),
        json!({"scores": null, "positive": "lots"}),
    ]
}

#[rstest]
#[case::null(Value::Null)]
#[case::empty_object(json!({}))]
#[case::empty_string(json!(""))]
#[case::number(json!(12))]
#[case::array(json!([1, 2, 3]))]
fn sentiment_of_garbage_is_zero(#[case] raw: Value) {
    assert_eq!(normalize_sentiment(Some(&raw)), Sentiment::default());
}

#[rstest]
#[case::null(Value::Null)]
#[case::empty_object(json!({}))]
#[case::wrong_types(json!({"count": [], "rate": "n/a", "sources": {}, "industryAvg": "?"}))]
fn citations_of_garbage_are_zero(#[case] raw: Value) {
    assert_eq!(normalize_citations(Some(&raw)), Citations::default());
}

#[test]
fn every_normalizer_tolerates_garbage() {
    for raw in garbage() {
        let report = normalize_report(Some(&raw));
        assert!(report.score.is_finite(), "score for {raw}");
        assert!(report.change.is_finite(), "change for {raw}");
        assert!(report.engines.values().all(|v| v.is_finite()), "engines for {raw}");

        let sentiment = normalize_sentiment(Some(&raw));
        assert!(sentiment.positive.is_finite() && sentiment.negative.is_finite());

        let citations = normalize_citations(Some(&raw));
        assert!(citations.rate.is_finite(), "rate for {raw}");

        for term in normalize_search_terms(Some(&raw)) {
            assert!(!term.query.is_empty());
            assert!(term.mentions.is_finite());
        }
        let _ = normalize_term_visibility(Some(&raw));
        let _ = normalize_brands(Some(&raw));

        let list = match &raw {
            Value::Array(items) => items.clone(),
            other => vec![other.clone()],
        };
        for competitor in normalize_competitors(&list, 50.0) {
            assert!(competitor.score.is_finite());
        }
    }
}

#[test]
fn missing_report_is_the_documented_default() {
    let report = normalize_report(None);
    assert_eq!(report, Report::default());
    assert_eq!(report.brand_name, "Your Brand");
}

#[test]
fn competitor_delta_is_never_infinite() {
    let raw = vec![
        json!({"name": "zero", "score": 0}),
        json!({"name": "neg", "score": -5}),
        json!({"name": "text", "score": "abc"}),
    ];
    for competitor in normalize_competitors(&raw, 80.0) {
        assert_eq!(competitor.delta, None, "{}", competitor.name);
    }
    for competitor in normalize_competitors(&[json!({"name": "A", "score": 40})], f64::NAN) {
        assert_eq!(competitor.delta, None);
    }
}

#[test]
fn end_to_end_dataset_from_nested_report_only() {
    let payloads = RawPayloads {
        report: Some(json!({"data": {"ownBrandMetrics": {
            "visibilityScore": 35,
            "detectionRate": 60,
            "citations": 12,
            "trends": {"visibilityScore": -8}
        }}})),
        citations: Some(json!({})),
        sentiment: Some(json!({})),
        search_terms: Some(json!({})),
    };
    let dataset = GeoDataset::from_payloads(&payloads);
    assert_eq!(dataset.report.score, 35.0);
    assert_eq!(dataset.report.change, -8.0);
    assert_eq!(dataset.report.detection_rate, Some(60.0));
    assert_eq!(dataset.citations, Citations::default());
    assert_eq!(dataset.sentiment, Sentiment::default());
    assert!(dataset.search_terms.is_empty());
}
