//! One report run: fetched payloads in, normalized dataset and insights out.

use anyhow::anyhow;
use geo_client::{ClientError, ErrorKind, FetchBatch};
use geo_core::normalize::normalize_term_visibility;
use geo_core::{Competitor, GeoDataset, RawPayloads, TermVisibility};
use geo_insights::{interpret, Insight, ReputationInput};
use serde::Serialize;
use serde_json::Value;

/// Everything the renderers need from one batch.
#[derive(Debug, Default, Serialize)]
pub struct GeoRun {
    pub dataset: GeoDataset,
    pub competitors: Vec<Competitor>,
    pub insights: Vec<Insight>,
    #[serde(skip)]
    pub term_visibility: Vec<TermVisibility>,
    #[serde(skip)]
    pub reputation: ReputationInput,
}

/// Turn a fetch batch into raw payloads.
///
/// The report is required: its failure aborts the run with guidance for the
/// error kind. Other endpoints degrade to `None` with a warning.
pub fn collect_payloads(batch: FetchBatch) -> anyhow::Result<RawPayloads> {
    let report = batch.report.map_err(report_failure)?;
    Ok(RawPayloads {
        report: Some(report),
        citations: optional("citations", batch.citations),
        sentiment: optional("sentiment", batch.sentiment),
        search_terms: optional("search terms", batch.search_terms),
    })
}

fn optional(what: &str, result: Result<Value, ClientError>) -> Option<Value> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!(%error, "{what} unavailable; continuing without it");
            None
        }
    }
}

fn report_failure(error: ClientError) -> anyhow::Error {
    let hint = match error.kind() {
        ErrorKind::Auth => "Verify your key at https://app.rankscale.ai/settings/api",
        ErrorKind::NotFound => "Run `geoscope --discover-brands` to list valid brand IDs",
        ErrorKind::Api => "The report endpoint is unavailable; try again later",
    };
    anyhow!(error).context(format!("failed to fetch the GEO report. {hint}"))
}

/// Normalize payloads and evaluate the insight rules.
#[must_use]
pub fn analyze(payloads: &RawPayloads) -> GeoRun {
    let dataset = GeoDataset::from_payloads(payloads);
    let competitors = dataset.competitors();
    let insights = interpret(&dataset);
    tracing::debug!(
        score = dataset.report.score,
        competitors = competitors.len(),
        insights = insights.len(),
        "analyzed report"
    );

    GeoRun {
        term_visibility: normalize_term_visibility(payloads.search_terms.as_ref()),
        reputation: ReputationInput::from_value(payloads.sentiment.as_ref()),
        dataset,
        competitors,
        insights,
    }
}

#[cfg(test)]
mod tests {
    use geo_insights::Severity;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn report_payload() -> Value {
        json!({"data": {
            "ownBrandMetrics": {
                "brandName": "Acme",
                "visibilityScore": 35,
                "detectionRate": 60,
                "citations": 12,
                "sentiment": 70,
                "trends": {"visibilityScore": -8}
            },
            "competitorMetrics": [
                {"name": "Initech", "visibilityScore": 20},
                {"name": "Globex", "visibilityScore": 55}
            ]
        }})
    }

    fn api_error() -> ClientError {
        ClientError::Api {
            endpoint: "metricsV1Citations",
            message: "service unavailable after 3 retries".into(),
        }
    }

    #[test]
    fn secondary_failures_become_missing_payloads() {
        let batch = FetchBatch {
            report: Ok(report_payload()),
            citations: Err(api_error()),
            sentiment: Err(api_error()),
            search_terms: Ok(json!({"terms": [{"query": "crm", "mentions": 3}]})),
        };
        let payloads = collect_payloads(batch).expect("report present");
        assert!(payloads.report.is_some());
        assert!(payloads.citations.is_none());
        assert!(payloads.sentiment.is_none());
        assert!(payloads.search_terms.is_some());
    }

    #[test]
    fn report_failure_is_fatal_with_guidance() {
        let batch = FetchBatch {
            report: Err(ClientError::Auth { status: 401 }),
            citations: Ok(json!({})),
            sentiment: Ok(json!({})),
            search_terms: Ok(json!({})),
        };
        let message = format!("{:#}", collect_payloads(batch).unwrap_err());
        assert!(message.contains("app.rankscale.ai/settings/api"), "{message}");

        let batch = FetchBatch {
            report: Err(ClientError::NotFound {
                endpoint: "metricsV1Report",
            }),
            citations: Ok(json!({})),
            sentiment: Ok(json!({})),
            search_terms: Ok(json!({})),
        };
        let message = format!("{:#}", collect_payloads(batch).unwrap_err());
        assert!(message.contains("--discover-brands"), "{message}");
    }

    #[test]
    fn analysis_uses_report_fallbacks() {
        let payloads = RawPayloads {
            report: Some(report_payload()),
            ..RawPayloads::default()
        };
        let run = analyze(&payloads);

        assert_eq!(run.dataset.report.brand_name, "Acme");
        assert_eq!(run.dataset.citations.count, 12);
        assert_eq!(run.dataset.citations.rate, 60.0);
        assert_eq!(run.competitors.len(), 2);
        assert_eq!(run.competitors[0].name, "Globex");
        assert!(run.term_visibility.is_empty());
        assert_eq!(run.reputation, ReputationInput::default());
        assert_eq!(run.competitors[0].delta, Some(-36));

        let ids: Vec<&str> = run.insights.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["R4", "R6", "R8", "R9"]);
        assert_eq!(run.insights[0].severity, Severity::Crit);
    }

    #[test]
    fn json_view_skips_internal_inputs() {
        let run = analyze(&RawPayloads::default());
        let value = serde_json::to_value(&run).unwrap();
        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["competitors", "dataset", "insights"]);
    }
}
