use chrono::Utc;
use geo_client::GeoClient;
use geo_config::Credentials;
use geo_insights::{compute_reputation_score, ContentGaps, EngineProfile, ReputationScore};
use serde::Serialize;

use crate::cli::{Blocks, GlobalFlags};
use crate::commands::discover;
use crate::output::output;
use crate::pipeline::{self, GeoRun};
use crate::progress::Progress;
use crate::render;

/// Analysis blocks selected on the command line.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct BlocksView {
    #[serde(skip_serializing_if = "Option::is_none")]
    engine_profile: Option<EngineProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_gaps: Option<ContentGaps>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reputation: Option<ReputationScore>,
}

impl BlocksView {
    fn build(run: &GeoRun, blocks: Blocks) -> Self {
        let engines = &run.dataset.report.engines;
        Self {
            engine_profile: blocks
                .engine_profile
                .then(|| EngineProfile::from_engines(engines)),
            content_gaps: blocks
                .gap_analysis
                .then(|| ContentGaps::analyze(engines, &run.term_visibility)),
            reputation: blocks
                .reputation
                .then(|| compute_reputation_score(&run.reputation)),
        }
    }

    fn render(&self) -> String {
        let mut sections = Vec::new();
        if let Some(profile) = &self.engine_profile {
            sections.push(profile.render());
        }
        if let Some(gaps) = &self.content_gaps {
            sections.push(gaps.render());
        }
        if let Some(reputation) = &self.reputation {
            sections.push(reputation.render());
        }
        sections.join("\n\n")
    }
}

/// Fetch, analyze and print the report for the configured brand.
pub async fn handle(
    client: &GeoClient,
    credentials: &Credentials,
    blocks: Blocks,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let brand_id = match credentials.brand_id() {
        Some(id) => id.to_string(),
        None => {
            tracing::warn!("no brand ID configured; discovering brands on this account");
            discover::discover_brand_id(client, credentials.brand_name.as_deref()).await?
        }
    };

    let progress = Progress::spinner("Fetching GEO metrics...");
    let batch = client.fetch_all(&brand_id).await;
    let payloads = match pipeline::collect_payloads(batch) {
        Ok(payloads) => payloads,
        Err(error) => {
            progress.finish_err("report unavailable");
            return Err(error);
        }
    };
    progress.set_message("Analyzing...");
    let run = pipeline::analyze(&payloads);
    progress.finish_clear();

    if blocks.any() {
        let view = BlocksView::build(&run, blocks);
        return output(&view, || view.render(), flags.format);
    }

    let today = Utc::now().date_naive();
    output(&run, || render::report(&run, &brand_id, today), flags.format)
}
