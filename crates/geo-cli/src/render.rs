//! Fixed-width text rendering of the full report and brand listings.

use chrono::NaiveDate;
use geo_core::normalize::BrandSummary;
use geo_core::{Competitor, SearchTerm};
use geo_insights::text::{center, line, truncate, WIDTH};
use geo_insights::Insight;

use crate::pipeline::GeoRun;

/// Link prefix for the dashboard page of a brand.
const DASHBOARD_URL: &str = "https://rankscale.ai/brands/";
const TOP_TERMS: usize = 5;

/// Format like the dashboard does: integers without a fraction, and no
/// negative zero.
fn num(n: f64) -> String {
    format!("{}", n + 0.0)
}

fn signed(n: f64) -> String {
    if n > 0.0 {
        format!("+{}", num(n))
    } else {
        num(n)
    }
}

/// The complete text report.
#[must_use]
pub fn report(run: &GeoRun, brand_id: &str, date: NaiveDate) -> String {
    let dataset = &run.dataset;
    let report = &dataset.report;
    let mut lines = vec![
        line('='),
        center("RANKSCALE GEO REPORT"),
        center(&format!("Brand: {} | {}", report.brand_name, date.format("%Y-%m-%d"))),
        line('='),
        format!(
            "  GEO SCORE:     {:>3} / 100   [{} vs last week]",
            num(report.score),
            signed(report.change)
        ),
    ];

    let rate = format!("{}%", num(dataset.citations.rate));
    let industry = dataset
        .citations
        .industry_avg
        .filter(|avg| *avg != 0.0)
        .map(|avg| format!("[Industry avg: {}%]", num(avg)))
        .unwrap_or_default();
    lines.push(format!("  CITATION RATE: {rate:<10}{industry}"));

    let sentiment = &dataset.sentiment;
    lines.push(format!(
        "  SENTIMENT:     Pos {}% | Neu {}% | Neg {}%",
        num(sentiment.positive),
        num(sentiment.neutral),
        num(sentiment.negative)
    ));

    if let Some(rate) = report.detection_rate {
        lines.push(format!("  DETECTION RATE:{:>4}%", num(rate)));
    }

    if !report.engines.is_empty() {
        let engines = report
            .engines
            .iter()
            .map(|(name, score)| format!("{name}:{}", num(*score)))
            .collect::<Vec<_>>()
            .join(" | ");
        lines.push(format!("  ENGINES:       {}", truncate(&engines, WIDTH - 17)));
    }

    lines.extend(competitors(&run.competitors));
    lines.extend(search_terms(&dataset.search_terms));
    lines.extend(insights(&run.insights));

    lines.push(line('-'));
    let url = truncate(&format!("{DASHBOARD_URL}{brand_id}"), 40);
    lines.push(format!("  Full report: {url}"));
    lines.push(line('='));

    lines.join("\n")
}

/// Competitor comparison rows; empty when there are no competitors.
#[must_use]
pub fn competitors(competitors: &[Competitor]) -> Vec<String> {
    if competitors.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![line('-'), "  COMPETITOR COMPARISON".to_string()];
    for competitor in competitors {
        let name = truncate(&competitor.name, 20);
        let delta = competitor
            .delta
            .map(|delta| {
                let (sign, flag) = if delta >= 0 { ("+", "🟢") } else { ("", "🔴") };
                format!(" {flag} [{sign}{delta}% vs us]")
            })
            .unwrap_or_default();
        let row = format!("  {name:<20}: {:>3}{delta}", num(competitor.score));
        lines.push(truncate(&row, WIDTH));
    }
    lines
}

fn search_terms(terms: &[SearchTerm]) -> Vec<String> {
    if terms.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![line('-'), "  TOP AI SEARCH TERMS".to_string()];
    for (i, term) in terms.iter().take(TOP_TERMS).enumerate() {
        let quoted = truncate(&format!("\"{}\"", term.query), 30);
        let row = format!(
            "  {}. {quoted:<32} ({} mentions)",
            i + 1,
            num(term.mentions)
        );
        lines.push(truncate(&row, WIDTH));
    }
    lines
}

fn insights(insights: &[Insight]) -> Vec<String> {
    if insights.is_empty() {
        return Vec::new();
    }
    let plural = if insights.len() == 1 { "" } else { "s" };
    let mut lines = vec![
        line('-'),
        format!("  GEO INSIGHTS  [{} action{plural}]", insights.len()),
    ];
    for insight in insights {
        lines.push(format!("  [{}] {}", insight.severity, insight.recommendation));
        lines.push(String::new());
    }
    lines
}

/// The brand list printed by `--discover-brands`.
#[must_use]
pub fn brands(brands: &[BrandSummary]) -> String {
    if brands.is_empty() {
        return "  No brands found on this account.".to_string();
    }
    let mut lines = vec![line('='), center("AVAILABLE BRANDS"), line('=')];
    for (i, brand) in brands.iter().enumerate() {
        lines.push(format!(
            "  {}. {}",
            i + 1,
            brand.name.as_deref().unwrap_or("(unnamed)")
        ));
        lines.push(format!("     ID: {}", brand.id.as_deref().unwrap_or("?")));
    }
    lines.push(line('-'));
    lines.push("  Set: export RANKSCALE_BRAND_ID=<id>".to_string());
    lines.push(line('='));
    lines.join("\n")
}
