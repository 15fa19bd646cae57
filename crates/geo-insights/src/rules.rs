//! Declarative GEO interpretation rules.
//!
//! [`GEO_RULES`] is an ordered table of rule descriptors. [`interpret`]
//! evaluates every rule against a dataset, drops suppressed duplicates,
//! orders the survivors by severity (table order breaks ties) and keeps at
//! most [`MAX_INSIGHTS`].
//!
//! A check returns `None` when the dataset lacks what the rule needs; that
//! counts as "not triggered" and never stops evaluation of other rules.

use std::fmt;

use geo_core::access::{first_present, safe_num};
use geo_core::normalize::COMPETITOR_SCORE_KEYS;
use geo_core::GeoDataset;
use serde::Serialize;

/// Maximum number of insights returned by [`interpret`].
pub const MAX_INSIGHTS: usize = 5;

/// `(suppressed, by)`: when rule `by` triggers, rule `suppressed` is dropped.
/// Both rules measure the same dimension at different severities.
const SUPPRESSIONS: &[(&str, &str)] = &[("R1", "R2")];


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    #[serde(rename = "CRIT")]
    Crit,
    #[serde(rename = "WARN")]
    Warn,
    #[serde(rename = "INFO")]
    Info,
}

impl Severity {
    /// Sort key: critical first.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Crit => 0,
            Self::Warn => 1,
            Self::Info => 2,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Crit => "CRIT",
            Self::Warn => "WARN",
            Self::Info => "INFO",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the rule table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub id: &'static str,
    pub name: &'static str,
    pub severity: Severity,
    /// `Some(true)` when triggered; `None` when the data needed is missing.
    pub check: fn(&GeoDataset) -> Option<bool>,
    pub recommendation: &'static str,
}

impl Rule {
    fn triggers(&self, dataset: &GeoDataset) -> bool {
        let triggered = (self.check)(dataset).unwrap_or(false);
        if triggered {
            tracing::debug!(rule = self.id, severity = %self.severity, "rule triggered");
        }
        triggered
    }
}

/// A triggered rule, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub id: &'static str,
    pub name: &'static str,
    pub severity: Severity,
    pub recommendation: &'static str,
}

impl From<&Rule> for Insight {
    fn from(rule: &Rule) -> Self {
        Self {
            id: rule.id,
            name: rule.name,
            severity: rule.severity,
            recommendation: rule.recommendation,
        }
    }
}

pub static GEO_RULES: [Rule; 10] = [
    Rule {
        id: "R1",
        name: "Low Citation Rate",
        severity: Severity::Warn,
        check: low_citation_rate,
        recommendation: "Citation rate below 40% target.\n  \
            Action: Publish 2+ authoritative comparison\n  \
            articles and press releases this month.\n  \
            Target sources: industry blogs, news sites.",
    },
    Rule {
        id: "R2",
        name: "Critical Citation Rate",
        severity: Severity::Crit,
        check: critical_citation_rate,
        recommendation: "Citation rate critically low (<20%).\n  \
            Action: Immediate content blitz needed.\n  \
            Submit brand to 5+ AI-indexed directories.\n  \
            Build backlinks from authoritative sources.",
    },
    Rule {
        id: "R3",
        name: "Negative Sentiment Spike",
        severity: Severity::Crit,
        check: negative_sentiment_spike,
        recommendation: "Negative sentiment exceeds 25%.\n  \
            Action: Audit top negative queries.\n  \
            Create rebuttal/FAQ content addressing\n  \
            negative narratives. Monitor weekly.",
    },
    Rule {
        id: "R4",
        name: "Low GEO Score",
        severity: Severity::Crit,
        check: low_geo_score,
        recommendation: "GEO score critically low (<40).\n  \
            Action: Comprehensive GEO audit needed.\n  \
            Add schema markup, improve content depth,\n  \
            and increase citation velocity.",
    },
    Rule {
        id: "R5",
        name: "Medium GEO Score",
        severity: Severity::Warn,
        check: medium_geo_score,
        recommendation: "GEO score in growth zone (40–64).\n  \
            Action: Focus on 3 high-volume search terms.\n  \
            Create dedicated landing pages optimized\n  \
            for AI answer inclusion.",
    },
    Rule {
        id: "R6",
        name: "Negative Score Trend",
        severity: Severity::Warn,
        check: negative_score_trend,
        recommendation: "GEO score declining (>5 pts drop).\n  \
            Action: Identify content gaps causing drop.\n  \
            Review which competitors gained citations\n  \
            and match their content strategy.",
    },
    Rule {
        id: "R7",
        name: "Positive Momentum",
        severity: Severity::Info,
        check: positive_momentum,
        recommendation: "Strong positive momentum detected.\n  \
            Action: Maintain current content cadence.\n  \
            Double down on formats producing citations.\n  \
            Consider expanding to adjacent topics.",
    },
    Rule {
        id: "R8",
        name: "Content Gap Investigation",
        severity: Severity::Warn,
        check: detection_rate_gap,
        recommendation: "Detection rate below 70% — brand not cited\n  \
            in AI results for many queries.\n  \
            Action: Research underrepresented topics;\n  \
            create content targeting those gaps.\n  \
            Timeline: 2–4 weeks to improve detection.",
    },
    Rule {
        id: "R9",
        name: "Competitive Benchmark",
        severity: Severity::Warn,
        check: competitive_benchmark,
        recommendation: "A top competitor is >15 pts ahead in\n  \
            visibility. Root cause: better content,\n  \
            more citations, or stronger authority.\n  \
            Action: Analyze competitor content strategy;\n  \
            identify differentiation opportunities.\n  \
            Timeline: 4–8 weeks to close the gap.",
    },
    Rule {
        id: "R10",
        name: "Engine-Specific Optimization",
        severity: Severity::Warn,
        check: engine_visibility_spread,
        recommendation: "Engine visibility spread >30 pts detected.\n  \
            Root cause: Engines (e.g., ChatGPT) favor\n  \
            different content signals than others.\n  \
            Action: Audit top engine's citations/\n  \
            keywords; optimize for those signals.\n  \
            Timeline: 3–6 weeks.",
    },
];

fn low_citation_rate(data: &GeoDataset) -> Option<bool> {
    Some(data.citations.rate < 40.0)
}

fn critical_citation_rate(data: &GeoDataset) -> Option<bool> {
    Some(data.citations.rate < 20.0)
}

fn negative_sentiment_spike(data: &GeoDataset) -> Option<bool> {
    Some(data.sentiment.negative > 25.0)
}

fn low_geo_score(data: &GeoDataset) -> Option<bool> {
    Some(data.report.score < 40.0)
}

fn medium_geo_score(data: &GeoDataset) -> Option<bool> {
    Some((40.0..65.0).contains(&data.report.score))
}

fn negative_score_trend(data: &GeoDataset) -> Option<bool> {
    Some(data.report.change < -5.0)
}

fn positive_momentum(data: &GeoDataset) -> Option<bool> {
    Some(data.report.change >= 3.0 && data.sentiment.positive > 55.0)
}

fn detection_rate_gap(data: &GeoDataset) -> Option<bool> {
    data.report.detection_rate.map(|rate| rate < 70.0)
}

fn competitive_benchmark(data: &GeoDataset) -> Option<bool> {
    let top = data
        .report
        .competitors
        .iter()
        .filter(|record| record.is_object())
        .map(|record| safe_num(first_present(record, COMPETITOR_SCORE_KEYS), 0.0))
        .reduce(f64::max)?;
    Some(top - data.report.score > 15.0)
}

fn engine_visibility_spread(data: &GeoDataset) -> Option<bool> {
    if data.report.engines.len() < 2 {
        return None;
    }
    let scores = data.report.engines.values().copied();
    let max = scores.clone().reduce(f64::max)?;
    let min = scores.reduce(f64::min)?;
    Some(max - min > 30.0)
}

/// Evaluate [`GEO_RULES`] against `dataset`.
#[must_use]
pub fn interpret(dataset: &GeoDataset) -> Vec<Insight> {
    interpret_with(&GEO_RULES, dataset)
}

/// Evaluate an arbitrary rule table against `dataset`.
#[must_use]
pub fn interpret_with(rules: &[Rule], dataset: &GeoDataset) -> Vec<Insight> {
    let triggered: Vec<&Rule> = rules.iter().filter(|rule| rule.triggers(dataset)).collect();
    let fired = |id: &str| triggered.iter().any(|rule| rule.id == id);

    let mut kept: Vec<&Rule> = triggered
        .iter()
        .copied()
        .filter(|rule| {
            !SUPPRESSIONS
                .iter()
                .any(|&(suppressed, by)| rule.id == suppressed && fired(by))
        })
        .collect();

    kept.sort_by_key(|rule| rule.severity.rank());
    kept.truncate(MAX_INSIGHTS);
    kept.into_iter().map(Insight::from).collect()
}
