//! Reputation score from keyword-level sentiment.
//!
//! The score blends three signals into `raw`, then maps `-1..=1` onto
//! `0..=100`:
//!
//! - base ratio `(pos - 2*neg) / total`, so negative mentions count double
//! - engine score, a weighted average of per-engine sentiment
//! - severity penalty `Σ (count/total)²` over negative keywords, which
//!   punishes one dominant complaint harder than many small ones

use geo_core::access::{
    first_present, first_text, first_truthy, round_half_up, round_to, safe_array, safe_get,
    safe_num,
};
use serde::Serialize;
use serde_json::Value;

use crate::constants::{
    engine_weight, REPUTATION_BASE_RATIO_WEIGHT, REPUTATION_ENGINE_SCORE_WEIGHT,
    REPUTATION_SEVERITY_PENALTY_WEIGHT, TOP_RISK_KEYWORDS,
};
use crate::text::{center, line};

const TOP_POSITIVE_KEYWORDS: usize = 5;
const SCORE_BAR_WIDTH: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: f64,
}

impl KeywordCount {
    /// Read `{keyword|text, count|frequency}` or a bare scalar with count 1.
    /// `null` entries yield nothing.
    #[must_use]
    pub fn from_value(raw: &Value) -> Option<Self> {
        match raw {
            Value::Null => None,
            Value::Object(_) => Some(Self {
                keyword: first_text(raw, &["keyword", "text"]).unwrap_or_else(|| "unknown".into()),
                count: safe_num(first_truthy(raw, &["count", "frequency"]), 1.0),
            }),
            Value::String(s) => Some(Self::single(s.clone())),
            other => Some(Self::single(other.to_string())),
        }
    }

    fn single(keyword: String) -> Self {
        Self {
            keyword,
            count: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    #[default]
    Stable,
}

impl Trend {
    #[must_use]
    pub fn parse(raw: Option<&Value>) -> Self {
        match raw.and_then(Value::as_str) {
            Some("up" | "improving") => Self::Improving,
            Some("down" | "declining") => Self::Declining,
            _ => Self::Stable,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Declining => "declining",
            Self::Stable => "stable",
        }
    }

    #[must_use]
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Improving => "↑",
            Self::Declining => "↓",
            Self::Stable => "→",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineSentiment {
    pub engine: String,
    pub sentiment: f64,
}

/// Keyword-sentiment inputs for [`compute_reputation_score`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReputationInput {
    pub positive: Vec<KeywordCount>,
    pub negative: Vec<KeywordCount>,
    pub neutral: Vec<KeywordCount>,
    pub engines: Vec<EngineSentiment>,
    pub trend: Trend,
}

impl ReputationInput {
    /// Read keyword lists, engine breakdown and trend from a raw sentiment
    /// payload, with or without a `data` envelope.
    #[must_use]
    pub fn from_value(raw: Option<&Value>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        let body = raw.get("data").filter(|data| data.is_object()).unwrap_or(raw);

        let keywords = |key: &str| -> Vec<KeywordCount> {
            safe_array(safe_get(body, key))
                .iter()
                .filter_map(KeywordCount::from_value)
                .collect()
        };
        let engines = safe_array(safe_get(body, "engineBreakdown"))
            .iter()
            .filter(|entry| entry.is_object())
            .map(|entry| EngineSentiment {
                engine: first_text(entry, &["engine"]).unwrap_or_else(|| "unknown".into()),
                sentiment: safe_num(first_present(entry, &["sentiment"]), 0.0),
            })
            .collect();

        Self {
            positive: keywords("positiveKeywords"),
            negative: keywords("negativeKeywords"),
            neutral: keywords("neutralKeywords"),
            engines,
            trend: Trend::parse(safe_get(body, "trend")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReputationLabel {
    Excellent,
    Good,
    Fair,
    Poor,
    Critical,
}

impl ReputationLabel {
    #[must_use]
    pub const fn from_score(score: u32) -> Self {
        match score {
            75.. => Self::Excellent,
            60..=74 => Self::Good,
            45..=59 => Self::Fair,
            30..=44 => Self::Poor,
            _ => Self::Critical,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::Critical => "Critical",
        }
    }
}

/// Share of keyword mentions per polarity, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeywordBreakdown {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReputationScore {
    pub score: u32,
    pub label: ReputationLabel,
    pub trend: Trend,
    pub breakdown: KeywordBreakdown,
    pub top_positive: Vec<String>,
    pub risk_areas: Vec<String>,
}

impl ReputationScore {
    #[must_use]
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Brand health is {} ({}/100) and {}.",
            self.label.as_str().to_lowercase(),
            self.score,
            self.trend.as_str()
        );
        if !self.risk_areas.is_empty() {
            let watch: Vec<&str> = self.risk_areas.iter().take(2).map(String::as_str).collect();
            summary.push_str(&format!(" Monitor: {}.", watch.join(", ")));
        }
        summary
    }

    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn render(&self) -> String {
        let filled = (f64::from(self.score) / 100.0 * SCORE_BAR_WIDTH as f64).round() as usize;
        let filled = filled.min(SCORE_BAR_WIDTH);
        let score_bar = format!(
            "{}{}",
            "█".repeat(filled),
            "░".repeat(SCORE_BAR_WIDTH - filled)
        );

        let positives = if self.top_positive.is_empty() {
            "  No positive keywords found.".to_string()
        } else {
            format!("  Top positive signals:\n    {}", self.top_positive.join(", "))
        };
        let risks = if self.risk_areas.is_empty() {
            "  No significant risk areas.".to_string()
        } else {
            format!("  Risk areas:\n    {}", self.risk_areas.join(", "))
        };

        [
            line('-'),
            center("REPUTATION SCORE & SUMMARY"),
            line('-'),
            format!("  Score:  {score_bar} {}/100", self.score),
            format!(
                "  Status: {}   Trend: {} {}",
                self.label.as_str(),
                self.trend.arrow(),
                self.trend.as_str()
            ),
            String::new(),
            "  Sentiment breakdown:".to_string(),
            format!(
                "    Positive: {}%  Negative: {}%  Neutral: {}%",
                self.breakdown.positive, self.breakdown.negative, self.breakdown.neutral
            ),
            String::new(),
            positives,
            String::new(),
            risks,
            String::new(),
            format!("  Summary: {}", self.summary()),
            line('-'),
        ]
        .join("\n")
    }
}

fn total_count(keywords: &[KeywordCount]) -> f64 {
    keywords.iter().map(|k| k.count).sum()
}

fn top_keywords(keywords: &[KeywordCount], limit: usize) -> Vec<String> {
    let mut ranked: Vec<&KeywordCount> = keywords.iter().collect();
    ranked.sort_by(|a, b| b.count.total_cmp(&a.count));
    ranked
        .into_iter()
        .take(limit)
        .map(|k| k.keyword.clone())
        .collect()
}

/// Weighted mean of per-engine sentiment over the weights of the engines
/// present; 0 without a breakdown.
fn engine_score(engines: &[EngineSentiment]) -> f64 {
    let (weighted, weights) = engines.iter().fold((0.0, 0.0), |(sum, weights), e| {
        let weight = engine_weight(&e.engine);
        (sum + e.sentiment * weight, weights + weight)
    });
    if weights > 0.0 { weighted / weights } else { 0.0 }
}

#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn compute_reputation_score(input: &ReputationInput) -> ReputationScore {
    let positive = total_count(&input.positive);
    let negative = total_count(&input.negative);
    let neutral = total_count(&input.neutral);
    // An empty keyword set divides by 1.
    let sum = positive + negative + neutral;
    let total = if sum > 0.0 { sum } else { 1.0 };

    let base_ratio = (positive - 2.0 * negative) / total;
    let severity_penalty: f64 = input
        .negative
        .iter()
        .map(|k| (k.count / total).powi(2))
        .sum();

    let raw = base_ratio * REPUTATION_BASE_RATIO_WEIGHT
        + engine_score(&input.engines) * REPUTATION_ENGINE_SCORE_WEIGHT
        - severity_penalty * REPUTATION_SEVERITY_PENALTY_WEIGHT;
    let scaled = ((raw + 1.0) * 50.0).clamp(0.0, 100.0);
    let score = if scaled.is_nan() { 0 } else { round_half_up(scaled) as u32 };

    tracing::debug!(score, base_ratio, severity_penalty, "computed reputation score");

    ReputationScore {
        score,
        label: ReputationLabel::from_score(score),
        trend: input.trend,
        breakdown: KeywordBreakdown {
            positive: round_to(positive / total * 100.0, 1),
            negative: round_to(negative / total * 100.0, 1),
            neutral: round_to(neutral / total * 100.0, 1),
        },
        top_positive: top_keywords(&input.positive, TOP_POSITIVE_KEYWORDS),
        risk_areas: top_keywords(&input.negative, TOP_RISK_KEYWORDS),
    }
}
