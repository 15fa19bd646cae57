//! Tuning constants for the GEO analyses.

/// Per-engine weight in the reputation engine score. Roughly sums to 1.0.
pub const ENGINE_WEIGHTS: &[(&str, f64)] = &[
    ("chatgpt", 0.30),
    ("perplexity", 0.20),
    ("gemini", 0.18),
    ("claude", 0.12),
    ("deepseek", 0.05),
    ("ai_overview", 0.05),
    ("grok", 0.04),
    ("mistral", 0.03),
    ("ai_mode", 0.03),
];

/// Weight for engines missing from [`ENGINE_WEIGHTS`].
pub const ENGINE_WEIGHT_DEFAULT: f64 = 0.02;

/// Weight of an engine by case-insensitive name.
#[must_use]
pub fn engine_weight(engine: &str) -> f64 {
    ENGINE_WEIGHTS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(engine))
        .map_or(ENGINE_WEIGHT_DEFAULT, |(_, weight)| *weight)
}

/// An engine trailing the engine average by more than this many points is a
/// content gap.
pub const CONTENT_GAP_ENGINE_DROP_PTS: f64 = 20.0;

/// Search terms below this visibility percentage are content gaps.
pub const CONTENT_GAP_TERM_VISIBILITY: f64 = 50.0;

/// Reputation score weights: `base*0.60 + engine*0.20 - penalty*0.20`.
pub const REPUTATION_BASE_RATIO_WEIGHT: f64 = 0.60;
pub const REPUTATION_ENGINE_SCORE_WEIGHT: f64 = 0.20;
pub const REPUTATION_SEVERITY_PENALTY_WEIGHT: f64 = 0.20;

/// Number of negative keywords reported as risk areas.
pub const TOP_RISK_KEYWORDS: usize = 5;
