//! Engine strength profile: engines ranked by visibility with a bar chart.

use std::collections::BTreeMap;

use geo_core::access::round_to;
use geo_core::Report;
use serde::Serialize;

use crate::text::{bar, center, line};

const BAR_WIDTH: usize = 22;
const HIGHLIGHTED: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Top,
    Bottom,
    Middle,
}

impl Tier {
    const fn tag(self) -> &'static str {
        match self {
            Self::Top => " ✦",
            Self::Bottom => " ▼",
            Self::Middle => "  ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineStanding {
    pub name: String,
    pub score: f64,
    pub tier: Tier,
}

/// Engines sorted by score descending, with the first and last three marked.
///
/// Tiers follow position in the sorted order, so ties at a boundary are split
/// by that order rather than by value. When there are fewer than six engines
/// an engine can be both; the top tier wins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineProfile {
    pub engines: Vec<EngineStanding>,
    pub average: f64,
    /// Largest score, floored at 1 so bars never divide by zero.
    pub max: f64,
}

impl EngineProfile {
    #[must_use]
    pub fn from_engines(engines: &BTreeMap<String, f64>) -> Self {
        let mut ranked: Vec<(&String, f64)> = engines
            .iter()
            .map(|(name, score)| (name, if score.is_finite() { *score } else { 0.0 }))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let count = ranked.len();
        let standings = ranked
            .into_iter()
            .enumerate()
            .map(|(position, (name, score))| EngineStanding {
                name: name.clone(),
                score,
                tier: if position < HIGHLIGHTED {
                    Tier::Top
                } else if position + HIGHLIGHTED >= count {
                    Tier::Bottom
                } else {
                    Tier::Middle
                },
            })
            .collect::<Vec<_>>();

        #[allow(clippy::cast_precision_loss)]
        let average = if count == 0 {
            0.0
        } else {
            standings.iter().map(|e| e.score).sum::<f64>() / count as f64
        };
        let max = standings.iter().map(|e| e.score).fold(1.0, f64::max);

        Self {
            engines: standings,
            average,
            max,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    /// Render the profile as a fixed-width block.
    #[must_use]
    pub fn render(&self) -> String {
        if self.is_empty() {
            return [
                line('-'),
                " ENGINE STRENGTH PROFILE".to_string(),
                line('-'),
                "  No engine data available.".to_string(),
                line('-'),
            ]
            .join("\n");
        }

        let mut lines = vec![
            line('-'),
            center("ENGINE STRENGTH PROFILE"),
            line('-'),
            format!("  {:<12} {:<BAR_WIDTH$}Score", "Engine", "Visibility"),
            format!(
                "  {:<12} {:<BAR_WIDTH$}{:>5}",
                "Average",
                bar('─', self.average / self.max, BAR_WIDTH),
                round_to(self.average, 1)
            ),
            line('-'),
        ];

        for engine in &self.engines {
            lines.push(format!(
                "  {:<12.12} {:<BAR_WIDTH$}{:>5}{}",
                engine.name,
                bar('█', engine.score / self.max, BAR_WIDTH),
                round_to(engine.score, 1),
                engine.tier.tag()
            ));
        }

        lines.push(line('-'));
        lines.push("  ✦ Top-3 engines  ▼ Bottom-3 engines".to_string());
        lines.join("\n")
    }
}

/// Engine strength block for a normalized report.
#[must_use]
pub fn analyze_engine_strength(report: &Report) -> String {
    EngineProfile::from_engines(&report.engines).render()
}
