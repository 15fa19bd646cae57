//! Content gap analysis over engines and search-term visibility.

use std::collections::BTreeMap;

use geo_core::access::round_to;
use geo_core::{Report, TermVisibility};
use serde::Serialize;

use crate::constants::{CONTENT_GAP_ENGINE_DROP_PTS, CONTENT_GAP_TERM_VISIBILITY};
use crate::text::{bar, center, line};

const SHOWN_ENGINE_GAPS: usize = 5;
const SHOWN_TERM_GAPS: usize = 8;
const RECOMMENDED_TERMS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineGap {
    pub engine: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineGaps {
    pub average: f64,
    /// Engines trailing the average by more than the drop threshold,
    /// weakest first.
    pub trailing: Vec<EngineGap>,
    /// Lowest-scoring engine overall, gap or not.
    pub weakest: EngineGap,
}

/// Engines and terms that trail the rest of the brand's visibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContentGaps {
    /// `None` when the report carries no engine data.
    pub engines: Option<EngineGaps>,
    /// `None` when there are no term visibility records.
    pub low_visibility_terms: Option<Vec<TermVisibility>>,
}

impl ContentGaps {
    #[must_use]
    pub fn analyze(engines: &BTreeMap<String, f64>, terms: &[TermVisibility]) -> Self {
        Self {
            engines: engine_gaps(engines),
            low_visibility_terms: (!terms.is_empty()).then(|| low_visibility(terms)),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.engines.is_none() && self.low_visibility_terms.is_none()
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut lines = vec![line('-'), center("CONTENT GAP ANALYSIS"), line('-')];

        if self.is_empty() {
            lines.push("  No data available for gap analysis.".to_string());
            lines.push(line('-'));
            return lines.join("\n");
        }

        if let Some(engines) = &self.engines {
            lines.push(format!(
                "  ENGINE GAPS (vs avg {}):",
                round_to(engines.average, 1)
            ));
            if engines.trailing.is_empty() {
                lines.push("  No significant engine gaps detected.".to_string());
            }
            for gap in engines.trailing.iter().take(SHOWN_ENGINE_GAPS) {
                lines.push(format!(
                    "  ▼ {:<14} score:{:>5}  gap:-{}",
                    gap.engine,
                    round_to(gap.score, 1),
                    round_to(engines.average - gap.score, 1)
                ));
            }
            lines.push(String::new());
        }

        if let Some(low) = &self.low_visibility_terms {
            lines.push(format!(
                "  LOW-VISIBILITY TERMS (<{CONTENT_GAP_TERM_VISIBILITY}%) — {} found:",
                low.len()
            ));
            if low.is_empty() {
                lines.push(format!(
                    "  All terms above {CONTENT_GAP_TERM_VISIBILITY}% visibility. ✓"
                ));
            }
            for term in low.iter().take(SHOWN_TERM_GAPS) {
                lines.push(format!(
                    "  {:<22.22} {:<20}{:>4}%",
                    term.term,
                    bar('░', term.visibility / 100.0, 20),
                    round_to(term.visibility, 0)
                ));
            }
            if low.len() > SHOWN_TERM_GAPS {
                lines.push(format!("  … and {} more gaps", low.len() - SHOWN_TERM_GAPS));
            }
            lines.push(String::new());
        }

        let recommendations = self.recommendations();
        if !recommendations.is_empty() {
            lines.push("  RECOMMENDATIONS:".to_string());
            lines.extend(recommendations);
        }

        lines.push(line('-'));
        lines.join("\n")
    }

    fn recommendations(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let mut step = 0;

        if let Some(low) = self.low_visibility_terms.as_ref().filter(|low| !low.is_empty()) {
            step += 1;
            let top = &low[..low.len().min(RECOMMENDED_TERMS)];
            lines.push(format!(
                "  {step}. Create content targeting top {} gap terms:",
                top.len()
            ));
            lines.extend(top.iter().map(|term| format!("     • \"{}\"", term.term)));
        }

        if let Some(engines) = &self.engines {
            step += 1;
            lines.push(format!(
                "  {step}. Optimise for {}: score {} vs avg {}",
                engines.weakest.engine,
                round_to(engines.weakest.score, 1),
                round_to(engines.average, 1)
            ));
        }

        lines
    }
}

fn engine_gaps(engines: &BTreeMap<String, f64>) -> Option<EngineGaps> {
    let mut ranked: Vec<EngineGap> = engines
        .iter()
        .map(|(engine, score)| EngineGap {
            engine: engine.clone(),
            score: if score.is_finite() { *score } else { 0.0 },
        })
        .collect();
    ranked.sort_by(|a, b| a.score.total_cmp(&b.score));
    let weakest = ranked.first()?.clone();

    #[allow(clippy::cast_precision_loss)]
    let average = ranked.iter().map(|e| e.score).sum::<f64>() / ranked.len() as f64;
    ranked.retain(|e| average - e.score > CONTENT_GAP_ENGINE_DROP_PTS);

    Some(EngineGaps {
        average,
        trailing: ranked,
        weakest,
    })
}

fn low_visibility(terms: &[TermVisibility]) -> Vec<TermVisibility> {
    let mut low: Vec<TermVisibility> = terms
        .iter()
        .filter(|t| t.visibility < CONTENT_GAP_TERM_VISIBILITY)
        .cloned()
        .collect();
    low.sort_by(|a, b| a.visibility.total_cmp(&b.visibility));
    low
}

/// Content gap block for a normalized report and its term visibility.
#[must_use]
pub fn analyze_content_gaps(report: &Report, terms: &[TermVisibility]) -> String {
    ContentGaps::analyze(&report.engines, terms).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn engines(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs
            .iter()
            .map(|(name, score)| ((*name).to_string(), *score))
            .collect()
    }

    fn term(term: &str, visibility: f64) -> TermVisibility {
        TermVisibility {
            term: term.to_string(),
            visibility,
        }
    }

    #[test]
    fn nothing_to_analyze() {
        let block = analyze_content_gaps(&Report::default(), &[]);
        assert!(block.contains("  No data available for gap analysis."));
        assert!(!block.contains("RECOMMENDATIONS"));
    }

    #[test]
    fn engines_trailing_average_by_more_than_threshold() {
        let gaps = ContentGaps::analyze(
            &engines(&[("chatgpt", 80.0), ("gemini", 70.0), ("grok", 10.0), ("claude", 40.0)]),
            &[],
        );
        let found = gaps.engines.unwrap();
        assert_eq!(found.average, 50.0);
        let names: Vec<&str> = found.trailing.iter().map(|g| g.engine.as_str()).collect();
        assert_eq!(names, vec!["grok"]);
        assert_eq!(found.weakest.engine, "grok");
    }

    #[test]
    fn engine_gap_rows_and_recommendation() {
        let block =
            ContentGaps::analyze(&engines(&[("chatgpt", 80.0), ("grok", 20.0)]), &[]).render();
        assert!(block.contains("  ENGINE GAPS (vs avg 50):"));
        assert!(block.contains("  ▼ grok           score:   20  gap:-30"));
        assert!(block.contains("  1. Optimise for grok: score 20 vs avg 50"));
    }

    #[test]
    fn engine_gap_rows_capped_weakest_first() {
        let mut scores = vec![("a", 100.0), ("b", 100.0), ("c", 100.0)];
        let weak = ["e1", "e2", "e3", "e4", "e5", "e6", "e7"];
        scores.extend(weak.iter().zip(1_u8..).map(|(name, score)| (*name, f64::from(score))));
        let gaps = ContentGaps::analyze(&engines(&scores), &[]);
        assert_eq!(gaps.engines.as_ref().unwrap().trailing.len(), 7);

        let block = gaps.render();
        assert!(block.contains("  ENGINE GAPS (vs avg 32.8):"));
        let rows: Vec<&str> = block.lines().filter(|l| l.starts_with("  ▼ ")).collect();
        assert_eq!(rows.len(), SHOWN_ENGINE_GAPS);
        assert_eq!(rows[0], "  ▼ e1             score:    1  gap:-31.8");
        assert!(rows[4].starts_with("  ▼ e5 "));
        assert!(!block.contains("▼ e6"));
        assert!(!block.contains("▼ e7"));
        assert!(block.contains("  1. Optimise for e1: score 1 vs avg 32.8"));
    }

    #[test]
    fn engine_gap_threshold_is_exclusive() {
        let gaps = ContentGaps::analyze(&engines(&[("a", 70.0), ("b", 30.0)]), &[]);
        let found = gaps.engines.unwrap();
        assert_eq!(found.average, 50.0);
        assert!(found.trailing.is_empty());
        assert_eq!(found.weakest.engine, "b");
    }

    #[test]
    fn even_engines_report_no_gaps_but_still_recommend_weakest() {
        let block = ContentGaps::analyze(&engines(&[("a", 50.0), ("b", 45.0)]), &[]).render();
        assert!(block.contains("  No significant engine gaps detected."));
        assert!(block.contains("  1. Optimise for b: score 45 vs avg 47.5"));
    }

    #[test]
    fn low_visibility_terms_sorted_and_capped() {
        let terms: Vec<TermVisibility> = (0..10)
            .map(|i| term(&format!("term {i}"), f64::from(45 - i * 4)))
            .chain([term("popular", 90.0)])
            .collect();
        let gaps = ContentGaps::analyze(&BTreeMap::new(), &terms);
        let low = gaps.low_visibility_terms.as_ref().unwrap();
        assert_eq!(low.len(), 10);
        assert_eq!(low[0].term, "term 9");
        assert_eq!(low[0].visibility, 9.0);

        let block = gaps.render();
        assert!(block.contains("  LOW-VISIBILITY TERMS (<50%) — 10 found:"));
        assert!(block.contains("  … and 2 more gaps"));
        assert!(!block.contains("popular"));
        assert!(block.contains("  1. Create content targeting top 3 gap terms:"));
        assert!(block.contains("     • \"term 9\""));
        assert!(block.contains("     • \"term 7\""));
        assert!(!block.contains("Optimise for"));
    }

    #[test]
    fn term_row_layout() {
        let block = ContentGaps::analyze(&BTreeMap::new(), &[term("crm software", 25.0)]).render();
        assert!(block.contains(&format!(
            "  crm software{} {}{}  25%",
            " ".repeat(10),
            "░".repeat(5),
            " ".repeat(15)
        )));
    }

    #[test]
    fn all_terms_visible() {
        let block = ContentGaps::analyze(&BTreeMap::new(), &[term("crm", 75.0)]).render();
        assert!(block.contains("  LOW-VISIBILITY TERMS (<50%) — 0 found:"));
        assert!(block.contains("  All terms above 50% visibility. ✓"));
        assert!(!block.contains("RECOMMENDATIONS"));
    }

    #[test]
    fn recommendations_are_numbered_in_order() {
        let block = ContentGaps::analyze(
            &engines(&[("chatgpt", 80.0), ("grok", 20.0)]),
            &[term("crm", 10.0)],
        )
        .render();
        let terms_at = block.find("  1. Create content targeting top 1 gap terms:").unwrap();
        let engine_at = block.find("  2. Optimise for grok").unwrap();
        assert!(terms_at < engine_at);
    }
}
