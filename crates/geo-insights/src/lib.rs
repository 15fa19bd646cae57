//! # geo-insights
//!
//! Everything derived from an already-normalized [`geo_core::GeoDataset`]:
//!
//! - [`rules`]: the declarative insight rule table and its evaluator.
//! - [`engine_profile`]: per-engine visibility ranking and bar chart.
//! - [`content_gaps`]: engines and search terms trailing the average.
//! - [`reputation`]: keyword-sentiment reputation score.
//!
//! The block producers return fixed-width text built with [`text`].

pub mod constants;
pub mod content_gaps;
pub mod engine_profile;
pub mod reputation;
pub mod rules;
pub mod text;

pub use content_gaps::{analyze_content_gaps, ContentGaps};
pub use engine_profile::{analyze_engine_strength, EngineProfile};
pub use reputation::{compute_reputation_score, ReputationInput, ReputationScore};
pub use rules::{interpret, Insight, Rule, Severity, GEO_RULES};
