//! # geo-core
//!
//! Canonical model and normalization pipeline for GEO (Generative Engine
//! Optimization) analytics payloads.
//!
//! The provider emits several incompatible response shapes per endpoint, so
//! payloads are kept as untyped [`serde_json::Value`] trees and every field is
//! read through the [`access`] helpers. The [`normalize`] functions map those
//! trees onto the fixed types in [`model`]; [`dataset`] assembles the four
//! endpoint payloads into one [`GeoDataset`], applying report-embedded
//! fallbacks when a standalone endpoint failed.
//!
//! Nothing in this crate fails: malformed input degrades to typed defaults.

pub mod access;
pub mod dataset;
pub mod model;
pub mod normalize;

pub use dataset::RawPayloads;
pub use model::{
    Citations, Competitor, GeoDataset, Report, ReportFallback, SearchTerm, Sentiment,
    TermVisibility, DEFAULT_BRAND_NAME,
};
