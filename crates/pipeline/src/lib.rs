//! Pipeline for filtering and scoring uploaded films.
//!
//! This crate provides:
//! - Filter trait and implementations for narrowing an upload
//! - FilterPipeline for composing filters
//! - The scoring engine that turns metadata and keyword signals into a
//!   position on the complexity × intent map
//!
//! ## Architecture
//! The pipeline processes films in stages:
//! 1. Filters remove films that should not be enriched (e.g. not top-rated)
//! 2. The enrichment orchestrator fetches metadata and keyword signals
//! 3. `scoring::score` combines them into a `ScorePair`
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterPipeline, score};
//! use pipeline::filters::RatingFilter;
//!
//! let pipeline = FilterPipeline::new().add_filter(RatingFilter::top_rated());
//! let eligible = pipeline.apply(parsed.films);
//!
//! let position = score(Some(&candidate), &signal);
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod scoring;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use scoring::{ScoreBreakdown, ScorePair, score, score_with_breakdown};
