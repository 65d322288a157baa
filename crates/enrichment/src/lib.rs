//! Enrichment crate for the film map.
//!
//! This crate contains the orchestrator that takes an uploaded CSV through
//! ingestion, filtering, concurrent lookup and scraping, and scoring, and
//! hands back one enriched record per eligible film in upload order.

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod report;

pub use config::{EnrichmentConfig, RatingRule};
pub use error::RunError;
pub use orchestrator::EnrichmentOrchestrator;
pub use report::{EndState, EnrichedFilm, EnrichmentReport, LookupErrorKind, RunStats, UnitState};
