//! Core traits for the external signal sources.
//!
//! The orchestrator only talks to these traits, so the HTTP clients can be
//! swapped for in-memory doubles in tests.
//!
//! ## Design Note
//! - `Send + Sync` lets one client be shared across every concurrent unit
//! - `search` can fail; `scrape` cannot, because the auxiliary signal is
//!   best-effort and an unavailable page is simply the neutral signal

use async_trait::async_trait;

use crate::error::LookupError;
use crate::types::{CandidateMatch, LexicalSignal};

/// Searches a movie-metadata service.
#[async_trait]
pub trait MetadataLookup: Send + Sync {
    /// Returns the name of this source (for logging)
    fn name(&self) -> &str;

    /// Search by title and optional release year.
    ///
    /// # Returns
    /// * `Ok(vec![])` - The service answered but found nothing
    /// * `Ok(candidates)` - Candidates in the service's rank order
    /// * `Err` - Transport failure, non-success status or undecodable body
    async fn search(
        &self,
        title: &str,
        year: Option<&str>,
    ) -> Result<Vec<CandidateMatch>, LookupError>;
}

/// Fetches a free-text document about a film and extracts keyword signals.
#[async_trait]
pub trait SignalScraper: Send + Sync {
    /// Returns the name of this source (for logging)
    fn name(&self) -> &str;

    /// Never fails; any fetch problem yields [`LexicalSignal::neutral`].
    async fn scrape(&self, title: &str) -> LexicalSignal;
}
