//! # Sources Crate
//!
//! External signal sources for film enrichment.
//!
//! ## Components
//!
//! ### Metadata Lookup (`tmdb`)
//! Searches a movie-metadata service by title and optional year:
//! - Returns candidates in the service's rank order
//! - Fails with `LookupError` on transport errors or non-success statuses
//! - Resolves optional JSON fields into `CandidateMatch` once, at the boundary
//!
//! ### Match Selection (`selection`)
//! Picks one candidate per film: title+year match first, rank 0 otherwise.
//!
//! ### Auxiliary Scraper (`scraper`, `keywords`)
//! Fetches a free-text page per title and records which keyword classes
//! appear. Never fails: an unavailable page is the neutral signal.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{HttpScraper, LookupConfig, MetadataLookup, ScrapeConfig, SignalScraper, TmdbClient, select_match};
//!
//! let lookup = TmdbClient::new(LookupConfig::default().with_api_token(token))?;
//! let scraper = HttpScraper::new(ScrapeConfig::default())?;
//!
//! let candidates = lookup.search("Inception", Some("2010")).await?;
//! let selected = select_match(&candidates, "Inception", Some("2010"));
//! let signal = scraper.scrape("Inception").await;
//! ```

// Public modules
pub mod error;
pub mod keywords;
pub mod scraper;
pub mod selection;
pub mod tmdb;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{LookupError, ScrapeError};
pub use scraper::{HttpScraper, ScrapeConfig};
pub use selection::{MatchTier, select_match};
pub use tmdb::{LookupConfig, TmdbClient};
pub use traits::{MetadataLookup, SignalScraper};
pub use types::{CandidateMatch, LexicalSignal};
