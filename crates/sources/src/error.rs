//! Error types for the external sources.

use thiserror::Error;

/// Errors from the metadata lookup. Every variant means "lookup unavailable"
/// for the film it names; none of them is fatal to a batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The request never produced a response (DNS, connect, timeout, ...)
    #[error("Metadata lookup for '{title}' failed: {reason}")]
    Network { title: String, reason: String },

    /// The service answered with a non-success status
    #[error("Metadata lookup for '{title}' returned HTTP {status}")]
    Status { title: String, status: u16 },

    /// The body could not be decoded as a search response
    #[error("Metadata lookup for '{title}' returned an invalid body: {reason}")]
    Decode { title: String, reason: String },
}

impl LookupError {
    /// The film title this error belongs to.
    pub fn title(&self) -> &str {
        match self {
            LookupError::Network { title, .. }
            | LookupError::Status { title, .. }
            | LookupError::Decode { title, .. } => title,
        }
    }
}

/// Errors fetching the auxiliary document. These are logged and folded into
/// the neutral signal; they never leave the scraper.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScrapeError {
    #[error("Scrape of '{title}' failed: {reason}")]
    Network { title: String, reason: String },

    #[error("Scrape of '{title}' returned HTTP {status}")]
    Status { title: String, status: u16 },
}
