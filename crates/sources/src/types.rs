//! Domain types shared by the lookup client, the scraper and the scoring engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One search result from the metadata service.
///
/// Optional JSON fields are resolved once when the response is decoded, so a
/// missing field and an explicit `null` both end up as `None` (or an empty
/// genre list) here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMatch {
    pub title: String,
    /// Release date as reported by the service, e.g. "2010-07-15". May be
    /// empty. Match selection only looks at its prefix.
    pub release_date: String,
    pub poster_path: Option<String>,
    /// Full poster URL built from the configured image base.
    pub poster_url: Option<String>,
    pub overview: Option<String>,
    /// Genre names in the order the service reported them.
    pub genres: Vec<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u32>,
}

impl CandidateMatch {
    /// A bare candidate with only a title and release date.
    pub fn new(title: impl Into<String>, release_date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            release_date: release_date.into(),
            poster_path: None,
            poster_url: None,
            overview: None,
            genres: Vec::new(),
            vote_average: None,
            vote_count: None,
        }
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_vote_average(mut self, vote_average: f64) -> Self {
        self.vote_average = Some(vote_average);
        self
    }

    pub fn with_vote_count(mut self, vote_count: u32) -> Self {
        self.vote_count = Some(vote_count);
        self
    }

    pub fn with_overview(mut self, overview: impl Into<String>) -> Self {
        self.overview = Some(overview.into());
        self
    }

    pub fn with_poster(mut self, path: impl Into<String>, url: impl Into<String>) -> Self {
        self.poster_path = Some(path.into());
        self.poster_url = Some(url.into());
        self
    }
}

/// Keywords found in the auxiliary free-text document.
///
/// Both sets hold the lowercase keyword as listed in [`crate::keywords`],
/// not the text as it appeared on the page. An empty signal is the neutral
/// signal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexicalSignal {
    pub complexity_keywords_found: BTreeSet<String>,
    pub reception_keywords_found: BTreeSet<String>,
}

impl LexicalSignal {
    /// The signal used when the scrape is unavailable.
    pub fn neutral() -> Self {
        Self::default()
    }

    pub fn is_neutral(&self) -> bool {
        self.complexity_keywords_found.is_empty() && self.reception_keywords_found.is_empty()
    }
}
