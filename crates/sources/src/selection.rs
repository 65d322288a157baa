//! Choosing one candidate out of a search result list.
//!
//! ## Algorithm
//! 1. Tier 1: the first candidate whose title contains the queried title
//!    (case-insensitive substring) AND whose release date starts with the
//!    queried year.
//! 2. Tier 2: otherwise the first candidate in the list, as ranked by the
//!    service.
//!
//! Without a queried year every release date qualifies, so tier 1 reduces to
//! the title test.

use crate::types::CandidateMatch;

/// Which tier produced the selected candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    TitleAndYear,
    FirstResult,
}

/// Pick the candidate to enrich a film with, or `None` for an empty list.
pub fn select_match<'a>(
    candidates: &'a [CandidateMatch],
    title: &str,
    year: Option<&str>,
) -> Option<(&'a CandidateMatch, MatchTier)> {
    let wanted_title = title.to_lowercase();
    let wanted_year = year.unwrap_or("");

    candidates
        .iter()
        .find(|c| {
            c.title.to_lowercase().contains(&wanted_title)
                && c.release_date.starts_with(wanted_year)
        })
        .map(|c| (c, MatchTier::TitleAndYear))
        .or_else(|| candidates.first().map(|c| (c, MatchTier::FirstResult)))
}
