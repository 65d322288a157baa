//! Output records of an enrichment run.

use data_loader::FilmInput;
use pipeline::ScorePair;
use serde::{Deserialize, Serialize};
use sources::CandidateMatch;

/// Why a film has no metadata. Serialized as `"unavailable"` or `"timed_out"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupErrorKind {
    /// The lookup service failed for this film
    Unavailable,
    /// The unit ran out of time before the lookup answered
    TimedOut,
}

/// Terminal state of one film's unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitState {
    Scored,
    Failed,
}

/// One uploaded film with whatever metadata and score it ended up with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedFilm {
    pub name: String,
    pub year: String,
    pub rating: String,
    pub poster_url: Option<String>,
    pub overview: Option<String>,
    /// `None` when no candidate was matched
    pub genres: Option<Vec<String>>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u32>,
    pub score: ScorePair,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookup_error: Option<LookupErrorKind>,
    /// Whether a search candidate was selected for this film
    #[serde(default)]
    pub matched: bool,
}

impl EnrichedFilm {
    pub fn new(
        film: FilmInput,
        candidate: Option<&CandidateMatch>,
        score: ScorePair,
        lookup_error: Option<LookupErrorKind>,
    ) -> Self {
        Self {
            name: film.name,
            year: film.year,
            rating: film.rating,
            poster_url: candidate.and_then(|c| c.poster_url.clone()),
            overview: candidate.and_then(|c| c.overview.clone()),
            genres: candidate.map(|c| c.genres.clone()),
            vote_average: candidate.and_then(|c| c.vote_average),
            vote_count: candidate.and_then(|c| c.vote_count),
            score,
            lookup_error,
            matched: candidate.is_some(),
        }
    }

    pub fn state(&self) -> UnitState {
        if self.lookup_error.is_some() {
            UnitState::Failed
        } else {
            UnitState::Scored
        }
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndState {
    /// Nothing survived the rating filter; no lookups were made
    NoEligibleFilms,
    /// Films were eligible but every lookup failed; all scores are
    /// metadata-neutral
    AllLookupsFailed,
    Completed,
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Data rows parsed from the upload
    pub total_rows: usize,
    /// Rows skipped for having fewer cells than the header
    pub ragged_rows: usize,
    /// Rows that passed the rating filter
    pub eligible: usize,
    pub matched: usize,
    /// Films with a lookup error of any kind, timeouts included
    pub lookup_failures: usize,
    pub timed_out: usize,
}

/// Everything a run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentReport {
    /// One entry per eligible film, in upload order
    pub films: Vec<EnrichedFilm>,
    pub end_state: EndState,
    pub stats: RunStats,
}

impl EnrichmentReport {
    /// Tally the enriched films and derive the end state.
    pub fn new(films: Vec<EnrichedFilm>, total_rows: usize, ragged_rows: usize) -> Self {
        let mut stats = RunStats {
            total_rows,
            ragged_rows,
            eligible: films.len(),
            ..RunStats::default()
        };
        for film in &films {
            if film.matched {
                stats.matched += 1;
            }
            match film.lookup_error {
                Some(LookupErrorKind::TimedOut) => {
                    stats.lookup_failures += 1;
                    stats.timed_out += 1;
                }
                Some(LookupErrorKind::Unavailable) => stats.lookup_failures += 1,
                None => {}
            }
        }

        let end_state = if stats.eligible == 0 {
            EndState::NoEligibleFilms
        } else if stats.lookup_failures == stats.eligible {
            EndState::AllLookupsFailed
        } else {
            EndState::Completed
        };

        Self {
            films,
            end_state,
            stats,
        }
    }
}
