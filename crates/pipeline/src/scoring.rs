//! Scoring engine: places a film on the complexity × intent map.
//!
//! ## Axes
//! - x: narrative complexity, 0 = simple/linear, 1 = complex/nonlinear
//! - y: artistic intent, 0 = commercial, 1 = artistic
//!
//! ## Algorithm
//! Structured metadata is applied as a cascade where later rules overwrite
//! earlier ones:
//! 1. x = 0.5, y = 0.5
//! 2. genres intersect {science fiction, mystery, drama} → x = 0.3, then
//!    genres intersect {action, comedy} → x = 0.7 (second check wins)
//! 3. vote average present → y = 0.8 if > 7.0, else 0.4
//! 4. overview mentions "experimental" → x = 0.2, y = 0.9
//!
//! The scraped keyword signal is reduced to its own pair with the same
//! two-tier override shape (default 0.5 per axis), and the final score is
//! the average of the two pairs, clamped to [0, 1]. The scrape is only ever
//! averaged in; it never overrides the cascade.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use sources::keywords::{
    COMPLEXITY_LOWERING, COMPLEXITY_RAISING, RECEPTION_LOWERING, RECEPTION_RAISING,
};
use sources::{CandidateMatch, LexicalSignal};

/// Neutral value for both axes.
pub const NEUTRAL: f64 = 0.5;

/// Genres that set x to [`COMPLEX_GENRE_X`]. Compared case-insensitively.
pub const COMPLEX_GENRES: [&str; 3] = ["science fiction", "mystery", "drama"];

/// Genres that set x to [`SIMPLE_GENRE_X`], overriding [`COMPLEX_GENRES`].
pub const SIMPLE_GENRES: [&str; 2] = ["action", "comedy"];

pub const COMPLEX_GENRE_X: f64 = 0.3;
pub const SIMPLE_GENRE_X: f64 = 0.7;

/// Vote averages strictly above this count as acclaimed.
pub const ACCLAIM_THRESHOLD: f64 = 7.0;
pub const ACCLAIMED_Y: f64 = 0.8;
pub const UNACCLAIMED_Y: f64 = 0.4;

/// Overview keyword that overrides both axes.
pub const EXPERIMENTAL_KEYWORD: &str = "experimental";
pub const EXPERIMENTAL_X: f64 = 0.2;
pub const EXPERIMENTAL_Y: f64 = 0.9;

/// A position on the map. Both coordinates are in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScorePair {
    pub x: f64,
    pub y: f64,
}

impl ScorePair {
    pub const NEUTRAL: ScorePair = ScorePair {
        x: NEUTRAL,
        y: NEUTRAL,
    };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp both axes into [0, 1]; NaN becomes neutral.
    pub fn clamped(self) -> Self {
        let clamp = |v: f64| if v.is_nan() { NEUTRAL } else { v.clamp(0.0, 1.0) };
        Self {
            x: clamp(self.x),
            y: clamp(self.y),
        }
    }

    /// Component-wise average of two pairs.
    pub fn blend(self, other: ScorePair) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

impl Default for ScorePair {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Intermediate values of one scoring pass, for explaining a position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// After the metadata cascade (steps 1 to 4).
    pub metadata: ScorePair,
    /// Derived from the scraped keywords alone.
    pub signal: ScorePair,
    /// Blended and clamped final score.
    pub blended: ScorePair,
}

fn has_genre(genres: &[String], wanted: &[&str]) -> bool {
    genres
        .iter()
        .any(|genre| wanted.contains(&genre.trim().to_lowercase().as_str()))
}

fn found_any(found: &BTreeSet<String>, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| found.contains(*keyword))
}

/// Run the metadata cascade. An absent candidate yields the neutral pair.
pub fn metadata_axes(candidate: Option<&CandidateMatch>) -> ScorePair {
    let mut pair = ScorePair::NEUTRAL;
    let Some(candidate) = candidate else {
        return pair;
    };

    if has_genre(&candidate.genres, &COMPLEX_GENRES) {
        pair.x = COMPLEX_GENRE_X;
    }
    if has_genre(&candidate.genres, &SIMPLE_GENRES) {
        pair.x = SIMPLE_GENRE_X;
    }

    if let Some(vote_average) = candidate.vote_average {
        pair.y = if vote_average > ACCLAIM_THRESHOLD {
            ACCLAIMED_Y
        } else {
            UNACCLAIMED_Y
        };
    }

    let experimental = candidate
        .overview
        .as_deref()
        .map(|overview| overview.to_lowercase().contains(EXPERIMENTAL_KEYWORD))
        .unwrap_or(false);
    if experimental {
        pair = ScorePair::new(EXPERIMENTAL_X, EXPERIMENTAL_Y);
    }

    pair
}

/// Reduce a keyword signal to a pair, with the same override order as the
/// metadata genre and vote rules.
pub fn signal_axes(signal: &LexicalSignal) -> ScorePair {
    let mut pair = ScorePair::NEUTRAL;

    if found_any(&signal.complexity_keywords_found, &COMPLEXITY_LOWERING) {
        pair.x = COMPLEX_GENRE_X;
    }
    if found_any(&signal.complexity_keywords_found, &COMPLEXITY_RAISING) {
        pair.x = SIMPLE_GENRE_X;
    }

    if found_any(&signal.reception_keywords_found, &RECEPTION_RAISING) {
        pair.y = ACCLAIMED_Y;
    }
    if found_any(&signal.reception_keywords_found, &RECEPTION_LOWERING) {
        pair.y = UNACCLAIMED_Y;
    }

    pair
}

/// Score a film, keeping the intermediate pairs.
pub fn score_with_breakdown(
    candidate: Option<&CandidateMatch>,
    signal: &LexicalSignal,
) -> ScoreBreakdown {
    let metadata = metadata_axes(candidate);
    let signal = signal_axes(signal);
    ScoreBreakdown {
        metadata,
        signal,
        blended: metadata.blend(signal).clamped(),
    }
}

/// Score a film. Pure and deterministic.
pub fn score(candidate: Option<&CandidateMatch>, signal: &LexicalSignal) -> ScorePair {
    score_with_breakdown(candidate, signal).blended
}
