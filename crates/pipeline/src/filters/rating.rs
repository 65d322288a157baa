//! Filter to keep films carrying one exact rating value.
//!
//! The default keeps only top-rated films: the highest value the exporting
//! site uses, written as the literal "5".

use crate::traits::Filter;
use data_loader::FilmInput;

/// The highest rating value in uploaded film lists.
pub const TOP_RATING: &str = "5";

/// Keeps films whose rating equals `value` (after trimming whitespace).
///
/// The comparison is textual, so "5" and "5.0" are different ratings.
#[derive(Debug, Clone)]
pub struct RatingFilter {
    value: String,
}

impl RatingFilter {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into().trim().to_string(),
        }
    }

    /// Keep only films rated [`TOP_RATING`].
    pub fn top_rated() -> Self {
        Self::new(TOP_RATING)
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The predicate applied to each film.
    pub fn matches(&self, film: &FilmInput) -> bool {
        film.rating.trim() == self.value
    }
}

impl Default for RatingFilter {
    fn default() -> Self {
        Self::top_rated()
    }
}

impl Filter for RatingFilter {
    fn name(&self) -> &str {
        "RatingFilter"
    }

    fn apply(&self, films: Vec<FilmInput>) -> Vec<FilmInput> {
        films.into_iter().filter(|film| self.matches(film)).collect()
    }
}
