//! Filter to ensure a minimum rating threshold.
//!
//! Keeps films whose numeric rating is at least the threshold, for callers
//! that want "4.5 and up" rather than an exact value.

use crate::traits::Filter;
use data_loader::FilmInput;

/// Removes films rated below a threshold.
///
/// ## Algorithm
/// For each film:
/// 1. Parse the rating as a number
/// 2. Keep it only if parsing succeeded and rating >= min_rating
///
/// Unrated films (empty or non-numeric rating) are always removed.
#[derive(Debug, Clone)]
pub struct MinimumRatingFilter {
    min_rating: f32,
}

impl MinimumRatingFilter {
    /// Create a new MinimumRatingFilter.
    ///
    /// # Arguments
    /// * `min_rating` - Minimum rating to keep (inclusive)
    pub fn new(min_rating: f32) -> Self {
        Self { min_rating }
    }
}

impl Filter for MinimumRatingFilter {
    fn name(&self) -> &str {
        "MinimumRatingFilter"
    }

    fn apply(&self, films: Vec<FilmInput>) -> Vec<FilmInput> {
        films
            .into_iter()
            .filter(|film| {
                film.rating
                    .trim()
                    .parse::<f32>()
                    .map(|rating| rating >= self.min_rating)
                    .unwrap_or(false)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_rating_filter() {
        let films = vec![
            FilmInput::new("High", "2000", "4.5"),
            FilmInput::new("Low", "2000", "2"),
            FilmInput::new("Exact", "2000", "4"),
            FilmInput::new("Unrated", "2000", ""),
            FilmInput::new("Garbage", "2000", "five"),
        ];

        let filtered = MinimumRatingFilter::new(4.0).apply(films);

        let names: Vec<_> = filtered.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["High", "Exact"]);
    }
}
