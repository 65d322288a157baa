//! Core domain types for uploaded film lists.
//!
//! A film row stays stringly typed on purpose: the year and rating are passed
//! through to the lookup service and the filter exactly as the user exported
//! them, so nothing here parses them into numbers.

use serde::{Deserialize, Serialize};

/// Header names every upload must carry. Matched exactly, case-sensitive.
pub const NAME_COLUMN: &str = "Name";
pub const YEAR_COLUMN: &str = "Year";
pub const RATING_COLUMN: &str = "Rating";

/// All required headers in canonical order.
pub const REQUIRED_COLUMNS: [&str; 3] = [NAME_COLUMN, YEAR_COLUMN, RATING_COLUMN];

/// One favorite film, as read from a single CSV data row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilmInput {
    pub name: String,
    /// Release year as written in the upload (e.g. "2010"); may be empty.
    pub year: String,
    /// Rating as written in the upload (e.g. "5" or "4.5").
    pub rating: String,
}

impl FilmInput {
    pub fn new(
        name: impl Into<String>,
        year: impl Into<String>,
        rating: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            year: year.into(),
            rating: rating.into(),
        }
    }

    /// The year to send with a metadata query, if the row has one.
    pub fn year_hint(&self) -> Option<&str> {
        let year = self.year.trim();
        if year.is_empty() { None } else { Some(year) }
    }
}

/// Column positions resolved from the header row.
///
/// Columns may appear in any order; extra columns are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub name: usize,
    pub year: usize,
    pub rating: usize,
    /// Number of header cells; data rows shorter than this are ragged.
    pub width: usize,
}

/// Result of parsing one upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCsv {
    /// One entry per well-formed data row, in file order.
    pub films: Vec<FilmInput>,
    /// Data rows dropped because they had fewer cells than the header.
    pub ragged_rows: usize,
}

impl ParsedCsv {
    pub fn len(&self) -> usize {
        self.films.len()
    }

    pub fn is_empty(&self) -> bool {
        self.films.is_empty()
    }
}
