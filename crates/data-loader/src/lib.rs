//! # Data Loader Crate
//!
//! This crate turns an uploaded film-list CSV into typed `FilmInput` rows.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (FilmInput, ColumnLayout, ParsedCsv)
//! - **parser**: Split CSV text into rows and cells, validate the header
//! - **error**: Error types for ingestion
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::parse_films;
//!
//! let parsed = parse_films("Name,Year,Rating\nInception,2010,5")?;
//! for film in &parsed.films {
//!     println!("{} ({}) rated {}", film.name, film.year, film.rating);
//! }
//! ```
//!
//! Filtering (e.g. "top-rated only") is not done here; see the `pipeline`
//! crate's `RatingFilter`.

// Public modules
pub mod error;
pub mod types;
pub mod parser;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use parser::{DEFAULT_DELIMITER, parse_films, parse_films_with_delimiter};
pub use types::{
    ColumnLayout,
    FilmInput,
    ParsedCsv,
    NAME_COLUMN,
    RATING_COLUMN,
    REQUIRED_COLUMNS,
    YEAR_COLUMN,
};
