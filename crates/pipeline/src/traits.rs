//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to an uploaded film list before any
//! film is sent to an external service.

use data_loader::FilmInput;

/// Core trait for filtering films.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared with concurrent callers
/// - Filters take ownership of the Vec<FilmInput> and return a filtered Vec
/// - Filters must keep the relative order of the films they retain
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a list of films.
    fn apply(&self, films: Vec<FilmInput>) -> Vec<FilmInput>;
}
