//! Error types for the data-loader crate.
//!
//! Everything here is raised before any network I/O happens, so a caller can
//! reject an upload without touching the enrichment services.

use thiserror::Error;

/// Errors that can occur while ingesting an uploaded CSV document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataLoadError {
    /// The header row is missing one or more of the required columns.
    ///
    /// `missing` lists every absent header in the canonical order
    /// (`Name`, `Year`, `Rating`), not just the first one found.
    #[error("Missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// The configured delimiter cannot be used to split columns.
    #[error("Invalid delimiter {0:?}: the quote character and line breaks are reserved")]
    InvalidDelimiter(char),
}

impl DataLoadError {
    /// Whether this error means the upload itself has the wrong shape.
    pub fn is_schema_error(&self) -> bool {
        matches!(self, DataLoadError::MissingColumns { .. })
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
