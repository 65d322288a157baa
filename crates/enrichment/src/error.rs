//! Errors that stop a whole run.
//!
//! Per-film problems never show up here; they are recorded on the
//! film's `EnrichedFilm` instead.

use data_loader::DataLoadError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// The upload could not be ingested. Raised before any network call.
    #[error(transparent)]
    Load(#[from] DataLoadError),

    #[error("max_concurrency must be at least 1")]
    ZeroConcurrency,
}

impl RunError {
    /// True when the upload is missing required columns.
    pub fn is_schema_error(&self) -> bool {
        matches!(self, RunError::Load(err) if err.is_schema_error())
    }
}
