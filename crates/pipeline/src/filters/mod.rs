//! Filter implementations for the film pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod minimum_rating;
pub mod rating;

// Re-export for convenience
pub use minimum_rating::MinimumRatingFilter;
pub use rating::{RatingFilter, TOP_RATING};
