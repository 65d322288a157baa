//! Run configuration for the orchestrator.

use std::time::Duration;

use data_loader::DEFAULT_DELIMITER;
use pipeline::FilterPipeline;
use pipeline::filters::{MinimumRatingFilter, RatingFilter, TOP_RATING};

pub const DEFAULT_MAX_CONCURRENCY: usize = 8;
pub const DEFAULT_UNIT_TIMEOUT: Duration = Duration::from_secs(20);

/// Which uploaded rows are eligible for enrichment.
#[derive(Debug, Clone, PartialEq)]
pub enum RatingRule {
    /// Rating text equals this value after trimming.
    Exact(String),
    /// Rating parses as a number at least this large.
    AtLeast(f32),
}

impl RatingRule {
    /// Build the filter pipeline that implements this rule.
    pub fn filter_pipeline(&self) -> FilterPipeline {
        match self {
            RatingRule::Exact(value) => FilterPipeline::new().add_filter(RatingFilter::new(value)),
            RatingRule::AtLeast(min) => {
                FilterPipeline::new().add_filter(MinimumRatingFilter::new(*min))
            }
        }
    }
}

impl Default for RatingRule {
    fn default() -> Self {
        RatingRule::Exact(TOP_RATING.to_string())
    }
}

/// Settings for one enrichment run.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentConfig {
    pub rating_rule: RatingRule,
    /// Column delimiter of the uploaded CSV
    pub delimiter: char,
    /// Upper bound on units in flight at once; must be at least 1
    pub max_concurrency: usize,
    /// Budget for one film's lookup and scrape together
    pub unit_timeout: Duration,
}

impl EnrichmentConfig {
    pub fn with_rating_rule(mut self, rating_rule: RatingRule) -> Self {
        self.rating_rule = rating_rule;
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    pub fn with_unit_timeout(mut self, unit_timeout: Duration) -> Self {
        self.unit_timeout = unit_timeout;
        self
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            rating_rule: RatingRule::default(),
            delimiter: DEFAULT_DELIMITER,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            unit_timeout: DEFAULT_UNIT_TIMEOUT,
        }
    }
}
