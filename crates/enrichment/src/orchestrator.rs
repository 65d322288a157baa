//! # Enrichment Orchestrator
//!
//! This module coordinates one run over an uploaded film list:
//! 1. Parse the CSV (schema errors stop the run before any network call)
//! 2. Apply the rating filter, once
//! 3. Fan out one unit of work per eligible film, bounded by
//!    `max_concurrency`
//! 4. Inside a unit, run the metadata lookup and the scrape side by side
//!    under a shared deadline, select a candidate and score it
//! 5. Collect the results into slots indexed by upload position
//!
//! A unit never fails as a whole. Lookup problems and timeouts are recorded
//! on the film and scored with an absent candidate, so one bad film never
//! affects its siblings or the length of the output.

use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use tokio::time::timeout_at;
use tracing::{debug, info, instrument, warn};

use data_loader::{FilmInput, parse_films_with_delimiter};
use pipeline::{FilterPipeline, score};
use sources::{LexicalSignal, MetadataLookup, SignalScraper, select_match};

use crate::config::EnrichmentConfig;
use crate::error::RunError;
use crate::report::{EnrichedFilm, EnrichmentReport, LookupErrorKind};

/// Runs uploads through lookup, scraping and scoring.
#[derive(Clone)]
pub struct EnrichmentOrchestrator {
    lookup: Arc<dyn MetadataLookup>,
    scraper: Arc<dyn SignalScraper>,
    filter_pipeline: Arc<FilterPipeline>,
    config: EnrichmentConfig,
}

impl EnrichmentOrchestrator {
    /// Create an orchestrator whose filter comes from `config.rating_rule`.
    pub fn new(
        lookup: Arc<dyn MetadataLookup>,
        scraper: Arc<dyn SignalScraper>,
        config: EnrichmentConfig,
    ) -> Self {
        let filter_pipeline = Arc::new(config.rating_rule.filter_pipeline());
        Self {
            lookup,
            scraper,
            filter_pipeline,
            config,
        }
    }

    /// Replace the filter built from the rating rule.
    pub fn with_filter_pipeline(mut self, filter_pipeline: FilterPipeline) -> Self {
        self.filter_pipeline = Arc::new(filter_pipeline);
        self
    }

    pub fn config(&self) -> &EnrichmentConfig {
        &self.config
    }

    /// Main entry point: ingest, filter and enrich an uploaded CSV.
    ///
    /// # Returns
    /// * `Err(RunError)` - The upload was rejected; no lookup was made
    /// * `Ok(report)` - One `EnrichedFilm` per eligible row, in upload order
    #[instrument(skip_all, fields(bytes = csv.len()))]
    pub async fn run_csv(&self, csv: &str) -> Result<EnrichmentReport, RunError> {
        if self.config.max_concurrency == 0 {
            return Err(RunError::ZeroConcurrency);
        }

        let start_time = Instant::now();

        let parsed = parse_films_with_delimiter(csv, self.config.delimiter)?;
        let total_rows = parsed.len();
        let ragged_rows = parsed.ragged_rows;
        info!(total_rows, ragged_rows, "Parsed upload");

        let eligible = self.filter_pipeline.apply(parsed.films);
        info!(eligible = eligible.len(), "Applied rating filter");

        let films = self.enrich(eligible).await;
        let report = EnrichmentReport::new(films, total_rows, ragged_rows);

        info!(
            end_state = ?report.end_state,
            matched = report.stats.matched,
            lookup_failures = report.stats.lookup_failures,
            timed_out = report.stats.timed_out,
            "Enrichment finished in {:.2?}",
            start_time.elapsed()
        );
        Ok(report)
    }

    /// Enrich already-filtered films. The output has the same length and
    /// order as the input, whatever order the units finish in.
    pub async fn enrich(&self, films: Vec<FilmInput>) -> Vec<EnrichedFilm> {
        let mut slots: Vec<Option<EnrichedFilm>> = vec![None; films.len()];
        if slots.is_empty() {
            return Vec::new();
        }

        let mut units = stream::iter(films.into_iter().enumerate())
            .map(|(index, film)| async move { (index, self.enrich_film(film).await) })
            .buffer_unordered(self.config.max_concurrency.max(1));

        while let Some((index, enriched)) = units.next().await {
            slots[index] = Some(enriched);
        }

        // Every index is yielded exactly once, so no slot is left empty
        slots.into_iter().flatten().collect()
    }

    /// One unit of work: lookup and scrape, select, score.
    ///
    /// Both calls share one deadline of `unit_timeout`. A lookup that misses
    /// it counts as `TimedOut`; a scrape that misses it is neutral.
    #[instrument(skip(self, film), fields(film = %film.name, year = %film.year))]
    pub async fn enrich_film(&self, film: FilmInput) -> EnrichedFilm {
        let deadline = tokio::time::Instant::now() + self.config.unit_timeout;
        let year = film.year_hint();

        let (lookup_result, scrape_result) = tokio::join!(
            timeout_at(deadline, self.lookup.search(&film.name, year)),
            timeout_at(deadline, self.scraper.scrape(&film.name))
        );

        let (candidates, lookup_error) = match lookup_result {
            Ok(Ok(candidates)) => (candidates, None),
            Ok(Err(err)) => {
                warn!(source = self.lookup.name(), error = %err, "Metadata lookup unavailable");
                (Vec::new(), Some(LookupErrorKind::Unavailable))
            }
            Err(_) => {
                warn!(
                    source = self.lookup.name(),
                    timeout = ?self.config.unit_timeout,
                    "Metadata lookup timed out"
                );
                (Vec::new(), Some(LookupErrorKind::TimedOut))
            }
        };

        let signal = scrape_result.unwrap_or_else(|_| {
            debug!(source = self.scraper.name(), "Scrape timed out, using neutral signal");
            LexicalSignal::neutral()
        });

        let selected = select_match(&candidates, &film.name, year);
        match selected {
            Some((candidate, tier)) => {
                debug!(matched = %candidate.title, ?tier, "Selected candidate")
            }
            None if lookup_error.is_none() => debug!("No candidates found"),
            None => {}
        }

        let candidate = selected.map(|(candidate, _)| candidate);
        let position = score(candidate, &signal);
        EnrichedFilm::new(film, candidate, position, lookup_error)
    }
}
