//! Auxiliary signal scraper.
//!
//! Fetches `GET {base_url}/{url-encoded title}` and scans the raw body for the
//! keyword classes in [`crate::keywords`]. The body is never parsed as HTML;
//! markup and prose are scanned alike.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::error::ScrapeError;
use crate::keywords::extract_signal;
use crate::traits::SignalScraper;
use crate::types::LexicalSignal;

pub const DEFAULT_SCRAPE_BASE_URL: &str = "https://en.wikipedia.org/wiki";
const USER_AGENT: &str = concat!("film-map/", env!("CARGO_PKG_VERSION"));

/// Settings for [`HttpScraper`].
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SCRAPE_BASE_URL.to_string(),
            timeout: Duration::from_secs(15),
        }
    }
}

impl ScrapeConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Fetches one free-text document per title over HTTP.
#[derive(Clone)]
pub struct HttpScraper {
    http_client: reqwest::Client,
    config: ScrapeConfig,
}

impl HttpScraper {
    pub fn new(config: ScrapeConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .context("Building scrape HTTP client")?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// URL of the document for `title`.
    pub fn document_url(&self, title: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(title)
        )
    }

    async fn fetch_text(&self, title: &str) -> Result<String, ScrapeError> {
        let response = self
            .http_client
            .get(self.document_url(title))
            .send()
            .await
            .map_err(|e| ScrapeError::Network {
                title: title.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                title: title.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| ScrapeError::Network {
            title: title.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl SignalScraper for HttpScraper {
    fn name(&self) -> &str {
        "http-scraper"
    }

    #[instrument(skip(self))]
    async fn scrape(&self, title: &str) -> LexicalSignal {
        match self.fetch_text(title).await {
            Ok(text) => {
                let signal = extract_signal(&text);
                debug!(
                    complexity = signal.complexity_keywords_found.len(),
                    reception = signal.reception_keywords_found.len(),
                    "Scrape complete"
                );
                signal
            }
            Err(e) => {
                warn!(error = %e, "Scrape unavailable, using neutral signal");
                LexicalSignal::neutral()
            }
        }
    }
}
