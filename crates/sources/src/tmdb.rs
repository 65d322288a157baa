//! Metadata lookup against a TMDB-style movie search API.
//!
//! Request: `GET {base_url}/search/movie?query=<title>[&year=<year>]` with a
//! bearer token. Response: `{"results": [ {title, release_date, poster_path,
//! overview, genres | genre_ids, vote_average, vote_count}, ... ]}`.
//!
//! Every optional field is resolved here into a [`CandidateMatch`], so callers
//! never handle raw JSON.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::error::LookupError;
use crate::traits::MetadataLookup;
use crate::types::CandidateMatch;

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
const USER_AGENT: &str = concat!("film-map/", env!("CARGO_PKG_VERSION"));

/// Connection settings for [`TmdbClient`].
#[derive(Debug, Clone)]
pub struct LookupConfig {
    pub base_url: String,
    pub image_base_url: String,
    /// Sent as `Authorization: Bearer <token>` when present.
    pub api_token: Option<String>,
    pub timeout: Duration,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TMDB_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            api_token: None,
            timeout: Duration::from_secs(15),
        }
    }
}

impl LookupConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_image_base_url(mut self, image_base_url: impl Into<String>) -> Self {
        self.image_base_url = image_base_url.into();
        self
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawMovie>,
}

#[derive(Debug, Deserialize)]
struct RawMovie {
    title: Option<String>,
    release_date: Option<String>,
    poster_path: Option<String>,
    overview: Option<String>,
    genres: Option<Vec<RawGenre>>,
    genre_ids: Option<Vec<u32>>,
    vote_average: Option<f64>,
    vote_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawGenre {
    name: Option<String>,
}

/// Movie genre names by id, for search results that only carry `genre_ids`.
pub fn genre_name(id: u32) -> Option<&'static str> {
    let name = match id {
        28 => "Action",
        12 => "Adventure",
        16 => "Animation",
        35 => "Comedy",
        80 => "Crime",
        99 => "Documentary",
        18 => "Drama",
        10751 => "Family",
        14 => "Fantasy",
        36 => "History",
        27 => "Horror",
        10402 => "Music",
        9648 => "Mystery",
        10749 => "Romance",
        878 => "Science Fiction",
        10770 => "TV Movie",
        53 => "Thriller",
        10752 => "War",
        37 => "Western",
        _ => return None,
    };
    Some(name)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl RawMovie {
    fn into_candidate(self, image_base_url: &str) -> CandidateMatch {
        let genres = match self.genres {
            Some(genres) => genres.into_iter().filter_map(|g| non_empty(g.name)).collect(),
            None => self
                .genre_ids
                .unwrap_or_default()
                .into_iter()
                .filter_map(genre_name)
                .map(str::to_string)
                .collect(),
        };
        let poster_path = non_empty(self.poster_path);
        let poster_url = poster_path
            .as_ref()
            .map(|path| format!("{}{}", image_base_url.trim_end_matches('/'), path));

        CandidateMatch {
            title: self.title.unwrap_or_default(),
            release_date: self.release_date.unwrap_or_default(),
            poster_path,
            poster_url,
            overview: non_empty(self.overview),
            genres,
            vote_average: self.vote_average,
            vote_count: self.vote_count,
        }
    }
}

/// HTTP client for the movie search endpoint.
#[derive(Clone)]
pub struct TmdbClient {
    http_client: reqwest::Client,
    config: LookupConfig,
}

impl TmdbClient {
    pub fn new(config: LookupConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .context("Building metadata HTTP client")?;

        if config.api_token.is_none() {
            warn!("No metadata API token configured; requests will be unauthenticated");
        }

        Ok(Self {
            http_client,
            config,
        })
    }

    fn search_url(&self) -> String {
        format!("{}/search/movie", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl MetadataLookup for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    #[instrument(skip(self), fields(source = "tmdb"))]
    async fn search(
        &self,
        title: &str,
        year: Option<&str>,
    ) -> Result<Vec<CandidateMatch>, LookupError> {
        let mut query: Vec<(&str, &str)> = vec![("query", title)];
        if let Some(year) = year {
            query.push(("year", year));
        }

        let mut request = self.http_client.get(self.search_url()).query(&query);
        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| LookupError::Network {
            title: title.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                title: title.to_string(),
                status: status.as_u16(),
            });
        }

        let body: SearchResponse = response.json().await.map_err(|e| LookupError::Decode {
            title: title.to_string(),
            reason: e.to_string(),
        })?;

        let candidates: Vec<CandidateMatch> = body
            .results
            .into_iter()
            .map(|raw| raw.into_candidate(&self.config.image_base_url))
            .collect();

        debug!(results = candidates.len(), "Metadata search complete");
        Ok(candidates)
    }
}
