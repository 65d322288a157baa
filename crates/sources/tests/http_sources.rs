//! Integration tests for the HTTP lookup client and scraper.
//!
//! Both clients run against an in-process mock service bound to a random
//! local port.

use std::collections::HashMap;
use std::time::Duration;

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;

use sources::{
    HttpScraper, LookupConfig, LookupError, MetadataLookup, ScrapeConfig, SignalScraper,
    TmdbClient, select_match,
};

const TOKEN: &str = "test-token";

// ============================================================================
// Mock Service
// ============================================================================

async fn search_movie(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TOKEN))
        .unwrap_or(false);
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    match params.get("query").map(String::as_str) {
        Some("Inception") => Json(json!({
            "results": [
                {
                    "title": "Inception 2",
                    "release_date": "2020-01-01",
                    "genre_ids": [28]
                },
                {
                    "title": "Inception",
                    "release_date": "2010-07-15",
                    "poster_path": "/inception.jpg",
                    "overview": "A thief who steals corporate secrets through dream-sharing.",
                    "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}],
                    "vote_average": 8.4,
                    "vote_count": 35000
                }
            ]
        }))
        .into_response(),
        Some("Dune") => {
            let release_date = match params.get("year").map(String::as_str) {
                Some("2021") => "2021-09-15",
                _ => "1984-12-14",
            };
            Json(json!({
                "results": [{ "title": "Dune", "release_date": release_date }]
            }))
            .into_response()
        }
        Some("Broken") => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        Some("Garbled") => (StatusCode::OK, "this is not json").into_response(),
        _ => Json(json!({ "results": [] })).into_response(),
    }
}

async fn document(Path(title): Path<String>) -> Response {
    match title.as_str() {
        "Inception" => "A NONLINEAR heist film widely called a masterpiece.".into_response(),
        "Top Gun: Maverick" => "A straightforward summer blockbuster.".into_response(),
        "Plain" => "A film.".into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Start the mock service on a random port
async fn start_mock_service() -> (String, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock service");
    let addr = listener.local_addr().expect("Failed to get local address");

    let app = Router::new()
        .route("/search/movie", get(search_movie))
        .route("/wiki/:title", get(document));

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock service failed");
    });

    (format!("http://{}", addr), handle)
}

fn lookup_client(base_url: &str) -> TmdbClient {
    TmdbClient::new(
        LookupConfig::default()
            .with_base_url(base_url)
            .with_image_base_url("https://img.test/w500")
            .with_api_token(TOKEN)
            .with_timeout(Duration::from_secs(5)),
    )
    .expect("Failed to build lookup client")
}

fn scraper(base_url: &str) -> HttpScraper {
    HttpScraper::new(
        ScrapeConfig::default()
            .with_base_url(format!("{}/wiki", base_url))
            .with_timeout(Duration::from_secs(5)),
    )
    .expect("Failed to build scraper")
}

// ============================================================================
// Lookup Client
// ============================================================================

#[tokio::test]
async fn test_search_decodes_candidates_in_rank_order() {
    let (addr, handle) = start_mock_service().await;
    let client = lookup_client(&addr);

    let candidates = client.search("Inception", Some("2010")).await.unwrap();

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].title, "Inception 2");
    assert_eq!(candidates[0].genres, vec!["Action"]);

    let second = &candidates[1];
    assert_eq!(second.release_date, "2010-07-15");
    assert_eq!(second.genres, vec!["Action", "Science Fiction"]);
    assert_eq!(second.vote_average, Some(8.4));
    assert_eq!(second.vote_count, Some(35000));
    assert_eq!(
        second.poster_url.as_deref(),
        Some("https://img.test/w500/inception.jpg")
    );

    let (selected, _) = select_match(&candidates, "Inception", Some("2010")).unwrap();
    assert_eq!(selected.title, "Inception");

    handle.abort();
}

#[tokio::test]
async fn test_search_sends_year() {
    let (addr, handle) = start_mock_service().await;
    let client = lookup_client(&addr);

    let with_year = client.search("Dune", Some("2021")).await.unwrap();
    let without_year = client.search("Dune", None).await.unwrap();

    assert_eq!(with_year[0].release_date, "2021-09-15");
    assert_eq!(without_year[0].release_date, "1984-12-14");

    handle.abort();
}

#[tokio::test]
async fn test_search_with_no_results_is_empty_not_error() {
    let (addr, handle) = start_mock_service().await;
    let client = lookup_client(&addr);

    let candidates = client.search("Nothing Matches This", None).await.unwrap();
    assert!(candidates.is_empty());

    handle.abort();
}

#[tokio::test]
async fn test_search_non_success_status_is_error() {
    let (addr, handle) = start_mock_service().await;
    let client = lookup_client(&addr);

    let err = client.search("Broken", None).await.unwrap_err();
    assert_eq!(
        err,
        LookupError::Status {
            title: "Broken".to_string(),
            status: 500,
        }
    );

    handle.abort();
}

#[tokio::test]
async fn test_search_without_token_is_rejected() {
    let (addr, handle) = start_mock_service().await;
    let client = TmdbClient::new(LookupConfig::default().with_base_url(&addr)).unwrap();

    let err = client.search("Inception", None).await.unwrap_err();
    assert!(matches!(err, LookupError::Status { status: 401, .. }));

    handle.abort();
}

#[tokio::test]
async fn test_search_invalid_body_is_decode_error() {
    let (addr, handle) = start_mock_service().await;
    let client = lookup_client(&addr);

    let err = client.search("Garbled", None).await.unwrap_err();
    assert!(matches!(err, LookupError::Decode { .. }));
    assert_eq!(err.title(), "Garbled");

    handle.abort();
}

#[tokio::test]
async fn test_search_unreachable_service_is_network_error() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = lookup_client(&addr);
    let err = client.search("Inception", None).await.unwrap_err();

    assert!(matches!(err, LookupError::Network { .. }));
}

// ============================================================================
// Scraper
// ============================================================================

#[tokio::test]
async fn test_scrape_extracts_keywords() {
    let (addr, handle) = start_mock_service().await;
    let scraper = scraper(&addr);

    let signal = scraper.scrape("Inception").await;
    assert!(signal.complexity_keywords_found.contains("nonlinear"));
    assert!(signal.reception_keywords_found.contains("masterpiece"));

    let signal = scraper.scrape("Top Gun: Maverick").await;
    assert!(signal.complexity_keywords_found.contains("straightforward"));
    assert!(signal.reception_keywords_found.contains("blockbuster"));

    handle.abort();
}

#[tokio::test]
async fn test_scrape_without_keywords_is_neutral() {
    let (addr, handle) = start_mock_service().await;

    assert!(scraper(&addr).scrape("Plain").await.is_neutral());

    handle.abort();
}

#[tokio::test]
async fn test_scrape_failure_is_neutral() {
    let (addr, handle) = start_mock_service().await;

    // 404 from the service
    assert!(scraper(&addr).scrape("No Such Page").await.is_neutral());

    handle.abort();
}

#[tokio::test]
async fn test_scrape_unreachable_is_neutral() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    assert!(scraper(&addr).scrape("Inception").await.is_neutral());
}
