//! End-to-end runs through the real HTTP clients.
//!
//! The metadata service and the document service are both served by one
//! in-process mock bound to a random local port.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;

use enrichment::{EndState, EnrichmentConfig, EnrichmentOrchestrator, LookupErrorKind};
use sources::{HttpScraper, LookupConfig, ScrapeConfig, TmdbClient};

const UPLOAD: &str = "\
Date,Name,Year,Rating,Letterboxd URI
2023-02-11,Inception,2010,5,https://boxd.it/1skk
2023-02-12,\"Crouching Tiger, Hidden Dragon\",2000,5,https://boxd.it/1X6g
2023-02-13,Cats,2019,0.5,https://boxd.it/1Uiq
2023-02-14,Broken,1999,5,https://boxd.it/0000
2023-02-15,Sleepy,2001,5,https://boxd.it/zzzz
";

async fn search_movie(Query(params): Query<HashMap<String, String>>) -> Response {
    match params.get("query").map(String::as_str) {
        Some("Inception") => Json(json!({
            "results": [{
                "title": "Inception",
                "release_date": "2010-07-15",
                "poster_path": "/inception.jpg",
                "genre_ids": [28, 878],
                "vote_average": 8.4,
                "vote_count": 35000
            }]
        }))
        .into_response(),
        Some("Crouching Tiger, Hidden Dragon") => Json(json!({
            "results": [{
                "title": "Crouching Tiger, Hidden Dragon",
                "release_date": "2000-07-06",
                "overview": "An experimental wuxia epic.",
                "genres": [{"id": 18, "name": "Drama"}],
                "vote_average": 7.9
            }]
        }))
        .into_response(),
        Some("Sleepy") => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({ "results": [] })).into_response()
        }
        Some("Broken") => StatusCode::BAD_GATEWAY.into_response(),
        _ => Json(json!({ "results": [] })).into_response(),
    }
}

async fn document(Path(title): Path<String>) -> Response {
    match title.as_str() {
        "Inception" => "A complex, critically acclaimed blockbuster.".into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn start_mock_service() -> (String, tokio::task::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock service");
    let addr = listener.local_addr().expect("Failed to get local address");

    let app = Router::new()
        .route("/3/search/movie", get(search_movie))
        .route("/wiki/:title", get(document));

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock service failed");
    });

    (format!("http://{}", addr), handle)
}

fn build_orchestrator(addr: &str, config: EnrichmentConfig) -> EnrichmentOrchestrator {
    let lookup = TmdbClient::new(
        LookupConfig::default()
            .with_base_url(format!("{}/3", addr))
            .with_image_base_url("https://img.test/w500")
            .with_api_token("token"),
    )
    .expect("Failed to build lookup client");
    let scraper = HttpScraper::new(ScrapeConfig::default().with_base_url(format!("{}/wiki", addr)))
        .expect("Failed to build scraper");

    EnrichmentOrchestrator::new(Arc::new(lookup), Arc::new(scraper), config)
}

#[tokio::test]
async fn test_upload_is_enriched_in_order() {
    let (addr, handle) = start_mock_service().await;
    let orchestrator = build_orchestrator(
        &addr,
        EnrichmentConfig::default().with_unit_timeout(Duration::from_millis(500)),
    );

    let report = orchestrator.run_csv(UPLOAD).await.unwrap();

    let names: Vec<_> = report.films.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Inception", "Crouching Tiger, Hidden Dragon", "Broken", "Sleepy"]
    );
    assert_eq!(report.end_state, EndState::Completed);
    assert_eq!(report.stats.total_rows, 5);
    assert_eq!(report.stats.eligible, 4);
    assert_eq!(report.stats.matched, 2);
    assert_eq!(report.stats.lookup_failures, 2);
    assert_eq!(report.stats.timed_out, 1);

    // Action + Science Fiction, 8.4 votes; scrape: complex (x 0.3), reception
    // raised then lowered by "blockbuster" (y 0.4)
    let inception = &report.films[0];
    assert_eq!(
        inception.genres.as_deref(),
        Some(&["Action".to_string(), "Science Fiction".to_string()][..])
    );
    assert_eq!(
        inception.poster_url.as_deref(),
        Some("https://img.test/w500/inception.jpg")
    );
    assert!((inception.score.x - 0.5).abs() < 1e-9);
    assert!((inception.score.y - 0.6).abs() < 1e-9);

    // Experimental overview, scrape page missing
    let tiger = &report.films[1];
    assert!((tiger.score.x - 0.35).abs() < 1e-9);
    assert!((tiger.score.y - 0.7).abs() < 1e-9);

    assert_eq!(report.films[2].lookup_error, Some(LookupErrorKind::Unavailable));
    assert_eq!(report.films[3].lookup_error, Some(LookupErrorKind::TimedOut));

    handle.abort();
}

#[tokio::test]
async fn test_json_output_shape() {
    let (addr, handle) = start_mock_service().await;
    let orchestrator = build_orchestrator(&addr, EnrichmentConfig::default());

    let report = orchestrator
        .run_csv("Name,Year,Rating\nInception,2010,5\n")
        .await
        .unwrap();
    let json = serde_json::to_value(&report.films).unwrap();

    assert_eq!(json[0]["name"], "Inception");
    assert_eq!(json[0]["voteCount"], 35000);
    assert_eq!(json[0]["posterUrl"], "https://img.test/w500/inception.jpg");
    assert!(json[0].get("lookupError").is_none());

    handle.abort();
}

#[tokio::test]
async fn test_unreachable_services_still_produce_full_result() {
    // Bind and immediately drop to get a port with nothing listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let orchestrator = build_orchestrator(&addr, EnrichmentConfig::default());
    let report = orchestrator
        .run_csv("Name,Year,Rating\nInception,2010,5\nHeat,1995,5\n")
        .await
        .unwrap();

    assert_eq!(report.films.len(), 2);
    assert_eq!(report.end_state, EndState::AllLookupsFailed);
    for film in &report.films {
        assert_eq!(film.score.x, 0.5);
        assert_eq!(film.score.y, 0.5);
    }
}
