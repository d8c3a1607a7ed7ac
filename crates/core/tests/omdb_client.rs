//! OMDb client against a local stub server.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;

use movie_explorer_core::{ApiError, MovieCatalog, OmdbClient, OmdbConfig};

#[derive(Default)]
struct Stub {
    requests: Mutex<Vec<HashMap<String, String>>>,
}

async fn omdb(
    State(stub): State<Arc<Stub>>,
    Query(params): Query<HashMap<String, String>>,
) -> axum::response::Response {
    stub.requests.lock().unwrap().push(params.clone());

    if let Some(query) = params.get("s") {
        return match query.as_str() {
            "Avengers" => Json(json!({
                "Response": "True",
                "totalResults": "25",
                "Search": [
                    { "Title": "The Avengers", "Year": "2012", "imdbID": "tt0848228", "Poster": "https://img.example/a.jpg" },
                    { "Title": "Avengers: Endgame", "Year": "2019", "imdbID": "tt4154796", "Poster": "N/A" }
                ]
            }))
            .into_response(),
            "broken" => (StatusCode::OK, "{\"Response\": ").into_response(),
            "down" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            _ => Json(json!({ "Response": "False", "Error": "Movie not found!" })).into_response(),
        };
    }

    match params.get("i").map(String::as_str) {
        Some("tt0133093") => Json(json!({
            "Response": "True",
            "imdbID": "tt0133093",
            "Title": "The Matrix",
            "Year": "1999",
            "Poster": "https://img.example/matrix.jpg",
            "Plot": "A computer hacker learns about the true nature of reality.",
            "Genre": "Action, Sci-Fi",
            "Director": "Lana Wachowski, Lilly Wachowski",
            "Actors": "Keanu Reeves, Laurence Fishburne",
            "imdbRating": "8.7"
        }))
        .into_response(),
        _ => Json(json!({ "Response": "False", "Error": "Incorrect IMDb ID." })).into_response(),
    }
}

async fn start_stub() -> (OmdbClient, Arc<Stub>) {
    let stub = Arc::new(Stub::default());
    let app = Router::new()
        .route("/", get(omdb))
        .with_state(Arc::clone(&stub));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = OmdbConfig {
        base_url: Some(format!("http://{}/", addr)),
        timeout_secs: 5,
        ..OmdbConfig::new("stub-key")
    };
    (OmdbClient::new(config).unwrap(), stub)
}

#[tokio::test]
async fn test_search_decodes_page() {
    let (client, stub) = start_stub().await;

    let page = client.search("Avengers", 2).await.unwrap();

    assert_eq!(page.page, 2);
    assert_eq!(page.total_count, 25);
    assert_eq!(page.total_pages(), 3);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].id, "tt0848228");
    assert_eq!(page.items[1].poster_url, None);

    let requests = stub.requests.lock().unwrap();
    assert_eq!(requests[0]["apikey"], "stub-key");
    assert_eq!(requests[0]["page"], "2");
}

#[tokio::test]
async fn test_search_not_found_is_empty_page() {
    let (client, _stub) = start_stub().await;

    let page = client.search("qwertyuiop", 1).await.unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.total_count, 0);
    assert!(!page.has_more());
}

#[tokio::test]
async fn test_query_is_url_encoded() {
    let (client, stub) = start_stub().await;

    client.search("star wars & more", 1).await.unwrap();

    let requests = stub.requests.lock().unwrap();
    assert_eq!(requests[0]["s"], "star wars & more");
}

#[tokio::test]
async fn test_server_error_is_transport() {
    let (client, _stub) = start_stub().await;
    let result = client.search("down", 1).await;
    assert!(matches!(result, Err(ApiError::Transport(_))));
}

#[tokio::test]
async fn test_malformed_body_is_parse() {
    let (client, _stub) = start_stub().await;
    let result = client.search("broken", 1).await;
    assert!(matches!(result, Err(ApiError::Parse(_))));
}

#[tokio::test]
async fn test_fetch_detail() {
    let (client, stub) = start_stub().await;

    let detail = client.fetch_by_id("tt0133093").await.unwrap();

    assert_eq!(detail.title, "The Matrix");
    assert_eq!(detail.rating, "8.7");
    assert_eq!(detail.director, "Lana Wachowski, Lilly Wachowski");

    let requests = stub.requests.lock().unwrap();
    assert_eq!(requests[0]["plot"], "full");
}

#[tokio::test]
async fn test_fetch_unknown_detail_is_not_found() {
    let (client, _stub) = start_stub().await;
    let result = client.fetch_by_id("tt0000000").await;
    assert!(matches!(result, Err(ApiError::NotFound(msg)) if msg.contains("Incorrect")));
}

#[tokio::test]
async fn test_unreachable_upstream_is_transport() {
    let config = OmdbConfig {
        base_url: Some("http://127.0.0.1:9/".to_string()),
        timeout_secs: 2,
        ..OmdbConfig::new("stub-key")
    };
    let client = OmdbClient::new(config).unwrap();

    let result = client.search("Avengers", 1).await;
    assert!(matches!(result, Err(ApiError::Transport(_))));
}
