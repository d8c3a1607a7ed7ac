//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with a mock movie catalog injected, enabling comprehensive E2E testing
//! without network access.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use movie_explorer_core::{
    testing::MockMovieCatalog, Config, KeyValueStorage, MovieCatalog, OmdbConfig, SearchConfig,
    ServerConfig, SqliteStorage, StorageConfig,
};
use movie_explorer_server::state::AppState;

/// Re-export fixtures for test convenience
pub use movie_explorer_core::testing::fixtures;

/// Test fixture for E2E testing with mock dependencies.
///
/// Provides an in-process server backed by a fully controllable
/// [`MockMovieCatalog`] and an on-disk SQLite file in a temp directory.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_search() {
///     let fixture = TestFixture::new().await;
///     fixture.catalog.set_search_results("Avengers", fixtures::summaries(25)).await;
///
///     let response = fixture.post("/api/v1/search", json!({ "query": "Avengers" })).await;
///
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock catalog - configure search results and details
    pub catalog: Arc<MockMovieCatalog>,
    /// Temporary directory holding the storage file
    pub temp_dir: TempDir,
    /// Path of the SQLite storage file
    pub storage_path: PathBuf,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Create a new test fixture with an empty catalog.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let storage_path = temp_dir.path().join("test.db");
        let catalog = Arc::new(MockMovieCatalog::new());
        let router = build_router(&storage_path, Arc::clone(&catalog));

        Self {
            router,
            catalog,
            temp_dir,
            storage_path,
        }
    }

    /// Rebuild the server on the same storage file, as after a page reload.
    pub fn reload(&mut self) {
        self.router = build_router(&self.storage_path, Arc::clone(&self.catalog));
    }

    /// Open the storage file directly.
    pub fn storage(&self) -> SqliteStorage {
        SqliteStorage::new(&self.storage_path).expect("Failed to open storage")
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    /// Send a POST request without a body.
    pub async fn post_empty(&self, path: &str) -> TestResponse {
        self.request("POST", path, None).await
    }

    /// Send a PUT request with JSON body.
    pub async fn put(&self, path: &str, body: Value) -> TestResponse {
        self.request("PUT", path, Some(body)).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None).await
    }

    /// Send a GET request and return the status and raw text body.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Send a request to the test server.
    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        let request = request_builder.body(body).unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

fn build_router(storage_path: &std::path::Path, catalog: Arc<MockMovieCatalog>) -> Router {
    let config = Config {
        omdb: OmdbConfig::new("test-key"),
        server: ServerConfig {
            host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
            port: 0, // Not used for in-process testing
            static_dir: None,
        },
        storage: StorageConfig {
            path: storage_path.to_path_buf(),
        },
        search: SearchConfig {
            debounce_ms: 50,
            ..SearchConfig::default()
        },
    };

    let storage: Arc<dyn KeyValueStorage> =
        Arc::new(SqliteStorage::new(storage_path).expect("Failed to create storage"));

    let state = Arc::new(AppState::new(
        config,
        catalog as Arc<dyn MovieCatalog>,
        storage,
    ));

    movie_explorer_server::api::create_router(state)
}

/// The card for `movie_id` in a rendered grid.
pub fn find_card<'a>(grid: &'a Value, movie_id: &str) -> Option<&'a Value> {
    grid["children"]
        .as_array()?
        .iter()
        .find(|card| card["movie_id"] == movie_id)
}

/// Label of the favourite toggle anywhere under `node`.
pub fn favourite_label(node: &Value) -> Option<String> {
    if node["type"] == "button" && node["action"]["action"] == "toggle_favourite" {
        return node["label"].as_str().map(str::to_string);
    }
    node["children"]
        .as_array()?
        .iter()
        .find_map(favourite_label)
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}

/// Helper to assert a JSON path equals expected value.
#[macro_export]
macro_rules! assert_json_path {
    ($json:expr, $path:expr, $expected:expr) => {
        let actual = &$json[$path];
        assert_eq!(
            actual, &$expected,
            "Path '{}' expected {:?}, got {:?}",
            $path, $expected, actual
        );
    };
}
