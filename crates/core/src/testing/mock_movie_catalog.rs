//! Mock movie catalog for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};

use crate::movies::{
    ApiError, MovieCatalog, MovieDetail, MovieSummary, SearchResultPage, PAGE_SIZE,
};

/// A recorded catalog query for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCatalogQuery {
    Search { query: String, page: u32 },
    FetchById { id: String },
}

/// Holds searches for one query until released.
#[derive(Debug, Clone)]
pub struct SearchGate {
    released: Arc<watch::Sender<bool>>,
}

impl SearchGate {
    /// Let held and future searches for the query proceed.
    pub fn release(&self) {
        self.released.send_replace(true);
    }
}

/// Mock implementation of the MovieCatalog trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable search results (paged by [`PAGE_SIZE`]) and details
/// - Track queries for assertions
/// - Simulate failures
/// - Hold searches to reproduce out-of-order responses
///
/// Queries with no configured results behave like an upstream
/// `Response: "False"`: an empty page.
#[derive(Debug, Default)]
pub struct MockMovieCatalog {
    /// Full result lists by lowercase query.
    search_results: Arc<RwLock<HashMap<String, Vec<MovieSummary>>>>,
    /// Details by identifier.
    details: Arc<RwLock<HashMap<String, MovieDetail>>>,
    /// Recorded queries.
    queries: Arc<RwLock<Vec<RecordedCatalogQuery>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<ApiError>>>,
    /// Gates by lowercase query.
    gates: Arc<RwLock<HashMap<String, Arc<watch::Sender<bool>>>>>,
}

impl MockMovieCatalog {
    /// Create a new empty mock catalog.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Set every result for `query`; pages are sliced from this list.
    pub async fn set_search_results(&self, query: &str, results: Vec<MovieSummary>) {
        self.search_results
            .write()
            .await
            .insert(query.to_lowercase(), results);
    }

    /// Add a movie detail.
    pub async fn add_detail(&self, detail: MovieDetail) {
        self.details.write().await.insert(detail.id.clone(), detail);
    }

    /// Block searches for `query` until the returned gate is released.
    pub async fn hold_searches_for(&self, query: &str) -> SearchGate {
        let (tx, _rx) = watch::channel(false);
        let released = Arc::new(tx);
        self.gates
            .write()
            .await
            .insert(query.to_lowercase(), Arc::clone(&released));
        SearchGate { released }
    }

    // =========================================================================
    // Query Recording
    // =========================================================================

    /// Get all recorded queries.
    pub async fn recorded_queries(&self) -> Vec<RecordedCatalogQuery> {
        self.queries.read().await.clone()
    }

    /// Recorded searches as `(query, page)`.
    pub async fn recorded_searches(&self) -> Vec<(String, u32)> {
        self.queries
            .read()
            .await
            .iter()
            .filter_map(|q| match q {
                RecordedCatalogQuery::Search { query, page } => Some((query.clone(), *page)),
                RecordedCatalogQuery::FetchById { .. } => None,
            })
            .collect()
    }

    pub async fn search_call_count(&self) -> usize {
        self.recorded_searches().await.len()
    }

    pub async fn detail_call_count(&self) -> usize {
        self.queries
            .read()
            .await
            .iter()
            .filter(|q| matches!(q, RecordedCatalogQuery::FetchById { .. }))
            .count()
    }

    /// Wait until at least `count` searches were recorded (gives up after ~5s).
    pub async fn wait_for_search_calls(&self, count: usize) {
        for _ in 0..1000 {
            if self.search_call_count().await >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    // =========================================================================
    // Error Injection
    // =========================================================================

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: ApiError) {
        *self.next_error.write().await = Some(error);
    }

    /// Clear any pending error.
    pub async fn clear_next_error(&self) {
        *self.next_error.write().await = None;
    }

    async fn take_error(&self) -> Option<ApiError> {
        self.next_error.write().await.take()
    }

    async fn record(&self, query: RecordedCatalogQuery) {
        self.queries.write().await.push(query);
    }

    async fn wait_for_gate(&self, query: &str) {
        let gate = self.gates.read().await.get(&query.to_lowercase()).cloned();
        if let Some(released) = gate {
            let mut rx = released.subscribe();
            let _ = rx.wait_for(|open| *open).await;
        }
    }
}

#[async_trait]
impl MovieCatalog for MockMovieCatalog {
    async fn search(&self, query: &str, page: u32) -> Result<SearchResultPage, ApiError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        let page = page.max(1);
        self.record(RecordedCatalogQuery::Search {
            query: query.to_string(),
            page,
        })
        .await;

        self.wait_for_gate(query).await;

        let results = self.search_results.read().await;
        let Some(all) = results.get(&query.to_lowercase()).filter(|r| !r.is_empty()) else {
            return Ok(SearchResultPage::empty(query, page));
        };

        let start = (page as usize - 1) * PAGE_SIZE as usize;
        let items = all
            .iter()
            .skip(start)
            .take(PAGE_SIZE as usize)
            .cloned()
            .collect();

        Ok(SearchResultPage {
            query: query.to_string(),
            page,
            items,
            total_count: all.len() as u64,
        })
    }

    async fn fetch_by_id(&self, id: &str) -> Result<MovieDetail, ApiError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.record(RecordedCatalogQuery::FetchById { id: id.to_string() })
            .await;

        self.details
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Incorrect IMDb ID: {}", id)))
    }
}
