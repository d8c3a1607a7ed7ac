//! Search session API handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use movie_explorer_core::SearchOutcome;
use movie_explorer_core::render::SearchView;
use serde::{Deserialize, Serialize};

use super::handlers::error_response;
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

/// What happened to the request, alongside the view after it.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchRequestStatus {
    Applied,
    Stale,
    Dropped,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub status: SearchRequestStatus,
    #[serde(flatten)]
    pub view: SearchView,
}

#[derive(Debug, Serialize)]
pub struct LiveSearchResponse {
    pub scheduled: bool,
    pub debounce_ms: u64,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/search
///
/// Current state of the search page.
pub async fn get_search(State(state): State<Arc<AppState>>) -> Json<SearchView> {
    let snapshot = state.search().snapshot().await;
    Json(SearchView::render(&snapshot, state.favourites()))
}

/// POST /api/v1/search
///
/// Submit a query, replacing the displayed results.
pub async fn submit_search(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> impl IntoResponse {
    if request.query.trim().is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "query must not be empty",
        ));
    }

    let outcome = state.search().submit(&request.query).await;
    Ok(Json(respond(&state, outcome).await))
}

/// POST /api/v1/search/more
///
/// Fetch the next page and append it.
pub async fn load_more(State(state): State<Arc<AppState>>) -> Json<SearchResponse> {
    let outcome = state.search().load_more().await;
    Json(respond(&state, outcome).await)
}

/// POST /api/v1/search/live
///
/// Schedule a debounced search. Blank input cancels any pending one.
pub async fn live_search(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> (StatusCode, Json<LiveSearchResponse>) {
    let search = state.search();
    search.live_search(&request.query);

    (
        StatusCode::ACCEPTED,
        Json(LiveSearchResponse {
            scheduled: !request.query.trim().is_empty(),
            debounce_ms: search.debounce_period().as_millis() as u64,
        }),
    )
}

async fn respond(state: &AppState, outcome: SearchOutcome) -> SearchResponse {
    let (status, snapshot) = match outcome {
        SearchOutcome::Applied(snapshot) => (SearchRequestStatus::Applied, snapshot),
        SearchOutcome::Stale => (
            SearchRequestStatus::Stale,
            state.search().snapshot().await,
        ),
        SearchOutcome::Dropped => (
            SearchRequestStatus::Dropped,
            state.search().snapshot().await,
        ),
    };

    SearchResponse {
        status,
        view: SearchView::render(&snapshot, state.favourites()),
    }
}
