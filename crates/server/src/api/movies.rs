//! Raw catalog access.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use movie_explorer_core::{ApiError, MovieDetail, SearchResultPage};
use serde::Deserialize;
use tracing::warn;

use super::handlers::{error_response, ErrorResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MovieSearchParams {
    pub query: String,
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

fn api_error(e: ApiError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &e {
        ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        ApiError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
        ApiError::Transport(_) | ApiError::Parse(_) => StatusCode::BAD_GATEWAY,
    };
    error_response(status, e.to_string())
}

/// GET /api/v1/movies/search?query=&page=
pub async fn search_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MovieSearchParams>,
) -> Result<Json<SearchResultPage>, (StatusCode, Json<ErrorResponse>)> {
    if params.query.trim().is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "query must not be empty",
        ));
    }

    state
        .catalog()
        .search(params.query.trim(), params.page)
        .await
        .map(Json)
        .map_err(|e| {
            warn!("Catalog search for '{}' failed: {}", params.query, e);
            api_error(e)
        })
}

/// GET /api/v1/movies/{id}
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MovieDetail>, (StatusCode, Json<ErrorResponse>)> {
    state
        .catalog()
        .fetch_by_id(&id)
        .await
        .map(Json)
        .map_err(api_error)
}
