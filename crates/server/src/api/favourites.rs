//! Favourites API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use movie_explorer_core::render::{favourite_button, FavouritesView, LabelStyle};
use movie_explorer_core::{MovieSummary, RenderedNode, ToggleResult};
use serde::{Deserialize, Serialize};
use tracing::error;

use super::handlers::error_response;
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub movie: MovieSummary,
    /// Which label set the returned button uses.
    #[serde(default)]
    pub style: ButtonStyle,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonStyle {
    #[default]
    Card,
    Detail,
}

impl From<ButtonStyle> for LabelStyle {
    fn from(style: ButtonStyle) -> Self {
        match style {
            ButtonStyle::Card => LabelStyle::Card,
            ButtonStyle::Detail => LabelStyle::Detail,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub change: ToggleResult,
    pub is_favourite: bool,
    /// The re-rendered favourite button for the toggled movie.
    pub button: RenderedNode,
    pub favourites: Vec<MovieSummary>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub message: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/favourites
pub async fn list_favourites(State(state): State<Arc<AppState>>) -> Json<FavouritesView> {
    Json(FavouritesView::render(state.favourites()))
}

/// POST /api/v1/favourites/toggle
///
/// Add the movie if absent, remove it if present.
pub async fn toggle_favourite(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ToggleRequest>,
) -> impl IntoResponse {
    if request.movie.id.trim().is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "movie id must not be empty",
        ));
    }

    match state.favourites().toggle(&request.movie) {
        Ok(outcome) => {
            let is_favourite = outcome.change.is_favourite();
            Ok(Json(ToggleResponse {
                change: outcome.change,
                is_favourite,
                button: favourite_button(&request.movie.id, is_favourite, request.style.into()),
                favourites: outcome.list,
            }))
        }
        Err(e) => {
            error!("Failed to toggle favourite {}: {}", request.movie.id, e);
            Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                e.to_string(),
            ))
        }
    }
}

/// DELETE /api/v1/favourites/{id}
pub async fn remove_favourite(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.favourites().remove(&id) {
        Ok(true) => Ok(Json(SuccessResponse {
            message: format!("Removed {} from favourites", id),
        })),
        Ok(false) => Err(error_response(
            StatusCode::NOT_FOUND,
            format!("Favourite not found: {}", id),
        )),
        Err(e) => Err(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            e.to_string(),
        )),
    }
}

/// DELETE /api/v1/favourites
pub async fn clear_favourites(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.favourites().clear() {
        Ok(()) => Ok(Json(SuccessResponse {
            message: "Cleared favourites".to_string(),
        })),
        Err(e) => Err(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            e.to_string(),
        )),
    }
}
