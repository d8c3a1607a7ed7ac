//! Selection slot and detail page handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use movie_explorer_core::load_selected_detail;
use movie_explorer_core::render::{DetailStatus, DetailView};
use serde::{Deserialize, Serialize};

use super::handlers::error_response;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub id: Option<String>,
}

/// GET /api/v1/selection
pub async fn get_selection(State(state): State<Arc<AppState>>) -> Json<SelectionResponse> {
    Json(SelectionResponse {
        id: state.selection().current(),
    })
}

/// PUT /api/v1/selection
///
/// Record which movie the detail page should show.
pub async fn set_selection(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SelectionRequest>,
) -> impl IntoResponse {
    let id = request.id.trim();
    if id.is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "id must not be empty",
        ));
    }

    match state.selection().select(id) {
        Ok(()) => Ok(Json(SelectionResponse {
            id: Some(id.to_string()),
        })),
        Err(e) => Err(error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            e.to_string(),
        )),
    }
}

/// GET /api/v1/details
///
/// The detail page for the selected movie. The body is always a rendered
/// view; the status code reflects how loading resolved.
pub async fn get_details(State(state): State<Arc<AppState>>) -> (StatusCode, Json<DetailView>) {
    let outcome = load_selected_detail(state.catalog(), state.selection()).await;
    let view = DetailView::render(&outcome, state.favourites());

    let status = match view.status {
        DetailStatus::Loaded | DetailStatus::NoSelection => StatusCode::OK,
        DetailStatus::Unavailable => StatusCode::NOT_FOUND,
        DetailStatus::Failed => StatusCode::BAD_GATEWAY,
    };

    (status, Json(view))
}
