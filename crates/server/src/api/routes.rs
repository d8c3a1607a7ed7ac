use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use super::{details, favourites, handlers, middleware::metrics_middleware, movies, search};
use crate::metrics::metrics_handler;
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let static_dir = state.config().server.static_dir.clone();

    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Search session
        .route("/search", get(search::get_search))
        .route("/search", post(search::submit_search))
        .route("/search/more", post(search::load_more))
        .route("/search/live", post(search::live_search))
        // Favourites
        .route("/favourites", get(favourites::list_favourites))
        .route("/favourites", delete(favourites::clear_favourites))
        .route("/favourites/toggle", post(favourites::toggle_favourite))
        .route("/favourites/{id}", delete(favourites::remove_favourite))
        // Selection and detail page
        .route("/selection", get(details::get_selection))
        .route("/selection", put(details::set_selection))
        .route("/details", get(details::get_details))
        // Raw catalog access
        .route("/movies/search", get(movies::search_movies))
        .route("/movies/{id}", get(movies::get_movie))
        .with_state(state);

    let router = Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(metrics_handler));

    // Serve front-end assets with SPA fallback
    let router = match static_dir {
        Some(dir) => {
            let index_path = dir.join("index.html");
            router.fallback_service(ServeDir::new(&dir).fallback(ServeFile::new(index_path)))
        }
        None => router,
    };

    router
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
