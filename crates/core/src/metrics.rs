//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Upstream catalog requests (counts by outcome, latency)
//! - Search session outcomes
//! - Favourites mutations

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts};

// =============================================================================
// Upstream Catalog Metrics
// =============================================================================

/// Upstream requests total by operation and result.
pub static UPSTREAM_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "movie_explorer_upstream_requests_total",
            "Total requests sent to the movie catalog",
        ),
        &["operation", "result"], // "search"/"detail", "ok"/"transport"/"parse"/...
    )
    .unwrap()
});

/// Upstream request duration in seconds.
pub static UPSTREAM_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "movie_explorer_upstream_request_duration_seconds",
            "Duration of movie catalog requests",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["operation"],
    )
    .unwrap()
});

// =============================================================================
// Search Session Metrics
// =============================================================================

/// Search requests by outcome.
pub static SEARCH_OUTCOMES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "movie_explorer_search_outcomes_total",
            "Search requests by outcome",
        ),
        &["outcome"], // "populated", "empty", "failed", "dropped", "stale"
    )
    .unwrap()
});

// =============================================================================
// Favourites Metrics
// =============================================================================

/// Favourite toggles by action.
pub static FAVOURITE_TOGGLES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "movie_explorer_favourite_toggles_total",
            "Favourite add/remove operations",
        ),
        &["action"], // "added", "removed"
    )
    .unwrap()
});

/// Number of movies currently in the favourites list.
pub static FAVOURITES_COUNT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "movie_explorer_favourites",
        "Number of movies in the favourites list",
    )
    .unwrap()
});

/// Get all core metrics for registration with a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Upstream
        Box::new(UPSTREAM_REQUESTS.clone()),
        Box::new(UPSTREAM_REQUEST_DURATION.clone()),
        // Session
        Box::new(SEARCH_OUTCOMES.clone()),
        // Favourites
        Box::new(FAVOURITE_TOGGLES.clone()),
        Box::new(FAVOURITES_COUNT.clone()),
    ]
}
