//! Movie metadata catalog backed by the OMDb API.
//!
//! The catalog answers two questions: which movies match a free-text query
//! (one page at a time), and what are the full details of a single movie.
//! A well-formed "no results" answer from upstream is a valid outcome, not
//! an error.

mod omdb;
mod types;

pub use omdb::{OmdbClient, OmdbConfig};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when talking to the movie catalog.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network failure or non-success HTTP status.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body was not the expected JSON envelope.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Upstream explicitly reported that the movie does not exist.
    #[error("Movie not found: {0}")]
    NotFound(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e.to_string())
    }
}

impl ApiError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Transport(_) => "transport",
            ApiError::Parse(_) => "parse",
            ApiError::NotFound(_) => "not_found",
            ApiError::NotConfigured(_) => "not_configured",
        }
    }
}

/// Source of movie search results and details.
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Search movies by free-text query. `page` is 1-based.
    async fn search(&self, query: &str, page: u32) -> Result<SearchResultPage, ApiError>;

    /// Fetch the full record of a single movie.
    async fn fetch_by_id(&self, id: &str) -> Result<MovieDetail, ApiError>;
}
