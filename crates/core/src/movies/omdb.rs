//! OMDb (Open Movie Database) API client.
//!
//! OMDb requires an API key passed as a query parameter. Every response is
//! HTTP 200 with a `Response` field of `"True"` or `"False"`; the latter
//! carries an `Error` message such as "Movie not found!".

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use super::types::{normalize_poster, MovieDetail, MovieSummary, SearchResultPage};
use super::{ApiError, MovieCatalog};
use crate::metrics::{UPSTREAM_REQUESTS, UPSTREAM_REQUEST_DURATION};

const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// OMDb API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbConfig {
    /// OMDb API key (required).
    pub api_key: String,
    /// Base URL (default: https://www.omdbapi.com/).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

impl OmdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

/// OMDb API client.
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    /// Create a new OMDb client.
    pub fn new(config: OmdbConfig) -> Result<Self, ApiError> {
        if config.api_key.trim().is_empty() {
            return Err(ApiError::NotConfigured(
                "OMDb API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
        })
    }

    fn search_url(&self, query: &str, page: u32) -> String {
        format!(
            "{}?apikey={}&s={}&page={}",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(query),
            page
        )
    }

    fn detail_url(&self, id: &str) -> String {
        format!(
            "{}?apikey={}&i={}&plot=full",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(id)
        )
    }

    /// Perform a single GET and decode the JSON envelope.
    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: &str,
    ) -> Result<T, ApiError> {
        let started = Instant::now();
        let result = self.fetch(url).await;

        let label = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };
        UPSTREAM_REQUESTS
            .with_label_values(&[operation, label])
            .inc();
        UPSTREAM_REQUEST_DURATION
            .with_label_values(&[operation])
            .observe(started.elapsed().as_secs_f64());

        result
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Transport(format!(
                "upstream returned status {}",
                status.as_u16()
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl MovieCatalog for OmdbClient {
    async fn search(&self, query: &str, page: u32) -> Result<SearchResultPage, ApiError> {
        let page = page.max(1);

        debug!("OMDb search: query='{}', page={}", query, page);

        let url = self.search_url(query, page);
        let envelope: OmdbSearchResponse = self.get_json("search", &url).await?;

        Ok(envelope.into_page(query, page))
    }

    async fn fetch_by_id(&self, id: &str) -> Result<MovieDetail, ApiError> {
        debug!("OMDb get movie: id={}", id);

        let url = self.detail_url(id);
        let envelope: OmdbDetailResponse = self.get_json("detail", &url).await?;

        envelope.into_detail(id)
    }
}

// ============================================================================
// OMDb API Response Types (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<OmdbSearchItem>,
    #[serde(rename = "totalResults", default)]
    total_results: Option<String>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbDetailResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "imdbID", default)]
    imdb_id: Option<String>,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: Option<String>,
    #[serde(rename = "Plot", default)]
    plot: String,
    #[serde(rename = "Genre", default)]
    genre: String,
    #[serde(rename = "Director", default)]
    director: String,
    #[serde(rename = "Actors", default)]
    actors: String,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: String,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

/// Only the exact string `"True"` marks success.
fn is_true(response: &str) -> bool {
    response == "True"
}

// ============================================================================
// Conversions
// ============================================================================

impl OmdbSearchResponse {
    fn into_page(self, query: &str, page: u32) -> SearchResultPage {
        if !is_true(&self.response) {
            debug!(
                "OMDb search returned no results for '{}': {}",
                query,
                self.error.as_deref().unwrap_or("no error message")
            );
            return SearchResultPage::empty(query, page);
        }

        let total_count = self
            .total_results
            .as_deref()
            .and_then(|t| t.trim().parse().ok())
            .unwrap_or(0);

        SearchResultPage {
            query: query.to_string(),
            page,
            items: self.search.into_iter().map(|item| item.into()).collect(),
            total_count,
        }
    }
}

impl From<OmdbSearchItem> for MovieSummary {
    fn from(item: OmdbSearchItem) -> Self {
        MovieSummary::new(item.imdb_id, item.title, item.year, item.poster)
    }
}

impl OmdbDetailResponse {
    fn into_detail(self, requested_id: &str) -> Result<MovieDetail, ApiError> {
        if !is_true(&self.response) {
            return Err(ApiError::NotFound(
                self.error
                    .unwrap_or_else(|| format!("Movie ID {}", requested_id)),
            ));
        }

        Ok(MovieDetail {
            id: self
                .imdb_id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| requested_id.to_string()),
            title: self.title,
            year: self.year,
            poster_url: normalize_poster(self.poster),
            plot: self.plot,
            genre: self.genre,
            director: self.director,
            actors: self.actors,
            rating: self.imdb_rating,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OmdbClient {
        OmdbClient::new(OmdbConfig {
            api_key: "k3y".to_string(),
            base_url: Some("http://omdb.test/".to_string()),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_new_requires_api_key() {
        let result = OmdbClient::new(OmdbConfig::new("  "));
        assert!(matches!(result, Err(ApiError::NotConfigured(_))));
    }

    #[test]
    fn test_search_url_encodes_query() {
        let url = client().search_url("star wars & more", 2);
        assert_eq!(
            url,
            "http://omdb.test/?apikey=k3y&s=star%20wars%20%26%20more&page=2"
        );
    }

    #[test]
    fn test_detail_url_requests_full_plot() {
        let url = client().detail_url("tt0133093");
        assert_eq!(url, "http://omdb.test/?apikey=k3y&i=tt0133093&plot=full");
    }

    #[test]
    fn test_search_response_conversion() {
        let json = r#"{
            "Search": [
                {"Title": "The Avengers", "Year": "2012", "imdbID": "tt0848228", "Type": "movie", "Poster": "https://img.example/a.jpg"},
                {"Title": "Avengers: Age of Ultron", "Year": "2015", "imdbID": "tt2395427", "Type": "movie", "Poster": "N/A"}
            ],
            "totalResults": "25",
            "Response": "True"
        }"#;
        let envelope: OmdbSearchResponse = serde_json::from_str(json).unwrap();
        let page = envelope.into_page("Avengers", 1);

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_count, 25);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.items[0].id, "tt0848228");
        assert!(page.items[1].poster_url.is_none());
    }

    #[test]
    fn test_search_false_response_is_empty_page() {
        let json = r#"{"Response": "False", "Error": "Movie not found!"}"#;
        let envelope: OmdbSearchResponse = serde_json::from_str(json).unwrap();
        let page = envelope.into_page("zzzzqqq", 1);

        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 0);
        assert!(!page.has_more());
    }

    #[test]
    fn test_unparseable_total_is_zero() {
        let json = r#"{"Response": "True", "Search": [], "totalResults": "lots"}"#;
        let envelope: OmdbSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.into_page("x", 1).total_count, 0);
    }

    #[test]
    fn test_response_flag_is_case_sensitive() {
        for flag in ["true", "TRUE", "yes", ""] {
            let json = format!(
                r#"{{"Response": "{}", "Search": [{{"imdbID": "tt1", "Title": "One"}}], "totalResults": "1"}}"#,
                flag
            );
            let envelope: OmdbSearchResponse = serde_json::from_str(&json).unwrap();
            assert!(envelope.into_page("x", 1).items.is_empty(), "flag {:?}", flag);

            let json = format!(r#"{{"Response": "{}", "Title": "One"}}"#, flag);
            let envelope: OmdbDetailResponse = serde_json::from_str(&json).unwrap();
            assert!(matches!(envelope.into_detail("tt1"), Err(ApiError::NotFound(_))));
        }
    }

    #[test]
    fn test_detail_response_conversion() {
        let json = r#"{
            "Title": "The Matrix", "Year": "1999", "Genre": "Action, Sci-Fi",
            "Director": "Lana Wachowski, Lilly Wachowski", "Actors": "Keanu Reeves, Laurence Fishburne",
            "Plot": "When a beautiful stranger...", "Poster": "N/A", "imdbRating": "8.7",
            "imdbID": "tt0133093", "Response": "True"
        }"#;
        let envelope: OmdbDetailResponse = serde_json::from_str(json).unwrap();
        let detail = envelope.into_detail("tt0133093").unwrap();

        assert_eq!(detail.title, "The Matrix");
        assert_eq!(detail.rating, "8.7");
        assert!(detail.poster_url.is_none());
    }

    #[test]
    fn test_detail_false_response_is_not_found() {
        let json = r#"{"Response": "False", "Error": "Incorrect IMDb ID."}"#;
        let envelope: OmdbDetailResponse = serde_json::from_str(json).unwrap();
        let err = envelope.into_detail("tt_bad").unwrap_err();

        assert!(matches!(err, ApiError::NotFound(ref msg) if msg == "Incorrect IMDb ID."));
    }
}
