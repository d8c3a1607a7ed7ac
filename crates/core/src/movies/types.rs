//! Movie records exchanged with the upstream catalog and the favourites store.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Number of results the upstream API returns per search page.
pub const PAGE_SIZE: u32 = 10;

/// Value the upstream API uses when a movie has no poster.
pub const NO_POSTER_SENTINEL: &str = "N/A";

/// Minimal movie record used in result lists and favourites.
///
/// Equality and hashing only consider `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieSummary {
    /// Upstream-assigned identifier (IMDb ID).
    pub id: String,
    /// Movie title.
    pub title: String,
    /// Release year as reported upstream (may be a range for series).
    #[serde(default)]
    pub year: String,
    /// Poster URL, absent when the movie has no image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

impl MovieSummary {
    /// Create a summary, normalising the upstream "no image" sentinel.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        year: impl Into<String>,
        poster: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year: year.into(),
            poster_url: normalize_poster(poster),
        }
    }
}

impl PartialEq for MovieSummary {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MovieSummary {}

impl Hash for MovieSummary {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Full movie record, fetched on demand and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub plot: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub actors: String,
    /// IMDb rating as reported upstream (e.g. "8.4" or "N/A").
    #[serde(default)]
    pub rating: String,
}

impl MovieDetail {
    /// Minimal copy suitable for the favourites store.
    pub fn summary(&self) -> MovieSummary {
        MovieSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            year: self.year.clone(),
            poster_url: self.poster_url.clone(),
        }
    }
}

impl From<&MovieDetail> for MovieSummary {
    fn from(detail: &MovieDetail) -> Self {
        detail.summary()
    }
}

/// One page of search results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResultPage {
    pub query: String,
    /// 1-based page number.
    pub page: u32,
    pub items: Vec<MovieSummary>,
    /// Total number of results across all pages, as reported upstream.
    pub total_count: u64,
}

impl SearchResultPage {
    /// Page with no results, used for well-formed "not found" responses.
    pub fn empty(query: impl Into<String>, page: u32) -> Self {
        Self {
            query: query.into(),
            page,
            items: Vec::new(),
            total_count: 0,
        }
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_count, PAGE_SIZE)
    }

    /// Whether the upstream reports pages after this one.
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages()
    }
}

/// `ceil(total_count / page_size)`, saturating at `u32::MAX`.
pub fn total_pages(total_count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total_count.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Map the upstream poster value to an optional URL.
pub(crate) fn normalize_poster(poster: Option<String>) -> Option<String> {
    poster
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty() && p != NO_POSTER_SENTINEL)
}
