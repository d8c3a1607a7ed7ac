//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the catalog and storage
//! traits, allowing end-to-end tests without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use movie_explorer_core::testing::{fixtures, MockMovieCatalog};
//!
//! let catalog = MockMovieCatalog::new();
//! catalog.set_search_results("Avengers", fixtures::summaries(25)).await;
//!
//! let page = catalog.search("Avengers", 1).await?;
//! assert_eq!(page.total_pages(), 3);
//! ```

mod failing_storage;
mod mock_movie_catalog;

pub use failing_storage::FailingStorage;
pub use mock_movie_catalog::{MockMovieCatalog, RecordedCatalogQuery, SearchGate};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::movies::{MovieDetail, MovieSummary};

    /// A summary with a poster and a fixed year.
    pub fn summary(id: &str, title: &str) -> MovieSummary {
        MovieSummary::new(
            id,
            title,
            "2012",
            Some(format!("https://img.example/{}.jpg", id)),
        )
    }

    /// `count` summaries with distinct identifiers starting at `tt0000000`.
    pub fn summaries(count: usize) -> Vec<MovieSummary> {
        summaries_from(0, count)
    }

    /// `count` summaries with identifiers numbered from `start`.
    pub fn summaries_from(start: usize, count: usize) -> Vec<MovieSummary> {
        (start..start + count)
            .map(|n| summary(&format!("tt{:07}", n), &format!("Movie {}", n)))
            .collect()
    }

    /// A fully populated detail record.
    pub fn detail(id: &str, title: &str) -> MovieDetail {
        MovieDetail {
            id: id.to_string(),
            title: title.to_string(),
            year: "1999".to_string(),
            poster_url: Some(format!("https://img.example/{}.jpg", id)),
            plot: "A long and detailed plot.".to_string(),
            genre: "Action, Sci-Fi".to_string(),
            director: "Some Director".to_string(),
            actors: "Actor One, Actor Two".to_string(),
            rating: "8.7".to_string(),
        }
    }
}
