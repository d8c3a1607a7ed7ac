//! Page-level views composed from cards and messages.

use serde::Serialize;

use super::cards::{render_detail, CardCapabilities, SummaryCardRenderer};
use super::{Action, RenderedNode, Renderer};
use crate::favourites::FavouritesStore;
use crate::movies::MovieSummary;
use crate::session::{DetailOutcome, SessionPhase, SessionSnapshot};

pub const MSG_LOADING: &str = "Loading...";
pub const MSG_SEARCH_FAILED: &str = "Error fetching movies. Try again.";
pub const MSG_NO_FAVOURITES: &str = "No favourites yet.";
pub const MSG_NO_SELECTION: &str = "No movie selected.";
pub const MSG_DETAILS_UNAVAILABLE: &str = "Details not available.";
pub const MSG_DETAILS_FAILED: &str = "Failed to load details.";

fn grid(movies: &[MovieSummary], favourites: &FavouritesStore) -> RenderedNode {
    let renderer = SummaryCardRenderer::new(favourites, CardCapabilities::default());
    RenderedNode::Grid {
        children: movies.iter().map(|m| renderer.render(m)).collect(),
    }
}

/// The search results page.
#[derive(Debug, Clone, Serialize)]
pub struct SearchView {
    pub phase: SessionPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub page: u32,
    pub total_pages: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub results: RenderedNode,
    /// Present only when more pages exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_more: Option<RenderedNode>,
}

impl SearchView {
    pub fn render(snapshot: &SessionSnapshot, favourites: &FavouritesStore) -> Self {
        let message = match snapshot.phase {
            SessionPhase::Idle | SessionPhase::Populated => None,
            SessionPhase::Loading => Some(MSG_LOADING.to_string()),
            SessionPhase::Empty => Some(format!(
                "Movie \"{}\" not found.",
                snapshot.query.as_deref().unwrap_or_default()
            )),
            SessionPhase::Failed => Some(MSG_SEARCH_FAILED.to_string()),
        };

        let load_more = snapshot.has_more.then(|| RenderedNode::Button {
            label: "Load More".to_string(),
            action: Action::LoadMore {
                page: snapshot.page + 1,
            },
            aria_label: None,
        });

        Self {
            phase: snapshot.phase,
            query: snapshot.query.clone(),
            page: snapshot.page,
            total_pages: snapshot.total_pages,
            message,
            results: grid(&snapshot.items, favourites),
            load_more,
        }
    }
}

/// The favourites page.
#[derive(Debug, Clone, Serialize)]
pub struct FavouritesView {
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub results: RenderedNode,
}

impl FavouritesView {
    pub fn render(favourites: &FavouritesStore) -> Self {
        let items = favourites.list();
        Self {
            count: items.len(),
            message: items.is_empty().then(|| MSG_NO_FAVOURITES.to_string()),
            results: grid(&items, favourites),
        }
    }
}

/// How the detail page resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailStatus {
    Loaded,
    NoSelection,
    Unavailable,
    Failed,
}

/// The detail page.
#[derive(Debug, Clone, Serialize)]
pub struct DetailView {
    pub status: DetailStatus,
    pub content: RenderedNode,
}

impl DetailView {
    pub fn render(outcome: &DetailOutcome, favourites: &FavouritesStore) -> Self {
        let message = |text: &str| RenderedNode::Message {
            text: text.to_string(),
        };

        match outcome {
            DetailOutcome::Loaded(movie) => Self {
                status: DetailStatus::Loaded,
                content: render_detail(movie, favourites),
            },
            DetailOutcome::NoSelection => Self {
                status: DetailStatus::NoSelection,
                content: message(MSG_NO_SELECTION),
            },
            DetailOutcome::Unavailable(_) => Self {
                status: DetailStatus::Unavailable,
                content: message(MSG_DETAILS_UNAVAILABLE),
            },
            DetailOutcome::Failed(_) => Self {
                status: DetailStatus::Failed,
                content: message(MSG_DETAILS_FAILED),
            },
        }
    }
}
