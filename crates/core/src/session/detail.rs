//! Detail view loading.

use tracing::warn;

use crate::movies::{ApiError, MovieCatalog, MovieDetail};
use crate::selection::SelectionSlot;

/// How loading the selected movie resolved.
#[derive(Debug)]
pub enum DetailOutcome {
    Loaded(MovieDetail),
    /// The selection slot is empty.
    NoSelection,
    /// Upstream reported the movie does not exist.
    Unavailable(String),
    /// Transport or parse failure.
    Failed(ApiError),
}

/// Fetch the movie currently held in the selection slot.
///
/// Shares no state with other loads, so overlapping calls resolve
/// independently.
pub async fn load_selected_detail(
    catalog: &dyn MovieCatalog,
    selection: &SelectionSlot,
) -> DetailOutcome {
    let Some(id) = selection.current() else {
        return DetailOutcome::NoSelection;
    };
    load_detail(catalog, &id).await
}

/// Fetch one movie and classify the result.
pub async fn load_detail(catalog: &dyn MovieCatalog, id: &str) -> DetailOutcome {
    match catalog.fetch_by_id(id).await {
        Ok(detail) => DetailOutcome::Loaded(detail),
        Err(ApiError::NotFound(message)) => DetailOutcome::Unavailable(message),
        Err(e) => {
            warn!("Failed to load details for {}: {}", id, e);
            DetailOutcome::Failed(e)
        }
    }
}
