//! Persistent favourites list.
//!
//! The list is loaded once from durable storage and then owned by
//! [`FavouritesStore`]. Every mutation is a single read-modify-write under
//! the store's lock, and the new list is written to storage before the
//! mutation returns. If the write fails, the in-memory list is unchanged.
//!
//! Several processes sharing one storage file are not coordinated: the last
//! writer wins.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, warn};

use crate::metrics::{FAVOURITES_COUNT, FAVOURITE_TOGGLES};
use crate::movies::MovieSummary;
use crate::storage::{KeyValueStorage, StorageError, FAVOURITES_KEY};

/// Result of a [`FavouritesStore::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleResult {
    Added,
    Removed,
}

impl ToggleResult {
    /// Whether the movie is a favourite after the toggle.
    pub fn is_favourite(self) -> bool {
        matches!(self, ToggleResult::Added)
    }
}

/// A completed toggle: what changed and the list as persisted.
#[derive(Debug, Clone)]
pub struct ToggleOutcome {
    pub change: ToggleResult,
    pub list: Vec<MovieSummary>,
}

/// Favourites list backed by durable storage.
pub struct FavouritesStore {
    storage: Arc<dyn KeyValueStorage>,
    items: Mutex<Vec<MovieSummary>>,
}

impl FavouritesStore {
    /// Load the list from storage.
    ///
    /// Missing, unreadable or corrupt data yields an empty list.
    pub fn load(storage: Arc<dyn KeyValueStorage>) -> Self {
        let items = match storage.get(FAVOURITES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<MovieSummary>>(&raw) {
                Ok(items) => dedup(items),
                Err(e) => {
                    warn!("Stored favourites are corrupt, starting empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read favourites, starting empty: {}", e);
                Vec::new()
            }
        };

        debug!("Loaded {} favourites", items.len());
        FAVOURITES_COUNT.set(items.len() as i64);

        Self {
            storage,
            items: Mutex::new(items),
        }
    }

    /// Snapshot of the list, most recently added first.
    pub fn list(&self) -> Vec<MovieSummary> {
        self.items().clone()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items().iter().any(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Remove the movie if present, otherwise prepend a minimal copy of it.
    pub fn toggle(&self, movie: &MovieSummary) -> Result<ToggleOutcome, StorageError> {
        let mut items = self.items();

        let (next, change) = if items.iter().any(|m| m.id == movie.id) {
            let next: Vec<_> = items.iter().filter(|m| m.id != movie.id).cloned().collect();
            (next, ToggleResult::Removed)
        } else {
            let minimal = MovieSummary::new(
                movie.id.clone(),
                movie.title.clone(),
                movie.year.clone(),
                movie.poster_url.clone(),
            );
            let mut next = Vec::with_capacity(items.len() + 1);
            next.push(minimal);
            next.extend(items.iter().cloned());
            (next, ToggleResult::Added)
        };

        self.persist(&next)?;
        *items = next;

        let action = match change {
            ToggleResult::Added => "added",
            ToggleResult::Removed => "removed",
        };
        FAVOURITE_TOGGLES.with_label_values(&[action]).inc();
        FAVOURITES_COUNT.set(items.len() as i64);
        debug!("Favourite {}: {}", action, movie.id);

        Ok(ToggleOutcome {
            change,
            list: items.clone(),
        })
    }

    /// Remove a movie by identifier. Returns whether it was present.
    pub fn remove(&self, id: &str) -> Result<bool, StorageError> {
        let mut items = self.items();
        if !items.iter().any(|m| m.id == id) {
            return Ok(false);
        }

        let next: Vec<_> = items.iter().filter(|m| m.id != id).cloned().collect();
        self.persist(&next)?;
        *items = next;

        FAVOURITE_TOGGLES.with_label_values(&["removed"]).inc();
        FAVOURITES_COUNT.set(items.len() as i64);
        Ok(true)
    }

    /// Remove every favourite.
    pub fn clear(&self) -> Result<(), StorageError> {
        let mut items = self.items();
        self.persist(&[])?;
        items.clear();
        FAVOURITES_COUNT.set(0);
        Ok(())
    }

    fn persist(&self, items: &[MovieSummary]) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(items).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.set(FAVOURITES_KEY, &json)
    }

    fn items(&self) -> MutexGuard<'_, Vec<MovieSummary>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Drop repeated identifiers, keeping the first occurrence.
fn dedup(items: Vec<MovieSummary>) -> Vec<MovieSummary> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|m| seen.insert(m.id.clone()))
        .collect()
}
