//! Selection slot: the movie chosen in a list view for the detail view.

use std::sync::Arc;

use tracing::warn;

use crate::storage::{KeyValueStorage, StorageError, SELECTION_KEY};

/// Durable slot holding the identifier selected for detail viewing.
#[derive(Clone)]
pub struct SelectionSlot {
    storage: Arc<dyn KeyValueStorage>,
}

impl SelectionSlot {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Record `id` as the selected movie.
    pub fn select(&self, id: &str) -> Result<(), StorageError> {
        self.storage.set(SELECTION_KEY, id.trim())
    }

    /// Currently selected identifier, if any.
    ///
    /// Read failures are logged and reported as no selection.
    pub fn current(&self) -> Option<String> {
        match self.storage.get(SELECTION_KEY) {
            Ok(id) => id.filter(|id| !id.is_empty()),
            Err(e) => {
                warn!("Failed to read selection slot: {}", e);
                None
            }
        }
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(SELECTION_KEY)
    }
}
