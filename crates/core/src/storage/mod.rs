//! Durable client-side key-value storage.
//!
//! Favourites and the detail selection slot each live under one key.

mod sqlite;

pub use sqlite::SqliteStorage;

use thiserror::Error;

/// Key holding the serialized favourites list (JSON array of summaries).
pub const FAVOURITES_KEY: &str = "movie_explorer_favs";

/// Key holding the identifier selected for the detail view.
pub const SELECTION_KEY: &str = "movie_explorer_selected";

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A flat string-to-string durable store.
///
/// Writes are synchronous: when `set` returns `Ok`, the value is durable.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
