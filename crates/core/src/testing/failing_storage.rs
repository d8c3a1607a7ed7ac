//! Storage whose reads and writes can be made to fail.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use crate::storage::{KeyValueStorage, StorageError};

/// In-memory [`KeyValueStorage`] with switchable failures.
///
/// Both reads and writes fail until turned off.
#[derive(Debug)]
pub struct FailingStorage {
    values: RwLock<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl Default for FailingStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl FailingStorage {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
            fail_reads: AtomicBool::new(true),
            fail_writes: AtomicBool::new(true),
        }
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool, op: &str) -> Result<(), StorageError> {
        if flag.load(Ordering::SeqCst) {
            return Err(StorageError::Database(format!("simulated {} failure", op)));
        }
        Ok(())
    }
}

impl KeyValueStorage for FailingStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::check(&self.fail_reads, "read")?;
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::check(&self.fail_writes, "write")?;
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::check(&self.fail_writes, "write")?;
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}
