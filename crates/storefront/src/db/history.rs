//! Purchase history repository.

use crate::models::PurchaseRecord;
use crate::storage::{Scope, Storage, StorageError};

/// Repository for durable purchase history lists.
pub struct HistoryRepository<'a> {
    storage: &'a Storage,
}

impl<'a> HistoryRepository<'a> {
    /// Create a new history repository.
    #[must_use]
    pub const fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Records stored under `key`; absent history is empty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Malformed` if the stored list cannot be parsed.
    pub fn load(&self, key: &str) -> Result<Vec<PurchaseRecord>, StorageError> {
        self.storage.read_list(Scope::Durable, key)
    }

    /// Append `records` to the list under `key`.
    ///
    /// Read-modify-write with no lock: a concurrent writer to the same key
    /// can lose records (last write wins).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be read or written.
    pub fn append(&self, key: &str, records: &[PurchaseRecord]) -> Result<(), StorageError> {
        let mut history = self.load(key)?;
        history.extend_from_slice(records);
        self.storage.write_json(Scope::Durable, key, &history)
    }
}
