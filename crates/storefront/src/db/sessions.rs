//! Session marker repository.

use crate::models::SessionMarker;
use crate::storage::{Scope, Storage, StorageError};

use super::keys;

/// Repository for the ephemeral session marker.
pub struct SessionRepository<'a> {
    storage: &'a Storage,
}

impl<'a> SessionRepository<'a> {
    /// Create a new session repository.
    #[must_use]
    pub const fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// The current marker, if someone is logged in.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Malformed` if the stored marker cannot be parsed.
    pub fn current(&self) -> Result<Option<SessionMarker>, StorageError> {
        self.storage.read_json(Scope::Ephemeral, keys::SESSION)
    }

    /// Replace the marker.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub fn put(&self, marker: &SessionMarker) -> Result<(), StorageError> {
        self.storage.write_json(Scope::Ephemeral, keys::SESSION, marker)
    }

    /// Remove the marker.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(Scope::Ephemeral, keys::SESSION)
    }
}
