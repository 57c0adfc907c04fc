//! Key-value storage with two scopes.
//!
//! Components:
//! - [`KeyValueStore`]: the trait every backend implements (UTF-8 keys and
//!   values, no structure).
//! - [`MemoryStore`]: in-process map. Used for the ephemeral scope, whose
//!   lifetime is the running process.
//! - [`FileStore`]: JSON file on disk. Used for the durable scope.
//! - [`Storage`]: owns one store per [`Scope`] and adds typed JSON helpers.
//!
//! Absent keys and malformed content are kept apart: reading a missing key
//! yields `None` (or an empty list), while present-but-unparseable content
//! is a [`StorageError::Malformed`].

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Content is present under `key` but cannot be parsed.
    #[error("malformed content under {key}: {source}")]
    Malformed {
        /// Key (or file path) whose content failed to parse.
        key: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded as JSON.
    #[error("failed to encode value: {0}")]
    Encode(#[source] serde_json::Error),
}

/// String key-value storage.
///
/// Receivers are `&self`; implementations handle their own locking so a
/// store can be shared by every service that borrows it.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Which store a key lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Survives restarts.
    Durable,
    /// Cleared when the session ends.
    Ephemeral,
}

impl Scope {
    /// Lowercase name for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Durable => "durable",
            Self::Ephemeral => "ephemeral",
        }
    }
}

/// The durable and ephemeral stores of one browsing context.
pub struct Storage {
    durable: Box<dyn KeyValueStore>,
    ephemeral: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}

impl Storage {
    /// Create storage from a durable and an ephemeral store.
    #[must_use]
    pub fn new(
        durable: impl KeyValueStore + 'static,
        ephemeral: impl KeyValueStore + 'static,
    ) -> Self {
        Self {
            durable: Box::new(durable),
            ephemeral: Box::new(ephemeral),
        }
    }

    /// Storage where both scopes live in memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new(), MemoryStore::new())
    }

    /// The store backing `scope`.
    #[must_use]
    pub fn scope(&self, scope: Scope) -> &dyn KeyValueStore {
        match scope {
            Scope::Durable => self.durable.as_ref(),
            Scope::Ephemeral => self.ephemeral.as_ref(),
        }
    }

    /// Read and parse the JSON value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Malformed` if the content does not parse as `T`.
    pub fn read_json<T: DeserializeOwned>(
        &self,
        scope: Scope,
        key: &str,
    ) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.scope(scope).get(key)? else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Malformed {
                key: key.to_owned(),
                source,
            })
    }

    /// Read the JSON list under `key`; an absent key is an empty list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Malformed` if the content is not a list of `T`.
    pub fn read_list<T: DeserializeOwned>(
        &self,
        scope: Scope,
        key: &str,
    ) -> Result<Vec<T>, StorageError> {
        Ok(self.read_json(scope, key)?.unwrap_or_default())
    }

    /// Encode `value` as JSON and write it under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if encoding or the write fails.
    pub fn write_json<T: Serialize + ?Sized>(
        &self,
        scope: Scope,
        key: &str,
        value: &T,
    ) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(StorageError::Encode)?;
        tracing::trace!(scope = scope.as_str(), key, bytes = raw.len(), "write");
        self.scope(scope).set(key, &raw)
    }

    /// Remove `key` from `scope`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    pub fn remove(&self, scope: Scope, key: &str) -> Result<(), StorageError> {
        tracing::trace!(scope = scope.as_str(), key, "remove");
        self.scope(scope).remove(key)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_scopes_are_independent() {
        let storage = Storage::in_memory();
        storage.write_json(Scope::Durable, "k", &[1, 2]).unwrap();

        let durable: Vec<i32> = storage.read_list(Scope::Durable, "k").unwrap();
        let ephemeral: Vec<i32> = storage.read_list(Scope::Ephemeral, "k").unwrap();
        assert_eq!(durable, vec![1, 2]);
        assert!(ephemeral.is_empty());
    }

    #[test]
    fn test_absent_is_not_malformed() {
        let storage = Storage::in_memory();
        let value: Option<Vec<i32>> = storage.read_json(Scope::Durable, "missing").unwrap();
        assert!(value.is_none());

        storage.scope(Scope::Durable).set("bad", "{not json").unwrap();
        let err = storage
            .read_list::<i32>(Scope::Durable, "bad")
            .unwrap_err();
        assert!(matches!(err, StorageError::Malformed { ref key, .. } if key == "bad"));
    }

    #[test]
    fn test_remove() {
        let storage = Storage::in_memory();
        storage.write_json(Scope::Ephemeral, "k", "v").unwrap();
        storage.remove(Scope::Ephemeral, "k").unwrap();
        assert!(storage.scope(Scope::Ephemeral).get("k").unwrap().is_none());
        // removing twice is fine
        storage.remove(Scope::Ephemeral, "k").unwrap();
    }
}
