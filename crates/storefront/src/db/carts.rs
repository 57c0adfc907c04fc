//! Cart repository.

use crate::models::{CartLine, SessionMarker};
use crate::storage::{Scope, Storage, StorageError};

use super::keys;

/// Where a cart is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLocation {
    /// Storage scope holding the cart.
    pub scope: Scope,
    /// Key within the scope.
    pub key: String,
}

impl CartLocation {
    /// Location of the cart for the given session.
    ///
    /// Authenticated users keep their cart in durable storage under their
    /// email; guests share one ephemeral key.
    #[must_use]
    pub fn for_session(session: Option<&SessionMarker>) -> Self {
        match session {
            Some(marker) => Self {
                scope: Scope::Durable,
                key: keys::user_cart(&marker.email),
            },
            None => Self::guest(),
        }
    }

    /// Location of the guest cart.
    #[must_use]
    pub fn guest() -> Self {
        Self {
            scope: Scope::Ephemeral,
            key: keys::GUEST_CART.to_owned(),
        }
    }
}

/// Repository for stored carts.
pub struct CartRepository<'a> {
    storage: &'a Storage,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Lines stored at `location`; an absent cart is empty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Malformed` if the stored cart cannot be parsed.
    pub fn load(&self, location: &CartLocation) -> Result<Vec<CartLine>, StorageError> {
        self.storage.read_list(location.scope, &location.key)
    }

    /// Overwrite the cart at `location` with `lines`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub fn save(&self, location: &CartLocation, lines: &[CartLine]) -> Result<(), StorageError> {
        self.storage.write_json(location.scope, &location.key, lines)
    }

    /// Delete the cart at `location`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    pub fn remove(&self, location: &CartLocation) -> Result<(), StorageError> {
        self.storage.remove(location.scope, &location.key)
    }
}
