//! Owned shop state.

use crate::config::ShopConfig;
use crate::services::auth::AuthService;
use crate::services::cart::CartService;
use crate::storage::{FileStore, MemoryStore, Storage, StorageError};

/// State of one browsing context: configuration and both storage scopes.
///
/// Services borrow the storage from here; nothing is global.
#[derive(Debug)]
pub struct ShopState {
    config: ShopConfig,
    storage: Storage,
}

impl ShopState {
    /// Create state over existing storage.
    #[must_use]
    pub fn new(config: ShopConfig, storage: Storage) -> Self {
        Self { config, storage }
    }

    /// Open durable storage from the configured data directory, with a fresh
    /// in-memory ephemeral scope.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the durable file cannot be read or parsed.
    pub fn open(config: ShopConfig) -> Result<Self, StorageError> {
        let durable = FileStore::open(config.durable_store_path())?;
        tracing::info!(path = %durable.path().display(), "Durable storage opened");
        Ok(Self::new(config, Storage::new(durable, MemoryStore::new())))
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub const fn config(&self) -> &ShopConfig {
        &self.config
    }

    /// Get a reference to the storage.
    #[must_use]
    pub const fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Authentication service over this state's storage.
    #[must_use]
    pub const fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.storage)
    }

    /// Cart service over this state's storage, using the configured tax rate.
    ///
    /// The returned cart is empty until [`CartService::init`] is called.
    #[must_use]
    pub fn cart(&self) -> CartService<'_> {
        CartService::new(&self.storage).with_tax_rate(self.config.tax_rate)
    }
}
