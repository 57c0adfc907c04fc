//! Integration tests for Pocket Shop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pocket-shop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `accounts` - Registration, credential checks, and sessions
//! - `shopping` - Carts and purchase history across restarts
//!
//! Tests run against a real [`FileStore`] in a temporary directory. A
//! "restart" reopens the durable file and starts with a fresh ephemeral
//! scope, the way a new browser session would.

use std::path::PathBuf;

use tempfile::TempDir;

use pocket_shop_storefront::ShopState;
use pocket_shop_storefront::config::ShopConfig;
use pocket_shop_storefront::storage::{FileStore, MemoryStore, Storage, StorageError};

/// A shop whose durable storage lives in a temporary directory.
pub struct TestShop {
    dir: TempDir,
}

impl TestShop {
    /// Create an empty shop.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Configuration pointing at this shop's data directory.
    #[must_use]
    pub fn config(&self) -> ShopConfig {
        ShopConfig {
            data_dir: self.dir.path().to_path_buf(),
            ..ShopConfig::default()
        }
    }

    /// Path of the durable storage file.
    #[must_use]
    pub fn durable_path(&self) -> PathBuf {
        self.config().durable_store_path()
    }

    /// Open a new browsing context: existing durable data, empty ephemeral scope.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the durable file cannot be read.
    pub fn open(&self) -> Result<ShopState, StorageError> {
        ShopState::open(self.config())
    }

    /// Open raw two-scope storage over this shop's durable file.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the durable file cannot be read.
    pub fn open_storage(&self) -> Result<Storage, StorageError> {
        Ok(Storage::new(
            FileStore::open(self.durable_path())?,
            MemoryStore::new(),
        ))
    }
}

impl Default for TestShop {
    fn default() -> Self {
        Self::new()
    }
}
