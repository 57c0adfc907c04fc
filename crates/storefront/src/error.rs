//! Unified error handling.
//!
//! Provides an `AppError` type that front ends can return from any
//! operation, wrapping the error of whichever layer failed.

use thiserror::Error;

use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::services::cart::CartError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Storage could not be opened or accessed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Terminal input or output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Whether the failure came from stored content that cannot be parsed.
    #[must_use]
    pub const fn is_data_corruption(&self) -> bool {
        matches!(
            self,
            Self::Storage(StorageError::Malformed { .. })
                | Self::Auth(AuthError::Storage(StorageError::Malformed { .. }))
                | Self::Cart(CartError::Storage(StorageError::Malformed { .. }))
        )
    }
}
