//! Cart error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Storage read or write failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
