//! Authentication error types.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during authentication operations.
///
/// Rejections (duplicate email, wrong password) are not errors; the service
/// reports them as `Ok(false)`.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Storage read or write failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The digest task did not complete.
    #[error("password digest failed: {0}")]
    Digest(#[from] tokio::task::JoinError),
}
