//! Authentication service.
//!
//! Registers users, checks credentials against stored password digests, and
//! manages the session marker that decides whether the browsing context is
//! authenticated.

mod digest;
mod error;
mod validation;

pub use digest::{password_digest, sha256_hex};
pub use error::AuthError;
pub use validation::{
    password_error_message, validate_display_name, validate_email, validate_password,
};

use tracing::instrument;

use crate::db::{SessionRepository, UserRepository};
use crate::models::{SessionMarker, UserRecord};
use crate::storage::Storage;

/// Authentication service.
///
/// Input validation is the caller's job (see [`validate_email`] and
/// friends); the service only enforces email uniqueness.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    sessions: SessionRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(storage: &'a Storage) -> Self {
        Self {
            users: UserRepository::new(storage),
            sessions: SessionRepository::new(storage),
        }
    }

    // =========================================================================
    // Registration and Credentials
    // =========================================================================

    /// Register a new user.
    ///
    /// Returns `Ok(false)` without touching storage if `email` is already
    /// registered.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the user list cannot be read or written.
    /// Returns `AuthError::Digest` if hashing the password fails.
    #[instrument(skip(self, display_name, password))]
    pub async fn register(
        &self,
        display_name: &str,
        email: &str,
        password: &str,
    ) -> Result<bool, AuthError> {
        if self.users.find_by_email(email)?.is_some() {
            tracing::info!("Registration rejected: email already registered");
            return Ok(false);
        }

        let password_digest = password_digest(password).await?;

        self.users.insert(UserRecord {
            display_name: display_name.to_owned(),
            email: email.to_owned(),
            password_digest,
        })?;

        tracing::info!("User registered");
        Ok(true)
    }

    /// Whether a user with `email` exists and `password` matches its digest.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the user list cannot be read.
    /// Returns `AuthError::Digest` if hashing the password fails.
    #[instrument(skip(self, password))]
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<bool, AuthError> {
        let users = self.users.list()?;
        let password_digest = password_digest(password).await?;

        let valid = users
            .iter()
            .any(|u| u.email == email && u.password_digest == password_digest);

        if !valid {
            tracing::debug!("Credential check failed");
        }
        Ok(valid)
    }

    /// All registered users.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the user list cannot be read.
    pub fn users(&self) -> Result<Vec<UserRecord>, AuthError> {
        Ok(self.users.list()?)
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Mark `email` as logged in.
    ///
    /// Does not check credentials; call [`Self::verify_credentials`] first.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the marker cannot be written.
    #[instrument(skip(self))]
    pub fn login(&self, email: &str) -> Result<(), AuthError> {
        self.sessions.put(&SessionMarker::new(email))?;
        tracing::info!("Session started");
        Ok(())
    }

    /// Remove the session marker.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the marker cannot be removed.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), AuthError> {
        self.sessions.clear()?;
        tracing::info!("Session ended");
        Ok(())
    }

    /// The current session marker, if any.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the marker cannot be read.
    pub fn current_session(&self) -> Result<Option<SessionMarker>, AuthError> {
        Ok(self.sessions.current()?)
    }

    /// Whether a session marker exists.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the marker cannot be read.
    pub fn is_authenticated(&self) -> Result<bool, AuthError> {
        Ok(self.current_session()?.is_some())
    }
}
