//! User repository.
//!
//! The whole user list lives under one durable key; every lookup is a linear
//! scan and every insert rewrites the list.

use crate::models::UserRecord;
use crate::storage::{Scope, Storage, StorageError};

use super::keys;

/// Repository for registered users.
pub struct UserRepository<'a> {
    storage: &'a Storage,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All registered users, in registration order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Malformed` if the stored list cannot be parsed.
    pub fn list(&self) -> Result<Vec<UserRecord>, StorageError> {
        self.storage.read_list(Scope::Durable, keys::USERS)
    }

    /// The user registered under `email`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Malformed` if the stored list cannot be parsed.
    pub fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StorageError> {
        Ok(self.list()?.into_iter().find(|u| u.email == email))
    }

    /// Append `user` and persist the full list.
    ///
    /// Does not check for duplicates; callers do.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be read or written.
    pub fn insert(&self, user: UserRecord) -> Result<(), StorageError> {
        let mut users = self.list()?;
        users.push(user);
        self.storage.write_json(Scope::Durable, keys::USERS, &users)
    }
}
