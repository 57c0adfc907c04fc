//! User domain types.

use serde::{Deserialize, Serialize};

/// A registered shopper, as stored in the user list.
///
/// Created on registration and never changed afterwards. `email` is unique
/// across the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Name shown in the shop.
    pub display_name: String,
    /// Login identity.
    pub email: String,
    /// Lowercase hex SHA-256 of the password.
    pub password_digest: String,
}
