//! Session-related types.

use serde::{Deserialize, Serialize};

/// Marks which identity is logged in for the current browsing context.
///
/// At most one exists at a time; it lives in ephemeral storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMarker {
    /// Email of the logged-in user.
    pub email: String,
}

impl SessionMarker {
    /// Create a marker for `email`.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}
