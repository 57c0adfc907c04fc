//! Registered user listing.
//!
//! # Usage
//!
//! ```bash
//! pocket-shop users
//! ```

use std::io::Write;

use pocket_shop_storefront::{AppError, ShopState};

/// Write one line per registered user: display name and email.
///
/// Password digests are never printed.
///
/// # Errors
///
/// Returns `AppError` if the user list cannot be read or output fails.
pub fn list<W: Write>(state: &ShopState, mut out: W) -> Result<usize, AppError> {
    let users = state.auth().users()?;

    if users.is_empty() {
        writeln!(out, "No registered users.")?;
    }
    for user in &users {
        writeln!(out, "{:<20} {}", user.display_name, user.email)?;
    }

    tracing::debug!(count = users.len(), "Listed users");
    Ok(users.len())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pocket_shop_storefront::config::ShopConfig;
    use pocket_shop_storefront::storage::Storage;

    use super::*;

    #[tokio::test]
    async fn test_lists_users_without_digests() {
        let state = ShopState::new(ShopConfig::default(), Storage::in_memory());
        state
            .auth()
            .register("Ana", "ana@x.com", "Secret1!")
            .await
            .unwrap();

        let mut out = Vec::new();
        assert_eq!(list(&state, &mut out).unwrap(), 1);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Ana"));
        assert!(text.contains("ana@x.com"));
        assert!(!text.contains(&pocket_shop_storefront::services::auth::sha256_hex("Secret1!")));
    }

    #[test]
    fn test_empty() {
        let state = ShopState::new(ShopConfig::default(), Storage::in_memory());
        let mut out = Vec::new();
        assert_eq!(list(&state, &mut out).unwrap(), 0);
        assert_eq!(String::from_utf8(out).unwrap(), "No registered users.\n");
    }
}
