//! Password digests.

use sha2::{Digest, Sha256};

use super::AuthError;

/// Lowercase hex SHA-256 of `text`.
#[must_use]
pub fn sha256_hex(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

/// [`sha256_hex`] computed on the blocking pool.
///
/// # Errors
///
/// Returns `AuthError::Digest` if the blocking task panics or is cancelled.
pub async fn password_digest(password: &str) -> Result<String, AuthError> {
    let password = password.to_owned();
    Ok(tokio::task::spawn_blocking(move || sha256_hex(&password)).await?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[tokio::test]
    async fn test_async_matches_sync() {
        let digest = password_digest("Secret1!").await.unwrap();
        assert_eq!(digest, sha256_hex("Secret1!"));
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
