//! Password policy.
//!
//! Passwords are never stored; only the policy check lives here. Rules are
//! evaluated in a fixed order and the first one broken is reported, so the
//! `Display` text of [`PasswordError`] doubles as the user-facing hint.

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum password length in characters.
pub const MAX_PASSWORD_LENGTH: usize = 12;

/// A broken password rule.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordError {
    /// Shorter than [`MIN_PASSWORD_LENGTH`].
    #[error("Minimum 6 characters")]
    TooShort,
    /// Longer than [`MAX_PASSWORD_LENGTH`].
    #[error("Maximum 12 characters")]
    TooLong,
    /// No ASCII uppercase letter.
    #[error("Must contain 1 uppercase letter")]
    MissingUppercase,
    /// No character from the special set (space or ASCII punctuation).
    #[error("Must contain 1 special character")]
    MissingSpecial,
}

/// Returns true for characters in the special set:
/// `` !"#$%&'()*+,-./:;<=>?@[\]^_`{|}~`` and the ASCII space.
#[must_use]
pub const fn is_special(c: char) -> bool {
    c == ' ' || c.is_ascii_punctuation()
}

/// Check a password against the policy.
///
/// # Errors
///
/// Returns the first broken rule, in the order too short, too long,
/// missing uppercase, missing special character.
///
/// ```
/// use pocket_shop_core::{PasswordError, check_password};
///
/// assert!(check_password("Secret1!").is_ok());
/// assert_eq!(check_password("Ab!"), Err(PasswordError::TooShort));
/// assert_eq!(check_password("secret1!"), Err(PasswordError::MissingUppercase));
/// ```
pub fn check_password(password: &str) -> Result<(), PasswordError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }
    if len > MAX_PASSWORD_LENGTH {
        return Err(PasswordError::TooLong);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PasswordError::MissingUppercase);
    }
    if !password.chars().any(is_special) {
        return Err(PasswordError::MissingSpecial);
    }
    Ok(())
}
