//! Form validation helpers.
//!
//! Thin boolean views over the core types, for callers that only need a
//! yes/no or a message to show next to a field.

use pocket_shop_core::{DisplayName, Email, check_password};

/// Whether `name` is 3-20 letters, digits, or whitespace.
#[must_use]
pub fn validate_display_name(name: &str) -> bool {
    DisplayName::parse(name).is_ok()
}

/// Whether `email` has the `local@domain.tld` shape and at most 100 characters.
#[must_use]
pub fn validate_email(email: &str) -> bool {
    Email::parse(email).is_ok()
}

/// Whether `password` satisfies the password policy.
#[must_use]
pub fn validate_password(password: &str) -> bool {
    check_password(password).is_ok()
}

/// Description of the first password rule `password` breaks, or an empty
/// string if it satisfies all of them.
#[must_use]
pub fn password_error_message(password: &str) -> String {
    check_password(password)
        .err()
        .map(|e| e.to_string())
        .unwrap_or_default()
}
