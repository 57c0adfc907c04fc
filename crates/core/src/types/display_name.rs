//! Display name type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`DisplayName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DisplayNameError {
    /// Fewer than the minimum number of characters.
    #[error("display name must be at least {min} characters")]
    TooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// More than the maximum number of characters.
    #[error("display name must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// A character other than a letter, digit, or whitespace.
    #[error("display name may only contain letters, digits, and spaces (found {0:?})")]
    InvalidCharacter(char),
}

/// The name a shopper shows to the store.
///
/// 3-20 characters, each an ASCII letter, ASCII digit, or whitespace.
///
/// ```
/// use pocket_shop_core::DisplayName;
///
/// assert!(DisplayName::parse("Ana Maria 2").is_ok());
/// assert!(DisplayName::parse("Al").is_err());
/// assert!(DisplayName::parse("ana_maria").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    /// Minimum length in characters.
    pub const MIN_LENGTH: usize = 3;
    /// Maximum length in characters.
    pub const MAX_LENGTH: usize = 20;

    /// Parse a `DisplayName` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the length is outside 3-20 characters or a
    /// character is not a letter, digit, or whitespace.
    pub fn parse(s: &str) -> Result<Self, DisplayNameError> {
        let len = s.chars().count();
        if len < Self::MIN_LENGTH {
            return Err(DisplayNameError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }
        if len > Self::MAX_LENGTH {
            return Err(DisplayNameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(bad) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || c.is_whitespace()))
        {
            return Err(DisplayNameError::InvalidCharacter(bad));
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `DisplayName` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for DisplayName {
    type Err = DisplayNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_bounds() {
        assert_eq!(
            DisplayName::parse("Al"),
            Err(DisplayNameError::TooShort { min: 3 })
        );
        assert!(DisplayName::parse("Ana").is_ok());
        assert!(DisplayName::parse(&"a".repeat(20)).is_ok());
        assert_eq!(
            DisplayName::parse(&"a".repeat(21)),
            Err(DisplayNameError::TooLong { max: 20 })
        );
    }

    #[test]
    fn test_allowed_characters() {
        assert!(DisplayName::parse("Ana Maria 2").is_ok());
        assert!(DisplayName::parse("tab\there").is_ok());
        assert_eq!(
            DisplayName::parse("ana_maria"),
            Err(DisplayNameError::InvalidCharacter('_'))
        );
        assert_eq!(
            DisplayName::parse("José"),
            Err(DisplayNameError::InvalidCharacter('é'))
        );
    }
}
