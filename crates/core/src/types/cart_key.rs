//! Cart identity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`CartKey`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartKeyError {
    /// The input string is empty.
    #[error("cart key cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("cart key must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[A-Za-z0-9_-]`.
    #[error("cart key contains invalid character {0:?}")]
    InvalidChar(char),
}

/// Key selecting which cart an operation applies to.
///
/// Clients that send no key share the global cart, [`CartKey::default`].
///
/// ## Constraints
///
/// - Length: 1-64 characters
/// - Characters: ASCII letters, digits, `-` and `_`
///
/// ## Examples
///
/// ```
/// use minishop_core::CartKey;
///
/// assert!(CartKey::parse("session-42").is_ok());
/// assert!(CartKey::parse("").is_err());
/// assert!(CartKey::parse("has space").is_err());
/// assert_eq!(CartKey::default().as_str(), "global");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct CartKey(String);

impl CartKey {
    /// Maximum length of a cart key.
    pub const MAX_LENGTH: usize = 64;

    /// Key of the cart shared by every client that does not name one.
    pub const GLOBAL: &'static str = "global";

    /// Parse a `CartKey` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 64 characters, or
    /// contains characters other than ASCII alphanumerics, `-` and `_`.
    pub fn parse(s: &str) -> Result<Self, CartKeyError> {
        if s.is_empty() {
            return Err(CartKeyError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(CartKeyError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(CartKeyError::InvalidChar(c));
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CartKey {
    fn default() -> Self {
        Self(Self::GLOBAL.to_owned())
    }
}

impl fmt::Display for CartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CartKey {
    type Err = CartKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CartKey {
    type Error = CartKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CartKey> for String {
    fn from(key: CartKey) -> Self {
        key.0
    }
}

impl AsRef<str> for CartKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for CartKey {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for CartKey {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for CartKey {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_keys() {
        assert!(CartKey::parse("a").is_ok());
        assert!(CartKey::parse("user_123").is_ok());
        assert!(CartKey::parse("0f7c-44aa-b1").is_ok());
        assert!(CartKey::parse(&"k".repeat(64)).is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(CartKey::parse(""), Err(CartKeyError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        assert!(matches!(
            CartKey::parse(&"k".repeat(65)),
            Err(CartKeyError::TooLong { max: 64 })
        ));
    }

    #[test]
    fn test_parse_invalid_char() {
        assert_eq!(
            CartKey::parse("cart/1"),
            Err(CartKeyError::InvalidChar('/'))
        );
    }

    #[test]
    fn test_default_is_global() {
        assert_eq!(CartKey::default().as_str(), CartKey::GLOBAL);
    }

    #[test]
    fn test_serde_validates() {
        let key: CartKey = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(key.as_str(), "abc");
        assert!(serde_json::from_str::<CartKey>("\"a b\"").is_err());
    }
}
