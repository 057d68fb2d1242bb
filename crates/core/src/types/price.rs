//! Non-negative price type using decimal arithmetic.
//!
//! Prices are plain amounts with no currency attached; the catalog does not
//! do currency conversion. On the wire a price is a JSON number, e.g. `9.99`.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative price.
///
/// ## Examples
///
/// ```
/// use minishop_core::Price;
/// use rust_decimal::Decimal;
///
/// assert!(Price::new(Decimal::new(999, 2)).is_ok());
/// assert!(Price::new(Decimal::ZERO).is_ok());
/// assert!(Price::new(Decimal::new(-1, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl Price {
    /// Create a price, rejecting negative amounts.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount.normalize()))
    }

    /// The price amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::new(amount)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_negative() {
        assert!(matches!(
            Price::new(Decimal::new(-1, 2)),
            Err(PriceError::Negative(_))
        ));
    }

    #[test]
    fn test_accepts_zero_and_negative_zero() {
        assert_eq!(Price::new(Decimal::ZERO).unwrap().amount(), Decimal::ZERO);
        let neg_zero = Decimal::new(0, 2) * Decimal::NEGATIVE_ONE;
        assert!(Price::new(neg_zero).is_ok());
    }

    #[test]
    fn test_json_number_in_and_out() {
        let price: Price = serde_json::from_str("9.99").unwrap();
        assert_eq!(price.amount(), Decimal::new(999, 2));
        assert_eq!(serde_json::to_string(&price).unwrap(), "9.99");
    }

    #[test]
    fn test_json_integer_accepted() {
        let price: Price = serde_json::from_str("12").unwrap();
        assert_eq!(price.amount(), Decimal::new(12, 0));
    }

    #[test]
    fn test_json_negative_rejected() {
        assert!(serde_json::from_str::<Price>("-0.5").is_err());
    }

    #[test]
    fn test_ordering_follows_amount() {
        let cheap = Price::new(Decimal::new(150, 2)).unwrap();
        let dear = Price::new(Decimal::new(1500, 2)).unwrap();
        assert!(cheap < dear);
    }

    #[test]
    fn test_display_two_places() {
        let price = Price::new(Decimal::new(5, 0)).unwrap();
        assert_eq!(price.to_string(), "5.00");
    }
}
