//! Cart identity extractor.
//!
//! Carts are keyed by the optional `x-cart-key` request header. Requests
//! without it share the global cart.

use axum::{extract::FromRequestParts, http::request::Parts};

use minishop_core::CartKey;

use crate::error::AppError;

/// The HTTP header naming the cart a request operates on.
pub const CART_KEY_HEADER: &str = "x-cart-key";

/// Extractor yielding the [`CartKey`] for the current request.
///
/// Rejects with `400` when the header is present but malformed.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CurrentCart(cart): CurrentCart) -> String {
///     format!("operating on cart {cart}")
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentCart(pub CartKey);

impl<S> FromRequestParts<S> for CurrentCart
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(CART_KEY_HEADER) else {
            return Ok(Self(CartKey::default()));
        };

        let raw = value
            .to_str()
            .map_err(|_| AppError::BadRequest(format!("{CART_KEY_HEADER} must be ASCII")))?;

        Ok(Self(CartKey::parse(raw)?))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn extract(header: Option<&str>) -> Result<CurrentCart, AppError> {
        let mut builder = Request::builder().uri("/api/cart/count");
        if let Some(value) = header {
            builder = builder.header(CART_KEY_HEADER, value);
        }
        let (mut parts, ()) = builder.body(()).unwrap().into_parts();
        CurrentCart::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_missing_header_is_global_cart() {
        let CurrentCart(key) = extract(None).await.unwrap();
        assert_eq!(key, CartKey::default());
    }

    #[tokio::test]
    async fn test_header_selects_cart() {
        let CurrentCart(key) = extract(Some("session-7")).await.unwrap();
        assert_eq!(key.as_str(), "session-7");
    }

    #[tokio::test]
    async fn test_malformed_header_rejected() {
        let err = extract(Some("bad key!")).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
