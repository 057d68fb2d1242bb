//! Cart aggregation service.

use tracing::instrument;

use minishop_core::{CartItem, CartKey, ProductId};

use crate::db::CartStore;
use crate::error::{AppError, Result, add_breadcrumb};

/// Largest quantity accepted by a single add.
pub const MAX_QUANTITY_PER_ADD: i64 = 10_000;

/// Merges quantities into cart lines and totals them.
pub struct CartService<'a> {
    carts: &'a dyn CartStore,
}

impl<'a> CartService<'a> {
    /// Create a cart service over a cart store.
    #[must_use]
    pub const fn new(carts: &'a dyn CartStore) -> Self {
        Self { carts }
    }

    /// Add `quantity` units of a product to a cart.
    ///
    /// The product is not checked for existence.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if `quantity` is outside
    /// `1..=MAX_QUANTITY_PER_ADD` or the line would overflow, or
    /// `AppError::Database` if the store fails.
    #[instrument(skip(self, cart), fields(cart = %cart))]
    pub async fn add(&self, cart: &CartKey, product_id: ProductId, quantity: i64) -> Result<CartItem> {
        if !(1..=MAX_QUANTITY_PER_ADD).contains(&quantity) {
            return Err(AppError::BadRequest(format!(
                "quantity must be between 1 and {MAX_QUANTITY_PER_ADD}"
            )));
        }

        let item = self.carts.increment(cart, product_id, quantity).await?;

        let product = product_id.to_string();
        add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product.as_str())]));
        tracing::info!(quantity = item.quantity, "Cart line updated");

        Ok(item)
    }

    /// Total number of units in a cart, across all products.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the store fails.
    #[instrument(skip(self, cart), fields(cart = %cart))]
    pub async fn count(&self, cart: &CartKey) -> Result<i64> {
        Ok(self.carts.total_quantity(cart).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    #[tokio::test]
    async fn test_repeated_adds_accumulate() {
        let store = MemoryStore::new();
        let cart = CartService::new(&store);
        let key = CartKey::default();
        let product = ProductId::generate();

        cart.add(&key, product, 2).await.unwrap();
        let item = cart.add(&key, product, 3).await.unwrap();

        assert_eq!(item.quantity, 5);
        assert_eq!(cart.count(&key).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_count_sums_across_products() {
        let store = MemoryStore::new();
        let cart = CartService::new(&store);
        let key = CartKey::default();

        for quantity in [1, 4, 10] {
            cart.add(&key, ProductId::generate(), quantity).await.unwrap();
        }

        assert_eq!(cart.count(&key).await.unwrap(), 15);
    }

    #[tokio::test]
    async fn test_empty_cart_counts_zero() {
        let store = MemoryStore::new();
        let count = CartService::new(&store)
            .count(&CartKey::default())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_rejects_out_of_range_quantity() {
        let store = MemoryStore::new();
        let cart = CartService::new(&store);
        let key = CartKey::default();
        let product = ProductId::generate();

        for quantity in [0, -3, MAX_QUANTITY_PER_ADD + 1] {
            let err = cart.add(&key, product, quantity).await.unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)));
        }
        assert_eq!(cart.count(&key).await.unwrap(), 0);
    }
}
