//! Cart queries for `PostgreSQL`.

use async_trait::async_trait;

use minishop_core::{CartItem, CartItemId, CartKey, ProductId};

use super::{CartStore, PgStore, RepositoryError, map_write_error};

/// Internal row type for cart item queries.
#[derive(Debug, sqlx::FromRow)]
struct CartItemRow {
    id: CartItemId,
    cart_key: CartKey,
    product_id: ProductId,
    quantity: i64,
}

impl From<CartItemRow> for CartItem {
    fn from(row: CartItemRow) -> Self {
        Self {
            id: row.id,
            cart_key: row.cart_key,
            product_id: row.product_id,
            quantity: row.quantity,
        }
    }
}

#[async_trait]
impl CartStore for PgStore {
    async fn increment(
        &self,
        cart: &CartKey,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<CartItem, RepositoryError> {
        // Single-statement upsert: the row lock taken by ON CONFLICT serializes
        // concurrent increments of the same line.
        let row = sqlx::query_as::<_, CartItemRow>(
            r"
            INSERT INTO shop.cart_item (cart_key, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (cart_key, product_id)
            DO UPDATE SET quantity = shop.cart_item.quantity + EXCLUDED.quantity,
                          updated_at = NOW()
            RETURNING id, cart_key, product_id, quantity
            ",
        )
        .bind(cart)
        .bind(product_id)
        .bind(quantity)
        .fetch_one(self.pool())
        .await
        .map_err(map_write_error)?;

        Ok(row.into())
    }

    async fn total_quantity(&self, cart: &CartKey) -> Result<i64, RepositoryError> {
        let total: i64 = sqlx::query_scalar(
            r"
            SELECT COALESCE(SUM(quantity), 0)::BIGINT
            FROM shop.cart_item
            WHERE cart_key = $1
            ",
        )
        .bind(cart)
        .fetch_one(self.pool())
        .await?;

        Ok(total)
    }
}
