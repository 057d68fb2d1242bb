//! Product queries for `PostgreSQL`.
//!
//! Queries are checked at runtime (`query_as`) so the crate builds without a
//! live database. The `ORDER BY` clause is chosen from a closed set of
//! literals, never from client input.

use async_trait::async_trait;

use minishop_core::{NewProduct, PageRequest, Price, Product, ProductId, ProductSort};

use super::{PgStore, ProductStore, RepositoryError, map_write_error};

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    price: Price,
    images: Vec<String>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            price: row.price,
            images: row.images,
        }
    }
}

/// Page query for each sort order.
///
/// Names compare byte-wise (`COLLATE "C"`) so ordering does not depend on
/// the server locale.
const fn page_query(sort: ProductSort) -> &'static str {
    match sort {
        ProductSort::Default => {
            "SELECT id, name, price, images FROM shop.product \
             ORDER BY seq LIMIT $1 OFFSET $2"
        }
        ProductSort::Name => {
            "SELECT id, name, price, images FROM shop.product \
             ORDER BY name COLLATE \"C\", seq LIMIT $1 OFFSET $2"
        }
        ProductSort::PriceAsc => {
            "SELECT id, name, price, images FROM shop.product \
             ORDER BY price, seq LIMIT $1 OFFSET $2"
        }
        ProductSort::PriceDesc => {
            "SELECT id, name, price, images FROM shop.product \
             ORDER BY price DESC, seq LIMIT $1 OFFSET $2"
        }
    }
}

#[async_trait]
impl ProductStore for PgStore {
    async fn insert(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            INSERT INTO shop.product (name, price, images)
            VALUES ($1, $2, $3)
            RETURNING id, name, price, images
            ",
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.images)
        .fetch_one(self.pool())
        .await
        .map_err(map_write_error)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, price, images
            FROM shop.product
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(row.map(Product::from))
    }

    async fn find_page(
        &self,
        sort: ProductSort,
        page: PageRequest,
    ) -> Result<Vec<Product>, RepositoryError> {
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);

        let rows = sqlx::query_as::<_, ProductRow>(page_query(sort))
            .bind(i64::from(page.limit()))
            .bind(offset)
            .fetch_all(self.pool())
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shop.product")
            .fetch_one(self.pool())
            .await?;

        u64::try_from(count)
            .map_err(|_| RepositoryError::DataCorruption(format!("negative row count {count}")))
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(self.pool()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_orders() {
        assert!(page_query(ProductSort::Default).contains("ORDER BY seq "));
        assert!(page_query(ProductSort::Name).contains("ORDER BY name COLLATE \"C\", seq"));
        assert!(page_query(ProductSort::PriceAsc).contains("ORDER BY price, seq"));
        assert!(page_query(ProductSort::PriceDesc).contains("ORDER BY price DESC, seq"));
    }

    #[test]
    fn test_page_queries_are_bounded() {
        for sort in [
            ProductSort::Default,
            ProductSort::Name,
            ProductSort::PriceAsc,
            ProductSort::PriceDesc,
        ] {
            assert!(page_query(sort).ends_with("LIMIT $1 OFFSET $2"));
        }
    }
}
