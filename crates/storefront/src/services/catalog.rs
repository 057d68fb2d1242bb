//! Catalog query service.

use tracing::instrument;

use minishop_core::{NewProduct, PageRequest, Product, ProductId, ProductPage, ProductSort};

use crate::db::ProductStore;
use crate::error::{AppError, Result};

/// Lists, fetches and creates products.
pub struct CatalogService<'a> {
    products: &'a dyn ProductStore,
}

impl<'a> CatalogService<'a> {
    /// Create a catalog service over a product store.
    #[must_use]
    pub const fn new(products: &'a dyn ProductStore) -> Self {
        Self { products }
    }

    /// Fetch one page of the catalog plus the catalog size.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the store fails.
    #[instrument(skip(self, page), fields(page = page.page(), limit = page.limit()))]
    pub async fn list(&self, sort: ProductSort, page: PageRequest) -> Result<ProductPage> {
        let products = self.products.find_page(sort, page).await?;
        let total = self.products.count().await?;

        tracing::debug!(returned = products.len(), total, "Listed products");

        Ok(ProductPage { products, total })
    }

    /// Fetch a single product.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no product has this ID, or
    /// `AppError::Database` if the store fails.
    #[instrument(skip(self))]
    pub async fn get(&self, id: ProductId) -> Result<Product> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("product {id} not found")))
    }

    /// Validate and persist a new product.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if the product fails validation or the
    /// store rejects it, or `AppError::Database` if the store fails.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create(&self, product: NewProduct) -> Result<Product> {
        product.validate()?;

        let created = self.products.insert(product).await?;
        tracing::info!(product_id = %created.id, "Product created");

        Ok(created)
    }
}
