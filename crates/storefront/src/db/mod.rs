//! Persistence for products and cart items.
//!
//! The API talks to its document store through two traits, [`ProductStore`]
//! and [`CartStore`]. Two implementations exist:
//!
//! - [`PgStore`] - `PostgreSQL` via sqlx (production)
//! - [`MemoryStore`] - process-local, for tests and database-free demos
//!
//! # Tables (schema `shop`)
//!
//! - `product` - Catalog entries; `seq` records insertion order
//! - `cart_item` - One row per `(cart_key, product_id)`
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p minishop-cli -- migrate
//! ```

pub mod cart;
pub mod memory;
pub mod products;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use minishop_core::{
    CartItem, CartKey, NewProduct, PageRequest, Product, ProductId, ProductSort,
};

pub use memory::MemoryStore;

/// Embedded SQL migrations for the storefront schema.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The store rejected the write (constraint or range violation).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Catalog collection.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Persist a new product and return it with its assigned identity.
    async fn insert(&self, product: NewProduct) -> Result<Product, RepositoryError>;

    /// Look up a single product.
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Fetch one page of products in the requested order.
    ///
    /// Ties (and [`ProductSort::Default`]) fall back to insertion order so
    /// that consecutive pages never overlap.
    async fn find_page(
        &self,
        sort: ProductSort,
        page: PageRequest,
    ) -> Result<Vec<Product>, RepositoryError>;

    /// Number of products in the catalog.
    async fn count(&self) -> Result<u64, RepositoryError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Cart line collection.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Add `quantity` to the line for `product_id`, creating it if absent.
    ///
    /// Must be atomic: concurrent increments for the same line all land.
    async fn increment(
        &self,
        cart: &CartKey,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<CartItem, RepositoryError>;

    /// Sum of quantities across every line of the cart.
    async fn total_quantity(&self, cart: &CartKey) -> Result<i64, RepositoryError>;
}

/// `PostgreSQL`-backed store.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Translate write rejections into `Conflict`, leaving other errors as-is.
fn map_write_error(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.is_check_violation() || db_err.is_unique_violation() {
            return RepositoryError::Conflict(db_err.message().to_owned());
        }
        // numeric_value_out_of_range
        if db_err.code().as_deref() == Some("22003") {
            return RepositoryError::Conflict("value out of range".to_owned());
        }
    }
    RepositoryError::Database(e)
}
