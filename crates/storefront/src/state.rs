//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::{StoreBackend, StorefrontConfig};
use crate::db::{self, CartStore, MemoryStore, PgStore, ProductStore};
use crate::services::{CartService, CatalogService};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the store and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    products: Arc<dyn ProductStore>,
    carts: Arc<dyn CartStore>,
}

impl AppState {
    /// Create application state over explicit stores.
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        products: Arc<dyn ProductStore>,
        carts: Arc<dyn CartStore>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                products,
                carts,
            }),
        }
    }

    /// Create application state over one store serving both collections.
    #[must_use]
    pub fn with_store<S>(config: StorefrontConfig, store: Arc<S>) -> Self
    where
        S: ProductStore + CartStore + 'static,
    {
        let products: Arc<dyn ProductStore> = store.clone();
        let carts: Arc<dyn CartStore> = store;
        Self::new(config, products, carts)
    }

    /// Open the store selected by `config.store`.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the `PostgreSQL` pool cannot connect.
    pub async fn connect(config: StorefrontConfig) -> Result<Self, sqlx::Error> {
        match &config.store {
            StoreBackend::Postgres { database_url } => {
                let pool = db::create_pool(database_url).await?;
                tracing::info!("Database pool created");
                Ok(Self::with_store(config, Arc::new(PgStore::new(pool))))
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory store; data is lost on restart");
                Ok(Self::with_store(config, Arc::new(MemoryStore::new())))
            }
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product store.
    #[must_use]
    pub fn products(&self) -> &dyn ProductStore {
        self.inner.products.as_ref()
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn carts(&self) -> &dyn CartStore {
        self.inner.carts.as_ref()
    }

    /// Catalog service over this state's product store.
    #[must_use]
    pub fn catalog(&self) -> CatalogService<'_> {
        CatalogService::new(self.products())
    }

    /// Cart service over this state's cart store.
    #[must_use]
    pub fn cart(&self) -> CartService<'_> {
        CartService::new(self.carts())
    }
}
