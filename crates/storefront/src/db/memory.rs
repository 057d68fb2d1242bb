//! In-process store.
//!
//! Mirrors the `PostgreSQL` semantics closely enough to back the router tests
//! and `STORE_BACKEND=memory` demos: insertion order is the default order,
//! sorted pages break ties by insertion order, and cart increments are atomic
//! (every operation holds one mutex for its whole duration).

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use minishop_core::{
    CartItem, CartItemId, CartKey, NewProduct, PageRequest, Product, ProductId, ProductSort,
};

use super::{CartStore, ProductStore, RepositoryError};

#[derive(Debug, Default)]
struct Collections {
    /// Kept in insertion order.
    products: Vec<Product>,
    cart_items: HashMap<(CartKey, ProductId), CartItem>,
}

/// Process-local store. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<Collections>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Collections>, RepositoryError> {
        self.collections
            .lock()
            .map_err(|_| RepositoryError::DataCorruption("store lock poisoned".to_owned()))
    }
}

fn compare(sort: ProductSort, a: &Product, b: &Product) -> Ordering {
    match sort {
        ProductSort::Default => Ordering::Equal,
        ProductSort::Name => a.name.cmp(&b.name),
        ProductSort::PriceAsc => a.price.cmp(&b.price),
        ProductSort::PriceDesc => b.price.cmp(&a.price),
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn insert(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let product = product.into_product(ProductId::generate());
        self.lock()?.products.push(product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        Ok(self.lock()?.products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_page(
        &self,
        sort: ProductSort,
        page: PageRequest,
    ) -> Result<Vec<Product>, RepositoryError> {
        let collections = self.lock()?;

        // Stable sort keeps insertion order among equal keys.
        let mut ordered: Vec<&Product> = collections.products.iter().collect();
        ordered.sort_by(|a, b| compare(sort, a, b));

        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.limit()).unwrap_or(usize::MAX);

        Ok(ordered.into_iter().skip(skip).take(take).cloned().collect())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let len = self.lock()?.products.len();
        u64::try_from(len).map_err(|_| RepositoryError::DataCorruption("count overflow".to_owned()))
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.lock().map(|_| ())
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn increment(
        &self,
        cart: &CartKey,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<CartItem, RepositoryError> {
        let mut collections = self.lock()?;

        let item = collections
            .cart_items
            .entry((cart.clone(), product_id))
            .or_insert_with(|| CartItem {
                id: CartItemId::generate(),
                cart_key: cart.clone(),
                product_id,
                quantity: 0,
            });

        item.quantity = item
            .quantity
            .checked_add(quantity)
            .ok_or_else(|| RepositoryError::Conflict("value out of range".to_owned()))?;

        Ok(item.clone())
    }

    async fn total_quantity(&self, cart: &CartKey) -> Result<i64, RepositoryError> {
        self.lock()?
            .cart_items
            .values()
            .filter(|item| &item.cart_key == cart)
            .try_fold(0_i64, |sum, item| sum.checked_add(item.quantity))
            .ok_or_else(|| RepositoryError::DataCorruption("cart total overflow".to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use minishop_core::Price;

    use super::*;

    fn new_product(name: &str, cents: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price: Price::new(Decimal::new(cents, 2)).unwrap(),
            images: Vec::new(),
        }
    }

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        for (name, cents) in [("pear", 300), ("apple", 150), ("fig", 300), ("kiwi", 90)] {
            store.insert(new_product(name, cents)).await.unwrap();
        }
        store
    }

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_default_order_is_insertion_order() {
        let store = seeded().await;
        let page = PageRequest::new(Some(1), Some(10)).unwrap();
        let products = store.find_page(ProductSort::Default, page).await.unwrap();
        assert_eq!(names(&products), ["pear", "apple", "fig", "kiwi"]);
    }

    #[tokio::test]
    async fn test_price_ties_keep_insertion_order() {
        let store = seeded().await;
        let page = PageRequest::new(Some(1), Some(10)).unwrap();

        let asc = store.find_page(ProductSort::PriceAsc, page).await.unwrap();
        assert_eq!(names(&asc), ["kiwi", "apple", "pear", "fig"]);

        let desc = store.find_page(ProductSort::PriceDesc, page).await.unwrap();
        assert_eq!(names(&desc), ["pear", "fig", "apple", "kiwi"]);
    }

    #[tokio::test]
    async fn test_pages_do_not_overlap() {
        let store = seeded().await;
        let first = store
            .find_page(ProductSort::Name, PageRequest::new(Some(1), Some(3)).unwrap())
            .await
            .unwrap();
        let second = store
            .find_page(ProductSort::Name, PageRequest::new(Some(2), Some(3)).unwrap())
            .await
            .unwrap();
        assert_eq!(names(&first), ["apple", "fig", "kiwi"]);
        assert_eq!(names(&second), ["pear"]);
    }

    #[tokio::test]
    async fn test_page_past_end_is_empty() {
        let store = seeded().await;
        let page = PageRequest::new(Some(u32::MAX), Some(100)).unwrap();
        assert!(store.find_page(ProductSort::Default, page).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_carts_are_isolated() {
        let store = MemoryStore::new();
        let product = ProductId::generate();
        let alice = CartKey::parse("alice").unwrap();

        store.increment(&alice, product, 2).await.unwrap();
        store.increment(&CartKey::default(), product, 5).await.unwrap();

        assert_eq!(store.total_quantity(&alice).await.unwrap(), 2);
        assert_eq!(store.total_quantity(&CartKey::default()).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_increment_keeps_identity() {
        let store = MemoryStore::new();
        let product = ProductId::generate();
        let cart = CartKey::default();

        let first = store.increment(&cart, product, 1).await.unwrap();
        let second = store.increment(&cart, product, 4).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.quantity, 5);
        assert_eq!(store.total_quantity(&cart).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_increment_overflow_is_rejected() {
        let store = MemoryStore::new();
        let product = ProductId::generate();
        let cart = CartKey::default();

        store.increment(&cart, product, i64::MAX).await.unwrap();
        let err = store.increment(&cart, product, 1).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert_eq!(store.total_quantity(&cart).await.unwrap(), i64::MAX);
    }
}
