//! Integration tests for Minishop.
//!
//! These tests talk HTTP to a storefront that is already running; they are
//! `#[ignore]`d so a plain `cargo test` skips them.
//!
//! # Running Tests
//!
//! ```bash
//! # Start a storefront (memory store is enough)
//! STORE_BACKEND=memory cargo run -p minishop-storefront
//!
//! # Run integration tests against it
//! STOREFRONT_BASE_URL=http://127.0.0.1:5000 cargo test -p minishop-integration-tests -- --ignored
//! ```

use reqwest::{Client, RequestBuilder};
use serde_json::json;

use minishop_core::Product;

/// Default storefront address when `STOREFRONT_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// HTTP client bound to a running storefront.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    /// Cart key unique to this context, so runs do not share cart state.
    pub cart_key: String,
}

impl TestContext {
    /// Create a context from `STOREFRONT_BASE_URL`.
    #[must_use]
    pub fn new() -> Self {
        dotenvy::dotenv().ok();

        let base_url = std::env::var("STOREFRONT_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            client: Client::new(),
            base_url,
            cart_key: format!("it-{}", uuid::Uuid::new_v4().simple()),
        }
    }

    /// Absolute URL for a path on the storefront.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET` request builder.
    #[must_use]
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    /// `POST` request builder.
    #[must_use]
    pub fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.url(path))
    }

    /// Create a product with a unique name and return it.
    ///
    /// # Panics
    ///
    /// Panics if the storefront does not answer `201 Created`.
    pub async fn create_product(&self, prefix: &str, price: f64) -> Product {
        let name = format!("{prefix} {}", uuid::Uuid::new_v4().simple());
        let response = self
            .post("/api/products")
            .json(&json!({ "name": name, "price": price }))
            .send()
            .await
            .expect("storefront unreachable");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("product body")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
