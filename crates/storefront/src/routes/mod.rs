//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (pings the store)
//!
//! # Products
//! GET  /api/products           - Product listing (?page, ?limit, ?sort)
//! GET  /api/products/{id}      - Product detail
//! POST /api/products           - Create product
//!
//! # Cart
//! POST /api/cart/add           - Add to cart (merges quantity)
//! GET  /api/cart/count         - Total units in cart
//! ```

pub mod cart;
pub mod health;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api/products", product_routes())
        .nest("/api/cart", cart_routes())
}
