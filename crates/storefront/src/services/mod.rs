//! Business logic services for storefront.
//!
//! # Services
//!
//! - [`catalog`] - Product listing, lookup and creation
//! - [`cart`] - Cart quantity aggregation
//!
//! Services borrow their store from [`AppState`](crate::state::AppState) and
//! are created per request; they hold no state of their own.

pub mod cart;
pub mod catalog;

pub use cart::CartService;
pub use catalog::CatalogService;
