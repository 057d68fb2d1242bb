//! Core types for Minishop.
//!
//! This module provides type-safe wrappers for the catalog and cart domain.

pub mod cart;
pub mod cart_key;
pub mod id;
pub mod price;
pub mod product;
pub mod query;

pub use cart::CartItem;
pub use cart_key::{CartKey, CartKeyError};
pub use id::*;
pub use price::{Price, PriceError};
pub use product::{NewProduct, Product, ProductError, ProductPage};
pub use query::{PageError, PageRequest, ProductSort};
