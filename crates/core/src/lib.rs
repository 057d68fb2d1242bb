//! Minishop Core - Shared domain types.
//!
//! This crate provides the types used across all Minishop components:
//! - `storefront` - Catalog and cart HTTP API
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, prices, cart keys, catalog queries and records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
