//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. CORS
//! 3. `TraceLayer` (request span with method, uri, status, latency)
//! 4. Request ID (recorded on the span, echoed in the response)
//!
//! [`CurrentCart`] is an extractor rather than a layer; handlers that touch
//! the cart take it as an argument.

pub mod cart_key;
pub mod cors;
pub mod request_id;

pub use cart_key::{CART_KEY_HEADER, CurrentCart};
pub use cors::cors_layer;
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
