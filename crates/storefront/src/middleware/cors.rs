//! CORS policy.
//!
//! The browser frontend is served from a different origin than the API, so
//! every `/api` route needs CORS. With no configured origins any origin is
//! allowed; otherwise only the listed ones.

use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::{CART_KEY_HEADER, REQUEST_ID_HEADER};
use crate::config::StorefrontConfig;
use crate::routes::products::TOTAL_COUNT_HEADER;

/// Build the CORS layer for the configured origins.
#[must_use]
pub fn cors_layer(config: &StorefrontConfig) -> CorsLayer {
    if config.cors_allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(%origin, "Skipping unusable CORS origin: {e}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(CART_KEY_HEADER),
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([
            HeaderName::from_static(TOTAL_COUNT_HEADER),
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}
