//! Request correlation IDs.
//!
//! A caller-supplied `x-request-id` (load balancer, frontend) is kept when it
//! is short and printable; anything else is replaced with a fresh UUID v4.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LENGTH: usize = 128;

/// Correlation ID of the current request, available as a request extension.
#[derive(Debug, Clone)]
pub struct RequestId(pub HeaderValue);

impl RequestId {
    /// Pick the inbound ID if usable, otherwise mint one.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let inbound = headers.get(REQUEST_ID_HEADER).filter(|value| {
            !value.is_empty()
                && value.len() <= MAX_REQUEST_ID_LENGTH
                && value.to_str().is_ok()
        });

        match inbound {
            Some(value) => Self(value.clone()),
            None => Self::generate(),
        }
    }

    fn generate() -> Self {
        let id = Uuid::new_v4().hyphenated().to_string();
        // Hyphenated UUIDs are plain ASCII, so the fallback is unreachable.
        Self(HeaderValue::from_str(&id).unwrap_or_else(|_| HeaderValue::from_static("unknown")))
    }

    /// The ID as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.to_str().unwrap_or_default()
    }
}

/// Attach a [`RequestId`] to the request, its span and Sentry scope, and
/// echo it on the response.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::from_headers(request.headers());

    tracing::Span::current().record("request_id", request_id.as_str());
    sentry::configure_scope(|scope| scope.set_tag("request_id", request_id.as_str()));

    request.extensions_mut().insert(request_id.clone());

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(REQUEST_ID_HEADER, request_id.0);
    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_inbound_id_is_kept() {
        let id = RequestId::from_headers(&headers("lb-42"));
        assert_eq!(id.as_str(), "lb-42");
    }

    #[test]
    fn test_missing_id_is_generated() {
        let id = RequestId::from_headers(&HeaderMap::new());
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn test_oversized_or_empty_id_is_replaced() {
        let long = "a".repeat(MAX_REQUEST_ID_LENGTH + 1);
        let replaced = RequestId::from_headers(&headers(&long));
        assert!(Uuid::parse_str(replaced.as_str()).is_ok());

        let empty = RequestId::from_headers(&headers(""));
        assert!(Uuid::parse_str(empty.as_str()).is_ok());
    }
}
