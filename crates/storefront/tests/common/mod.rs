//! Shared helpers for storefront router tests.
//!
//! Every test gets a fresh router over its own `MemoryStore`, so tests never
//! see each other's products or cart lines.

#![allow(dead_code, clippy::unwrap_used)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, Bytes},
    http::{Request, Response, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use minishop_storefront::{app, config::StorefrontConfig, db::MemoryStore, state::AppState};

/// Build the router over a fresh in-memory store.
pub fn setup_test_app() -> Router {
    let config = StorefrontConfig::from_vars(|key| match key {
        "STORE_BACKEND" => Some("memory".to_string()),
        _ => None,
    })
    .unwrap();

    app(AppState::with_store(config, Arc::new(MemoryStore::new())))
}

/// Send a request through a clone of the router.
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

/// `GET` a path.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

/// `POST` a JSON body.
pub async fn post_json(app: &Router, uri: &str, body: &Value) -> Response<Body> {
    post_raw(app, uri, body.to_string()).await
}

/// `POST` an arbitrary body labelled as JSON.
pub async fn post_raw(app: &Router, uri: &str, body: impl Into<Body>) -> Response<Body> {
    send(
        app,
        Request::post(uri)
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap(),
    )
    .await
}

/// Collect a response body.
pub async fn body_bytes(response: Response<Body>) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Create a product and return its JSON representation.
pub async fn create_product(app: &Router, name: &str, price: f64) -> Value {
    let response = post_json(
        app,
        "/api/products",
        &serde_json::json!({ "name": name, "price": price, "images": [] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}
