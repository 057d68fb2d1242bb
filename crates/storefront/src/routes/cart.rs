//! Cart route handlers.
//!
//! The cart is chosen by the `x-cart-key` header; see [`CurrentCart`].

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use minishop_core::ProductId;

use crate::error::Result;
use crate::extract::ApiJson;
use crate::middleware::CurrentCart;
use crate::state::AppState;

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Add-to-cart acknowledgment.
#[derive(Debug, Serialize)]
pub struct AddToCartResponse {
    pub success: bool,
}

/// Cart count response.
#[derive(Debug, Serialize)]
pub struct CartCountResponse {
    pub count: i64,
}

/// Merge a quantity of a product into the cart.
#[instrument(skip(state, cart))]
pub async fn add(
    State(state): State<AppState>,
    CurrentCart(cart): CurrentCart,
    ApiJson(request): ApiJson<AddToCartRequest>,
) -> Result<Json<AddToCartResponse>> {
    state
        .cart()
        .add(&cart, request.product_id, request.quantity)
        .await?;

    Ok(Json(AddToCartResponse { success: true }))
}

/// Total units in the cart.
#[instrument(skip(state, cart))]
pub async fn count(
    State(state): State<AppState>,
    CurrentCart(cart): CurrentCart,
) -> Result<Json<CartCountResponse>> {
    let count = state.cart().count(&cart).await?;
    Ok(Json(CartCountResponse { count }))
}
