//! Cart records.

use serde::{Deserialize, Serialize};

use super::{CartItemId, CartKey, ProductId};

/// A persisted quantity for one product in one cart.
///
/// At most one item exists per `(cart_key, product_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Store-assigned identity.
    #[serde(rename = "_id")]
    pub id: CartItemId,
    /// Cart this line belongs to.
    pub cart_key: CartKey,
    /// Product reference. Existence is not checked.
    pub product_id: ProductId,
    /// Accumulated quantity.
    pub quantity: i64,
}
