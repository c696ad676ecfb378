//! Cart view, requests, service, and errors.

mod service;
mod view;

pub use service::CartService;
pub use view::{Cart, CartCounts, CartLine, standard_shipping_fee};

use cart_store::CartStoreError;
use common::{CartItemId, ProductId};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Request to add a product to a cart.
///
/// Carries a snapshot of the product's display attributes; the catalog is
/// not consulted again once the row exists.
#[derive(Debug, Clone, Deserialize)]
pub struct AddItemRequest {
    pub product_id: ProductId,
    pub product_name: String,
    pub product_price: Decimal,
    pub quantity: i32,
}

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Invalid quantity.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: i32 },

    /// Invalid price.
    #[error("Invalid price: {price} (must not be negative)")]
    InvalidPrice { price: Decimal },

    /// Item not found in the user's cart.
    #[error("Cart item not found: {item_id}")]
    ItemNotFound { item_id: CartItemId },

    /// The cart store failed.
    #[error("Cart store error: {0}")]
    Store(CartStoreError),
}

impl From<CartStoreError> for CartError {
    /// Store-level not-found maps onto the stable domain kind so callers
    /// match on `CartError` alone; everything else stays a store failure.
    fn from(err: CartStoreError) -> Self {
        match err {
            CartStoreError::ItemNotFound { item_id } => CartError::ItemNotFound { item_id },
            other => CartError::Store(other),
        }
    }
}
