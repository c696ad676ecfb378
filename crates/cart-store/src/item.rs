use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{CartItemId, ProductId, UserId};

/// A stored cart row: one (user, product) pairing with its captured
/// product attributes and quantity.
///
/// At most one row exists per (user, product) pair; adding the same
/// product again merges quantities into the existing row. `product_price`
/// is the unit price captured when the product was first added and does
/// not change on later merges.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub id: CartItemId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub product_name: String,
    pub product_price: Decimal,
    /// Always positive; a row never exists with zero quantity.
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for inserting (or merging) a line item.
///
/// The owning user is passed separately so a payload can never carry a
/// different user than the one the operation was authorized for.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub product_price: Decimal,
    pub quantity: i32,
}
