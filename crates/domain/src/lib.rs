//! Domain layer for the cart service.
//!
//! This crate provides the business rules in front of the store:
//! - Cart view types computed from stored rows
//! - Request validation (quantity and price bounds)
//! - Translation of store errors into stable domain errors
//! - CartService as the API the HTTP layer drives

pub mod cart;

pub use cart::{
    AddItemRequest, Cart, CartCounts, CartError, CartLine, CartService, standard_shipping_fee,
};
