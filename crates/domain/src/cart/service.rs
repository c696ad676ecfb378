//! Cart service providing a simplified API for cart operations.

use cart_store::{CartStore, NewCartItem};
use common::{CartItemId, UserId};
use rust_decimal::Decimal;

use super::{AddItemRequest, Cart, CartCounts, CartError, CartLine};

/// Service for managing carts.
///
/// Validates requests before they reach the store and translates store
/// errors into domain errors. Holds no state beyond the injected store
/// handle and the configured shipping fee, so every call is a single-shot
/// request/response.
pub struct CartService<S: CartStore> {
    store: S,
    shipping_fee: Decimal,
}

impl<S: CartStore> CartService<S> {
    /// Creates a new cart service over the given store.
    pub fn new(store: S, shipping_fee: Decimal) -> Self {
        Self {
            store,
            shipping_fee,
        }
    }

    /// The shipping fee applied to every computed cart.
    pub fn shipping_fee(&self) -> Decimal {
        self.shipping_fee
    }

    /// Returns the user's computed cart.
    ///
    /// An empty cart is a valid result, not an error.
    #[tracing::instrument(skip(self))]
    pub async fn get_cart(&self, user_id: UserId) -> Result<Cart, CartError> {
        let items = self.store.find_by_user(user_id).await?;
        Ok(Cart::build(user_id, items, self.shipping_fee))
    }

    /// Returns both cart cardinalities: distinct lines and total units.
    ///
    /// The two counts come from separate reads; under concurrent writes
    /// they may reflect slightly different instants.
    #[tracing::instrument(skip(self))]
    pub async fn cart_counts(&self, user_id: UserId) -> Result<CartCounts, CartError> {
        let item_count = self.store.item_count(user_id).await?;
        let unit_count = self.store.unit_count(user_id).await?;
        Ok(CartCounts {
            item_count,
            unit_count,
        })
    }

    /// Adds a product to the user's cart, merging quantities if the
    /// product is already present. Returns the resulting priced line.
    ///
    /// Validation happens before the store is touched: a rejected request
    /// costs no database round-trip.
    #[tracing::instrument(skip(self, req), fields(product_id = %req.product_id))]
    pub async fn add_to_cart(
        &self,
        user_id: UserId,
        req: AddItemRequest,
    ) -> Result<CartLine, CartError> {
        if req.quantity <= 0 {
            return Err(CartError::InvalidQuantity {
                quantity: req.quantity,
            });
        }
        if req.product_price.is_sign_negative() {
            return Err(CartError::InvalidPrice {
                price: req.product_price,
            });
        }

        let item = NewCartItem {
            product_id: req.product_id,
            product_name: req.product_name,
            product_price: req.product_price,
            quantity: req.quantity,
        };
        let id = self.store.add_item(user_id, &item).await?;
        metrics::counter!("cart_items_added_total").increment(1);

        Ok(CartLine::new(
            id,
            item.product_id,
            item.product_name,
            item.product_price,
            item.quantity,
        ))
    }

    /// Sets the quantity of a line item the user owns.
    #[tracing::instrument(skip(self))]
    pub async fn update_item_quantity(
        &self,
        user_id: UserId,
        item_id: CartItemId,
        quantity: i32,
    ) -> Result<(), CartError> {
        if quantity <= 0 {
            return Err(CartError::InvalidQuantity { quantity });
        }

        self.store
            .update_item_quantity(user_id, item_id, quantity)
            .await?;
        Ok(())
    }

    /// Removes a line item the user owns.
    #[tracing::instrument(skip(self))]
    pub async fn remove_item(&self, user_id: UserId, item_id: CartItemId) -> Result<(), CartError> {
        self.store.remove_item(user_id, item_id).await?;
        metrics::counter!("cart_items_removed_total").increment(1);
        Ok(())
    }

    /// Empties the user's cart. Clearing an already-empty cart succeeds.
    #[tracing::instrument(skip(self))]
    pub async fn clear_cart(&self, user_id: UserId) -> Result<(), CartError> {
        self.store.clear(user_id).await?;
        metrics::counter!("carts_cleared_total").increment(1);
        Ok(())
    }
}
