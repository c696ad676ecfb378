use async_trait::async_trait;

use crate::{CartItem, CartItemId, NewCartItem, Result, UserId};

/// Core trait for cart store implementations.
///
/// A cart store is responsible for persisting and retrieving cart rows.
/// All implementations must be thread-safe (Send + Sync), and every
/// operation must be safe to abandon mid-flight: a caller that drops the
/// future leaves no partial state behind.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Retrieves all line items for a user.
    ///
    /// Items are returned in insertion order (oldest row first). An empty
    /// cart yields an empty vector, not an error.
    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<CartItem>>;

    /// Counts the distinct line items in a user's cart.
    ///
    /// Returns 0 for an empty or non-existent cart.
    async fn item_count(&self, user_id: UserId) -> Result<i64>;

    /// Counts the total units across all of a user's line items
    /// (the sum of quantities).
    ///
    /// Returns 0 for an empty or non-existent cart.
    async fn unit_count(&self, user_id: UserId) -> Result<i64>;

    /// Inserts a line item, or merges quantities if the user already has
    /// a row for the product. Returns the ID of the surviving row.
    ///
    /// Insert-or-merge is atomic: two concurrent adds for the same
    /// (user, product) both succeed and the surviving quantity is their
    /// sum, regardless of arrival order.
    async fn add_item(&self, user_id: UserId, item: &NewCartItem) -> Result<CartItemId>;

    /// Sets the quantity of a line item owned by the user.
    ///
    /// Fails with `ItemNotFound` when no row matches both `item_id` and
    /// `user_id`. The ownership check is part of the match predicate, so
    /// one user can never modify another user's rows.
    ///
    /// Unlike `add_item`, concurrent updates to the same item are not
    /// merged: the last commit wins. There is no optimistic versioning.
    async fn update_item_quantity(
        &self,
        user_id: UserId,
        item_id: CartItemId,
        quantity: i32,
    ) -> Result<()>;

    /// Deletes a line item owned by the user.
    ///
    /// Same not-found and ownership contract as `update_item_quantity`.
    async fn remove_item(&self, user_id: UserId, item_id: CartItemId) -> Result<()>;

    /// Deletes every line item the user has.
    ///
    /// Clearing an already-empty cart succeeds; the operation is
    /// idempotent.
    async fn clear(&self, user_id: UserId) -> Result<()>;
}
