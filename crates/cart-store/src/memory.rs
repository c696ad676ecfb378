use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    CartItem, CartItemId, CartStoreError, NewCartItem, Result, UserId, store::CartStore,
};

/// In-memory cart store implementation for testing.
///
/// This implementation stores all rows in memory and provides the same
/// semantics as the PostgreSQL implementation: merge-on-add, ownership
/// checks on update and delete, and idempotent clear. The write lock
/// stands in for the database's uniqueness constraint, serializing
/// concurrent adds for the same (user, product) pair.
#[derive(Clone, Default)]
pub struct InMemoryCartStore {
    items: Arc<RwLock<Vec<CartItem>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryCartStore {
    /// Creates a new empty in-memory cart store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of rows stored, across all users.
    pub async fn row_count(&self) -> usize {
        self.items.read().await.len()
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<CartItem>> {
        let items = self.items.read().await;
        let mut rows: Vec<_> = items
            .iter()
            .filter(|item| item.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|item| item.id);
        Ok(rows)
    }

    async fn item_count(&self, user_id: UserId) -> Result<i64> {
        let items = self.items.read().await;
        Ok(items.iter().filter(|item| item.user_id == user_id).count() as i64)
    }

    async fn unit_count(&self, user_id: UserId) -> Result<i64> {
        let items = self.items.read().await;
        Ok(items
            .iter()
            .filter(|item| item.user_id == user_id)
            .map(|item| i64::from(item.quantity))
            .sum())
    }

    async fn add_item(&self, user_id: UserId, item: &NewCartItem) -> Result<CartItemId> {
        let mut items = self.items.write().await;

        if let Some(existing) = items
            .iter_mut()
            .find(|row| row.user_id == user_id && row.product_id == item.product_id)
        {
            // Merge: quantities add up, the captured price stays as it was.
            existing.quantity += item.quantity;
            existing.updated_at = Utc::now();
            return Ok(existing.id);
        }

        let id = CartItemId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let now = Utc::now();
        items.push(CartItem {
            id,
            user_id,
            product_id: item.product_id,
            product_name: item.product_name.clone(),
            product_price: item.product_price,
            quantity: item.quantity,
            created_at: now,
            updated_at: now,
        });

        Ok(id)
    }

    async fn update_item_quantity(
        &self,
        user_id: UserId,
        item_id: CartItemId,
        quantity: i32,
    ) -> Result<()> {
        let mut items = self.items.write().await;
        match items
            .iter_mut()
            .find(|row| row.id == item_id && row.user_id == user_id)
        {
            Some(row) => {
                row.quantity = quantity;
                row.updated_at = Utc::now();
                Ok(())
            }
            None => Err(CartStoreError::ItemNotFound { item_id }),
        }
    }

    async fn remove_item(&self, user_id: UserId, item_id: CartItemId) -> Result<()> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|row| !(row.id == item_id && row.user_id == user_id));
        if items.len() == before {
            return Err(CartStoreError::ItemNotFound { item_id });
        }
        Ok(())
    }

    async fn clear(&self, user_id: UserId) -> Result<()> {
        let mut items = self.items.write().await;
        items.retain(|row| row.user_id != user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::ProductId;

    fn new_item(product_id: i32, quantity: i32) -> NewCartItem {
        NewCartItem {
            product_id: ProductId::new(product_id),
            product_name: format!("Product {product_id}"),
            product_price: Decimal::new(2999, 2),
            quantity,
        }
    }

    #[tokio::test]
    async fn add_and_find_roundtrip() {
        let store = InMemoryCartStore::new();
        let user = UserId::new(1);

        let id = store.add_item(user, &new_item(101, 2)).await.unwrap();

        let items = store.find_by_user(user).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, id);
        assert_eq!(items[0].product_id, ProductId::new(101));
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].product_price, Decimal::new(2999, 2));
    }

    #[tokio::test]
    async fn find_by_user_empty_cart_returns_empty_vec() {
        let store = InMemoryCartStore::new();

        let items = store.find_by_user(UserId::new(42)).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn repeat_add_merges_quantities() {
        let store = InMemoryCartStore::new();
        let user = UserId::new(1);

        let first_id = store.add_item(user, &new_item(101, 2)).await.unwrap();
        let second_id = store.add_item(user, &new_item(101, 3)).await.unwrap();

        assert_eq!(first_id, second_id);
        let items = store.find_by_user(user).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 5);
    }

    #[tokio::test]
    async fn merge_keeps_captured_price() {
        let store = InMemoryCartStore::new();
        let user = UserId::new(1);

        store.add_item(user, &new_item(101, 1)).await.unwrap();

        let repriced = NewCartItem {
            product_price: Decimal::new(9999, 2),
            ..new_item(101, 1)
        };
        store.add_item(user, &repriced).await.unwrap();

        let items = store.find_by_user(user).await.unwrap();
        assert_eq!(items[0].product_price, Decimal::new(2999, 2));
    }

    #[tokio::test]
    async fn concurrent_adds_for_same_product_merge() {
        let store = InMemoryCartStore::new();
        let user = UserId::new(1);

        let a = store.clone();
        let b = store.clone();
        let item_a = new_item(101, 2);
        let item_b = new_item(101, 2);
        let (ra, rb) = tokio::join!(
            a.add_item(user, &item_a),
            b.add_item(user, &item_b),
        );
        ra.unwrap();
        rb.unwrap();

        let items = store.find_by_user(user).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 4);
    }

    #[tokio::test]
    async fn items_returned_in_insertion_order() {
        let store = InMemoryCartStore::new();
        let user = UserId::new(1);

        store.add_item(user, &new_item(103, 1)).await.unwrap();
        store.add_item(user, &new_item(101, 1)).await.unwrap();
        store.add_item(user, &new_item(102, 1)).await.unwrap();

        let items = store.find_by_user(user).await.unwrap();
        let product_ids: Vec<i32> = items.iter().map(|i| i.product_id.as_i32()).collect();
        assert_eq!(product_ids, vec![103, 101, 102]);
    }

    #[tokio::test]
    async fn counts_distinguish_items_from_units() {
        let store = InMemoryCartStore::new();
        let user = UserId::new(1);

        store.add_item(user, &new_item(101, 2)).await.unwrap();
        store.add_item(user, &new_item(102, 3)).await.unwrap();

        assert_eq!(store.item_count(user).await.unwrap(), 2);
        assert_eq!(store.unit_count(user).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn counts_are_zero_for_empty_cart() {
        let store = InMemoryCartStore::new();
        let user = UserId::new(7);

        assert_eq!(store.item_count(user).await.unwrap(), 0);
        assert_eq!(store.unit_count(user).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_quantity_sets_new_value() {
        let store = InMemoryCartStore::new();
        let user = UserId::new(1);
        let id = store.add_item(user, &new_item(101, 2)).await.unwrap();

        store.update_item_quantity(user, id, 9).await.unwrap();

        let items = store.find_by_user(user).await.unwrap();
        assert_eq!(items[0].quantity, 9);
    }

    #[tokio::test]
    async fn update_unknown_item_returns_not_found() {
        let store = InMemoryCartStore::new();
        let user = UserId::new(1);

        let result = store
            .update_item_quantity(user, CartItemId::new(999), 3)
            .await;

        assert!(matches!(
            result,
            Err(CartStoreError::ItemNotFound { item_id }) if item_id == CartItemId::new(999)
        ));
    }

    #[tokio::test]
    async fn update_cannot_touch_another_users_item() {
        let store = InMemoryCartStore::new();
        let owner = UserId::new(1);
        let intruder = UserId::new(2);
        let id = store.add_item(owner, &new_item(101, 2)).await.unwrap();

        let result = store.update_item_quantity(intruder, id, 99).await;
        assert!(matches!(result, Err(CartStoreError::ItemNotFound { .. })));

        // The owner's row is untouched.
        let items = store.find_by_user(owner).await.unwrap();
        assert_eq!(items[0].quantity, 2);
    }

    #[tokio::test]
    async fn remove_deletes_row() {
        let store = InMemoryCartStore::new();
        let user = UserId::new(1);
        let id = store.add_item(user, &new_item(101, 2)).await.unwrap();

        store.remove_item(user, id).await.unwrap();

        assert!(store.find_by_user(user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn remove_twice_returns_not_found() {
        let store = InMemoryCartStore::new();
        let user = UserId::new(1);
        let id = store.add_item(user, &new_item(101, 2)).await.unwrap();

        store.remove_item(user, id).await.unwrap();
        let result = store.remove_item(user, id).await;

        assert!(matches!(result, Err(CartStoreError::ItemNotFound { .. })));
    }

    #[tokio::test]
    async fn remove_cannot_touch_another_users_item() {
        let store = InMemoryCartStore::new();
        let owner = UserId::new(1);
        let intruder = UserId::new(2);
        let id = store.add_item(owner, &new_item(101, 2)).await.unwrap();

        let result = store.remove_item(intruder, id).await;
        assert!(matches!(result, Err(CartStoreError::ItemNotFound { .. })));
        assert_eq!(store.item_count(owner).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn clear_removes_only_that_users_rows() {
        let store = InMemoryCartStore::new();
        let alice = UserId::new(1);
        let bob = UserId::new(2);
        store.add_item(alice, &new_item(101, 1)).await.unwrap();
        store.add_item(alice, &new_item(102, 1)).await.unwrap();
        store.add_item(bob, &new_item(101, 1)).await.unwrap();

        store.clear(alice).await.unwrap();

        assert!(store.find_by_user(alice).await.unwrap().is_empty());
        assert_eq!(store.find_by_user(bob).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn clear_empty_cart_is_a_noop() {
        let store = InMemoryCartStore::new();
        let user = UserId::new(1);

        store.clear(user).await.unwrap();
        store.clear(user).await.unwrap();

        assert_eq!(store.row_count().await, 0);
    }
}
