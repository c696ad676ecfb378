use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{
    CartItem, CartItemId, CartStoreError, NewCartItem, ProductId, Result, UserId, store::CartStore,
};

/// PostgreSQL-backed cart store implementation.
///
/// The pool connects through a statement-routing pooler that splits
/// traffic between a primary and read replicas. Plain SELECTs may be
/// served by a replica; every mutation here is either a single statement
/// the router classifies as a write, or an explicit transaction, which
/// the router always pins to the primary.
#[derive(Clone)]
pub struct PostgresCartStore {
    pool: PgPool,
}

impl PostgresCartStore {
    /// Creates a new PostgreSQL cart store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_item(row: PgRow) -> Result<CartItem> {
        Ok(CartItem {
            id: CartItemId::new(row.try_get("id")?),
            user_id: UserId::new(row.try_get("user_id")?),
            product_id: ProductId::new(row.try_get("product_id")?),
            product_name: row.try_get("product_name")?,
            product_price: row.try_get::<Decimal, _>("product_price")?,
            quantity: row.try_get("quantity")?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
        })
    }
}

#[async_trait]
impl CartStore for PostgresCartStore {
    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<CartItem>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, product_id, product_name, product_price, quantity,
                   created_at, updated_at
            FROM cart_items
            WHERE user_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(user_id.as_i32())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_item).collect()
    }

    async fn item_count(&self, user_id: UserId) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM cart_items WHERE user_id = $1")
                .bind(user_id.as_i32())
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn unit_count(&self, user_id: UserId) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(quantity), 0) FROM cart_items WHERE user_id = $1",
        )
        .bind(user_id.as_i32())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn add_item(&self, user_id: UserId, item: &NewCartItem) -> Result<CartItemId> {
        // The explicit transaction pins the upsert to the primary. A bare
        // INSERT ... RETURNING can be misrouted to a read-only replica by
        // the pooler's statement heuristics and rejected with SQLSTATE 25006.
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO cart_items (user_id, product_id, product_name, product_price,
                                    quantity, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            ON CONFLICT (user_id, product_id) DO UPDATE
            SET quantity = cart_items.quantity + EXCLUDED.quantity,
                updated_at = NOW()
            RETURNING id
            "#,
        )
        .bind(user_id.as_i32())
        .bind(item.product_id.as_i32())
        .bind(&item.product_name)
        .bind(item.product_price)
        .bind(item.quantity)
        .fetch_one(&mut *tx)
        .await?;

        // Until this commit the row is invisible; dropping `tx` on error or
        // cancellation rolls the upsert back.
        tx.commit().await?;

        Ok(CartItemId::new(id))
    }

    async fn update_item_quantity(
        &self,
        user_id: UserId,
        item_id: CartItemId,
        quantity: i32,
    ) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE cart_items
            SET quantity = $1, updated_at = NOW()
            WHERE id = $2 AND user_id = $3
            "#,
        )
        .bind(quantity)
        .bind(item_id.as_i64())
        .bind(user_id.as_i32())
        .execute(&self.pool)
        .await?;

        // Zero affected rows means the item doesn't exist or belongs to
        // someone else; the two cases are indistinguishable on purpose.
        if result.rows_affected() == 0 {
            return Err(CartStoreError::ItemNotFound { item_id });
        }

        Ok(())
    }

    async fn remove_item(&self, user_id: UserId, item_id: CartItemId) -> Result<()> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND user_id = $2")
            .bind(item_id.as_i64())
            .bind(user_id.as_i32())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CartStoreError::ItemNotFound { item_id });
        }

        Ok(())
    }

    async fn clear(&self, user_id: UserId) -> Result<()> {
        // No affected-row check: clearing an empty cart is a valid no-op.
        sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id.as_i32())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
