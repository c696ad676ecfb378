use thiserror::Error;

use crate::CartItemId;

/// Errors that can occur when interacting with the cart store.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// No row matched both the item ID and the owning user.
    /// Raised when an update or delete affects zero rows.
    #[error("Cart item not found: {item_id}")]
    ItemNotFound { item_id: CartItemId },

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Result type for cart store operations.
pub type Result<T> = std::result::Result<T, CartStoreError>;
