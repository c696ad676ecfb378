//! Cart line-item storage.
//!
//! The store owns the durable representation of cart rows against a
//! PostgreSQL cluster that sits behind a statement-routing connection
//! pooler with a primary/replica split. Reads may land on a replica and
//! tolerate its staleness; every mutation is guaranteed to reach the
//! primary (see [`postgres::PostgresCartStore`]).

pub mod error;
pub mod item;
pub mod memory;
pub mod postgres;
pub mod store;

pub use common::{CartItemId, ProductId, UserId};
pub use error::{CartStoreError, Result};
pub use item::{CartItem, NewCartItem};
pub use memory::InMemoryCartStore;
pub use postgres::PostgresCartStore;
pub use store::CartStore;
