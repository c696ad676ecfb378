use serde::{Deserialize, Serialize};

/// Identifier of the user who owns a cart.
///
/// Wraps the integral identity minted by the upstream auth layer to
/// provide type safety and prevent mixing it up with other integer
/// identifiers. The value is opaque to this service; no check is made
/// against a user registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Creates a user ID from a raw value.
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the underlying value.
    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for UserId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<UserId> for i32 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

/// Identifier of a product in the catalog.
///
/// The catalog lives in another service; cart rows only carry the
/// reference plus a snapshot of the display attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i32);

impl ProductId {
    /// Creates a product ID from a raw value.
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the underlying value.
    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for ProductId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<ProductId> for i32 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

/// Identifier of a single cart row.
///
/// Assigned by the database identity column on insert, so it is ordered
/// by insertion and unique across all users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartItemId(i64);

impl CartItemId {
    /// Creates a cart item ID from a raw value.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the underlying value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CartItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CartItemId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<CartItemId> for i64 {
    fn from(id: CartItemId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_from_i32_preserves_value() {
        let id = UserId::new(42);
        assert_eq!(id.as_i32(), 42);
        assert_eq!(i32::from(id), 42);
    }

    #[test]
    fn user_id_serializes_transparently() {
        let id = UserId::new(7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "7");
        let deserialized: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn product_id_display_matches_raw_value() {
        let id = ProductId::new(101);
        assert_eq!(id.to_string(), "101");
    }

    #[test]
    fn product_id_serialization_roundtrip() {
        let id = ProductId::new(314);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn cart_item_id_orders_by_insertion() {
        let earlier = CartItemId::new(1);
        let later = CartItemId::new(2);
        assert!(earlier < later);
    }

    #[test]
    fn cart_item_id_serialization_roundtrip() {
        let id = CartItemId::new(9_000_000_000);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "9000000000");
        let deserialized: CartItemId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
