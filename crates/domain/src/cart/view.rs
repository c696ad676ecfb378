//! Computed cart view types.
//!
//! A cart is never stored as a whole. Every read derives it fresh from the
//! user's rows, so there is no cart-level state to keep consistent with the
//! line items.

use cart_store::CartItem;
use common::{CartItemId, ProductId, UserId};
use rust_decimal::Decimal;
use serde::Serialize;

/// Flat shipping fee applied when configuration does not override it.
pub fn standard_shipping_fee() -> Decimal {
    Decimal::new(500, 2) // 5.00
}

/// One line of the computed cart view: a stored row priced out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub product_name: String,
    pub product_price: Decimal,
    pub quantity: i32,
    /// Unit price times quantity.
    pub subtotal: Decimal,
}

impl CartLine {
    /// Prices a line from its parts.
    pub fn new(
        id: CartItemId,
        product_id: ProductId,
        product_name: String,
        product_price: Decimal,
        quantity: i32,
    ) -> Self {
        Self {
            id,
            product_id,
            product_name,
            product_price,
            quantity,
            subtotal: product_price * Decimal::from(quantity),
        }
    }
}

impl From<CartItem> for CartLine {
    fn from(item: CartItem) -> Self {
        Self::new(
            item.id,
            item.product_id,
            item.product_name,
            item.product_price,
            item.quantity,
        )
    }
}

/// The computed cart view returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cart {
    pub user_id: UserId,
    pub items: Vec<CartLine>,
    /// Sum of line subtotals.
    pub subtotal: Decimal,
    pub shipping: Decimal,
    /// Subtotal plus shipping.
    pub total: Decimal,
    /// Number of distinct line items.
    pub item_count: i64,
    /// Total units across all lines (sum of quantities).
    pub unit_count: i64,
}

impl Cart {
    /// Builds the cart view from stored rows and a shipping fee.
    ///
    /// Empty input yields a zero-valued cart whose total is just the
    /// shipping fee.
    pub fn build(user_id: UserId, items: Vec<CartItem>, shipping: Decimal) -> Self {
        let items: Vec<CartLine> = items.into_iter().map(CartLine::from).collect();
        let subtotal: Decimal = items.iter().map(|line| line.subtotal).sum();
        let item_count = items.len() as i64;
        let unit_count: i64 = items.iter().map(|line| i64::from(line.quantity)).sum();

        Self {
            user_id,
            subtotal,
            shipping,
            total: subtotal + shipping,
            item_count,
            unit_count,
            items,
        }
    }
}

/// Both cart cardinalities, side by side so callers never guess which
/// definition a bare "count" means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartCounts {
    /// Number of distinct line items.
    pub item_count: i64,
    /// Total units across all lines (sum of quantities).
    pub unit_count: i64,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn stored_item(id: i64, product_id: i32, price: Decimal, quantity: i32) -> CartItem {
        let now = Utc::now();
        CartItem {
            id: CartItemId::new(id),
            user_id: UserId::new(1),
            product_id: ProductId::new(product_id),
            product_name: format!("Product {product_id}"),
            product_price: price,
            quantity,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn line_subtotal_is_price_times_quantity() {
        let line = CartLine::from(stored_item(1, 101, Decimal::new(2999, 2), 2));
        assert_eq!(line.subtotal, Decimal::new(5998, 2));
    }

    #[test]
    fn build_sums_lines_and_adds_shipping() {
        let items = vec![
            stored_item(1, 101, Decimal::new(2999, 2), 2),
            stored_item(2, 102, Decimal::new(7999, 2), 1),
        ];

        let cart = Cart::build(UserId::new(1), items, standard_shipping_fee());

        assert_eq!(cart.subtotal, Decimal::new(13997, 2));
        assert_eq!(cart.shipping, Decimal::new(500, 2));
        assert_eq!(cart.total, Decimal::new(14497, 2));
        assert_eq!(cart.item_count, 2);
        assert_eq!(cart.unit_count, 3);
    }

    #[test]
    fn build_empty_cart_totals_to_shipping() {
        let cart = Cart::build(UserId::new(1), vec![], standard_shipping_fee());

        assert!(cart.items.is_empty());
        assert_eq!(cart.subtotal, Decimal::ZERO);
        assert_eq!(cart.total, Decimal::new(500, 2));
        assert_eq!(cart.item_count, 0);
        assert_eq!(cart.unit_count, 0);
    }

    #[test]
    fn build_preserves_row_order() {
        let items = vec![
            stored_item(3, 103, Decimal::ONE, 1),
            stored_item(5, 105, Decimal::ONE, 1),
            stored_item(9, 109, Decimal::ONE, 1),
        ];

        let cart = Cart::build(UserId::new(1), items, Decimal::ZERO);

        let ids: Vec<i64> = cart.items.iter().map(|l| l.id.as_i64()).collect();
        assert_eq!(ids, vec![3, 5, 9]);
    }

    #[test]
    fn decimal_totals_stay_exact() {
        // 0.1 + 0.2 style pitfalls must not show up in money arithmetic.
        let items = vec![
            stored_item(1, 101, Decimal::new(10, 2), 1),
            stored_item(2, 102, Decimal::new(20, 2), 1),
        ];

        let cart = Cart::build(UserId::new(1), items, Decimal::ZERO);
        assert_eq!(cart.subtotal, Decimal::new(30, 2));
        assert_eq!(cart.subtotal.to_string(), "0.30");
    }

    #[test]
    fn cart_serializes_decimals_as_strings() {
        let items = vec![stored_item(1, 101, Decimal::new(2999, 2), 2)];
        let cart = Cart::build(UserId::new(7), items, standard_shipping_fee());

        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json["user_id"], 7);
        assert_eq!(json["subtotal"], "59.98");
        assert_eq!(json["shipping"], "5.00");
        assert_eq!(json["total"], "64.98");
        assert_eq!(json["items"][0]["subtotal"], "59.98");
    }
}
