//! Checkout payload parsing and total computation.
//!
//! Line items arrive loosely typed (`{qty?, price?, ...}`). Each item is
//! parsed exactly once at the boundary: a missing `qty` defaults to 1, a
//! missing `price` defaults to 0, and an item whose `qty` or `price` cannot
//! be read as a number is skipped and contributes nothing to the total.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

/// Transient checkout input. Nothing here is persisted; the payload exists
/// only for the duration of one request.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<Value>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// A line item after boundary validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineItem {
    pub qty: Decimal,
    pub price: Decimal,
}

impl LineItem {
    /// Parse one raw line item. Returns `None` when the item should be
    /// skipped: not an object, or a present `qty`/`price` that is neither a
    /// JSON number nor a numeric string.
    pub fn parse(raw: &Value) -> Option<Self> {
        let item = raw.as_object()?;
        let qty = match item.get("qty") {
            None => Decimal::ONE,
            Some(value) => coerce_number(value)?,
        };
        let price = match item.get("price") {
            None => Decimal::ZERO,
            Some(value) => coerce_number(value)?,
        };
        Some(Self { qty, price })
    }

    pub fn subtotal(&self) -> Decimal {
        self.qty * self.price
    }
}

fn coerce_number(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => number.as_f64().and_then(Decimal::from_f64),
        Value::String(text) => text.trim().parse::<f64>().ok().and_then(Decimal::from_f64),
        _ => None,
    }
}

/// Sum of qty x price over the parseable items, rounded to 2 decimal places.
pub fn checkout_total(items: &[Value]) -> Decimal {
    items
        .iter()
        .filter_map(LineItem::parse)
        .map(|line| line.subtotal())
        .sum::<Decimal>()
        .round_dp(2)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::{checkout_total, LineItem};

    #[test]
    fn totals_quantity_times_price_per_item() {
        let items = vec![json!({"qty": 2, "price": 10.0}), json!({"qty": 1, "price": 5.5})];
        assert_eq!(checkout_total(&items), Decimal::new(2550, 2));
    }

    #[test]
    fn item_without_qty_and_price_contributes_zero() {
        let items = vec![json!({"note": "gift wrap"}), json!({"qty": 3, "price": 2.0})];
        assert_eq!(checkout_total(&items), Decimal::new(600, 2));
    }

    #[test]
    fn missing_qty_defaults_to_one() {
        let items = vec![json!({"price": 4.25})];
        assert_eq!(checkout_total(&items), Decimal::new(425, 2));
    }

    #[test]
    fn numeric_strings_are_coerced() {
        let items = vec![json!({"qty": "2", "price": "10.5"})];
        assert_eq!(checkout_total(&items), Decimal::new(2100, 2));
    }

    #[test]
    fn unparseable_item_is_skipped_without_aborting() {
        let items = vec![
            json!({"qty": "two", "price": 10.0}),
            json!({"qty": 1, "price": {"amount": 5}}),
            json!("not an object"),
            json!({"qty": 1, "price": 7.0}),
        ];
        assert_eq!(checkout_total(&items), Decimal::new(700, 2));
    }

    #[test]
    fn total_is_rounded_to_two_decimal_places() {
        let items = vec![json!({"qty": 3, "price": 0.333})];
        // 0.999 rounds to 1.00
        assert_eq!(checkout_total(&items), Decimal::new(100, 2));
    }

    #[test]
    fn empty_items_total_zero() {
        assert_eq!(checkout_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn parse_rejects_null_qty() {
        assert_eq!(LineItem::parse(&json!({"qty": null, "price": 5.0})), None);
    }
}
