//! Cart types.

use serde::{Deserialize, Serialize};

use pocket_shop_core::{Price, ProductId};

/// One product in a cart.
///
/// A cart holds at most one line per `product_id`, and a stored line always
/// has `quantity >= 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product in this line.
    pub product_id: ProductId,
    /// Product name shown in the cart.
    pub product_name: String,
    /// Price of one unit.
    pub unit_price: Price,
    /// Number of units.
    pub quantity: u32,
}

impl CartLine {
    /// A new line with a single unit.
    #[must_use]
    pub fn new(product_id: ProductId, product_name: impl Into<String>, unit_price: Price) -> Self {
        Self {
            product_id,
            product_name: product_name.into(),
            unit_price,
            quantity: 1,
        }
    }

    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Derived cart figures, computed from the lines on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of line totals.
    pub subtotal: Price,
    /// Tax on the subtotal.
    pub tax: Price,
    /// `subtotal + tax`.
    pub total: Price,
    /// Sum of line quantities.
    pub item_count: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_shape() {
        let line = CartLine::new(ProductId::new(1), "Mug", Price::from_cents(1000));
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "productId": 1,
                "productName": "Mug",
                "unitPrice": 10.0,
                "quantity": 1
            })
        );
    }

    #[test]
    fn test_reads_integer_prices() {
        let line: CartLine = serde_json::from_str(
            r#"{"productId": 3, "productName": "Tea", "unitPrice": 4, "quantity": 2}"#,
        )
        .unwrap();
        assert_eq!(line.line_total(), Price::from_cents(800));
    }
}
