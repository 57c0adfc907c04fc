//! Purchase history types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pocket_shop_core::{Price, ProductId};

use super::CartLine;

/// One cart line as it was at checkout.
///
/// History is append-only; every line of a checkout shares its timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    /// When the checkout happened (ISO-8601, UTC).
    pub purchase_timestamp: DateTime<Utc>,
    /// Purchased product.
    pub product_id: ProductId,
    /// Product name at checkout.
    pub product_name: String,
    /// Unit price at checkout.
    pub unit_price: Price,
    /// Units bought.
    pub quantity: u32,
}

impl PurchaseRecord {
    /// Snapshot `line` as purchased at `purchase_timestamp`.
    #[must_use]
    pub fn from_line(line: &CartLine, purchase_timestamp: DateTime<Utc>) -> Self {
        Self {
            purchase_timestamp,
            product_id: line.product_id,
            product_name: line.product_name.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
        }
    }

    /// Price paid for this record before tax.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}
