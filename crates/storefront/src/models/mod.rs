//! Domain models for the storefront.
//!
//! Every model round-trips through storage as JSON with camelCase field
//! names, so stored content reads like `{"productId": 1, "unitPrice": 10}`.

pub mod cart;
pub mod purchase;
pub mod session;
pub mod user;

pub use cart::{CartLine, CartTotals};
pub use purchase::PurchaseRecord;
pub use session::SessionMarker;
pub use user::UserRecord;
