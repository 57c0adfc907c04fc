//! Repositories over the two storage scopes.
//!
//! # Keys
//!
//! ## Durable
//!
//! - `DataUsers` - list of [`UserRecord`](crate::models::UserRecord)
//! - `<email>CartStore` - cart lines of an authenticated user
//! - `<email>HistoryPurchased` - purchase records of a user
//!
//! ## Ephemeral
//!
//! - `ShopSession` - the [`SessionMarker`](crate::models::SessionMarker)
//! - `GuestCartStore` - cart lines of the guest context
//!
//! Stored content has no schema version; a format change is not migrated.

pub mod carts;
pub mod history;
pub mod sessions;
pub mod users;

pub use carts::{CartLocation, CartRepository};
pub use history::HistoryRepository;
pub use sessions::SessionRepository;
pub use users::UserRepository;

/// Storage keys.
pub mod keys {
    /// Durable key of the registered user list.
    pub const USERS: &str = "DataUsers";

    /// Ephemeral key of the session marker.
    pub const SESSION: &str = "ShopSession";

    /// Ephemeral key of the guest cart.
    pub const GUEST_CART: &str = "GuestCartStore";

    /// Durable key of an authenticated user's cart.
    #[must_use]
    pub fn user_cart(email: &str) -> String {
        format!("{email}CartStore")
    }

    /// Durable key of a user's purchase history.
    #[must_use]
    pub fn purchase_history(email: &str) -> String {
        format!("{email}HistoryPurchased")
    }
}
