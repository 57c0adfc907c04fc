//! Business logic services for the storefront.
//!
//! # Services
//!
//! - [`auth`] - Registration, credential checks, and the session marker
//! - [`cart`] - Active cart, derived totals, and purchase history
//! - [`search`] - Shared search query over product names
//!
//! Services borrow an explicitly passed [`Storage`](crate::storage::Storage);
//! none of them hold global state.

pub mod auth;
pub mod cart;
pub mod search;
