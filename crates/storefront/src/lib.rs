//! Pocket Shop Storefront library.
//!
//! Accounts, cart, and purchase history for a single-shopper store whose
//! only persistence is key-value storage with a durable and an ephemeral
//! scope.
//!
//! # Modules
//!
//! - [`storage`] - Key-value stores and the two-scope [`Storage`](storage::Storage)
//! - [`db`] - Repositories mapping domain records to storage keys
//! - [`models`] - Stored records (users, session marker, cart lines, purchases)
//! - [`services`] - Authentication, cart, and search services
//! - [`state`] - Owned state bundling configuration and storage
//! - [`config`] - Environment-based configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;

pub use error::AppError;
pub use state::ShopState;
