//! Pocket Shop Core - Shared types library.
//!
//! This crate provides common types used across all Pocket Shop components:
//! - `storefront` - Credential, cart, and purchase-history services
//! - `cli` - Interactive shell over the storefront services
//!
//! # Architecture
//!
//! The core crate contains only types and validation rules - no I/O, no
//! storage access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, emails, display
//!   names, and the password policy

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
