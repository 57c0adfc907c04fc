//! Core types for Pocket Shop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod display_name;
pub mod email;
pub mod id;
pub mod password;
pub mod price;

pub use display_name::{DisplayName, DisplayNameError};
pub use email::{Email, EmailError};
pub use id::*;
pub use password::{PasswordError, check_password};
pub use price::{Price, PriceError, TAX_RATE};
