//! Cart service.
//!
//! Owns the active cart of one browsing context. Where the cart is stored
//! depends on the session marker at the time of each call:
//!
//! - authenticated: durable storage under `<email>CartStore`
//! - guest: ephemeral storage under `GuestCartStore`
//!
//! Every mutation reloads the stored cart first and writes it back after.
//! This narrows, but does not close, the window in which two contexts
//! sharing a key overwrite each other; the last write wins.

mod error;

pub use error::CartError;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::instrument;

use pocket_shop_core::{Price, ProductId, TAX_RATE};

use crate::db::{CartLocation, CartRepository, HistoryRepository, SessionRepository, keys};
use crate::models::{CartLine, CartTotals, PurchaseRecord};
use crate::storage::Storage;

/// Cart service for one browsing context.
pub struct CartService<'a> {
    sessions: SessionRepository<'a>,
    carts: CartRepository<'a>,
    history: HistoryRepository<'a>,
    items: Vec<CartLine>,
    tax_rate: Decimal,
}

impl<'a> CartService<'a> {
    /// Create a cart service with an empty in-memory cart.
    ///
    /// Call [`Self::init`] to load the stored cart.
    #[must_use]
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            sessions: SessionRepository::new(storage),
            carts: CartRepository::new(storage),
            history: HistoryRepository::new(storage),
            items: Vec::new(),
            tax_rate: TAX_RATE,
        }
    }

    /// Use `tax_rate` instead of the default 7%.
    #[must_use]
    pub const fn with_tax_rate(mut self, tax_rate: Decimal) -> Self {
        self.tax_rate = tax_rate;
        self
    }

    /// Load the cart for the current context.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the session or cart cannot be read.
    pub fn init(&mut self) -> Result<(), CartError> {
        self.load_cart()
    }

    /// Lines currently held in memory.
    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    // =========================================================================
    // Key Resolution
    // =========================================================================

    /// Scope and key of the active cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the session marker cannot be read.
    pub fn resolve_cart_location(&self) -> Result<CartLocation, CartError> {
        let session = self.sessions.current()?;
        Ok(CartLocation::for_session(session.as_ref()))
    }

    /// Key of the active cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the session marker cannot be read.
    pub fn resolve_cart_key(&self) -> Result<String, CartError> {
        Ok(self.resolve_cart_location()?.key)
    }

    /// Key of the purchase history, or `None` for guests.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the session marker cannot be read.
    pub fn resolve_history_key(&self) -> Result<Option<String>, CartError> {
        Ok(self
            .sessions
            .current()?
            .map(|session| keys::purchase_history(&session.email)))
    }

    // =========================================================================
    // Load and Save
    // =========================================================================

    /// Replace the in-memory cart with the stored one.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the cart cannot be read or is malformed.
    pub fn load_cart(&mut self) -> Result<(), CartError> {
        let location = self.resolve_cart_location()?;
        self.items = self.carts.load(&location)?;
        tracing::debug!(key = %location.key, lines = self.items.len(), "Cart loaded");
        Ok(())
    }

    /// Write the in-memory cart to the active location.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the cart cannot be written.
    pub fn save_cart(&self) -> Result<(), CartError> {
        let location = self.resolve_cart_location()?;
        self.carts.save(&location, &self.items)?;
        Ok(())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of a product.
    ///
    /// Increments the existing line for `product_id`, or appends a new line
    /// with quantity 1.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the cart cannot be read or written.
    #[instrument(skip(self, product_name, unit_price))]
    pub fn add_to_cart(
        &mut self,
        product_id: ProductId,
        product_name: &str,
        unit_price: Price,
    ) -> Result<(), CartError> {
        self.load_cart()?;

        if let Some(line) = self.line_mut(product_id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.items
                .push(CartLine::new(product_id, product_name, unit_price));
        }

        self.save_cart()
    }

    /// Remove the line for `product_id`, if present.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the cart cannot be read or written.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, product_id: ProductId) -> Result<(), CartError> {
        self.load_cart()?;
        self.items.retain(|line| line.product_id != product_id);
        self.save_cart()
    }

    /// Set the quantity of the line for `product_id`.
    ///
    /// A quantity of zero or less removes the line. A product not in the
    /// cart is left alone.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the cart cannot be read or written.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> Result<(), CartError> {
        self.load_cart()?;

        if self.line_mut(product_id).is_none() {
            return Ok(());
        }

        if quantity <= 0 {
            return self.remove_from_cart(product_id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity;
        }
        self.save_cart()
    }

    /// Empty the cart and delete it from storage.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the stored cart cannot be removed.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) -> Result<(), CartError> {
        self.items.clear();
        let location = self.resolve_cart_location()?;
        self.carts.remove(&location)?;
        tracing::debug!(key = %location.key, "Cart cleared");
        Ok(())
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.items
            .iter_mut()
            .find(|line| line.product_id == product_id)
    }

    // =========================================================================
    // Derived Values
    // =========================================================================

    /// Sum of `unit_price * quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(CartLine::line_total).sum()
    }

    /// Tax on the subtotal.
    #[must_use]
    pub fn tax(&self) -> Price {
        self.subtotal().scaled(self.tax_rate)
    }

    /// Subtotal plus tax.
    #[must_use]
    pub fn total(&self) -> Price {
        self.subtotal() + self.tax()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |count, line| count.saturating_add(line.quantity))
    }

    /// All derived values at once.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        let subtotal = self.subtotal();
        let tax = subtotal.scaled(self.tax_rate);
        CartTotals {
            subtotal,
            tax,
            total: subtotal + tax,
            item_count: self.total_item_count(),
        }
    }

    // =========================================================================
    // Purchase History
    // =========================================================================

    /// Record the current cart as purchased now.
    ///
    /// See [`Self::commit_purchase_at`].
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the history cannot be read or written.
    pub fn commit_purchase(&self) -> Result<usize, CartError> {
        self.commit_purchase_at(Utc::now())
    }

    /// Append one history record per cart line, stamped with `timestamp`.
    ///
    /// Returns the number of records appended: zero for guests and for an
    /// empty cart. The cart itself is left as is; call [`Self::clear_cart`]
    /// separately.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the history cannot be read or written.
    #[instrument(skip(self))]
    pub fn commit_purchase_at(&self, timestamp: DateTime<Utc>) -> Result<usize, CartError> {
        let Some(key) = self.resolve_history_key()? else {
            tracing::debug!("No session; purchase not recorded");
            return Ok(0);
        };

        let records: Vec<PurchaseRecord> = self
            .items
            .iter()
            .map(|line| PurchaseRecord::from_line(line, timestamp))
            .collect();

        if records.is_empty() {
            return Ok(0);
        }

        self.history.append(&key, &records)?;
        tracing::info!(records = records.len(), total = %self.total(), "Purchase recorded");
        Ok(records.len())
    }

    /// Purchase history of the logged-in user; empty for guests.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the history cannot be read or is malformed.
    pub fn history(&self) -> Result<Vec<PurchaseRecord>, CartError> {
        match self.resolve_history_key()? {
            Some(key) => Ok(self.history.load(&key)?),
            None => Ok(Vec::new()),
        }
    }
}
