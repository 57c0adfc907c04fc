//! Shared product search query.
//!
//! One query per browsing context, set from wherever the shopper types it
//! and read by whatever lists products. Matching is a case-insensitive
//! substring test on the product name; an empty query matches everything.

use crate::models::{CartLine, PurchaseRecord};

/// Anything that can be matched against a search query.
pub trait Searchable {
    /// Text the query is matched against.
    fn search_text(&self) -> &str;
}

impl Searchable for CartLine {
    fn search_text(&self) -> &str {
        &self.product_name
    }
}

impl Searchable for PurchaseRecord {
    fn search_text(&self) -> &str {
        &self.product_name
    }
}

/// The current search query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    query: String,
}

impl SearchState {
    /// An empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The query as typed.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the query.
    pub fn set(&mut self, query: impl Into<String>) {
        self.query = query.into();
        tracing::debug!(query = %self.query, "Search query set");
    }

    /// Reset to the empty query.
    pub fn clear(&mut self) {
        self.query.clear();
    }

    /// Whether `item` matches the query.
    #[must_use]
    pub fn matches<T: Searchable + ?Sized>(&self, item: &T) -> bool {
        let needle = self.query.trim();
        needle.is_empty()
            || item
                .search_text()
                .to_lowercase()
                .contains(&needle.to_lowercase())
    }

    /// The items that match, in their original order.
    #[must_use]
    pub fn filter<'i, T: Searchable>(&self, items: &'i [T]) -> Vec<&'i T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }
}
