//! The shopper's current filter selections.

use crate::catalog::Category;
use crate::filters::RatingTier;
use serde::Serialize;
use std::collections::BTreeSet;

/// Current combination of filter criteria.
///
/// Empty `brands` and `ratings` sets mean the criterion is inactive.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterState {
    /// Selected category, `None` for all categories
    pub category: Option<Category>,
    /// Selected brands, lower-cased
    pub brands: BTreeSet<String>,
    /// Inclusive lower price bound
    pub min_price: Option<f64>,
    /// Inclusive upper price bound
    pub max_price: Option<f64>,
    /// Selected "N stars & up" tiers
    pub ratings: BTreeSet<RatingTier>,
    pub in_stock_only: bool,
    /// Case-insensitive substring matched against the display name
    pub search_text: String,
}

impl FilterState {
    /// Creates a state with no active criteria.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no criterion is active.
    pub fn is_default(&self) -> bool {
        self.category.is_none()
            && self.brands.is_empty()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.ratings.is_empty()
            && !self.in_stock_only
            && self.search_text.is_empty()
    }

    /// Selects a category. Custom tokens are canonicalized, so `Custom("all")`
    /// clears the selection and aliases resolve to their built-in category.
    pub fn set_category(&mut self, category: Option<Category>) {
        self.category = category.and_then(|c| crate::query::canonical_category(c.as_str()));
    }

    /// Selects or deselects a brand. Returns true if the brand is now selected.
    pub fn toggle_brand(&mut self, brand: &str) -> bool {
        let key = brand.trim().to_lowercase();
        if key.is_empty() {
            return false;
        }
        if self.brands.remove(&key) {
            false
        } else {
            self.brands.insert(key);
            true
        }
    }

    /// Sets both price bounds. Negative or non-finite bounds are dropped.
    pub fn set_price_bounds(&mut self, min: Option<f64>, max: Option<f64>) {
        self.min_price = min.filter(|v| is_valid_price(*v));
        self.max_price = max.filter(|v| is_valid_price(*v));
    }

    /// Selects or deselects a rating tier. Returns true if the tier is now selected.
    pub fn toggle_rating_tier(&mut self, tier: RatingTier) -> bool {
        if self.ratings.remove(&tier) {
            false
        } else {
            self.ratings.insert(tier);
            true
        }
    }

    pub fn set_in_stock_only(&mut self, enabled: bool) {
        self.in_stock_only = enabled;
    }

    /// Sets the search text, trimming surrounding whitespace.
    pub fn set_search_text(&mut self, text: &str) {
        self.search_text = text.trim().to_string();
    }

    /// Clears every criterion.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Returns true for prices usable as a filter bound.
pub(crate) fn is_valid_price(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
