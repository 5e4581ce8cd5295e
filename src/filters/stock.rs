//! In-stock filter.

use super::Filter;
use crate::catalog::Product;

/// Filters to only include products currently in stock.
pub struct StockFilter;

impl StockFilter {
    /// Creates a new stock filter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for StockFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StockFilter {
    fn matches(&self, product: &Product) -> bool {
        product.in_stock
    }

    fn description(&self) -> String {
        "In stock only".to_string()
    }
}
