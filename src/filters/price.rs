//! Price range filter.

use super::Filter;
use crate::catalog::Product;

/// Filters products by an inclusive price range.
pub struct PriceFilter {
    min: Option<f64>,
    max: Option<f64>,
}

impl PriceFilter {
    /// Creates a new price filter with optional min/max bounds.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }
}

impl Filter for PriceFilter {
    fn matches(&self, product: &Product) -> bool {
        if self.min.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max.is_some_and(|max| product.price > max) {
            return false;
        }
        true
    }

    fn description(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) => format!("Price: {} - {}", min, max),
            (Some(min), None) => format!("Price: >= {}", min),
            (None, Some(max)) => format!("Price: <= {}", max),
            (None, None) => "Price: any".to_string(),
        }
    }
}
