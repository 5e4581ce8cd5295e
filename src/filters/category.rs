//! Category filter.

use super::Filter;
use crate::catalog::{Category, Product};

/// Passes products in exactly one category.
pub struct CategoryFilter {
    category: Category,
}

impl CategoryFilter {
    pub fn new(category: Category) -> Self {
        Self { category }
    }
}

impl Filter for CategoryFilter {
    fn matches(&self, product: &Product) -> bool {
        product.category == self.category
    }

    fn description(&self) -> String {
        format!("Category: {}", self.category)
    }
}
