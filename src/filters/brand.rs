//! Brand filter.

use super::Filter;
use crate::catalog::Product;
use std::collections::BTreeSet;

/// Passes products made by any of the selected brands, ignoring case.
pub struct BrandFilter {
    brands: BTreeSet<String>,
}

impl BrandFilter {
    /// Creates a new brand filter. Brands are stored lower-cased.
    pub fn new(brands: impl IntoIterator<Item = String>) -> Self {
        Self { brands: brands.into_iter().map(|b| b.to_lowercase()).collect() }
    }
}

impl Filter for BrandFilter {
    fn matches(&self, product: &Product) -> bool {
        self.brands.contains(&product.brand_key())
    }

    fn description(&self) -> String {
        let brands: Vec<&str> = self.brands.iter().map(String::as_str).collect();
        format!("Brand: {}", brands.join(", "))
    }
}
