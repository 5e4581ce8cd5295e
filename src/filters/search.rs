//! Free-text search over localized product names.

use super::Filter;
use crate::catalog::{NameResolver, Product};

/// Passes products whose resolved display name contains the search text,
/// ignoring case.
pub struct SearchFilter {
    needle: String,
    names: NameResolver,
}

impl SearchFilter {
    /// Creates a new search filter resolving names through `names`.
    pub fn new(text: &str, names: NameResolver) -> Self {
        Self { needle: text.trim().to_lowercase(), names }
    }
}

impl Filter for SearchFilter {
    fn matches(&self, product: &Product) -> bool {
        self.names.resolve(product).to_lowercase().contains(&self.needle)
    }

    fn description(&self) -> String {
        format!("Name contains: {} ({})", self.needle, self.names.active())
    }
}
