//! In-memory product collection for one catalog session.

use crate::catalog::languages::NameResolver;
use crate::catalog::models::Product;
use crate::filters::{Filter, SearchFilter};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Suggestions shown under the search box.
pub const MAX_SUGGESTIONS: usize = 8;

/// Queries shorter than this (after trimming) get no suggestions.
pub const MIN_SUGGEST_CHARS: usize = 2;

/// Similar products shown on a product page.
pub const MAX_RELATED: usize = 4;

/// Live search suggestions for a partially typed query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Suggestions {
    /// Matching products in catalog order, at most the requested limit
    pub products: Vec<Arc<Product>>,
    /// True when more products match than were returned
    pub has_more: bool,
}

/// Holds the product collection every filter pass starts from.
///
/// Products are shared behind [`Arc`] so filtered and paginated views can
/// reference them without copying.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    products: Vec<Arc<Product>>,
}

impl CatalogStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already loaded with `products`.
    pub fn with_products(products: Vec<Product>) -> Self {
        let mut store = Self::new();
        store.load(products);
        store
    }

    /// Replaces the held collection, keeping input order.
    ///
    /// A repeated id keeps the first record.
    pub fn load(&mut self, products: Vec<Product>) {
        let mut seen = HashSet::new();
        let mut loaded = Vec::with_capacity(products.len());

        for product in products {
            if !seen.insert(product.id.clone()) {
                warn!("Duplicate product id '{}', keeping first record", product.id);
                continue;
            }
            loaded.push(Arc::new(product));
        }

        info!("Catalog loaded with {} products", loaded.len());
        self.products = loaded;
    }

    /// Returns the full collection in input order.
    pub fn all(&self) -> &[Arc<Product>] {
        &self.products
    }

    /// Looks up a product by id.
    pub fn get(&self, id: &str) -> Option<&Arc<Product>> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Returns products whose resolved name contains `text`, ignoring case.
    pub fn suggest(&self, text: &str, names: &NameResolver, limit: usize) -> Suggestions {
        if text.trim().chars().count() < MIN_SUGGEST_CHARS {
            return Suggestions::default();
        }

        let filter = SearchFilter::new(text, names.clone());
        let mut matches = self.products.iter().filter(|p| filter.matches(p));
        let products: Vec<Arc<Product>> = matches.by_ref().take(limit).cloned().collect();
        let has_more = matches.next().is_some();

        debug!("{} suggestions for {:?}", products.len(), text.trim());
        Suggestions { products, has_more }
    }

    /// Returns other products in the category of `id`, in catalog order.
    ///
    /// An unknown id yields nothing.
    pub fn related(&self, id: &str, limit: usize) -> Vec<Arc<Product>> {
        let Some(product) = self.get(id) else {
            debug!("No product '{}' to relate to", id);
            return Vec::new();
        };

        self.products
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Returns distinct brands in first-seen order, compared case-insensitively.
    pub fn brands(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .filter(|p| !p.brand.is_empty() && seen.insert(p.brand_key()))
            .map(|p| p.brand.clone())
            .collect()
    }
}
