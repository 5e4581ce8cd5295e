//! Product filtering system with composable filters.
//!
//! A [`FilterState`] describes the shopper's selections; [`FilterChainBuilder`]
//! turns the active criteria into a [`FilterChain`] whose filters must all pass.

pub mod brand;
pub mod category;
pub mod price;
pub mod rating;
pub mod search;
pub mod state;
pub mod stock;

use crate::catalog::{NameResolver, Product};
use std::borrow::Borrow;
use std::collections::BTreeSet;
use tracing::debug;

pub use brand::BrandFilter;
pub use category::CategoryFilter;
pub use price::PriceFilter;
pub use rating::{RatingFilter, RatingTier};
pub use search::SearchFilter;
pub use state::FilterState;
pub use stock::StockFilter;

/// Trait for filtering products.
pub trait Filter: Send + Sync {
    /// Returns true if the product passes the filter.
    fn matches(&self, product: &Product) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;
}

/// A chain of filters that must all pass.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Creates an empty filter chain.
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Adds a filter to the chain.
    pub fn add(&mut self, filter: impl Filter + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Checks if a product passes all filters.
    pub fn matches(&self, product: &Product) -> bool {
        self.filters.iter().all(|f| f.matches(product))
    }

    /// Returns the matching products in their original order.
    pub fn apply<P>(&self, products: &[P]) -> Vec<P>
    where
        P: Borrow<Product> + Clone,
    {
        products
            .iter()
            .filter(|p| {
                let product: &Product = (*p).borrow();
                self.matches(product)
            })
            .cloned()
            .collect()
    }

    /// Returns true if no filters are configured.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns the number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns descriptions of all filters.
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder that adds a filter only for criteria that are active.
pub struct FilterChainBuilder {
    chain: FilterChain,
}

impl FilterChainBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self { chain: FilterChain::new() }
    }

    /// Builds the chain for every active criterion of `state`.
    pub fn from_state(state: &FilterState, names: &NameResolver) -> Self {
        Self::new()
            .category(state.category.clone())
            .brands(&state.brands)
            .price_range(state.min_price, state.max_price)
            .rating_tiers(&state.ratings)
            .in_stock_only(state.in_stock_only)
            .search(&state.search_text, names)
    }

    /// Adds a category filter unless all categories are selected.
    pub fn category(mut self, category: Option<crate::catalog::Category>) -> Self {
        if let Some(category) = category {
            self.chain.add(CategoryFilter::new(category));
        }
        self
    }

    /// Adds a brand filter when at least one brand is selected.
    pub fn brands(mut self, brands: &BTreeSet<String>) -> Self {
        if !brands.is_empty() {
            self.chain.add(BrandFilter::new(brands.iter().cloned()));
        }
        self
    }

    /// Adds a price range filter.
    pub fn price_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        if min.is_some() || max.is_some() {
            self.chain.add(PriceFilter::new(min, max));
        }
        self
    }

    /// Adds a rating filter when at least one tier is selected.
    pub fn rating_tiers(mut self, tiers: &BTreeSet<RatingTier>) -> Self {
        if !tiers.is_empty() {
            self.chain.add(RatingFilter::new(tiers.iter().copied()));
        }
        self
    }

    /// Adds an in-stock filter.
    pub fn in_stock_only(mut self, enabled: bool) -> Self {
        if enabled {
            self.chain.add(StockFilter::new());
        }
        self
    }

    /// Adds a name search filter for non-empty text.
    pub fn search(mut self, text: &str, names: &NameResolver) -> Self {
        if !text.trim().is_empty() {
            self.chain.add(SearchFilter::new(text, names.clone()));
        }
        self
    }

    /// Builds the filter chain.
    pub fn build(self) -> FilterChain {
        self.chain
    }
}

impl Default for FilterChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the products passing every active criterion of `state`, in input order.
pub fn apply<P>(products: &[P], state: &FilterState, names: &NameResolver) -> Vec<P>
where
    P: Borrow<Product> + Clone,
{
    let chain = FilterChainBuilder::from_state(state, names).build();
    if chain.is_empty() {
        return products.to_vec();
    }

    debug!("Active filters: {}", chain.descriptions().join(", "));
    chain.apply(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, Language};
    use std::sync::Arc;

    fn make_product(id: &str, price: f64, rating: f64, in_stock: bool) -> Product {
        Product::new(id, Category::Phones, "Apple", price)
            .with_name(Language::Uk, format!("Телефон {}", id))
            .with_rating(rating, 10)
            .with_stock(in_stock)
    }

    fn ids<P: Borrow<Product>>(products: &[P]) -> Vec<String> {
        products
            .iter()
            .map(|p| {
                let product: &Product = p.borrow();
                product.id.clone()
            })
            .collect()
    }

    // FilterChain tests

    #[test]
    fn test_filter_chain_new() {
        let chain = FilterChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
    }

    #[test]
    fn test_filter_chain_empty_matches_all() {
        let chain = FilterChain::default();
        assert!(chain.matches(&make_product("a", 1.0, 0.0, false)));
    }

    #[test]
    fn test_filter_chain() {
        let mut chain = FilterChain::new();
        chain.add(PriceFilter::new(Some(10.0), Some(50.0)));
        chain.add(RatingFilter::new([RatingTier::Four]));

        assert_eq!(chain.len(), 2);
        assert!(chain.matches(&make_product("a", 25.0, 4.5, true)));
        assert!(!chain.matches(&make_product("b", 5.0, 4.5, true)));
        assert!(!chain.matches(&make_product("c", 25.0, 3.5, true)));
    }

    #[test]
    fn test_filter_chain_apply_keeps_order() {
        let mut chain = FilterChain::new();
        chain.add(PriceFilter::new(Some(20.0), None));

        let products = vec![
            make_product("a", 50.0, 4.0, true),
            make_product("b", 10.0, 4.0, true),
            make_product("c", 30.0, 4.0, true),
        ];

        assert_eq!(ids(&chain.apply(&products)), vec!["a", "c"]);
    }

    #[test]
    fn test_filter_chain_apply_shared_products() {
        let mut chain = FilterChain::new();
        chain.add(StockFilter::new());

        let products: Vec<Arc<Product>> = vec![
            Arc::new(make_product("a", 1.0, 4.0, false)),
            Arc::new(make_product("b", 1.0, 4.0, true)),
        ];

        let filtered = chain.apply(&products);
        assert_eq!(ids(&filtered), vec!["b"]);
        assert!(Arc::ptr_eq(&filtered[0], &products[1]));
    }

    #[test]
    fn test_filter_chain_descriptions() {
        let mut chain = FilterChain::new();
        chain.add(PriceFilter::new(Some(10.0), Some(50.0)));
        chain.add(RatingFilter::new([RatingTier::Four]));
        chain.add(StockFilter::new());

        let descriptions = chain.descriptions();
        assert_eq!(descriptions.len(), 3);
        assert!(descriptions[0].contains("Price"));
        assert!(descriptions[1].contains("Rating"));
        assert!(descriptions[2].contains("stock"));
    }

    // FilterChainBuilder tests

    #[test]
    fn test_builder_no_filters_for_default_state() {
        let chain =
            FilterChainBuilder::from_state(&FilterState::default(), &NameResolver::default())
                .build();
        assert!(chain.is_empty());
    }

    #[test]
    fn test_builder_all_criteria() {
        let mut state = FilterState::default();
        state.set_category(Some(Category::Phones));
        state.toggle_brand("Apple");
        state.set_price_bounds(Some(10.0), Some(100.0));
        state.toggle_rating_tier(RatingTier::Four);
        state.set_in_stock_only(true);
        state.set_search_text("телефон");

        let chain = FilterChainBuilder::from_state(&state, &NameResolver::default()).build();
        assert_eq!(chain.len(), 6);

        assert!(chain.matches(&make_product("a", 50.0, 4.5, true)));
        assert!(!chain.matches(&make_product("b", 500.0, 4.5, true)));
        assert!(!chain.matches(&make_product("c", 50.0, 3.5, true)));
        assert!(!chain.matches(&make_product("d", 50.0, 4.5, false)));
    }

    #[test]
    fn test_builder_whitespace_search_inactive() {
        let chain = FilterChainBuilder::new().search("   ", &NameResolver::default()).build();
        assert!(chain.is_empty());
    }

    // apply tests

    #[test]
    fn test_apply_default_state_is_identity() {
        let products = vec![
            make_product("c", 30.0, 1.0, false),
            make_product("a", 10.0, 5.0, true),
            make_product("b", 20.0, 0.0, true),
        ];

        let filtered = apply(&products, &FilterState::default(), &NameResolver::default());
        assert_eq!(filtered, products);
    }

    #[test]
    fn test_apply_combines_with_and() {
        let products = vec![
            make_product("a", 30.0, 4.6, false),
            make_product("b", 30.0, 4.6, true),
            make_product("c", 30.0, 2.0, true),
        ];

        let mut state = FilterState::default();
        state.toggle_rating_tier(RatingTier::Three);
        state.set_in_stock_only(true);

        let filtered = apply(&products, &state, &NameResolver::default());
        assert_eq!(ids(&filtered), vec!["b"]);
    }

    #[test]
    fn test_apply_empty_result() {
        let products = vec![make_product("a", 30.0, 4.0, true)];
        let mut state = FilterState::default();
        state.set_price_bounds(Some(100.0), None);

        assert!(apply(&products, &state, &NameResolver::default()).is_empty());
    }
}
