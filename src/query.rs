//! Canonical query-string representation of the catalog selection.
//!
//! Only fields that differ from their defaults are emitted. The current page
//! is never part of it. Parsing is lenient: malformed or unknown fields are
//! dropped and the rest of the query still applies.

use crate::catalog::Category;
use crate::filters::state::is_valid_price;
use crate::filters::{FilterState, RatingTier};
use crate::sort::SortKey;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// Query keys in the order they are written.
const KEYS: [&str; 8] =
    ["category", "search", "brands", "minPrice", "maxPrice", "ratings", "inStock", "sort"];

/// Public category names that differ from the internal ones.
fn category_alias(token: &str) -> Option<Category> {
    match token {
        "smartphones" => Some(Category::Phones),
        "watches" => Some(Category::Smartwatches),
        _ => None,
    }
}

/// Minimal external form of a [`FilterState`] and [`SortKey`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryState {
    pub category: Option<Category>,
    pub search: Option<String>,
    pub brands: Vec<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub ratings: Vec<RatingTier>,
    pub in_stock: bool,
    pub sort: Option<SortKey>,
}

/// Maps an external category token to the internal category.
///
/// `"all"` and the empty token select every category. Unknown tokens pass
/// through unchanged.
pub fn canonical_category(token: &str) -> Option<Category> {
    let token = token.trim().to_lowercase();
    if token.is_empty() || token == "all" {
        return None;
    }

    Some(category_alias(&token).unwrap_or_else(|| Category::from(token.as_str())))
}

/// Builds the query state for a selection. Page numbers are never included.
pub fn serialize(filters: &FilterState, sort: SortKey) -> QueryState {
    QueryState {
        category: filters.category.clone(),
        search: Some(filters.search_text.clone()).filter(|s| !s.is_empty()),
        brands: filters.brands.iter().cloned().collect(),
        min_price: filters.min_price,
        max_price: filters.max_price,
        ratings: filters.ratings.iter().copied().collect(),
        in_stock: filters.in_stock_only,
        sort: Some(sort).filter(|s| *s != SortKey::Default),
    }
}

/// Builds the filter state described by `query`, defaults elsewhere.
pub fn deserialize(query: &QueryState) -> FilterState {
    let mut filters = FilterState::default();
    query.apply_to(&mut filters);
    filters
}

impl QueryState {
    /// Parses a query string such as `?category=phones&sort=price-asc`.
    pub fn parse(query: &str) -> Self {
        let mut state = Self::default();

        for pair in query.trim().trim_start_matches('?').split('&').filter(|p| !p.is_empty()) {
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let (Some(key), Some(value)) = (decode(raw_key), decode(raw_value)) else {
                debug!("Ignoring undecodable query parameter '{}'", pair);
                continue;
            };
            state.set_field(&key, &value);
        }

        state
    }

    fn set_field(&mut self, key: &str, value: &str) {
        match key {
            "category" => self.category = canonical_category(value),
            "search" => {
                let text = value.trim();
                self.search = Some(text.to_string()).filter(|s| !s.is_empty());
            }
            "brands" => {
                let brands: BTreeSet<String> = value
                    .split(',')
                    .map(|b| decode_brand(b).trim().to_lowercase())
                    .filter(|b| !b.is_empty())
                    .collect();
                self.brands = brands.into_iter().collect();
            }
            "minPrice" => self.min_price = parse_price(key, value),
            "maxPrice" => self.max_price = parse_price(key, value),
            "ratings" => {
                let mut tiers = BTreeSet::new();
                for token in value.split(',').filter(|t| !t.trim().is_empty()) {
                    match token.parse::<RatingTier>() {
                        Ok(tier) => {
                            tiers.insert(tier);
                        }
                        Err(err) => debug!("Ignoring rating tier: {}", err),
                    }
                }
                self.ratings = tiers.into_iter().collect();
            }
            "inStock" => {
                self.in_stock = matches!(value.trim(), "1" | "true" | "yes" | "on");
            }
            "sort" => {
                self.sort = match value.parse::<SortKey>() {
                    Ok(SortKey::Default) => None,
                    Ok(key) => Some(key),
                    Err(err) => {
                        debug!("Ignoring sort parameter: {}", err);
                        None
                    }
                }
            }
            _ => debug!("Ignoring unknown query parameter '{}'", key),
        }
    }

    /// Overwrites the fields of `filters` that this query carries.
    pub fn apply_to(&self, filters: &mut FilterState) {
        if let Some(category) = &self.category {
            filters.set_category(Some(category.clone()));
        }
        if let Some(search) = &self.search {
            filters.set_search_text(search);
        }
        if !self.brands.is_empty() {
            filters.brands = self.brands.iter().map(|b| b.to_lowercase()).collect();
        }
        if self.min_price.is_some() || self.max_price.is_some() {
            filters.set_price_bounds(
                self.min_price.or(filters.min_price),
                self.max_price.or(filters.max_price),
            );
        }
        if !self.ratings.is_empty() {
            filters.ratings = self.ratings.iter().copied().collect();
        }
        if self.in_stock {
            filters.set_in_stock_only(true);
        }
    }

    /// Returns the sort key, `Default` when absent.
    pub fn sort_key(&self) -> SortKey {
        self.sort.unwrap_or_default()
    }

    /// Returns true when every field is at its default.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Renders the canonical query string, without a leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::with_capacity(KEYS.len());

        for key in KEYS {
            let value = match key {
                "category" => self.category.as_ref().map(|c| c.to_string()),
                "search" => self.search.clone(),
                // Brands are escaped individually; a raw comma only separates entries.
                "brands" => Some(
                    self.brands
                        .iter()
                        .map(|b| urlencoding::encode(b).into_owned())
                        .collect::<Vec<_>>()
                        .join(","),
                )
                .filter(|b| !b.is_empty()),
                "minPrice" => self.min_price.map(|p| p.to_string()),
                "maxPrice" => self.max_price.map(|p| p.to_string()),
                "ratings" => Some(
                    self.ratings.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(","),
                )
                .filter(|r| !r.is_empty()),
                "inStock" => self.in_stock.then(|| "1".to_string()),
                "sort" => self.sort.map(|s| s.token().to_string()),
                _ => None,
            };
            if let Some(value) = value {
                pairs.push((key, value));
            }
        }

        pairs
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Decodes one form-encoded component: `+` is a space, then percent-decoding.
fn decode(raw: &str) -> Option<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).ok().map(|s| s.into_owned())
}

/// Decodes one entry of the `brands` list. Undecodable entries are kept verbatim.
fn decode_brand(raw: &str) -> String {
    urlencoding::decode(raw).map(|b| b.into_owned()).unwrap_or_else(|_| raw.to_string())
}

fn parse_price(key: &str, value: &str) -> Option<f64> {
    match value.trim().parse::<f64>() {
        Ok(price) if is_valid_price(price) => Some(price),
        _ => {
            debug!("Ignoring {} value '{}'", key, value);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_state() -> FilterState {
        let mut filters = FilterState::default();
        filters.set_category(Some(Category::Laptops));
        filters.set_search_text("MacBook Pro");
        filters.toggle_brand("Apple");
        filters.toggle_brand("ASUS");
        filters.set_price_bounds(Some(20000.0), Some(99999.5));
        filters.toggle_rating_tier(RatingTier::Four);
        filters.toggle_rating_tier(RatingTier::Five);
        filters.set_in_stock_only(true);
        filters
    }

    #[test]
    fn test_default_state_serializes_empty() {
        let query = serialize(&FilterState::default(), SortKey::Default);
        assert!(query.is_empty());
        assert_eq!(query.to_query_string(), "");
    }

    #[test]
    fn test_serialize_only_non_defaults() {
        let mut filters = FilterState::default();
        filters.set_category(Some(Category::Phones));
        let query = serialize(&filters, SortKey::PriceAscending);
        assert_eq!(query.to_query_string(), "category=phones&sort=price-asc");
    }

    #[test]
    fn test_full_query_string() {
        let query = serialize(&full_state(), SortKey::RatingDescending);
        assert_eq!(
            query.to_query_string(),
            "category=laptops&search=MacBook%20Pro&brands=apple%2Casus&minPrice=20000\
             &maxPrice=99999.5&ratings=4%2C5&inStock=1&sort=rating"
        );
    }

    #[test]
    fn test_roundtrip_through_string() {
        let filters = full_state();
        let text = serialize(&filters, SortKey::NameDescending).to_query_string();

        let parsed = QueryState::parse(&text);
        assert_eq!(deserialize(&parsed), filters);
        assert_eq!(parsed.sort_key(), SortKey::NameDescending);
    }

    #[test]
    fn test_roundtrip_special_characters() {
        let mut filters = FilterState::default();
        filters.set_search_text("Навушники & Co + 100%/?");
        let text = serialize(&filters, SortKey::Default).to_query_string();

        assert_eq!(deserialize(&QueryState::parse(&text)), filters);
    }

    #[test]
    fn test_roundtrip_brand_with_comma() {
        let mut filters = FilterState::default();
        filters.toggle_brand("Bang, Olufsen");
        filters.toggle_brand("Apple");
        let text = serialize(&filters, SortKey::Default).to_query_string();

        assert_eq!(text, "brands=apple%2Cbang%252C%2520olufsen");
        let restored = deserialize(&QueryState::parse(&text));
        assert_eq!(restored.brands, filters.brands);
        assert!(restored.brands.contains("bang, olufsen"));
    }

    #[test]
    fn test_roundtrip_brand_with_percent_and_plus() {
        let mut filters = FilterState::default();
        filters.toggle_brand("A+B 100%");
        let text = serialize(&filters, SortKey::Default).to_query_string();
        assert_eq!(deserialize(&QueryState::parse(&text)), filters);
    }

    #[test]
    fn test_roundtrip_custom_categories() {
        for token in ["all", "ALL", "smartphones", "Watches", " Tablets ", "drones"] {
            let mut filters = FilterState::default();
            filters.set_category(Some(Category::Custom(token.to_string())));
            let text = serialize(&filters, SortKey::Default).to_query_string();

            assert_eq!(deserialize(&QueryState::parse(&text)), filters, "category {:?}", token);
        }
    }

    #[test]
    fn test_zero_price_bound_is_kept() {
        let mut filters = FilterState::default();
        filters.set_price_bounds(Some(0.0), None);
        let text = serialize(&filters, SortKey::Default).to_query_string();
        assert_eq!(text, "minPrice=0");
        assert_eq!(deserialize(&QueryState::parse(&text)).min_price, Some(0.0));
    }

    #[test]
    fn test_parse_leading_question_mark_and_plus() {
        let query = QueryState::parse("?search=galaxy+buds&category=headphones");
        assert_eq!(query.search.as_deref(), Some("galaxy buds"));
        assert_eq!(query.category, Some(Category::Headphones));
    }

    #[test]
    fn test_category_aliases() {
        assert_eq!(canonical_category("smartphones"), Some(Category::Phones));
        assert_eq!(canonical_category("watches"), Some(Category::Smartwatches));
        assert_eq!(canonical_category("Phones"), Some(Category::Phones));
        assert_eq!(canonical_category("all"), None);
        assert_eq!(canonical_category(""), None);
        assert_eq!(canonical_category("drones"), Some(Category::Custom("drones".to_string())));
    }

    #[test]
    fn test_alias_serializes_canonical_name() {
        let filters = deserialize(&QueryState::parse("category=watches"));
        let text = serialize(&filters, SortKey::Default).to_query_string();
        assert_eq!(text, "category=smartwatches");
    }

    #[test]
    fn test_malformed_fields_ignored() {
        let query = QueryState::parse(
            "minPrice=cheap&maxPrice=-5&sort=random&ratings=2,4,x&page=3&search=%E0%A4&brands=,,",
        );
        assert!(query.min_price.is_none());
        assert!(query.max_price.is_none());
        assert!(query.sort.is_none());
        assert_eq!(query.ratings, vec![RatingTier::Four]);
        assert!(query.search.is_none());
        assert!(query.brands.is_empty());
    }

    #[test]
    fn test_default_sort_token_is_absent() {
        let query = QueryState::parse("sort=default");
        assert!(query.sort.is_none());
        assert!(query.is_empty());
    }

    #[test]
    fn test_repeated_key_last_wins() {
        let query = QueryState::parse("category=phones&category=laptops");
        assert_eq!(query.category, Some(Category::Laptops));
    }

    #[test]
    fn test_long_sort_names_accepted() {
        assert_eq!(QueryState::parse("sort=price-descending").sort_key(), SortKey::PriceDescending);
    }

    #[test]
    fn test_apply_to_keeps_absent_fields() {
        let mut filters = full_state();
        QueryState::parse("category=phones").apply_to(&mut filters);

        assert_eq!(filters.category, Some(Category::Phones));
        assert_eq!(filters.search_text, "MacBook Pro");
        assert!(filters.in_stock_only);
    }

    #[test]
    fn test_apply_to_single_price_bound() {
        let mut filters = FilterState::default();
        filters.set_price_bounds(Some(100.0), Some(200.0));
        QueryState::parse("maxPrice=500").apply_to(&mut filters);

        assert_eq!(filters.min_price, Some(100.0));
        assert_eq!(filters.max_price, Some(500.0));
    }

    #[test]
    fn test_brands_normalized_and_sorted() {
        let query = QueryState::parse("brands=Sony,%20apple,SONY");
        assert_eq!(query.brands, vec!["apple".to_string(), "sony".to_string()]);
    }

    #[test]
    fn test_in_stock_flags() {
        assert!(QueryState::parse("inStock=1").in_stock);
        assert!(QueryState::parse("inStock=true").in_stock);
        assert!(!QueryState::parse("inStock=0").in_stock);
    }
}
