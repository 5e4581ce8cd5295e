//! Result ordering.

pub mod collation;

use crate::catalog::{NameResolver, Product};
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

pub use collation::Collator;

/// Ordering rule for the result sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    /// Input order
    #[default]
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "price-asc", alias = "price-ascending")]
    PriceAscending,
    #[serde(rename = "price-desc", alias = "price-descending")]
    PriceDescending,
    #[serde(rename = "name-asc", alias = "name-ascending")]
    NameAscending,
    #[serde(rename = "name-desc", alias = "name-descending")]
    NameDescending,
    #[serde(rename = "rating", alias = "rating-descending")]
    RatingDescending,
}

impl SortKey {
    /// Returns the token used in query strings.
    pub fn token(&self) -> &'static str {
        match self {
            SortKey::Default => "default",
            SortKey::PriceAscending => "price-asc",
            SortKey::PriceDescending => "price-desc",
            SortKey::NameAscending => "name-asc",
            SortKey::NameDescending => "name-desc",
            SortKey::RatingDescending => "rating",
        }
    }

    pub fn all() -> &'static [SortKey] {
        &[
            SortKey::Default,
            SortKey::PriceAscending,
            SortKey::PriceDescending,
            SortKey::NameAscending,
            SortKey::NameDescending,
            SortKey::RatingDescending,
        ]
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" | "" => Ok(SortKey::Default),
            "price-asc" | "price-ascending" => Ok(SortKey::PriceAscending),
            "price-desc" | "price-descending" => Ok(SortKey::PriceDescending),
            "name-asc" | "name-ascending" => Ok(SortKey::NameAscending),
            "name-desc" | "name-descending" => Ok(SortKey::NameDescending),
            "rating" | "rating-desc" | "rating-descending" => Ok(SortKey::RatingDescending),
            _ => Err(CatalogError::UnknownSortKey(s.to_string())),
        }
    }
}

/// Returns `products` ordered by `key`. The sort is stable, so ties keep
/// their input order, and the input slice is left untouched.
pub fn sort<P>(products: &[P], key: SortKey, names: &NameResolver) -> Vec<P>
where
    P: Borrow<Product> + Clone,
{
    let mut sorted = products.to_vec();
    let collator = Collator::for_language(names.active());

    match key {
        SortKey::Default => {}
        SortKey::PriceAscending => {
            sorted.sort_by(|a, b| product(a).price.total_cmp(&product(b).price));
        }
        SortKey::PriceDescending => {
            sorted.sort_by(|a, b| product(b).price.total_cmp(&product(a).price));
        }
        SortKey::NameAscending => sorted.sort_by(|a, b| {
            collator.compare(names.resolve(product(a)), names.resolve(product(b)))
        }),
        SortKey::NameDescending => sorted.sort_by(|a, b| {
            collator.compare(names.resolve(product(b)), names.resolve(product(a)))
        }),
        SortKey::RatingDescending => {
            sorted.sort_by(|a, b| product(b).stars().total_cmp(&product(a).stars()));
        }
    }

    sorted
}

fn product<P: Borrow<Product>>(p: &P) -> &Product {
    p.borrow()
}
