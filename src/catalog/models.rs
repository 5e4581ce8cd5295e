//! Data models for catalog products and categories.

use crate::catalog::languages::Language;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Product category. The storefront ships a fixed set; any other token is
/// kept verbatim so catalogs with newer categories still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Phones,
    Laptops,
    Headphones,
    Smartwatches,
    Accessories,
    Custom(String),
}

impl Category {
    /// Returns the internal category token.
    pub fn as_str(&self) -> &str {
        match self {
            Category::Phones => "phones",
            Category::Laptops => "laptops",
            Category::Headphones => "headphones",
            Category::Smartwatches => "smartwatches",
            Category::Accessories => "accessories",
            Category::Custom(token) => token,
        }
    }

    /// Returns the built-in categories in storefront order.
    pub fn all() -> &'static [Category] {
        &[
            Category::Phones,
            Category::Laptops,
            Category::Headphones,
            Category::Smartwatches,
            Category::Accessories,
        ]
    }

    /// Returns the position of a built-in category in storefront order.
    pub fn position(&self) -> Option<usize> {
        Self::all().iter().position(|c| c == self)
    }
}

impl From<&str> for Category {
    fn from(token: &str) -> Self {
        let token = token.trim().to_lowercase();
        match token.as_str() {
            "phones" => Category::Phones,
            "laptops" => Category::Laptops,
            "headphones" => Category::Headphones,
            "smartwatches" => Category::Smartwatches,
            "accessories" => Category::Accessories,
            _ => Category::Custom(token),
        }
    }
}

impl From<String> for Category {
    fn from(token: String) -> Self {
        Category::from(token.as_str())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A catalog product as stored in the storefront's JSON fixtures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier
    pub id: String,
    pub category: Category,
    #[serde(default)]
    pub brand: String,
    /// Current price
    pub price: f64,
    /// Price before discount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<f64>,
    /// Average star rating (0.0 - 5.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Number of reviews
    #[serde(default)]
    pub reviews: u32,
    #[serde(default)]
    pub in_stock: bool,
    /// Display name keyed by language code
    #[serde(default)]
    pub name: BTreeMap<String, String>,
    /// Advertised discount badge in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u8>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_hot: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl Product {
    /// Creates an in-stock product with no name, rating or badges.
    pub fn new(
        id: impl Into<String>,
        category: Category,
        brand: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            brand: brand.into(),
            price,
            old_price: None,
            rating: None,
            reviews: 0,
            in_stock: true,
            name: BTreeMap::new(),
            discount: None,
            is_new: false,
            is_hot: false,
            images: Vec::new(),
        }
    }

    /// Sets the display name for one language.
    pub fn with_name(mut self, lang: Language, name: impl Into<String>) -> Self {
        self.name.insert(lang.code().to_string(), name.into());
        self
    }

    pub fn with_rating(mut self, rating: f64, reviews: u32) -> Self {
        self.rating = Some(rating.clamp(0.0, 5.0));
        self.reviews = reviews;
        self
    }

    pub fn with_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    /// Returns the display name in exactly this language, if present.
    pub fn name_in(&self, lang: Language) -> Option<&str> {
        self.name.get(lang.code()).map(String::as_str)
    }

    /// Returns the star rating, treating a missing rating as zero.
    pub fn stars(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    /// Returns the lower-cased brand used for brand filtering.
    pub fn brand_key(&self) -> String {
        self.brand.to_lowercase()
    }

    /// Returns discount percentage derived from the old price.
    pub fn discount_percent(&self) -> Option<u8> {
        self.old_price.filter(|orig| *orig > self.price && *orig > 0.0).map(|orig| {
            let discount = ((orig - self.price) / orig * 100.0).round() as u8;
            discount.min(99)
        })
    }
}
