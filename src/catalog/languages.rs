//! Storefront display languages and localized name resolution.

use crate::catalog::models::Product;
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages the storefront ships translations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Uk,
    En,
    Ru,
}

impl Language {
    /// Language used when a product has no name in the active one.
    pub const DEFAULT: Language = Language::Uk;

    /// Returns the ISO 639-1 code used as the key in product name maps.
    pub fn code(&self) -> &'static str {
        match self {
            Language::Uk => "uk",
            Language::En => "en",
            Language::Ru => "ru",
        }
    }

    /// Returns the language's own name for itself.
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::Uk => "Українська",
            Language::En => "English",
            Language::Ru => "Русский",
        }
    }

    /// Returns whether names in this language are primarily written in Cyrillic.
    pub fn is_cyrillic(&self) -> bool {
        matches!(self, Language::Uk | Language::Ru)
    }

    /// Returns all supported languages.
    pub fn all() -> &'static [Language] {
        &[Language::Uk, Language::En, Language::Ru]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "uk" | "ua" | "uk-ua" | "ukrainian" => Ok(Language::Uk),
            "en" | "en-us" | "en-gb" | "english" => Ok(Language::En),
            "ru" | "ru-ru" | "russian" => Ok(Language::Ru),
            _ => Err(CatalogError::UnknownLanguage(s.to_string())),
        }
    }
}

/// Resolves a product's display name through an ordered list of languages,
/// ending in a placeholder when none of them has a non-empty name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameResolver {
    chain: Vec<Language>,
    placeholder: String,
}

impl NameResolver {
    /// Creates a resolver from an explicit fallback chain.
    ///
    /// The first entry is the active language. Repeated entries are dropped.
    pub fn new(chain: impl IntoIterator<Item = Language>, placeholder: impl Into<String>) -> Self {
        let mut ordered: Vec<Language> = Vec::new();
        for lang in chain {
            if !ordered.contains(&lang) {
                ordered.push(lang);
            }
        }
        if ordered.is_empty() {
            ordered.push(Language::DEFAULT);
        }
        Self { chain: ordered, placeholder: placeholder.into() }
    }

    /// Active language, then the storefront default, then an empty placeholder.
    pub fn for_language(active: Language) -> Self {
        Self::new([active, Language::DEFAULT], "")
    }

    /// Returns the language consulted first.
    pub fn active(&self) -> Language {
        self.chain[0]
    }

    /// Returns the full fallback chain.
    pub fn chain(&self) -> &[Language] {
        &self.chain
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Returns the first non-empty name along the chain.
    pub fn resolve<'a>(&'a self, product: &'a Product) -> &'a str {
        self.chain
            .iter()
            .find_map(|lang| product.name_in(*lang).filter(|name| !name.is_empty()))
            .unwrap_or(&self.placeholder)
    }
}

impl Default for NameResolver {
    fn default() -> Self {
        Self::for_language(Language::DEFAULT)
    }
}
