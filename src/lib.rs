//! storefront-catalog - Catalog query engine for a multilingual storefront
//!
//! Filters, sorts and paginates an in-memory product catalog, keeping the
//! selection mirrored in a shareable query string.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod filters;
pub mod format;
pub mod pagination;
pub mod query;
pub mod sort;

pub use catalog::{CatalogStore, Category, Language, NameResolver, Product, Suggestions};
pub use config::Config;
pub use controller::{CatalogController, CatalogSettings, CatalogView, QueryHistory};
pub use error::CatalogError;
pub use filters::{FilterState, RatingTier};
pub use query::QueryState;
pub use sort::SortKey;
