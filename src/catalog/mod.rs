//! Catalog data: product models, languages, the product store and loaders.

pub mod languages;
pub mod loader;
pub mod models;
pub mod store;

pub use languages::{Language, NameResolver};
pub use loader::{FixtureSource, ProductSource};
pub use models::{Category, Product};
pub use store::{CatalogStore, Suggestions, MAX_RELATED, MAX_SUGGESTIONS, MIN_SUGGEST_CHARS};
