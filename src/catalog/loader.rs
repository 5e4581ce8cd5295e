//! Bulk loading of product records from the storefront's JSON fixtures.
//!
//! Fixtures are laid out as `<root>/<category>/<id>.json`. The directory name
//! is authoritative for the product's category.

use crate::catalog::models::{Category, Product};
use crate::error::CatalogError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Supplies the full product collection before the first render.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Loads every available product. Records that fail individually are
    /// left out rather than failing the whole load.
    async fn load_products(&self) -> Result<Vec<Product>>;
}

/// Reads product fixtures from a directory tree.
pub struct FixtureSource {
    root: PathBuf,
}

impl FixtureSource {
    /// Creates a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lists category directories, built-in categories first in storefront
    /// order, then any others alphabetically.
    async fn category_dirs(&self) -> Result<Vec<(Category, PathBuf)>> {
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .with_context(|| format!("Failed to read data directory: {}", self.root.display()))?;

        let mut dirs = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            dirs.push((Category::from(name.as_str()), entry.path()));
        }

        dirs.sort_by(|(a, _), (b, _)| match (a.position(), b.position()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.as_str().cmp(b.as_str()),
        });

        Ok(dirs)
    }

    /// Lists `.json` files in one category directory, sorted by file name.
    async fn record_files(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = tokio::fs::read_dir(dir)
            .await
            .with_context(|| format!("Failed to read category directory: {}", dir.display()))?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

#[async_trait]
impl ProductSource for FixtureSource {
    async fn load_products(&self) -> Result<Vec<Product>> {
        debug!("Loading product fixtures from: {}", self.root.display());

        let mut handles = Vec::new();
        for (category, dir) in self.category_dirs().await? {
            for path in Self::record_files(&dir).await? {
                let category = category.clone();
                handles.push(tokio::spawn(async move { read_record(path, category).await }));
            }
        }

        let requested = handles.len();
        let mut products = Vec::with_capacity(requested);

        // Awaiting in spawn order keeps the directory order stable.
        for handle in handles {
            match handle.await {
                Ok(Ok(product)) => products.push(product),
                Ok(Err(err)) => warn!("Skipping product record: {}", err),
                Err(err) => warn!("Product load task failed: {}", err),
            }
        }

        info!("Loaded {} of {} product records", products.len(), requested);
        Ok(products)
    }
}

async fn read_record(path: PathBuf, category: Category) -> Result<Product, CatalogError> {
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(source) => return Err(CatalogError::ReadRecord { path, source }),
    };
    parse_record(&bytes, category, &path)
}

/// Parses one fixture record, overriding its category with `category`.
pub fn parse_record(
    bytes: &[u8],
    category: Category,
    path: &Path,
) -> Result<Product, CatalogError> {
    let parse_err = |source| CatalogError::ParseRecord { path: path.to_path_buf(), source };

    let mut value: serde_json::Value = serde_json::from_slice(bytes).map_err(parse_err)?;
    if let Some(object) = value.as_object_mut() {
        object.insert("category".to_string(), serde_json::Value::String(category.into()));
    }
    serde_json::from_value(value).map_err(parse_err)
}
