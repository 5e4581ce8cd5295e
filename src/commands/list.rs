//! Catalog facet listings (categories and brands).

use crate::catalog::{CatalogStore, Category, FixtureSource, ProductSource};
use crate::config::{Config, OutputFormat};
use crate::format::Formatter;
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

/// Which facet to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Categories,
    Brands,
}

impl Listing {
    fn label(&self) -> &'static str {
        match self {
            Listing::Categories => "category",
            Listing::Brands => "brand",
        }
    }
}

/// One facet value with the number of products carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetCount {
    pub value: String,
    pub count: usize,
}

/// Lists catalog categories or brands with product counts.
pub struct ListCommand {
    config: Config,
}

impl ListCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn execute(&self, listing: Listing) -> Result<String> {
        let source = FixtureSource::new(&self.config.data_dir);
        self.execute_with_source(&source, listing).await
    }

    /// Executes with a provided product source (for testing).
    pub async fn execute_with_source(
        &self,
        source: &impl ProductSource,
        listing: Listing,
    ) -> Result<String> {
        let products = source.load_products().await.context("Failed to load catalog")?;
        let store = CatalogStore::with_products(products);

        let facets = match listing {
            Listing::Categories => category_counts(&store),
            Listing::Brands => brand_counts(&store),
        };
        info!("Listing {} {} values", facets.len(), listing.label());

        Ok(self.render(listing, &facets))
    }

    fn render(&self, listing: Listing, facets: &[FacetCount]) -> String {
        let label = listing.label();
        match self.config.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(facets).unwrap_or_else(|_| "[]".to_string())
            }
            OutputFormat::Csv => {
                let rows = facets
                    .iter()
                    .map(|f| format!("{},{}", Formatter::csv_escape(&f.value), f.count));
                std::iter::once(format!("{},count", label)).chain(rows).collect::<Vec<_>>().join("\n")
            }
            OutputFormat::Markdown => {
                let mut lines = vec![format!("| {} | Count |", label), "|---|---|".to_string()];
                lines.extend(facets.iter().map(|f| format!("| {} | {} |", f.value, f.count)));
                lines.join("\n")
            }
            OutputFormat::Table => {
                let mut lines = vec![
                    format!("{:<20} {:>6}", label, "count"),
                    format!("{:-<20} {:->6}", "", ""),
                ];
                lines.extend(facets.iter().map(|f| format!("{:<20} {:>6}", f.value, f.count)));
                lines.join("\n")
            }
        }
    }
}

/// Counts products per category. Built-in categories are always listed, in
/// storefront order, followed by any custom ones found in the data.
pub fn category_counts(store: &CatalogStore) -> Vec<FacetCount> {
    let mut categories: Vec<Category> = Category::all().to_vec();
    let mut custom: Vec<Category> = store
        .all()
        .iter()
        .map(|p| p.category.clone())
        .filter(|c| c.position().is_none())
        .collect();
    custom.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    custom.dedup();
    categories.extend(custom);

    categories
        .into_iter()
        .map(|category| FacetCount {
            count: store.all().iter().filter(|p| p.category == category).count(),
            value: category.to_string(),
        })
        .collect()
}

/// Counts products per brand, case-insensitively, in first-seen order.
pub fn brand_counts(store: &CatalogStore) -> Vec<FacetCount> {
    store
        .brands()
        .into_iter()
        .map(|brand| {
            let key = brand.to_lowercase();
            FacetCount {
                count: store.all().iter().filter(|p| p.brand_key() == key).count(),
                value: brand,
            }
        })
        .collect()
}
