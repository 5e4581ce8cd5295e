//! Browse command implementation.

use crate::catalog::{CatalogStore, FixtureSource, NameResolver, ProductSource};
use crate::config::Config;
use crate::controller::{CatalogController, CatalogSettings};
use crate::filters::RatingTier;
use crate::format::Formatter;
use crate::query;
use crate::sort::SortKey;
use anyhow::{bail, Context, Result};
use tracing::{debug, info};

/// Selections requested on the command line.
///
/// A `query` string is applied first; the remaining fields are layered on
/// top of it.
#[derive(Debug, Clone, Default)]
pub struct BrowseRequest {
    pub query: Option<String>,
    pub category: Option<String>,
    pub brands: Vec<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub ratings: Vec<RatingTier>,
    pub in_stock: bool,
    pub search: Option<String>,
    pub sort: Option<SortKey>,
    pub page: Option<usize>,
}

/// Loads the catalog and renders one page of it.
pub struct BrowseCommand {
    config: Config,
}

impl BrowseCommand {
    /// Creates a new browse command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Executes against the configured data directory and returns formatted output.
    pub async fn execute(&self, request: BrowseRequest) -> Result<String> {
        let source = FixtureSource::new(&self.config.data_dir);
        self.execute_with_source(&source, request).await
    }

    /// Executes with a provided product source (for testing).
    pub async fn execute_with_source(
        &self,
        source: &impl ProductSource,
        request: BrowseRequest,
    ) -> Result<String> {
        let controller = self.browse(source, &request).await?;

        let names = NameResolver::new(
            [self.config.language, self.config.fallback_language],
            self.config.placeholder_name.clone(),
        );
        let formatter = Formatter::new(self.config.format, names, self.config.currency.clone());
        Ok(formatter.format_view(controller.view()))
    }

    /// Loads the catalog and applies the request to a fresh controller.
    pub async fn browse(
        &self,
        source: &impl ProductSource,
        request: &BrowseRequest,
    ) -> Result<CatalogController> {
        let products = source.load_products().await.context("Failed to load catalog")?;
        let store = CatalogStore::with_products(products);

        let mut controller = CatalogController::new(
            store,
            CatalogSettings::from(&self.config),
            self.config.language,
        );

        if let Some(query) = &request.query {
            debug!("Seeding selection from query: {}", query);
            controller.apply_query(query);
        }

        if let Some(category) = &request.category {
            controller.set_category(query::canonical_category(category));
        }

        for brand in &request.brands {
            let key = brand.trim().to_lowercase();
            if !key.is_empty() && !controller.filters().brands.contains(&key) {
                controller.toggle_brand(&key);
            }
        }

        if request.min_price.is_some() || request.max_price.is_some() {
            let current = controller.filters();
            let min = request.min_price.or(current.min_price);
            let max = request.max_price.or(current.max_price);
            controller.set_price_bounds(min, max);
        }

        for tier in &request.ratings {
            if !controller.filters().ratings.contains(tier) {
                controller.toggle_rating_tier(*tier);
            }
        }

        if request.in_stock {
            controller.set_in_stock_only(true);
        }

        if let Some(search) = &request.search {
            controller.set_search_text(search);
        }

        if let Some(sort) = request.sort {
            controller.set_sort(sort);
        }

        if let Some(page) = request.page {
            if !controller.go_to_page(page) {
                bail!(
                    "Page {} is out of range (1-{})",
                    page,
                    controller.view().total_pages.max(1)
                );
            }
        }

        let view = controller.view();
        info!(
            "Showing page {} of {} ({} matching products)",
            view.current_page, view.total_pages, view.total_count
        );

        Ok(controller)
    }
}
