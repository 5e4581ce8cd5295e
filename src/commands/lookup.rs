//! Search suggestions and related-product lookups.

use crate::catalog::{CatalogStore, FixtureSource, NameResolver, ProductSource};
use crate::config::{Config, OutputFormat};
use crate::controller::{CatalogController, CatalogSettings};
use crate::format::Formatter;
use anyhow::{bail, Context, Result};
use tracing::info;

/// What to look up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Live suggestions for partially typed search text
    Suggest(String),
    /// Products similar to the one with this id
    Related(String),
}

/// Loads the catalog and answers a single lookup.
pub struct LookupCommand {
    config: Config,
}

impl LookupCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn execute(&self, lookup: Lookup) -> Result<String> {
        let source = FixtureSource::new(&self.config.data_dir);
        self.execute_with_source(&source, lookup).await
    }

    /// Executes with a provided product source (for testing).
    pub async fn execute_with_source(
        &self,
        source: &impl ProductSource,
        lookup: Lookup,
    ) -> Result<String> {
        let products = source.load_products().await.context("Failed to load catalog")?;
        let controller = CatalogController::new(
            CatalogStore::with_products(products),
            CatalogSettings::from(&self.config),
            self.config.language,
        );

        let names = NameResolver::new(
            [self.config.language, self.config.fallback_language],
            self.config.placeholder_name.clone(),
        );
        let formatter = Formatter::new(self.config.format, names, self.config.currency.clone());

        match lookup {
            Lookup::Suggest(text) => {
                let suggestions = controller.suggest(&text);
                info!("{} suggestions for '{}'", suggestions.products.len(), text.trim());

                let mut output = formatter.format_products(&suggestions.products);
                if suggestions.has_more && self.config.format == OutputFormat::Table {
                    output.push_str(&format!(
                        "\n\nMore results: browse --search \"{}\"",
                        text.trim()
                    ));
                }
                Ok(output)
            }
            Lookup::Related(id) => {
                if controller.store().get(&id).is_none() {
                    bail!("Product '{}' not found", id);
                }
                let related = controller.related(&id);
                info!("{} products related to '{}'", related.len(), id);
                Ok(formatter.format_products(&related))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, Language, Product};
    use async_trait::async_trait;

    struct MockSource(Vec<Product>);

    #[async_trait]
    impl ProductSource for MockSource {
        async fn load_products(&self) -> Result<Vec<Product>> {
            Ok(self.0.clone())
        }
    }

    fn make_catalog() -> MockSource {
        let mut products: Vec<Product> = (0..10)
            .map(|i| {
                Product::new(format!("case-{}", i), Category::Accessories, "Spigen", 499.0)
                    .with_name(Language::Uk, format!("Чохол {}", i))
            })
            .collect();
        products.push(
            Product::new("pixel-9", Category::Phones, "Google", 32999.0)
                .with_name(Language::Uk, "Google Pixel 9"),
        );
        products.push(
            Product::new("galaxy-s24", Category::Phones, "Samsung", 37999.0)
                .with_name(Language::Uk, "Samsung Galaxy S24"),
        );
        MockSource(products)
    }

    fn command(format: OutputFormat) -> LookupCommand {
        LookupCommand::new(Config { format, ..Config::default() })
    }

    #[tokio::test]
    async fn test_suggest_limits_and_hints() {
        let output = command(OutputFormat::Table)
            .execute_with_source(&make_catalog(), Lookup::Suggest("чохол".to_string()))
            .await
            .unwrap();

        assert!(output.contains("case-7"));
        assert!(!output.contains("case-8"));
        assert!(output.ends_with("More results: browse --search \"чохол\""));
    }

    #[tokio::test]
    async fn test_suggest_short_text() {
        let output = command(OutputFormat::Json)
            .execute_with_source(&make_catalog(), Lookup::Suggest("ч".to_string()))
            .await
            .unwrap();
        assert_eq!(output, "[]");
    }

    #[tokio::test]
    async fn test_related_products() {
        let output = command(OutputFormat::Csv)
            .execute_with_source(&make_catalog(), Lookup::Related("pixel-9".to_string()))
            .await
            .unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("galaxy-s24,"));
    }

    #[tokio::test]
    async fn test_related_unknown_product() {
        let err = command(OutputFormat::Table)
            .execute_with_source(&make_catalog(), Lookup::Related("nope".to_string()))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
