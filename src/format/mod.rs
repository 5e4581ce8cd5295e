//! Output formatting for catalog views (table, JSON, markdown, CSV).

use crate::catalog::{NameResolver, Product};
use crate::config::OutputFormat;
use crate::controller::CatalogView;
use crate::pagination::PageItem;
use std::sync::Arc;

const NAME_WIDTH: usize = 48;

/// Formats catalog views for output.
pub struct Formatter {
    format: OutputFormat,
    names: NameResolver,
    currency: String,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat, names: NameResolver, currency: impl Into<String>) -> Self {
        Self { format, names, currency: currency.into() }
    }

    /// Formats the visible page of a view together with its navigation.
    pub fn format_view(&self, view: &CatalogView) -> String {
        if self.format == OutputFormat::Json {
            return serde_json::to_string_pretty(view).unwrap_or_else(|_| "{}".to_string());
        }

        if view.visible_products.is_empty() {
            return match self.format {
                OutputFormat::Csv => self.csv_header(),
                _ => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Markdown => self.markdown_view(view),
            OutputFormat::Csv => self.csv_rows(&view.visible_products),
            _ => self.table_view(view),
        }
    }

    /// Formats a bare product list, such as search suggestions or related products.
    pub fn format_products(&self, products: &[Arc<Product>]) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(products).unwrap_or_else(|_| "[]".to_string())
            }
            OutputFormat::Csv => self.csv_rows(products),
            _ if products.is_empty() => "No products found.".to_string(),
            OutputFormat::Markdown => self.markdown_rows(products).join("\n"),
            OutputFormat::Table => self.table_rows(products).join("\n"),
        }
    }

    /// Renders the page window, marking the current page: `1 … [5] 6 7 … 10`.
    pub fn page_window(view: &CatalogView) -> String {
        view.page_window
            .iter()
            .map(|item| match item {
                PageItem::Page(p) if *p == view.current_page => format!("[{}]", p),
                PageItem::Page(p) => p.to_string(),
                PageItem::Ellipsis => "…".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn price(&self, product: &Product) -> String {
        format!("{:.2} {}", product.price, self.currency)
    }

    fn rating(product: &Product) -> String {
        match product.rating {
            Some(r) => format!("{:.1}", r),
            None => "N/A".to_string(),
        }
    }

    fn truncate(name: &str, width: usize) -> String {
        if name.chars().count() > width {
            let head: String = name.chars().take(width - 3).collect();
            format!("{}...", head)
        } else {
            name.to_string()
        }
    }

    // Table formatting

    fn table_rows(&self, products: &[Arc<Product>]) -> Vec<String> {
        let id_width = 14;
        let price_width = 14;
        let rating_width = 6;
        let stock_width = 5;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<id_width$}  {:<price_width$}  {:<rating_width$}  {:<stock_width$}  {}",
            "ID", "Price", "Rating", "Stock", "Name"
        ));
        lines.push(format!(
            "{:-<id_width$}  {:-<price_width$}  {:-<rating_width$}  {:-<stock_width$}  {:-<NAME_WIDTH$}",
            "", "", "", "", ""
        ));

        for product in products {
            let stock = if product.in_stock { "Yes" } else { "No" };
            lines.push(format!(
                "{:<id_width$}  {:>price_width$}  {:>rating_width$}  {:<stock_width$}  {}",
                product.id,
                self.price(product),
                Self::rating(product),
                stock,
                Self::truncate(self.names.resolve(product), NAME_WIDTH)
            ));
        }

        lines
    }

    fn table_view(&self, view: &CatalogView) -> String {
        let mut lines = self.table_rows(&view.visible_products);

        lines.push(String::new());
        lines.push(format!(
            "Page {} of {} ({} products)",
            view.current_page, view.total_pages, view.total_count
        ));
        lines.push(format!("Pages: {}", Self::page_window(view)));
        if !view.query.is_empty() {
            lines.push(format!("Query: ?{}", view.query));
        }

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_rows(&self, products: &[Arc<Product>]) -> Vec<String> {
        let mut lines = Vec::new();

        lines.push("| ID | Price | Rating | Stock | Name |".to_string());
        lines.push("|----|-------|--------|-------|------|".to_string());

        for product in products {
            let stock = if product.in_stock { "✓" } else { "" };
            let name = Self::truncate(self.names.resolve(product), 40).replace('|', "\\|");
            lines.push(format!(
                "| {} | {} | {} | {} | {} |",
                product.id,
                self.price(product),
                Self::rating(product),
                stock,
                name
            ));
        }

        lines
    }

    fn markdown_view(&self, view: &CatalogView) -> String {
        let mut lines = self.markdown_rows(&view.visible_products);

        lines.push(String::new());
        lines.push(format!(
            "*Page {} of {}, {} products*",
            view.current_page, view.total_pages, view.total_count
        ));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "id,name,brand,category,price,old_price,rating,reviews,in_stock".to_string()
    }

    fn csv_rows(&self, products: &[Arc<Product>]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for product in products {
            let old_price = product.old_price.map(|p| p.to_string()).unwrap_or_default();
            let rating = product.rating.map(|r| r.to_string()).unwrap_or_default();

            lines.push(format!(
                "{},{},{},{},{},{},{},{},{}",
                Self::csv_escape(&product.id),
                Self::csv_escape(self.names.resolve(product)),
                Self::csv_escape(&product.brand),
                Self::csv_escape(product.category.as_str()),
                product.price,
                old_price,
                rating,
                product.reviews,
                product.in_stock
            ));
        }

        lines.join("\n")
    }

    pub(crate) fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}
