//! storefront-catalog - Browse a storefront product catalog from the command line
//!
//! Loads `<data-dir>/<category>/<id>.json` fixtures and renders one page of
//! filtered, sorted results.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use storefront_catalog::commands::{
    BrowseCommand, BrowseRequest, ListCommand, Listing, Lookup, LookupCommand,
};
use storefront_catalog::config::{Config, OutputFormat};
use storefront_catalog::{Language, RatingTier, SortKey};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "storefront-catalog",
    version,
    about = "Browse a storefront product catalog",
    long_about = "Filter, sort and paginate a multilingual product catalog from JSON fixtures."
)]
struct Cli {
    /// Directory holding <category>/<id>.json product records
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Display language (uk, en, ru)
    #[arg(short, long, global = true)]
    lang: Option<Language>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one page of the catalog
    #[command(alias = "b")]
    Browse {
        /// Query string to start from (e.g. "category=phones&sort=price-asc")
        #[arg(short, long)]
        query: Option<String>,

        /// Category to show ("all" for every category)
        #[arg(long)]
        category: Option<String>,

        /// Brand to include (repeatable or comma-separated)
        #[arg(long = "brand", value_delimiter = ',')]
        brands: Vec<String>,

        /// Minimum price filter
        #[arg(long)]
        min_price: Option<f64>,

        /// Maximum price filter
        #[arg(long)]
        max_price: Option<f64>,

        /// Rating tier to include: 3, 4 or 5 stars & up (repeatable)
        #[arg(long = "rating", value_delimiter = ',')]
        ratings: Vec<RatingTier>,

        /// Only show products in stock
        #[arg(long)]
        in_stock: bool,

        /// Text that product names must contain
        #[arg(short, long)]
        search: Option<String>,

        /// Sort order (default, price-asc, price-desc, name-asc, name-desc, rating)
        #[arg(long)]
        sort: Option<SortKey>,

        /// Page to show
        #[arg(short, long)]
        page: Option<usize>,
    },

    /// Suggest products for partially typed search text
    Suggest {
        /// Text to complete (at least 2 characters)
        text: String,
    },

    /// Show products similar to a given product
    Related {
        /// Product ID
        id: String,
    },

    /// List categories with product counts
    Categories,

    /// List brands with product counts
    Brands,

    /// List supported languages
    Languages,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(lang) = cli.lang {
        config.language = lang;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }

    match cli.command {
        Commands::Browse {
            query,
            category,
            brands,
            min_price,
            max_price,
            ratings,
            in_stock,
            search,
            sort,
            page,
        } => {
            let request = BrowseRequest {
                query,
                category,
                brands,
                min_price,
                max_price,
                ratings,
                in_stock,
                search,
                sort,
                page,
            };

            let cmd = BrowseCommand::new(config);
            let output = cmd.execute(request).await?;
            println!("{}", output);
        }

        Commands::Suggest { text } => {
            let output = LookupCommand::new(config).execute(Lookup::Suggest(text)).await?;
            println!("{}", output);
        }

        Commands::Related { id } => {
            let output = LookupCommand::new(config).execute(Lookup::Related(id)).await?;
            println!("{}", output);
        }

        Commands::Categories => {
            let output = ListCommand::new(config).execute(Listing::Categories).await?;
            println!("{}", output);
        }

        Commands::Brands => {
            let output = ListCommand::new(config).execute(Listing::Brands).await?;
            println!("{}", output);
        }

        Commands::Languages => {
            println!("Supported languages:\n");
            println!("{:<6} {:<12}", "Code", "Name");
            println!("{:-<6} {:-<12}", "", "");

            for language in Language::all() {
                let marker = if *language == config.language { " *" } else { "" };
                println!("{:<6} {:<12}{}", language.code(), language.native_name(), marker);
            }
        }
    }

    Ok(())
}
