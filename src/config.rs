//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::catalog::Language;
use crate::pagination::{DEFAULT_MAX_VISIBLE, DEFAULT_PAGE_SIZE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding `<category>/<id>.json` product records
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Active storefront language
    #[serde(default)]
    pub language: Language,

    /// Language consulted when a product has no name in the active one
    #[serde(default)]
    pub fallback_language: Language,

    /// Name shown for products with no name in any fallback language
    #[serde(default)]
    pub placeholder_name: String,

    /// Products per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Consecutive page numbers shown in navigation
    #[serde(default = "default_max_visible_pages")]
    pub max_visible_pages: usize,

    /// Currency symbol appended to prices
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data/products")
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_max_visible_pages() -> usize {
    DEFAULT_MAX_VISIBLE
}

fn default_currency() -> String {
    "₴".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            language: Language::DEFAULT,
            fallback_language: Language::DEFAULT,
            placeholder_name: String::new(),
            page_size: default_page_size(),
            max_visible_pages: default_max_visible_pages(),
            currency: default_currency(),
            format: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("storefront-catalog").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides. Unparseable values are ignored.
    pub fn with_env(mut self) -> Self {
        if let Ok(dir) = std::env::var("STOREFRONT_DATA_DIR") {
            if !dir.trim().is_empty() {
                self.data_dir = PathBuf::from(dir);
            }
        }

        if let Ok(lang) = std::env::var("STOREFRONT_LANG") {
            match lang.parse() {
                Ok(l) => self.language = l,
                Err(e) => debug!("Ignoring STOREFRONT_LANG: {}", e),
            }
        }

        if let Ok(size) = std::env::var("STOREFRONT_PAGE_SIZE") {
            match size.parse::<usize>() {
                Ok(s) if s > 0 => self.page_size = s,
                _ => debug!("Ignoring STOREFRONT_PAGE_SIZE: {}", size),
            }
        }

        self
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
