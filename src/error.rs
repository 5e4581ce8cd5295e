//! Error types for the catalog library.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown language '{0}'. Valid languages: uk, en, ru")]
    UnknownLanguage(String),

    #[error(
        "unknown sort key '{0}'. Use: default, price-asc, price-desc, name-asc, name-desc, rating"
    )]
    UnknownSortKey(String),

    #[error("invalid rating tier '{0}'. Valid tiers: 3, 4, 5")]
    InvalidRatingTier(String),

    #[error("failed to read product record {path}: {source}")]
    ReadRecord {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed product record {path}: {source}")]
    ParseRecord {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_valid_values() {
        let err = CatalogError::UnknownLanguage("de".to_string());
        assert_eq!(err.to_string(), "unknown language 'de'. Valid languages: uk, en, ru");

        let err = CatalogError::UnknownSortKey("cheapest".to_string());
        assert!(err.to_string().contains("price-asc"));

        let err = CatalogError::InvalidRatingTier("7".to_string());
        assert!(err.to_string().contains("3, 4, 5"));
    }

    #[test]
    fn test_parse_record_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CatalogError::ParseRecord { path: PathBuf::from("phones/x.json"), source };
        assert!(err.to_string().contains("phones/x.json"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
