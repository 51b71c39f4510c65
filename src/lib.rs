//! Chem-Harvest: a chemical catalogue scraper
//!
//! This crate crawls a paginated product catalogue, extracts structured
//! fields from each product page, enriches records with a local thumbnail
//! and MSDS document metadata, validates them against the canonical product
//! schema, and writes the validated collection to a single JSON file.

pub mod config;
pub mod crawler;
pub mod output;
pub mod record;

use thiserror::Error;

/// Main error type for Chem-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised while extracting fields from a product page
///
/// Only the structural lookups are fatal for an item; every label-driven
/// field degrades to an empty value instead of erroring.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("product content region not found on {url}")]
    MissingContent { url: String },

    #[error("product title not found on {url}")]
    MissingTitle { url: String },
}

/// Result type alias for Chem-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_harvest, Coordinator, ItemOutcome};
pub use record::{Product, RawExtraction};
