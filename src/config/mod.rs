//! Configuration module for Chem-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use chem_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Scraping catalogue at: {}", config.catalogue.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CatalogueConfig, Config, OutputConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
