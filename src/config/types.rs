use serde::Deserialize;

/// Main configuration structure for Chem-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub catalogue: CatalogueConfig,
    pub output: OutputConfig,
}

/// Catalogue location and discovery configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogueConfig {
    /// Base URL of the paginated product listing
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Query suffix appended with the 1-based page index
    /// (e.g. "?page=" yields "<base-url>?page=3")
    #[serde(rename = "page-suffix")]
    pub page_suffix: String,

    /// Anchor class that marks product-detail links on listing pages
    #[serde(rename = "link-class")]
    pub link_class: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the JSON results file
    #[serde(rename = "results-path")]
    pub results_path: String,

    /// Directory that receives generated thumbnail PNGs
    #[serde(rename = "images-dir", default = "default_images_dir")]
    pub images_dir: String,
}

fn default_images_dir() -> String {
    "images".to_string()
}
