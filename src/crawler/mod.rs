//! Crawler module for catalogue discovery and product scraping
//!
//! This module contains the scraping pipeline end to end:
//! - Paginated product-URL discovery
//! - HTTP fetching and HTML access
//! - Positional field extraction
//! - Thumbnail and MSDS enrichment
//! - Bounded-concurrency crawl coordination

mod coordinator;
mod enrich;
mod extract;
mod fetcher;
mod lister;
mod parser;

pub use coordinator::{Coordinator, ItemOutcome};
pub use enrich::{
    extract_pdf_info, is_valid_url, msds_info_from_document, process_image, render_thumbnail,
    thumbnail_path, un_number_from_text,
};
pub use extract::{search_after, search_between, DataExtractor, ProductDataExtractor};
pub use fetcher::{build_http_client, fetch_bytes, fetch_html, fetch_page, PageResponse};
pub use lister::discover;
pub use parser::{extract_product_links, parse_document};

use crate::config::Config;
use crate::output::write_results;
use crate::record::validate_records;
use crate::HarvestError;
use std::path::Path;

/// Runs the complete harvest: discover, crawl, validate, persist
///
/// Discovery failures and per-item failures degrade as the pipeline
/// specifies; only a persistence failure propagates out of this function.
///
/// # Arguments
///
/// * `config` - The loaded configuration
/// * `crawlers` - Maximum number of concurrent item pipelines
///
/// # Returns
///
/// * `Ok(())` - Harvest finished (possibly with zero records)
/// * `Err(HarvestError)` - The result file could not be written
pub async fn run_harvest(config: Config, crawlers: usize) -> Result<(), HarvestError> {
    let client = build_http_client()?;

    let discovered = match discover(&client, &config.catalogue).await {
        Ok(urls) => urls,
        Err(e) => {
            tracing::error!("Error fetching product URLs: {}", e);
            Vec::new()
        }
    };

    let product_urls: Vec<String> = discovered
        .into_iter()
        .filter(|url| {
            if is_valid_url(url) {
                true
            } else {
                tracing::warn!("Skipping malformed product URL '{}'", url);
                false
            }
        })
        .collect();

    if product_urls.is_empty() {
        tracing::info!("No product URLs found, nothing to do");
        return Ok(());
    }

    tracing::info!(
        "Discovered {} product URLs, crawling with {} workers",
        product_urls.len(),
        crawlers
    );

    let coordinator = Coordinator::new(client, config.output.images_dir.clone());
    let outcomes = coordinator.crawl_products(&product_urls, crawlers).await;

    let crawled = outcomes.len();
    let products = validate_records(outcomes);
    tracing::info!(
        "Validated {} of {} crawled records",
        products.len(),
        crawled
    );

    write_results(Path::new(&config.output.results_path), &products)?;

    Ok(())
}
