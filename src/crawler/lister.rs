//! Pagination-driven product URL discovery
//!
//! Listing pages are numbered from 1. Each page is fetched once and its
//! product links appended in on-page order; the walk stops at the first
//! page that answers with a non-success status or yields no links. There
//! is no page cap and no deduplication across pages.

use crate::config::CatalogueConfig;
use crate::crawler::fetcher::fetch_page;
use crate::crawler::parser::{extract_product_links, parse_document};
use reqwest::Client;

/// Walks the paginated listing and collects product-detail URLs
///
/// A transport-level failure on any page propagates as an error; the run
/// entry point logs it and proceeds as if nothing had been discovered.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `catalogue` - Catalogue location and link-discovery settings
///
/// # Returns
///
/// The product URLs from every page before the terminating one,
/// concatenated in page order.
pub async fn discover(
    client: &Client,
    catalogue: &CatalogueConfig,
) -> Result<Vec<String>, reqwest::Error> {
    let mut product_urls = Vec::new();
    let mut page: u32 = 1;

    loop {
        let url = format!("{}{}{}", catalogue.base_url, catalogue.page_suffix, page);
        let response = fetch_page(client, &url).await?;

        if !response.status.is_success() {
            tracing::debug!(
                "Listing page {} answered {}, stopping discovery",
                page,
                response.status
            );
            break;
        }

        let links = {
            let doc = parse_document(&response.body);
            extract_product_links(&doc, &catalogue.link_class)
        };

        if links.is_empty() {
            tracing::debug!("Listing page {} has no product links, stopping discovery", page);
            break;
        }

        tracing::info!("Fetched page {} from {}: {} links", page, url, links.len());
        product_urls.extend(links);
        page += 1;
    }

    Ok(product_urls)
}

// Termination behavior is pinned by the wiremock integration tests:
// stopping on an empty page, stopping on a non-success status, and never
// requesting a page past the terminating one.
