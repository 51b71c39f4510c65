//! Crawl coordination - bounded fan-out over product URLs
//!
//! Each product URL gets one task running the full item pipeline
//! (fetch, extract, enrich, format). A semaphore bounds how many item
//! pipelines are in flight; the permit is held for the whole pipeline, so
//! a worker finishes its item before another can start. Results are
//! collected positionally: the i-th outcome always belongs to the i-th
//! input URL, whatever order the tasks complete in.

use crate::crawler::enrich::{extract_pdf_info, process_image};
use crate::crawler::extract::{DataExtractor, ProductDataExtractor};
use crate::crawler::fetcher::fetch_html;
use crate::crawler::parser::parse_document;
use crate::record::{ProductDataFormatter, RecordFormatter};
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Outcome of one item pipeline
///
/// A failure is private to its item: it carries the reason to the
/// validation boundary, where it is reported and dropped alongside
/// schema violations.
#[derive(Debug)]
pub enum ItemOutcome {
    /// The item produced a raw record
    Success(Value),

    /// The pipeline failed before producing a record
    Failed {
        /// The product URL the pipeline was processing
        url: String,
        /// Why the pipeline gave up
        reason: String,
    },
}

/// Composes the per-item capabilities and runs the bounded crawl
pub struct Coordinator {
    client: Client,
    extractor: Arc<dyn DataExtractor>,
    formatter: Arc<dyn RecordFormatter>,
    images_dir: String,
}

impl Coordinator {
    /// Creates a coordinator wired with the product-page strategies
    ///
    /// # Arguments
    ///
    /// * `client` - The shared HTTP client
    /// * `images_dir` - Directory that receives thumbnail PNGs
    pub fn new(client: Client, images_dir: String) -> Self {
        Self {
            client,
            extractor: Arc::new(ProductDataExtractor),
            formatter: Arc::new(ProductDataFormatter),
            images_dir,
        }
    }

    /// Crawls every product URL with up to `crawlers` pipelines in flight
    ///
    /// Returns one outcome per input URL, in input order, regardless of
    /// completion order. A failing item never disturbs its siblings.
    ///
    /// # Arguments
    ///
    /// * `urls` - Product URLs to crawl
    /// * `crawlers` - Maximum number of concurrent item pipelines
    pub async fn crawl_products(&self, urls: &[String], crawlers: usize) -> Vec<ItemOutcome> {
        let semaphore = Arc::new(Semaphore::new(crawlers));
        let mut tasks = Vec::with_capacity(urls.len());

        for url in urls {
            let semaphore = Arc::clone(&semaphore);
            let client = self.client.clone();
            let extractor = Arc::clone(&self.extractor);
            let formatter = Arc::clone(&self.formatter);
            let images_dir = self.images_dir.clone();
            let url = url.clone();

            tasks.push(tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        return ItemOutcome::Failed {
                            url,
                            reason: format!("scheduling failed: {}", e),
                        }
                    }
                };
                crawl_one(&client, &*extractor, &*formatter, &images_dir, url).await
            }));
        }

        // Joining in spawn order fills each output slot from its own input
        // position exactly once
        let mut outcomes = Vec::with_capacity(tasks.len());
        for (task, url) in tasks.into_iter().zip(urls) {
            let outcome = match task.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!("Crawl task for {} aborted: {}", url, e);
                    ItemOutcome::Failed {
                        url: url.clone(),
                        reason: format!("task aborted: {}", e),
                    }
                }
            };
            outcomes.push(outcome);
        }

        outcomes
    }
}

/// Runs the full pipeline for one product URL
///
/// Fetch and extraction failures end the item with a `Failed` outcome;
/// enrichment failures degrade to empty artifacts inside a `Success`.
async fn crawl_one(
    client: &Client,
    extractor: &dyn DataExtractor,
    formatter: &dyn RecordFormatter,
    images_dir: &str,
    url: String,
) -> ItemOutcome {
    tracing::info!("Crawling {}", url);

    let body = match fetch_html(client, &url).await {
        Ok(body) => body,
        Err(e) => {
            return ItemOutcome::Failed {
                reason: format!("fetch failed: {}", e),
                url,
            }
        }
    };

    // The parsed document stays inside this block: extraction copies what
    // it needs, and the enrichment awaits below must not hold it
    let extracted = {
        let doc = parse_document(&body);
        match extractor.extract(&url, &doc) {
            Ok(extracted) => extracted,
            Err(e) => {
                return ItemOutcome::Failed {
                    reason: e.to_string(),
                    url,
                }
            }
        }
    };

    let image_path = process_image(client, images_dir, &extracted.image_url).await;
    let pdf_info = extract_pdf_info(client, &extracted.pdf_url).await;

    ItemOutcome::Success(formatter.format(&extracted, &image_path, &pdf_info))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::fetcher::build_http_client;

    #[tokio::test]
    async fn test_crawl_with_no_urls() {
        let coordinator = Coordinator::new(build_http_client().unwrap(), "images".to_string());
        let outcomes = coordinator.crawl_products(&[], 4).await;
        assert!(outcomes.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_urls_fail_in_input_order() {
        let coordinator = Coordinator::new(build_http_client().unwrap(), "images".to_string());
        let urls = vec![
            "http://127.0.0.1:1/products/a".to_string(),
            "http://127.0.0.1:1/products/b".to_string(),
        ];

        let outcomes = coordinator.crawl_products(&urls, 2).await;

        assert_eq!(outcomes.len(), 2);
        for (outcome, expected) in outcomes.iter().zip(&urls) {
            match outcome {
                ItemOutcome::Failed { url, reason } => {
                    assert_eq!(url, expected);
                    assert!(reason.starts_with("fetch failed"));
                }
                ItemOutcome::Success(_) => panic!("expected a failed outcome"),
            }
        }
    }

    // Ordering under mixed completion latency is pinned by the wiremock
    // integration tests, which delay early items behind later ones.
}
