//! HTTP fetcher implementation
//!
//! One shared client serves every request the pipeline makes: listing
//! pages, product pages, images, and MSDS documents. Requests are made
//! exactly once each — there is no retry layer — and no per-request
//! timeout is configured, so a hung fetch stalls the worker holding it.

use reqwest::{Client, StatusCode};

/// Result of fetching one listing page
#[derive(Debug)]
pub struct PageResponse {
    /// HTTP status code of the response
    pub status: StatusCode,
    /// Response body (empty when the status is not a success)
    pub body: String,
}

/// Builds the shared HTTP client
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    let user_agent = format!(
        "{}/{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    Client::builder()
        .user_agent(user_agent)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a listing page, reporting the status alongside the body
///
/// Non-success statuses are returned to the caller rather than treated as
/// errors; the pagination loop uses them as its termination signal. The
/// body is only read for success responses.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_page(client: &Client, url: &str) -> Result<PageResponse, reqwest::Error> {
    let response = client.get(url).send().await?;
    let status = response.status();

    let body = if status.is_success() {
        response.text().await?
    } else {
        String::new()
    };

    Ok(PageResponse { status, body })
}

/// Fetches a product page body
///
/// The body is returned for any response that arrives; only transport
/// failures surface as errors.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_html(client: &Client, url: &str) -> Result<String, reqwest::Error> {
    client.get(url).send().await?.text().await
}

/// Fetches raw bytes for an image or document artifact
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_bytes(client: &Client, url: &str) -> Result<Vec<u8>, reqwest::Error> {
    Ok(client.get(url).send().await?.bytes().await?.to_vec())
}
