//! Record enrichment: thumbnail production and MSDS document metadata
//!
//! Both enrichment steps are best-effort. References are validated as
//! absolute http(s) URLs before any network use, and every failure mode
//! past that point degrades to an empty result for the step — a broken
//! image or document never costs the item its record.

use crate::crawler::fetcher::fetch_bytes;
use image::ImageOutputFormat;
use lopdf::Document;
use reqwest::Client;
use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use url::Url;

/// Thumbnails are bounded to this square, aspect preserved
const THUMBNAIL_BOUND: u32 = 100;

/// Section marker that precedes the UN number in MSDS transport sections
const TRANSPORT_SECTION_MARKER: &str = "14.1";

/// Metadata key the extracted UN number is stored under
const UN_NUMBER_KEY: &str = "UN Number";

/// Returns true when `candidate` is a well-formed absolute http(s) URL
pub fn is_valid_url(candidate: &str) -> bool {
    matches!(
        Url::parse(candidate),
        Ok(url) if url.scheme() == "http" || url.scheme() == "https"
    )
}

/// Derives the local thumbnail path for a source image URL
///
/// The file name is the last path segment of the URL, cut at its first
/// dot, with a `.png` extension — `.../foo.bar.jpg` becomes `foo.png`.
pub fn thumbnail_path(images_dir: &str, image_url: &str) -> PathBuf {
    let segment = image_url.rsplit('/').next().unwrap_or(image_url);
    let base = segment.split_once('.').map_or(segment, |(stem, _)| stem);
    Path::new(images_dir).join(format!("{}.png", base))
}

/// Decodes image bytes and produces a PNG-encoded bounded thumbnail
pub fn render_thumbnail(bytes: &[u8]) -> Result<Vec<u8>, image::ImageError> {
    let decoded = image::load_from_memory(bytes)?;
    let thumbnail = decoded.thumbnail(THUMBNAIL_BOUND, THUMBNAIL_BOUND);

    let mut encoded = Vec::new();
    thumbnail.write_to(&mut Cursor::new(&mut encoded), ImageOutputFormat::Png)?;
    Ok(encoded)
}

/// Fetches an image, converts it to a PNG thumbnail, and persists it
///
/// Returns the local path of the written thumbnail, or an empty string
/// when the reference is invalid or any step fails.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `images_dir` - Output directory, created if absent
/// * `image_url` - Source image reference from the product page
pub async fn process_image(client: &Client, images_dir: &str, image_url: &str) -> String {
    if !is_valid_url(image_url) {
        return String::new();
    }

    tracing::debug!("Processing image from {}", image_url);

    let bytes = match fetch_bytes(client, image_url).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Failed to fetch image {}: {}", image_url, e);
            return String::new();
        }
    };

    // Decoding and re-encoding are CPU-bound; keep them off the async workers
    let encoded = match tokio::task::spawn_blocking(move || render_thumbnail(&bytes)).await {
        Ok(Ok(encoded)) => encoded,
        Ok(Err(e)) => {
            tracing::warn!("Failed to process image {}: {}", image_url, e);
            return String::new();
        }
        Err(e) => {
            tracing::warn!("Thumbnail task failed for {}: {}", image_url, e);
            return String::new();
        }
    };

    // Concurrent workers race on this; create_dir_all tolerates repeats
    if let Err(e) = std::fs::create_dir_all(images_dir) {
        tracing::warn!("Failed to create image directory {}: {}", images_dir, e);
        return String::new();
    }

    let path = thumbnail_path(images_dir, image_url);
    match std::fs::write(&path, encoded) {
        Ok(()) => path.to_string_lossy().into_owned(),
        Err(e) => {
            tracing::warn!("Failed to write thumbnail {}: {}", path.display(), e);
            String::new()
        }
    }
}

/// Isolates the UN number from a transport-section page text
///
/// Takes the text following the first `14.1` marker (up to the next
/// occurrence, if any), then the span between the first and second colons
/// inside it. Returns `None` when the marker or the colon is absent.
pub fn un_number_from_text(text: &str) -> Option<String> {
    let after_marker = text.split(TRANSPORT_SECTION_MARKER).nth(1)?;
    after_marker.split(':').nth(1).map(str::to_string)
}

/// Scans a document's pages in order for the transport-section marker
///
/// The first page containing the marker supplies the UN number and ends
/// the scan; pages whose text cannot be extracted are skipped.
pub fn msds_info_from_document(document: &Document) -> BTreeMap<String, String> {
    let mut info = BTreeMap::new();

    for page_number in document.get_pages().keys() {
        let text = match document.extract_text(&[*page_number]) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!("Skipping unreadable MSDS page {}: {}", page_number, e);
                continue;
            }
        };

        if text.contains(TRANSPORT_SECTION_MARKER) {
            if let Some(un_number) = un_number_from_text(&text) {
                info.insert(UN_NUMBER_KEY.to_string(), un_number);
            }
            break;
        }
    }

    info
}

/// Fetches an MSDS document and extracts its transport metadata
///
/// Returns an empty mapping when the reference is invalid, the document
/// cannot be fetched or parsed, or no page carries the marker.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `pdf_url` - Document reference from the product page
pub async fn extract_pdf_info(client: &Client, pdf_url: &str) -> BTreeMap<String, String> {
    if !is_valid_url(pdf_url) {
        return BTreeMap::new();
    }

    let bytes = match fetch_bytes(client, pdf_url).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Failed to fetch MSDS document {}: {}", pdf_url, e);
            return BTreeMap::new();
        }
    };

    let parsed = tokio::task::spawn_blocking(move || {
        Document::load_mem(&bytes).map(|document| msds_info_from_document(&document))
    })
    .await;

    match parsed {
        Ok(Ok(info)) => info,
        Ok(Err(e)) => {
            tracing::warn!("Failed to parse MSDS document {}: {}", pdf_url, e);
            BTreeMap::new()
        }
        Err(e) => {
            tracing::warn!("MSDS task failed for {}: {}", pdf_url, e);
            BTreeMap::new()
        }
    }
}
