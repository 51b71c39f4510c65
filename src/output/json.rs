//! JSON sink for the validated product collection

use crate::record::Product;
use crate::HarvestError;
use std::path::Path;

/// Serializes the validated products and writes them to `path`
///
/// # Arguments
///
/// * `path` - Destination file; overwritten if present
/// * `products` - The validated collection, in crawl order
///
/// # Returns
///
/// * `Ok(())` - File written
/// * `Err(HarvestError)` - Serialization or write failure
pub fn write_results(path: &Path, products: &[Product]) -> Result<(), HarvestError> {
    let body = serde_json::to_string_pretty(products)?;
    std::fs::write(path, body)?;

    tracing::info!("Wrote {} records to {}", products.len(), path.display());
    Ok(())
}
