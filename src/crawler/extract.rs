//! Positional field extraction from product pages
//!
//! Product pages carry their data as label/value runs of text rather than
//! attributed markup, so extraction works over the flattened token stream
//! of the content region. Two primitives cover every labeled field:
//! [`search_after`] and [`search_between`].

use crate::crawler::parser::{
    content_region, first_following_image, labeled_link, product_title, token_stream,
};
use crate::record::RawExtraction;
use crate::ExtractError;
use scraper::Html;
use std::collections::BTreeMap;

const PRODUCT_NUMBER_LABEL: &str = "Product number:";
const CAS_LABEL: &str = "CAS number:";
const FORMULA_LABEL: &str = "Molecular formula:";
const WEIGHT_LABEL: &str = "Molecular weight:";
const SMILES_LABEL: &str = "Smiles:";
const SYNONYMS_LABEL: &str = "Synonyms:";
const DOWNLOAD_LABEL: &str = "Download";

/// Returns the trimmed token that directly follows the first token equal
/// to `label`, or an empty string when `label` never occurs (or occurs
/// last). The match is whole-token equality, never a substring search.
pub fn search_after(tokens: &[String], label: &str) -> String {
    let mut found = false;

    for token in tokens {
        if found {
            return token.trim().to_string();
        }
        if token == label {
            found = true;
        }
    }

    String::new()
}

/// Returns the trimmed token that follows the first token equal to
/// `end_label`, or an empty string when the end label never occurs.
///
/// Between `start_label` and `end_label` the tokens are accumulated into a
/// buffer joined by `joiner`, but the buffer only drives the scan state —
/// the value handed back is the token after the end marker. Callers rely
/// on exactly this contract.
pub fn search_between(
    tokens: &[String],
    start_label: &str,
    end_label: &str,
    joiner: &str,
) -> String {
    let mut found = false;
    let mut joining = false;
    let mut joined = String::new();

    for token in tokens {
        if found {
            return token.trim().to_string();
        }
        if joining {
            joined = format!("{}{}{}", joined, joiner, token);
        }
        if token == start_label {
            joining = true;
            joined = token.clone();
        }
        if token == end_label {
            found = true;
        }
    }

    String::new()
}

/// Capability interface for extracting raw field values from a parsed page
pub trait DataExtractor: Send + Sync {
    /// Extracts the raw field set for one product
    ///
    /// Fails only when the page lacks the content region or the title;
    /// any other missing field becomes an empty value.
    fn extract(&self, product_url: &str, doc: &Html) -> Result<RawExtraction, ExtractError>;
}

/// Extractor for the product-page layout
pub struct ProductDataExtractor;

impl DataExtractor for ProductDataExtractor {
    fn extract(&self, product_url: &str, doc: &Html) -> Result<RawExtraction, ExtractError> {
        tracing::debug!("Extracting data from {}", product_url);

        let region = content_region(doc).ok_or_else(|| ExtractError::MissingContent {
            url: product_url.to_string(),
        })?;
        let tokens = token_stream(region);

        let product_name = product_title(doc).ok_or_else(|| ExtractError::MissingTitle {
            url: product_url.to_string(),
        })?;

        let synonyms = search_between(&tokens, SYNONYMS_LABEL, FORMULA_LABEL, ",")
            .split(',')
            .map(str::to_string)
            .collect();

        Ok(RawExtraction {
            product_id: search_after(&tokens, PRODUCT_NUMBER_LABEL),
            product_name,
            cas: search_after(&tokens, CAS_LABEL),
            structure: search_between(&tokens, FORMULA_LABEL, WEIGHT_LABEL, ""),
            smiles: search_after(&tokens, SMILES_LABEL),
            description: String::new(),
            molecular_weight: search_after(&tokens, WEIGHT_LABEL),
            url: product_url.to_string(),
            image_url: first_following_image(region).unwrap_or_default(),
            pdf_url: labeled_link(doc, DOWNLOAD_LABEL).unwrap_or_default(),
            synonyms,
            packaging: BTreeMap::new(),
        })
    }
}
