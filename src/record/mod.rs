//! Canonical product record schema, formatting, and validation
//!
//! Raw records move through the pipeline as loose JSON objects; this module
//! owns the typed schema they must satisfy before being persisted.

use crate::crawler::ItemOutcome;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Field values extracted from one product page before enrichment
///
/// Every field a label search failed to locate holds an empty value;
/// only the title and the content region are required upstream.
#[derive(Debug, Clone, Default)]
pub struct RawExtraction {
    pub product_id: String,
    pub product_name: String,
    pub cas: String,
    pub structure: String,
    pub smiles: String,
    pub description: String,
    pub molecular_weight: String,
    pub url: String,
    pub image_url: String,
    pub pdf_url: String,
    pub synonyms: Vec<String>,
    pub packaging: BTreeMap<String, String>,
}

/// The canonical, schema-validated output representation of one product
///
/// All fields are required. `image_path` and `img` carry the same local
/// thumbnail path under two keys, matching the published output format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(rename = "CAS")]
    pub cas: String,
    pub structure: String,
    pub smiles: String,
    pub description: String,
    pub molecular_weight: String,
    pub url: String,
    pub image_path: String,
    pub img: String,
    pub pdf_msds: BTreeMap<String, String>,
    pub synonyms: Vec<String>,
    pub packaging: BTreeMap<String, String>,
}

/// Capability interface for mapping extracted fields into a raw record
pub trait RecordFormatter: Send + Sync {
    /// Builds the raw record object for one product from its extracted
    /// fields and enrichment outputs
    fn format(
        &self,
        extracted: &RawExtraction,
        image_path: &str,
        pdf_info: &BTreeMap<String, String>,
    ) -> Value;
}

/// Formatter for the product record layout
pub struct ProductDataFormatter;

impl RecordFormatter for ProductDataFormatter {
    fn format(
        &self,
        extracted: &RawExtraction,
        image_path: &str,
        pdf_info: &BTreeMap<String, String>,
    ) -> Value {
        json!({
            "id": extracted.product_id,
            "name": extracted.product_name,
            "CAS": extracted.cas,
            "structure": extracted.structure,
            "smiles": extracted.smiles,
            "description": extracted.description,
            "molecular_weight": extracted.molecular_weight,
            "url": extracted.url,
            "image_path": image_path,
            "img": image_path,
            "pdf_msds": pdf_info,
            "synonyms": extracted.synonyms,
            "packaging": extracted.packaging,
        })
    }
}

/// Filters crawl outcomes down to schema-conformant products
///
/// Failed item pipelines and raw records that do not satisfy the [`Product`]
/// schema are dropped with a per-record report; conformant siblings are
/// returned in their original order.
pub fn validate_records(outcomes: Vec<ItemOutcome>) -> Vec<Product> {
    let mut products = Vec::new();

    for outcome in outcomes {
        match outcome {
            ItemOutcome::Failed { url, reason } => {
                tracing::warn!("Dropping {}: {}", url, reason);
            }
            ItemOutcome::Success(raw) => match serde_json::from_value::<Product>(raw) {
                Ok(product) => products.push(product),
                Err(e) => {
                    tracing::warn!("Validation error for product record: {}", e);
                }
            },
        }
    }

    products
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_extraction() -> RawExtraction {
        RawExtraction {
            product_id: "B-100".to_string(),
            product_name: "Benzene".to_string(),
            cas: "71-43-2".to_string(),
            structure: "78.11".to_string(),
            smiles: "c1ccccc1".to_string(),
            description: String::new(),
            molecular_weight: "78.11".to_string(),
            url: "https://chem.example.com/products/benzene".to_string(),
            image_url: "https://chem.example.com/img/benzene.jpg".to_string(),
            pdf_url: String::new(),
            synonyms: vec!["benzol".to_string(), " cyclohexatriene".to_string()],
            packaging: BTreeMap::new(),
        }
    }

    #[test]
    fn test_format_maps_every_field() {
        let extraction = sample_extraction();
        let mut pdf_info = BTreeMap::new();
        pdf_info.insert("UN Number".to_string(), " 1114".to_string());

        let value = ProductDataFormatter.format(&extraction, "images/benzene.png", &pdf_info);

        assert_eq!(value["id"], "B-100");
        assert_eq!(value["name"], "Benzene");
        assert_eq!(value["CAS"], "71-43-2");
        assert_eq!(value["molecular_weight"], "78.11");
        assert_eq!(value["url"], "https://chem.example.com/products/benzene");
        assert_eq!(value["pdf_msds"]["UN Number"], " 1114");
        assert_eq!(value["synonyms"][1], " cyclohexatriene");
    }

    #[test]
    fn test_format_carries_thumbnail_under_both_keys() {
        let value =
            ProductDataFormatter.format(&sample_extraction(), "images/benzene.png", &BTreeMap::new());

        assert_eq!(value["image_path"], "images/benzene.png");
        assert_eq!(value["img"], "images/benzene.png");
    }

    #[test]
    fn test_formatted_record_satisfies_schema() {
        let value = ProductDataFormatter.format(&sample_extraction(), "", &BTreeMap::new());
        let product: Product = serde_json::from_value(value).unwrap();

        assert_eq!(product.id, "B-100");
        assert_eq!(product.cas, "71-43-2");
        assert!(product.pdf_msds.is_empty());
        assert!(product.packaging.is_empty());
    }

    #[test]
    fn test_validate_drops_record_missing_required_field() {
        let good = ProductDataFormatter.format(&sample_extraction(), "", &BTreeMap::new());

        let mut bad = ProductDataFormatter.format(&sample_extraction(), "", &BTreeMap::new());
        bad.as_object_mut().unwrap().remove("name");

        let products = validate_records(vec![
            ItemOutcome::Success(bad),
            ItemOutcome::Success(good),
        ]);

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "B-100");
    }

    #[test]
    fn test_validate_drops_record_with_wrong_type() {
        let mut bad = ProductDataFormatter.format(&sample_extraction(), "", &BTreeMap::new());
        bad["synonyms"] = Value::String("not a list".to_string());

        let products = validate_records(vec![ItemOutcome::Success(bad)]);
        assert!(products.is_empty());
    }

    #[test]
    fn test_validate_drops_failed_outcomes_and_keeps_order() {
        let first = ProductDataFormatter.format(&sample_extraction(), "", &BTreeMap::new());
        let mut second = ProductDataFormatter.format(&sample_extraction(), "", &BTreeMap::new());
        second["id"] = Value::String("B-200".to_string());

        let products = validate_records(vec![
            ItemOutcome::Success(first),
            ItemOutcome::Failed {
                url: "https://chem.example.com/products/broken".to_string(),
                reason: "product title not found".to_string(),
            },
            ItemOutcome::Success(second),
        ]);

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, "B-100");
        assert_eq!(products[1].id, "B-200");
    }
}
