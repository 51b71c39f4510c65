//! HTML access layer for listing and product pages
//!
//! All markup inspection lives here: product-link discovery on listing
//! pages, and the positional raw material the field extractor works from
//! on product pages (the content-region token stream plus a handful of
//! direct element lookups).

use scraper::{ElementRef, Html, Selector};

/// Parses an HTML document body
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

/// Extracts product-detail hrefs from a listing page, in document order
///
/// Anchors qualify when they carry the configured link class. Href values
/// are collected verbatim — relative links are not resolved here; the run
/// step filters the discovered list down to absolute URLs.
///
/// # Arguments
///
/// * `doc` - The parsed listing page
/// * `link_class` - Anchor class that marks product links
pub fn extract_product_links(doc: &Html, link_class: &str) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in doc.select(&selector) {
            if !element.value().classes().any(|class| class == link_class) {
                continue;
            }
            if let Some(href) = element.value().attr("href") {
                links.push(href.to_string());
            }
        }
    }

    links
}

/// Locates the product content region (`div.product`)
pub fn content_region(doc: &Html) -> Option<ElementRef<'_>> {
    let selector = Selector::parse("div.product").ok()?;
    doc.select(&selector).next()
}

/// Flattens the visible text of a region into ordered, trimmed tokens
///
/// Whitespace-only fragments are dropped; everything else keeps its
/// document order. This is the token stream the positional field searches
/// operate on.
pub fn token_stream(region: ElementRef<'_>) -> Vec<String> {
    region
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extracts the product title (`h1.product-title`), wherever it appears
///
/// The title is the one lookup the extractor treats as mandatory.
pub fn product_title(doc: &Html) -> Option<String> {
    let selector = Selector::parse("h1.product-title").ok()?;
    doc.select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
}

/// Finds the `src` of the first image inside or following the content region
///
/// Descendant images win; otherwise the following siblings are scanned in
/// document order, descending into each.
pub fn first_following_image(region: ElementRef<'_>) -> Option<String> {
    let selector = Selector::parse("img").ok()?;

    if let Some(img) = region.select(&selector).next() {
        return img.value().attr("src").map(str::to_string);
    }

    for sibling in region.next_siblings().filter_map(ElementRef::wrap) {
        if sibling.value().name() == "img" {
            return sibling.value().attr("src").map(str::to_string);
        }
        if let Some(img) = sibling.select(&selector).next() {
            return img.value().attr("src").map(str::to_string);
        }
    }

    None
}

/// Finds the `href` of the first anchor whose visible text equals `label`
pub fn labeled_link(doc: &Html, label: &str) -> Option<String> {
    let selector = Selector::parse("a").ok()?;

    doc.select(&selector)
        .find(|element| element.text().collect::<String>().trim() == label)
        .and_then(|element| element.value().attr("href"))
        .map(str::to_string)
}
