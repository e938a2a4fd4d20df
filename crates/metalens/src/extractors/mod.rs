// ABOUTME: Metadata extraction from raw HTML into a MetadataRecord.
// ABOUTME: Walks title/meta/link/heading/img elements once, in document order, with safe defaults.

//! Metadata extraction.
//!
//! The extractor never fails. Malformed markup is handled by the tolerant
//! html5ever parser behind `scraper`, and every lookup falls back to an
//! empty string, empty list, or zero.
//!
//! Element and attribute names are lower-cased by the HTML parser, so
//! `<META NAME="Description">` is seen as `meta` with a `name` attribute.
//! The *values* of `name` and `property` are lower-cased here before
//! matching; `content` values are trimmed but keep their case.
//!
//! Submodules:
//! - `fields`: routing table from meta attributes to record fields.

pub mod fields;

use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, HtmlTreeSink, Selector};

use crate::metadata::MetadataRecord;
use fields::classify_meta;

/// Every element the extractor cares about, matched in one document-order pass.
static SEO_ELEMENTS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title, meta, link, h1, h2, img").unwrap());

/// Trimmed text content of an element and all its descendants.
fn element_text(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Returns true if a `rel` attribute value lists `canonical`.
fn is_canonical_rel(rel: &str) -> bool {
    rel.split_ascii_whitespace()
        .any(|token| token.eq_ignore_ascii_case("canonical"))
}

/// Parse a document with scripting disabled.
///
/// With scripting on, `<noscript>` content is raw text and the elements
/// inside it (tracking pixels, fallback headings, meta tags) are lost.
pub fn parse_document(html: &str) -> Html {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false,
            ..Default::default()
        },
        ..Default::default()
    };
    html5ever::parse_document(HtmlTreeSink::new(Html::new_document()), opts).one(html)
}

/// Extract SEO metadata from an HTML document.
pub fn extract_metadata(html: &str) -> MetadataRecord {
    let doc = parse_document(html);
    extract_from_document(&doc)
}

/// Extract SEO metadata from an already parsed document.
pub fn extract_from_document(doc: &Html) -> MetadataRecord {
    let mut meta = MetadataRecord::default();
    let mut title_seen = false;
    let mut canonical_seen = false;

    for el in doc.select(&SEO_ELEMENTS) {
        let node = el.value();
        match node.name() {
            "title" => {
                if !title_seen {
                    title_seen = true;
                    meta.title = element_text(&el);
                }
            }
            "meta" => {
                let name = node.attr("name").unwrap_or("").to_lowercase();
                let property = node.attr("property").unwrap_or("").to_lowercase();
                let charset = node.attr("charset");
                if let Some(field) = classify_meta(&name, &property, charset) {
                    let value = match field {
                        fields::MetaField::Charset => charset.unwrap_or("").to_string(),
                        _ => node.attr("content").unwrap_or("").trim().to_string(),
                    };
                    *field.slot(&mut meta) = value;
                }
            }
            "link" => {
                if !canonical_seen && node.attr("rel").is_some_and(is_canonical_rel) {
                    canonical_seen = true;
                    meta.canonical = node.attr("href").unwrap_or("").to_string();
                }
            }
            "h1" => meta.h1_tags.push(element_text(&el)),
            "h2" => meta.h2_tags.push(element_text(&el)),
            "img" => {
                meta.total_images += 1;
                if node.attr("alt").map_or(true, str::is_empty) {
                    meta.image_alt_missing += 1;
                }
            }
            _ => {}
        }
    }

    meta
}
