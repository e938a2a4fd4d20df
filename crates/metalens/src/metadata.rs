// ABOUTME: MetadataRecord struct holding every SEO-relevant value pulled from a page.
// ABOUTME: Absent values are empty strings, empty lists, or zero so downstream checks never see a missing marker.

use serde::{Deserialize, Serialize};

use crate::text::char_len;

/// Flat record of the SEO metadata found in one HTML document.
///
/// Every string field defaults to `""` when the page does not declare it.
/// The validator treats an empty string as "not present".
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MetadataRecord {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub canonical: String,
    pub robots: String,
    pub viewport: String,
    pub charset: String,

    pub og_title: String,
    pub og_description: String,
    pub og_image: String,
    pub og_url: String,
    pub og_type: String,
    pub og_site_name: String,

    pub twitter_card: String,
    pub twitter_title: String,
    pub twitter_description: String,
    pub twitter_image: String,
    pub twitter_site: String,

    pub h1_tags: Vec<String>,
    pub h2_tags: Vec<String>,

    pub total_images: usize,
    /// Never greater than `total_images`.
    pub image_alt_missing: usize,
}

impl MetadataRecord {
    /// Returns true if the page has a non-empty `<title>`.
    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }

    /// Returns true if the page has a meta description.
    pub fn has_description(&self) -> bool {
        !self.description.is_empty()
    }

    /// Returns true if the page has meta keywords.
    pub fn has_keywords(&self) -> bool {
        !self.keywords.is_empty()
    }

    /// Returns true if any of og:title, og:description or og:image is set.
    pub fn has_og_tags(&self) -> bool {
        !self.og_title.is_empty() || !self.og_description.is_empty() || !self.og_image.is_empty()
    }

    /// Returns true if the page declares a Twitter Card type.
    pub fn has_twitter_card(&self) -> bool {
        !self.twitter_card.is_empty()
    }

    /// Title length in characters.
    pub fn title_length(&self) -> usize {
        char_len(&self.title)
    }

    /// Description length in characters.
    pub fn description_length(&self) -> usize {
        char_len(&self.description)
    }
}
