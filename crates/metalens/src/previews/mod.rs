// ABOUTME: Link preview approximations for Google, Facebook, Twitter and LinkedIn.
// ABOUTME: Resolves each display field through a fallback chain, then truncates to the platform limit.

use serde::{Deserialize, Serialize};

use crate::metadata::MetadataRecord;
use crate::text::{first_non_empty, truncate};
use crate::urls::display_host;

pub const DEFAULT_TITLE: &str = "Untitled Page";
pub const DEFAULT_DESCRIPTION: &str = "No description available";
pub const DEFAULT_TWITTER_CARD: &str = "summary";

/// Display limits for a platform, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub title: usize,
    pub description: usize,
}

pub const GOOGLE_LIMITS: Limits = Limits {
    title: 60,
    description: 160,
};
pub const FACEBOOK_LIMITS: Limits = Limits {
    title: 100,
    description: 300,
};
pub const TWITTER_LIMITS: Limits = Limits {
    title: 70,
    description: 200,
};
pub const LINKEDIN_LIMITS: Limits = Limits {
    title: 100,
    description: 300,
};

/// Search result snippet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GooglePreview {
    pub title: String,
    pub url: String,
    pub description: String,
}

/// Facebook share card.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FacebookPreview {
    pub title: String,
    pub description: String,
    pub image: String,
    pub site_name: String,
    pub url: String,
}

/// Twitter card.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TwitterPreview {
    pub title: String,
    pub description: String,
    pub image: String,
    pub card_type: String,
    pub site: String,
}

/// LinkedIn share card.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LinkedInPreview {
    pub title: String,
    pub description: String,
    pub image: String,
    pub site_name: String,
}

/// Previews for every supported platform.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PreviewSet {
    pub google: GooglePreview,
    pub facebook: FacebookPreview,
    pub twitter: TwitterPreview,
    pub linkedin: LinkedInPreview,
}

/// Title shown by Open Graph consumers: og:title, then page title.
fn og_title(meta: &MetadataRecord) -> String {
    first_non_empty(&[&meta.og_title, &meta.title], DEFAULT_TITLE)
}

/// Description shown by Open Graph consumers: og:description, then meta description.
fn og_description(meta: &MetadataRecord) -> String {
    first_non_empty(&[&meta.og_description, &meta.description], DEFAULT_DESCRIPTION)
}

pub fn google_preview(meta: &MetadataRecord, url: &str) -> GooglePreview {
    GooglePreview {
        title: truncate(
            &first_non_empty(&[&meta.title], DEFAULT_TITLE),
            GOOGLE_LIMITS.title,
        ),
        url: url.to_string(),
        description: truncate(
            &first_non_empty(&[&meta.description], DEFAULT_DESCRIPTION),
            GOOGLE_LIMITS.description,
        ),
    }
}

pub fn facebook_preview(meta: &MetadataRecord, url: &str, host: &str) -> FacebookPreview {
    FacebookPreview {
        title: truncate(&og_title(meta), FACEBOOK_LIMITS.title),
        description: truncate(&og_description(meta), FACEBOOK_LIMITS.description),
        image: meta.og_image.clone(),
        site_name: first_non_empty(&[&meta.og_site_name], host),
        url: first_non_empty(&[&meta.og_url], url),
    }
}

pub fn twitter_preview(meta: &MetadataRecord, host: &str) -> TwitterPreview {
    TwitterPreview {
        title: truncate(
            &first_non_empty(
                &[&meta.twitter_title, &meta.og_title, &meta.title],
                DEFAULT_TITLE,
            ),
            TWITTER_LIMITS.title,
        ),
        description: truncate(
            &first_non_empty(
                &[
                    &meta.twitter_description,
                    &meta.og_description,
                    &meta.description,
                ],
                DEFAULT_DESCRIPTION,
            ),
            TWITTER_LIMITS.description,
        ),
        image: first_non_empty(&[&meta.twitter_image, &meta.og_image], ""),
        card_type: first_non_empty(&[&meta.twitter_card], DEFAULT_TWITTER_CARD),
        site: first_non_empty(&[&meta.twitter_site], host),
    }
}

pub fn linkedin_preview(meta: &MetadataRecord, host: &str) -> LinkedInPreview {
    LinkedInPreview {
        title: truncate(&og_title(meta), LINKEDIN_LIMITS.title),
        description: truncate(&og_description(meta), LINKEDIN_LIMITS.description),
        image: meta.og_image.clone(),
        site_name: first_non_empty(&[&meta.og_site_name], host),
    }
}

/// Build all platform previews for a page fetched from `url`.
pub fn generate_previews(meta: &MetadataRecord, url: &str) -> PreviewSet {
    let host = display_host(url);
    PreviewSet {
        google: google_preview(meta, url),
        facebook: facebook_preview(meta, url, &host),
        twitter: twitter_preview(meta, &host),
        linkedin: linkedin_preview(meta, &host),
    }
}
