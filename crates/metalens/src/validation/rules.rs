// ABOUTME: Declarative SEO rule table: one entry per check with its status, message, and deduction.
// ABOUTME: Rules are plain functions of the MetadataRecord so each can be exercised in isolation.

use super::{Category, CategoryReport, Status};
use crate::metadata::MetadataRecord;

pub const TITLE_MIN_LENGTH: usize = 30;
pub const TITLE_MAX_LENGTH: usize = 60;
pub const DESCRIPTION_MIN_LENGTH: usize = 120;
pub const DESCRIPTION_MAX_LENGTH: usize = 160;

/// Cap on the deduction for images without alt text.
pub const IMAGE_ALT_DEDUCTION_CAP: u32 = 10;

/// A triggered rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub status: Status,
    pub message: String,
    pub deduction: u32,
}

impl Finding {
    fn warning(message: impl Into<String>, deduction: u32) -> Self {
        Self {
            status: Status::Warning,
            message: message.into(),
            deduction,
        }
    }

    fn error(message: impl Into<String>, deduction: u32) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            deduction,
        }
    }
}

/// A single check. Returns a finding when the condition is triggered.
pub type Rule = fn(&MetadataRecord) -> Option<Finding>;

/// How the rules of a category combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matching {
    /// Only the first triggered rule counts.
    FirstMatch,
    /// Every triggered rule counts.
    AllMatches,
}

/// The rules of one report category.
pub struct CategoryRules {
    pub category: Category,
    pub matching: Matching,
    pub rules: &'static [Rule],
    /// Message recorded when no rule triggers.
    pub success_message: &'static str,
}

fn title_missing(meta: &MetadataRecord) -> Option<Finding> {
    meta.title
        .is_empty()
        .then(|| Finding::error("Missing title tag", 15))
}

fn title_too_short(meta: &MetadataRecord) -> Option<Finding> {
    let len = meta.title_length();
    (meta.has_title() && len < TITLE_MIN_LENGTH).then(|| {
        Finding::warning(
            format!(
                "Title too short ({} chars). Recommended: {}-{} characters",
                len, TITLE_MIN_LENGTH, TITLE_MAX_LENGTH
            ),
            5,
        )
    })
}

fn title_too_long(meta: &MetadataRecord) -> Option<Finding> {
    let len = meta.title_length();
    (len > TITLE_MAX_LENGTH).then(|| {
        Finding::warning(
            format!(
                "Title too long ({} chars). Recommended: {}-{} characters",
                len, TITLE_MIN_LENGTH, TITLE_MAX_LENGTH
            ),
            5,
        )
    })
}

fn description_missing(meta: &MetadataRecord) -> Option<Finding> {
    meta.description
        .is_empty()
        .then(|| Finding::error("Missing meta description", 15))
}

fn description_too_short(meta: &MetadataRecord) -> Option<Finding> {
    let len = meta.description_length();
    (meta.has_description() && len < DESCRIPTION_MIN_LENGTH).then(|| {
        Finding::warning(
            format!(
                "Description too short ({} chars). Recommended: {}-{} characters",
                len, DESCRIPTION_MIN_LENGTH, DESCRIPTION_MAX_LENGTH
            ),
            5,
        )
    })
}

fn description_too_long(meta: &MetadataRecord) -> Option<Finding> {
    let len = meta.description_length();
    (len > DESCRIPTION_MAX_LENGTH).then(|| {
        Finding::warning(
            format!(
                "Description too long ({} chars). Recommended: {}-{} characters",
                len, DESCRIPTION_MIN_LENGTH, DESCRIPTION_MAX_LENGTH
            ),
            5,
        )
    })
}

fn og_essentials_missing(meta: &MetadataRecord) -> Option<Finding> {
    let missing: Vec<&str> = [
        ("og:title", &meta.og_title),
        ("og:description", &meta.og_description),
        ("og:image", &meta.og_image),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(tag, _)| tag)
    .collect();

    (!missing.is_empty()).then(|| {
        Finding::warning(
            format!("Missing Open Graph tags: {}", missing.join(", ")),
            3 * missing.len() as u32,
        )
    })
}

fn twitter_card_missing(meta: &MetadataRecord) -> Option<Finding> {
    (!meta.has_twitter_card()).then(|| Finding::warning("Missing Twitter Card type", 5))
}

fn twitter_image_missing(meta: &MetadataRecord) -> Option<Finding> {
    (meta.has_twitter_card() && meta.twitter_image.is_empty())
        .then(|| Finding::warning("Twitter Card specified but missing image", 3))
}

fn canonical_missing(meta: &MetadataRecord) -> Option<Finding> {
    meta.canonical
        .is_empty()
        .then(|| Finding::warning("Missing canonical URL", 5))
}

fn viewport_missing(meta: &MetadataRecord) -> Option<Finding> {
    meta.viewport
        .is_empty()
        .then(|| Finding::warning("Missing viewport meta tag", 5))
}

fn h1_missing(meta: &MetadataRecord) -> Option<Finding> {
    meta.h1_tags
        .is_empty()
        .then(|| Finding::warning("No H1 tags found", 10))
}

fn h1_multiple(meta: &MetadataRecord) -> Option<Finding> {
    let count = meta.h1_tags.len();
    (count > 1).then(|| {
        Finding::warning(
            format!(
                "Multiple H1 tags found ({}). Use only one H1 per page",
                count
            ),
            5,
        )
    })
}

fn image_alt_missing(meta: &MetadataRecord) -> Option<Finding> {
    let missing = meta.image_alt_missing;
    (missing > 0).then(|| {
        let deduction = (missing as u32)
            .saturating_mul(2)
            .min(IMAGE_ALT_DEDUCTION_CAP);
        Finding::warning(
            format!(
                "{} out of {} images missing alt attributes",
                missing, meta.total_images
            ),
            deduction,
        )
    })
}

/// The full rule table, in report order.
pub static CATEGORY_RULES: [CategoryRules; 6] = [
    CategoryRules {
        category: Category::Title,
        matching: Matching::FirstMatch,
        rules: &[title_missing, title_too_short, title_too_long],
        success_message: "Title length is optimal",
    },
    CategoryRules {
        category: Category::Description,
        matching: Matching::FirstMatch,
        rules: &[description_missing, description_too_short, description_too_long],
        success_message: "Description length is optimal",
    },
    CategoryRules {
        category: Category::OgTags,
        matching: Matching::AllMatches,
        rules: &[og_essentials_missing],
        success_message: "All essential Open Graph tags present",
    },
    CategoryRules {
        category: Category::TwitterTags,
        matching: Matching::AllMatches,
        rules: &[twitter_card_missing, twitter_image_missing],
        success_message: "Twitter Card tags are properly configured",
    },
    CategoryRules {
        category: Category::Technical,
        matching: Matching::AllMatches,
        rules: &[canonical_missing, viewport_missing],
        success_message: "Technical SEO tags are properly configured",
    },
    CategoryRules {
        category: Category::Content,
        matching: Matching::AllMatches,
        rules: &[h1_missing, h1_multiple, image_alt_missing],
        success_message: "Content structure is well optimized",
    },
];

/// Looks up the rules for a category.
pub fn rules_for(category: Category) -> &'static CategoryRules {
    let index = match category {
        Category::Title => 0,
        Category::Description => 1,
        Category::OgTags => 2,
        Category::TwitterTags => 3,
        Category::Technical => 4,
        Category::Content => 5,
    };
    &CATEGORY_RULES[index]
}

/// Evaluates one category's rules against the record.
///
/// Status is the most severe triggered status. A category with no
/// triggered rule gets exactly one success message.
pub fn evaluate(set: &CategoryRules, meta: &MetadataRecord) -> CategoryReport {
    let triggered = set.rules.iter().filter_map(|rule| rule(meta));
    let findings: Vec<Finding> = match set.matching {
        Matching::FirstMatch => triggered.take(1).collect(),
        Matching::AllMatches => triggered.collect(),
    };

    if findings.is_empty() {
        return CategoryReport {
            status: Status::Success,
            messages: vec![set.success_message.to_string()],
            deduction: 0,
        };
    }

    CategoryReport {
        status: findings
            .iter()
            .map(|f| f.status)
            .max()
            .unwrap_or(Status::Success),
        deduction: findings.iter().map(|f| f.deduction).sum(),
        messages: findings.into_iter().map(|f| f.message).collect(),
    }
}
