// ABOUTME: SEO validation report built from a MetadataRecord by applying the fixed rule table.
// ABOUTME: Defines Status, Category, CategoryReport and ValidationReport and computes the overall score.

//! Validation against fixed SEO heuristics.
//!
//! Each category is evaluated independently from the rule table in
//! [`rules`]. Deductions from every category are summed and subtracted
//! from 100; the score saturates at 0.

pub mod rules;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::metadata::MetadataRecord;

/// Score of a page that triggers no rule.
pub const MAX_SCORE: u32 = 100;

/// Outcome of a category, ordered by severity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Success,
    Warning,
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Success => "success",
            Status::Warning => "warning",
            Status::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// A section of the validation report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Title,
    Description,
    OgTags,
    TwitterTags,
    Technical,
    Content,
}

impl Category {
    /// All categories in report order.
    pub const ALL: [Category; 6] = [
        Category::Title,
        Category::Description,
        Category::OgTags,
        Category::TwitterTags,
        Category::Technical,
        Category::Content,
    ];

    /// The key used for this category in serialized reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Title => "title",
            Category::Description => "description",
            Category::OgTags => "og_tags",
            Category::TwitterTags => "twitter_tags",
            Category::Technical => "technical",
            Category::Content => "content",
        }
    }

    /// Heading used when rendering the report for people.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Title => "Title",
            Category::Description => "Description",
            Category::OgTags => "Open Graph",
            Category::TwitterTags => "Twitter Card",
            Category::Technical => "Technical",
            Category::Content => "Content",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status and messages for one category.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryReport {
    pub status: Status,
    pub messages: Vec<String>,
    /// Points this category removed from the overall score.
    pub deduction: u32,
}

/// Category-by-category result plus the overall score.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub title: CategoryReport,
    pub description: CategoryReport,
    pub og_tags: CategoryReport,
    pub twitter_tags: CategoryReport,
    pub technical: CategoryReport,
    pub content: CategoryReport,
    /// In `0..=100`.
    pub overall_score: u32,
}

impl ValidationReport {
    /// The report for a single category.
    pub fn category(&self, category: Category) -> &CategoryReport {
        match category {
            Category::Title => &self.title,
            Category::Description => &self.description,
            Category::OgTags => &self.og_tags,
            Category::TwitterTags => &self.twitter_tags,
            Category::Technical => &self.technical,
            Category::Content => &self.content,
        }
    }

    /// Categories in report order.
    pub fn categories(&self) -> impl Iterator<Item = (Category, &CategoryReport)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.category(c)))
    }

    /// Sum of all category deductions, before clamping.
    pub fn total_deduction(&self) -> u32 {
        self.categories().map(|(_, r)| r.deduction).sum()
    }
}

/// Validate metadata against the SEO rule table.
pub fn validate(meta: &MetadataRecord) -> ValidationReport {
    let [title, description, og_tags, twitter_tags, technical, content] =
        Category::ALL.map(|category| rules::evaluate(rules::rules_for(category), meta));

    let mut report = ValidationReport {
        title,
        description,
        og_tags,
        twitter_tags,
        technical,
        content,
        overall_score: 0,
    };
    report.overall_score = MAX_SCORE.saturating_sub(report.total_deduction());
    report
}
