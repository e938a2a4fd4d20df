// ABOUTME: AnalysisReport and AnalysisResult types returned by the analyzer.
// ABOUTME: Includes the error-or-report union and a markdown rendering of a finished analysis.

use serde::{Deserialize, Serialize};

use crate::error::AnalyzeError;
use crate::metadata::MetadataRecord;
use crate::previews::PreviewSet;
use crate::validation::{Status, ValidationReport};

/// Everything produced by a successful analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AnalysisReport {
    pub url: String,
    pub domain: String,
    pub metadata: MetadataRecord,
    pub validation: ValidationReport,
    pub previews: PreviewSet,
}

/// Outcome of a single analysis: an error message or a full report, never both.
///
/// Serializes untagged, so a failure is `{"error": "..."}` and a success is
/// the report object itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    Failure { error: String },
    Success(Box<AnalysisReport>),
}

impl AnalysisResult {
    /// Returns true if the analysis produced a report.
    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisResult::Success(_))
    }

    /// The error message, if the analysis failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            AnalysisResult::Failure { error } => Some(error.as_str()),
            AnalysisResult::Success(_) => None,
        }
    }

    /// The report, if the analysis succeeded.
    pub fn report(&self) -> Option<&AnalysisReport> {
        match self {
            AnalysisResult::Failure { .. } => None,
            AnalysisResult::Success(report) => Some(report.as_ref()),
        }
    }

    /// Consume the result, returning the report if present.
    pub fn into_report(self) -> Option<AnalysisReport> {
        match self {
            AnalysisResult::Failure { .. } => None,
            AnalysisResult::Success(report) => Some(*report),
        }
    }
}

impl From<Result<AnalysisReport, AnalyzeError>> for AnalysisResult {
    fn from(result: Result<AnalysisReport, AnalyzeError>) -> Self {
        match result {
            Ok(report) => AnalysisResult::Success(Box::new(report)),
            Err(err) => AnalysisResult::Failure {
                error: err.user_message(),
            },
        }
    }
}

fn status_marker(status: Status) -> &'static str {
    match status {
        Status::Success => "[ok]",
        Status::Warning => "[warn]",
        Status::Error => "[error]",
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

impl AnalysisReport {
    /// Format the report as a markdown document.
    pub fn format_markdown(&self) -> String {
        let mut parts = Vec::new();

        parts.push(format!("# SEO report for {}", self.url));
        parts.push(format!(
            "**Overall score: {}/100**",
            self.validation.overall_score
        ));

        let mut checks = vec!["## Checks".to_string()];
        for (category, section) in self.validation.categories() {
            checks.push(format!(
                "### {} {}",
                status_marker(section.status),
                category.label()
            ));
            for message in &section.messages {
                checks.push(format!("- {}", message));
            }
        }
        parts.push(checks.join("\n"));

        let meta = &self.metadata;
        parts.push(
            [
                "## Metadata".to_string(),
                format!("- Title: {}", or_dash(&meta.title)),
                format!("- Description: {}", or_dash(&meta.description)),
                format!("- Canonical: {}", or_dash(&meta.canonical)),
                format!("- Robots: {}", or_dash(&meta.robots)),
                format!("- Viewport: {}", or_dash(&meta.viewport)),
                format!("- Charset: {}", or_dash(&meta.charset)),
                format!("- H1: {}", meta.h1_tags.len()),
                format!("- H2: {}", meta.h2_tags.len()),
                format!(
                    "- Images missing alt: {}/{}",
                    meta.image_alt_missing, meta.total_images
                ),
            ]
            .join("\n"),
        );

        let p = &self.previews;
        parts.push(
            [
                "## Previews".to_string(),
                "### Google".to_string(),
                format!("{}\n{}\n{}", p.google.title, p.google.url, p.google.description),
                "### Facebook".to_string(),
                format!(
                    "{}\n{}\n{}",
                    p.facebook.site_name, p.facebook.title, p.facebook.description
                ),
                "### Twitter".to_string(),
                format!(
                    "{} ({})\n{}\n{}",
                    p.twitter.site, p.twitter.card_type, p.twitter.title, p.twitter.description
                ),
                "### LinkedIn".to_string(),
                format!(
                    "{}\n{}\n{}",
                    p.linkedin.site_name, p.linkedin.title, p.linkedin.description
                ),
            ]
            .join("\n\n"),
        );

        parts.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::CategoryReport;
    use pretty_assertions::assert_eq;

    fn sample_report() -> AnalysisReport {
        AnalysisReport {
            url: "https://example.com/".to_string(),
            domain: "example.com".to_string(),
            validation: ValidationReport {
                title: CategoryReport {
                    status: Status::Warning,
                    messages: vec!["Title too short (3 chars). Recommended: 30-60 characters"
                        .to_string()],
                    deduction: 5,
                },
                overall_score: 95,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn failure_serializes_as_error_only() {
        let result = AnalysisResult::Failure {
            error: "Invalid URL format. Please enter a valid URL.".to_string(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": "Invalid URL format. Please enter a valid URL."})
        );
        assert!(!result.is_success());
        assert!(result.report().is_none());
    }

    #[test]
    fn success_serializes_without_error_key() {
        let result = AnalysisResult::Success(Box::new(sample_report()));
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["url"], "https://example.com/");
        assert_eq!(json["validation"]["overall_score"], 95);
        assert!(json.get("metadata").is_some());
        assert!(json.get("previews").is_some());
    }

    #[test]
    fn from_error_uses_user_message() {
        let result: AnalysisResult =
            Err::<AnalysisReport, _>(AnalyzeError::timeout("u", "Fetch", None)).into();
        assert_eq!(
            result.error(),
            Some("Request timed out. The website took too long to respond.")
        );
    }

    #[test]
    fn into_report_returns_success_payload() {
        let result: AnalysisResult = Ok::<_, AnalyzeError>(sample_report()).into();
        assert_eq!(result.into_report().unwrap().domain, "example.com");
    }

    #[test]
    fn format_markdown_includes_score_and_messages() {
        let md = sample_report().format_markdown();
        assert!(md.starts_with("# SEO report for https://example.com/"));
        assert!(md.contains("**Overall score: 95/100**"));
        assert!(md.contains("### [warn] Title"));
        assert!(md.contains("- Title too short (3 chars). Recommended: 30-60 characters"));
        assert!(md.contains("### Twitter"));
        assert!(md.contains("- Canonical: -"));
    }
}
