// ABOUTME: The Analyzer struct that fetches a page and runs extraction, validation and previews.
// ABOUTME: Also exposes the pure analyze_document pipeline used for already-fetched HTML.

use tracing::{debug, info, warn};

use crate::error::AnalyzeError;
use crate::extractors::extract_metadata;
use crate::options::{AnalyzerBuilder, Options};
use crate::previews::generate_previews;
use crate::resource::{fetch, FetchOptions};
use crate::result::{AnalysisReport, AnalysisResult};
use crate::urls::{domain_of, normalize_url, validate_url};
use crate::validation::validate;

/// Run extraction, validation and preview generation on fetched HTML.
///
/// Pure: the same `html` and `url` always produce the same report.
pub fn analyze_document(html: &str, url: &str) -> AnalysisReport {
    let metadata = extract_metadata(html);
    let validation = validate(&metadata);
    let previews = generate_previews(&metadata, url);
    debug!(
        title = %metadata.title,
        h1 = metadata.h1_tags.len(),
        images = metadata.total_images,
        "extracted metadata"
    );

    AnalysisReport {
        url: url.to_string(),
        domain: domain_of(url),
        metadata,
        validation,
        previews,
    }
}

/// Analyze HTML that was obtained elsewhere, using `url` as its source.
///
/// The URL is normalized and validated exactly as for a fetch.
pub fn analyze_html(html: &str, url: &str) -> Result<AnalysisReport, AnalyzeError> {
    let url = normalize_url(url);
    validate_url(&url, "AnalyzeHtml")?;
    Ok(analyze_document(html, &url))
}

/// Fetches pages and analyzes them.
///
/// Holds only an immutable HTTP client, so one instance can serve
/// concurrent calls.
pub struct Analyzer {
    opts: Options,
    http_client: reqwest::Client,
}

impl Analyzer {
    /// Create a new AnalyzerBuilder for configuring the analyzer.
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Create a new Analyzer with the given options.
    pub fn new(opts: Options) -> Self {
        let http_client = opts.http_client.clone().unwrap_or_else(|| {
            reqwest::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .expect("failed to build HTTP client")
        });

        Self { opts, http_client }
    }

    /// Analyze the page at `url`, folding any failure into the result.
    ///
    /// Never returns an error: a failed analysis carries a user-facing
    /// message and no metadata.
    pub async fn analyze(&self, url: &str) -> AnalysisResult {
        self.try_analyze(url).await.into()
    }

    /// Analyze the page at `url`, returning a typed error on failure.
    ///
    /// Input is trimmed and given an `https://` scheme when it has none.
    #[tracing::instrument(skip(self), fields(normalized = tracing::field::Empty))]
    pub async fn try_analyze(&self, url: &str) -> Result<AnalysisReport, AnalyzeError> {
        let normalized = normalize_url(url);
        tracing::Span::current().record("normalized", normalized.as_str());

        if let Err(err) = validate_url(&normalized, "Analyze") {
            warn!(error = %err, "rejected URL");
            return Err(err);
        }

        let fetch_opts = FetchOptions {
            headers: self.opts.headers.clone(),
        };

        debug!("fetching page");
        let fetched = match fetch(&self.http_client, &normalized, &fetch_opts).await {
            Ok(fetched) => fetched,
            Err(err) => {
                warn!(error = %err, "fetch failed");
                return Err(err);
            }
        };
        debug!(
            status = fetched.status,
            final_url = %fetched.final_url,
            bytes = fetched.body.len(),
            "fetched page"
        );

        let html = fetched.text();
        let report = analyze_document(&html, &normalized);
        info!(
            score = report.validation.overall_score,
            "analysis complete"
        );
        Ok(report)
    }
}
