// ABOUTME: Main library entry point for the metalens SEO meta-tag analyzer.
// ABOUTME: Re-exports the public API: Analyzer, AnalyzerBuilder, AnalysisResult, AnalysisReport, AnalyzeError, ErrorCode.

//! Metalens - fetches a web page and audits its SEO metadata.
//!
//! A single analysis fetches the page, extracts title, meta, Open Graph and
//! Twitter Card tags plus heading and image statistics, scores them against
//! fixed heuristics, and renders approximate link previews for Google,
//! Facebook, Twitter and LinkedIn.
//!
//! # Example
//!
//! ```no_run
//! use metalens::Analyzer;
//!
//! #[tokio::main]
//! async fn main() {
//!     let analyzer = Analyzer::builder().build();
//!     match analyzer.analyze("example.com").await.report() {
//!         Some(report) => println!("{}", report.format_markdown()),
//!         None => eprintln!("analysis failed"),
//!     }
//! }
//! ```

pub mod analyzer;
pub mod error;
pub mod extractors;
pub mod metadata;
pub mod options;
pub mod previews;
pub mod resource;
pub mod result;
pub mod text;
pub mod urls;
pub mod validation;

pub use crate::analyzer::{analyze_document, analyze_html, Analyzer};
pub use crate::error::{AnalyzeError, ErrorCode};
pub use crate::extractors::extract_metadata;
pub use crate::metadata::MetadataRecord;
pub use crate::options::{AnalyzerBuilder, Options};
pub use crate::previews::{generate_previews, PreviewSet};
pub use crate::result::{AnalysisReport, AnalysisResult};
pub use crate::validation::{validate, Category, CategoryReport, Status, ValidationReport};
