// ABOUTME: Error types for the metalens analyzer including ErrorCode enum and AnalyzeError struct.
// ABOUTME: Provides categorized fetch errors with convenience constructors, predicates, and user-facing messages.

use std::fmt;

/// Reason shown for status codes without a registered reason phrase.
pub const UNKNOWN_STATUS_REASON: &str = "Unknown Status";

/// Error codes representing the different ways an analysis can fail.
///
/// Only fetching and URL checking can fail; extraction, validation and
/// preview generation always produce a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidUrl,
    Timeout,
    ConnectionFailure,
    HttpStatus(u16),
    Unexpected,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::InvalidUrl => write!(f, "invalid URL"),
            ErrorCode::Timeout => write!(f, "timeout"),
            ErrorCode::ConnectionFailure => write!(f, "connection failure"),
            ErrorCode::HttpStatus(code) => write!(f, "HTTP status {}", code),
            ErrorCode::Unexpected => write!(f, "unexpected failure"),
        }
    }
}

/// The main error type for analysis operations.
#[derive(Debug, thiserror::Error)]
pub struct AnalyzeError {
    pub code: ErrorCode,
    pub url: String,
    pub op: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "metalens: {} {}: {}", self.op, self.url, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

impl AnalyzeError {
    fn new(
        code: ErrorCode,
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code,
            url: url.into(),
            op: op.into(),
            source,
        }
    }

    /// Create an InvalidUrl error.
    pub fn invalid_url(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::InvalidUrl, url, op, source)
    }

    /// Create a Timeout error.
    pub fn timeout(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::Timeout, url, op, source)
    }

    /// Create a ConnectionFailure error.
    pub fn connection(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::ConnectionFailure, url, op, source)
    }

    /// Create an HttpStatus error for a non-2xx response.
    pub fn http_status(url: impl Into<String>, op: impl Into<String>, status: u16) -> Self {
        Self::new(ErrorCode::HttpStatus(status), url, op, None)
    }

    /// Create an Unexpected error.
    pub fn unexpected(
        url: impl Into<String>,
        op: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self::new(ErrorCode::Unexpected, url, op, source)
    }

    /// Returns true if this is an InvalidUrl error.
    pub fn is_invalid_url(&self) -> bool {
        self.code == ErrorCode::InvalidUrl
    }

    /// Returns true if this is a Timeout error.
    pub fn is_timeout(&self) -> bool {
        self.code == ErrorCode::Timeout
    }

    /// Returns true if this is a ConnectionFailure error.
    pub fn is_connection(&self) -> bool {
        self.code == ErrorCode::ConnectionFailure
    }

    /// Returns the status code if this is an HttpStatus error.
    pub fn http_status_code(&self) -> Option<u16> {
        match self.code {
            ErrorCode::HttpStatus(code) => Some(code),
            _ => None,
        }
    }

    /// Returns true if this is an Unexpected error.
    pub fn is_unexpected(&self) -> bool {
        self.code == ErrorCode::Unexpected
    }

    /// The message shown to an end user in place of the analysis.
    pub fn user_message(&self) -> String {
        match self.code {
            ErrorCode::InvalidUrl => "Invalid URL format. Please enter a valid URL.".to_string(),
            ErrorCode::Timeout => {
                "Request timed out. The website took too long to respond.".to_string()
            }
            ErrorCode::ConnectionFailure => {
                "Could not connect to the website. Please check the URL and try again.".to_string()
            }
            ErrorCode::HttpStatus(code) => {
                let reason = reqwest::StatusCode::from_u16(code)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or(UNKNOWN_STATUS_REASON);
                format!("HTTP error {}: {}", code, reason)
            }
            ErrorCode::Unexpected => {
                let detail = self
                    .source
                    .as_ref()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| self.code.to_string());
                format!("An unexpected error occurred: {}", detail)
            }
        }
    }
}
