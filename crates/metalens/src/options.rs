// ABOUTME: Configuration options for the metalens analyzer: Options and AnalyzerBuilder.
// ABOUTME: AnalyzerBuilder provides a fluent API for constructing Analyzer instances with custom settings.

use std::collections::HashMap;
use std::time::Duration;

use crate::analyzer::Analyzer;

/// Desktop browser User-Agent sent with every request by default.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration options for the analyzer.
#[derive(Debug, Clone)]
pub struct Options {
    pub timeout: Duration,
    pub user_agent: String,
    pub http_client: Option<reqwest::Client>,
    pub headers: HashMap<String, String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            http_client: None,
            headers: HashMap::new(),
        }
    }
}

/// Builder for constructing Analyzer instances with custom configuration.
#[derive(Debug, Clone)]
pub struct AnalyzerBuilder {
    opts: Options,
}

impl AnalyzerBuilder {
    /// Create a new AnalyzerBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Use a custom HTTP client. Its own timeout and User-Agent take precedence.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Add a custom header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Build the Analyzer with the configured options.
    pub fn build(self) -> Analyzer {
        Analyzer::new(self.opts)
    }
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
