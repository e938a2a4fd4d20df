// ABOUTME: URL utilities for normalizing user input and validating fetch targets.
// ABOUTME: Prepends a default scheme, enforces absolute http(s) URLs, and derives the display host.

use url::{Host, Url};

use crate::error::AnalyzeError;

/// Scheme prepended to input that does not carry one.
pub const DEFAULT_SCHEME: &str = "https";

/// Returns true if `input` starts with `<scheme>://`.
///
/// A scheme is an ASCII letter followed by letters, digits, `+`, `-` or `.`.
fn has_scheme(input: &str) -> bool {
    let Some((scheme, _)) = input.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
}

/// Trims the input and prepends `https://` when no scheme is present.
///
/// "example.com" -> "https://example.com", "http://a.b" is left alone.
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() || has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("{}://{}", DEFAULT_SCHEME, trimmed)
    }
}

/// Validates that `url` is an absolute http(s) URL with a host.
pub fn validate_url(url: &str, op: &str) -> Result<Url, AnalyzeError> {
    if url.is_empty() {
        return Err(AnalyzeError::invalid_url(
            url,
            op,
            Some(anyhow::anyhow!("empty URL")),
        ));
    }

    let parsed = Url::parse(url).map_err(|e| {
        AnalyzeError::invalid_url(url, op, Some(anyhow::anyhow!("malformed URL: {}", e)))
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(AnalyzeError::invalid_url(
            url,
            op,
            Some(anyhow::anyhow!("scheme must be http or https")),
        ));
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(parsed),
        _ => Err(AnalyzeError::invalid_url(
            url,
            op,
            Some(anyhow::anyhow!("URL has no host")),
        )),
    }
}

/// Host of `url` with its explicit port, the way it is shown on a link card.
///
/// Returns an empty string when `url` does not parse or has no host.
pub fn display_host(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return String::new();
    };
    let host = match parsed.host() {
        Some(Host::Domain(domain)) => unicode_domain(domain),
        Some(other) => other.to_string(),
        None => return String::new(),
    };
    match parsed.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    }
}

/// Decodes punycode labels for display; keeps the ASCII form if decoding fails.
fn unicode_domain(domain: &str) -> String {
    match idna::domain_to_unicode(domain) {
        (decoded, Ok(())) => decoded,
        (_, Err(_)) => domain.to_string(),
    }
}

/// Lower-cased host of `url`, used to key results by site.
pub fn domain_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
        .unwrap_or_default()
}
