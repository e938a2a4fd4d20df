// ABOUTME: Resource fetching module that retrieves a single page over HTTP.
// ABOUTME: Maps transport failures onto the analyzer's error taxonomy and decodes the body charset.

use std::collections::HashMap;

use bytes::{Bytes, BytesMut};

use crate::error::AnalyzeError;
use crate::urls::validate_url;

/// Maximum allowed content length (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

/// Options for fetching a resource.
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub headers: HashMap<String, String>,
}

/// Result of a successful fetch operation.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    pub url: String,
    pub final_url: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchResult {
    /// Decode the body as text, using charset hints from the content-type header.
    pub fn text(&self) -> String {
        decode_body(&self.body, self.content_type.as_deref())
    }
}

/// Decode body bytes to a String using charset from content-type header or detection.
fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    if let Some(ct) = content_type {
        if let Some(charset) = extract_charset(ct) {
            if let Some(encoding) = encoding_rs::Encoding::for_label(charset.as_bytes()) {
                let (decoded, _, _) = encoding.decode(body);
                return decoded.into_owned();
            }
        }
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(body, true);
    let encoding = detector.guess(None, true);
    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}

/// Extract charset value from Content-Type header.
fn extract_charset(content_type: &str) -> Option<String> {
    let lower = content_type.to_lowercase();
    for part in lower.split(';') {
        let trimmed = part.trim();
        if let Some(charset) = trimmed.strip_prefix("charset=") {
            let charset = charset.trim_matches('"').trim_matches('\'');
            return Some(charset.to_string());
        }
    }
    None
}

/// Classify a reqwest transport error into the analyzer taxonomy.
fn classify_transport_error(url: &str, err: reqwest::Error) -> AnalyzeError {
    if err.is_timeout() {
        AnalyzeError::timeout(url, "Fetch", Some(anyhow::Error::new(err)))
    } else if err.is_connect() {
        AnalyzeError::connection(url, "Fetch", Some(anyhow::Error::new(err)))
    } else {
        AnalyzeError::unexpected(url, "Fetch", Some(anyhow::Error::new(err)))
    }
}

fn content_too_large(url: &str) -> AnalyzeError {
    AnalyzeError::unexpected(url, "Fetch", Some(anyhow::anyhow!("content too large")))
}

/// Fetch a resource from the given URL with a single GET request.
///
/// The timeout is owned by the client. No retries are attempted.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
    opts: &FetchOptions,
) -> Result<FetchResult, AnalyzeError> {
    fetch_with_limit(client, url, opts, MAX_CONTENT_LENGTH).await
}

async fn fetch_with_limit(
    client: &reqwest::Client,
    url: &str,
    opts: &FetchOptions,
    max_len: usize,
) -> Result<FetchResult, AnalyzeError> {
    validate_url(url, "Fetch")?;

    let mut request = client.get(url);
    for (key, value) in &opts.headers {
        request = request.header(key, value);
    }

    let mut response = request
        .send()
        .await
        .map_err(|e| classify_transport_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AnalyzeError::http_status(url, "Fetch", status.as_u16()));
    }

    // Check Content-Length header before reading body
    if let Some(len) = response.content_length() {
        if len > max_len as u64 {
            return Err(content_too_large(url));
        }
    }

    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_lowercase());

    let body = read_body(&mut response, url, max_len).await?;

    Ok(FetchResult {
        status: status.as_u16(),
        url: url.to_string(),
        final_url,
        content_type,
        body,
    })
}

/// Read the body chunk by chunk, failing as soon as it passes `max_len`.
///
/// Chunked responses carry no Content-Length, so the cap is enforced here.
async fn read_body(
    response: &mut reqwest::Response,
    url: &str,
    max_len: usize,
) -> Result<Bytes, AnalyzeError> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| classify_transport_error(url, e))?
    {
        if buf.len() + chunk.len() > max_len {
            return Err(content_too_large(url));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one chunked response without a Content-Length header.
    async fn serve_chunked(chunks: usize, chunk_len: usize) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 2048];
            let _ = socket.read(&mut request).await;
            let mut response = String::from(
                "HTTP/1.1 200 OK\r\ncontent-type: text/html\r\ntransfer-encoding: chunked\r\nconnection: close\r\n\r\n",
            );
            for _ in 0..chunks {
                response.push_str(&format!("{:x}\r\n{}\r\n", chunk_len, "x".repeat(chunk_len)));
            }
            response.push_str("0\r\n\r\n");
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });
        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn test_fetch_chunked_body_over_cap_is_rejected() {
        let url = serve_chunked(3, 10).await;
        let client = create_test_client(Duration::from_secs(5));
        let err = fetch_with_limit(&client, &url, &FetchOptions::default(), 16)
            .await
            .expect_err("body over the cap");
        assert!(err.is_unexpected());
        assert_eq!(
            err.user_message(),
            "An unexpected error occurred: content too large"
        );
    }

    #[tokio::test]
    async fn test_fetch_chunked_body_under_cap_is_read() {
        let url = serve_chunked(3, 10).await;
        let client = create_test_client(Duration::from_secs(5));
        let result = fetch_with_limit(&client, &url, &FetchOptions::default(), 64)
            .await
            .expect("body under the cap");
        assert_eq!(result.body.len(), 30);
        assert_eq!(result.text(), "x".repeat(30));
    }

    fn create_test_client(timeout: Duration) -> reqwest::Client {
        reqwest::Client::builder()
            .user_agent("test-agent")
            .timeout(timeout)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_ok_utf8() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/test");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body("<title>hello</title>");
        });

        let client = create_test_client(Duration::from_secs(5));
        let result = fetch(&client, &server.url("/test"), &FetchOptions::default()).await;
        mock.assert();

        let result = result.expect("fetch should succeed");
        assert_eq!(result.status, 200);
        assert_eq!(
            result.content_type.as_deref(),
            Some("text/html; charset=utf-8")
        );
        assert_eq!(result.text(), "<title>hello</title>");
    }

    #[tokio::test]
    async fn test_fetch_sends_custom_headers() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/headers")
                .header("accept-language", "en-US");
            then.status(200).body("ok");
        });

        let client = create_test_client(Duration::from_secs(5));
        let mut opts = FetchOptions::default();
        opts.headers
            .insert("Accept-Language".to_string(), "en-US".to_string());

        let result = fetch(&client, &server.url("/headers"), &opts).await;
        mock.assert();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_non_2xx_is_http_status_error() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404).body("not found");
        });

        let client = create_test_client(Duration::from_secs(5));
        let result = fetch(&client, &server.url("/missing"), &FetchOptions::default()).await;
        mock.assert();

        let err = result.expect_err("should fail on 404");
        assert_eq!(err.http_status_code(), Some(404));
        assert_eq!(err.user_message(), "HTTP error 404: Not Found");
    }

    #[tokio::test]
    async fn test_fetch_server_error_is_http_status_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/boom");
            then.status(500);
        });

        let client = create_test_client(Duration::from_secs(5));
        let err = fetch(&client, &server.url("/boom"), &FetchOptions::default())
            .await
            .expect_err("should fail on 500");
        assert_eq!(err.http_status_code(), Some(500));
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/slow");
            then.status(200).delay(Duration::from_secs(3)).body("late");
        });

        let client = create_test_client(Duration::from_millis(200));
        let err = fetch(&client, &server.url("/slow"), &FetchOptions::default())
            .await
            .expect_err("should time out");
        assert!(err.is_timeout(), "unexpected error: {}", err);
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let client = create_test_client(Duration::from_secs(5));
        let err = fetch(&client, "http://127.0.0.1:1/", &FetchOptions::default())
            .await
            .expect_err("nothing listens on port 1");
        assert!(err.is_connection(), "unexpected error: {}", err);
    }

    #[tokio::test]
    async fn test_fetch_rejects_invalid_url() {
        let client = create_test_client(Duration::from_secs(5));
        let err = fetch(&client, "https://", &FetchOptions::default())
            .await
            .expect_err("should reject");
        assert!(err.is_invalid_url());
    }

    #[test]
    fn test_max_content_length_constant() {
        assert_eq!(MAX_CONTENT_LENGTH, 10 * 1024 * 1024);
    }

    #[test]
    fn test_decode_iso_8859_1_with_chardetng() {
        // "café" in ISO-8859-1, no charset header
        let iso_bytes: &[u8] = &[0x63, 0x61, 0x66, 0xe9];
        let decoded = decode_body(iso_bytes, None);
        assert_eq!(decoded, "café");
    }

    #[test]
    fn test_decode_body_with_declared_charset() {
        let body: &[u8] = &[0x63, 0x61, 0x66, 0xe9];
        let decoded = decode_body(body, Some("text/html; charset=windows-1252"));
        assert_eq!(decoded, "café");
    }

    #[test]
    fn test_extract_charset() {
        assert_eq!(
            extract_charset("text/html; charset=utf-8"),
            Some("utf-8".to_string())
        );
        assert_eq!(
            extract_charset("text/html; charset=ISO-8859-1"),
            Some("iso-8859-1".to_string())
        );
        assert_eq!(
            extract_charset("text/html; charset=\"utf-8\""),
            Some("utf-8".to_string())
        );
        assert_eq!(extract_charset("text/html"), None);
    }
}
