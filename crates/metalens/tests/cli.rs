// ABOUTME: Integration tests for the metalens CLI binary.
// ABOUTME: Covers HTML file mode, fetch mode against a mock server, JSON envelopes, and exit codes.

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn metalens_cmd() -> Command {
    let mut cmd = Command::cargo_bin("metalens").unwrap();
    cmd.env_remove("METALENS_TIMEOUT_SECS")
        .env_remove("METALENS_USER_AGENT")
        .env_remove("RUST_LOG");
    cmd
}

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Test Page</title>
  <meta property="og:title" content="Shared Title">
</head>
<body><h1>Hello</h1></body>
</html>"#;

#[test]
fn analyze_html_from_file_as_markdown() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("page.html");
    fs::write(&html_path, PAGE).unwrap();

    metalens_cmd()
        .arg("--html")
        .arg(&html_path)
        .arg("--url")
        .arg("https://example.com/page")
        .assert()
        .success()
        .stdout(predicate::str::contains("# SEO report for https://example.com/page"))
        .stdout(predicate::str::contains("Overall score:"))
        .stdout(predicate::str::contains("Title too short (9 chars)"))
        .stdout(predicate::str::contains("Shared Title"));
}

#[test]
fn analyze_html_from_file_as_json() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("page.html");
    fs::write(&html_path, PAGE).unwrap();

    let output = metalens_cmd()
        .arg("--html")
        .arg(&html_path)
        .arg("--url")
        .arg("example.com/page")
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["url"], "https://example.com/page");
    assert_eq!(json["domain"], "example.com");
    assert_eq!(json["metadata"]["title"], "Test Page");
    assert_eq!(json["previews"]["facebook"]["title"], "Shared Title");
    assert!(json.get("error").is_none());
    assert!(json["analyzed_at"].is_string());
    assert!(json["processing_time_ms"].is_u64());
}

#[test]
fn html_mode_requires_url() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("page.html");
    fs::write(&html_path, PAGE).unwrap();

    metalens_cmd()
        .arg("--html")
        .arg(&html_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--url is required"));
}

#[test]
fn missing_html_file_fails() {
    metalens_cmd()
        .arg("--html")
        .arg("/nonexistent/page.html")
        .arg("--url")
        .arg("https://example.com")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error reading file"));
}

#[test]
fn empty_input_is_rejected() {
    metalens_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a URL to analyze"));

    metalens_cmd()
        .arg("   ")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a URL to analyze"));
}

#[test]
fn invalid_url_reports_error_json() {
    let output = metalens_cmd()
        .arg("-f")
        .arg("json")
        .arg("--compact")
        .arg("https://")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid URL format"))
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    assert_eq!(stdout.trim().lines().count(), 1);
    let json: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(json["error"], "Invalid URL format. Please enter a valid URL.");
    assert!(json.get("metadata").is_none());
}

#[test]
fn multiple_urls_produce_envelope() {
    let server = MockServer::start();

    let ok = server.mock(|when, then| {
        when.method(GET).path("/ok");
        then.status(200)
            .header("content-type", "text/html; charset=utf-8")
            .body(PAGE);
    });
    let missing = server.mock(|when, then| {
        when.method(GET).path("/missing");
        then.status(404);
    });

    let output = metalens_cmd()
        .arg("--format")
        .arg("json")
        .arg(server.url("/ok"))
        .arg(server.url("/missing"))
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    ok.assert();
    missing.assert();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["total"], 2);
    assert_eq!(json["succeeded"], 1);
    assert_eq!(json["failed"], 1);
    assert_eq!(json["analyses"][0]["metadata"]["title"], "Test Page");
    assert_eq!(json["analyses"][1]["error"], "HTTP error 404: Not Found");
}

#[test]
fn custom_user_agent_from_env() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/ua")
            .header("user-agent", "metalens-test/1.0");
        then.status(200).body(PAGE);
    });

    metalens_cmd()
        .env("METALENS_USER_AGENT", "metalens-test/1.0")
        .arg(server.url("/ua"))
        .assert()
        .success();

    mock.assert();
}

#[test]
fn output_file_and_timing() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/page");
        then.status(200).body(PAGE);
    });

    let temp_dir = TempDir::new().unwrap();
    let out_path = temp_dir.path().join("report.md");

    metalens_cmd()
        .arg("-o")
        .arg(&out_path)
        .arg("--timing")
        .arg(server.url("/page"))
        .assert()
        .success()
        .stderr(predicate::str::contains("elapsed:"));

    let written = fs::read_to_string(&out_path).unwrap();
    assert!(written.contains("## Previews"));
}
