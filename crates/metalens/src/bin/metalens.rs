// ABOUTME: CLI binary for the metalens SEO analyzer.
// ABOUTME: Analyzes URLs or local HTML files and prints markdown reports or JSON with timing metadata.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{ArgAction, Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use metalens::{analyze_html, AnalysisResult, Analyzer};

const EMPTY_INPUT_MESSAGE: &str = "Please enter a URL to analyze";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Markdown,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "metalens")]
#[command(about = "Audit the SEO meta tags of web pages and preview how they share")]
struct Args {
    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "markdown")]
    format: OutputFormat,

    /// Emit single-line JSON
    #[arg(long = "compact")]
    compact: bool,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// HTML file to analyze without fetching (requires --url)
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// URL the HTML file was served from (required with --html)
    #[arg(long = "url")]
    url: Option<String>,

    /// Print elapsed time in ms to stderr
    #[arg(long = "timing")]
    timing: bool,

    /// Request timeout in seconds
    #[arg(long = "timeout", env = "METALENS_TIMEOUT_SECS", default_value_t = 10)]
    timeout: u64,

    /// User-Agent header sent with each request
    #[arg(long = "user-agent", env = "METALENS_USER_AGENT")]
    user_agent: Option<String>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Log line encoding on stderr
    #[arg(long = "log-format", value_enum, default_value = "text")]
    log_format: LogFormat,

    /// URLs to analyze (fetch mode)
    #[arg()]
    urls: Vec<String>,
}

/// One analyzed target as written in JSON output.
#[derive(Debug, Serialize)]
struct Entry {
    input: String,
    #[serde(flatten)]
    result: AnalysisResult,
    analyzed_at: DateTime<Utc>,
    processing_time_ms: u64,
}

/// Wrapper used when more than one target was analyzed.
#[derive(Debug, Serialize)]
struct Envelope<'a> {
    analyses: &'a [Entry],
    total: usize,
    succeeded: usize,
    failed: usize,
}

fn init_logging(verbose: u8, format: LogFormat) -> anyhow::Result<()> {
    let default_filter = match verbose {
        0 => "warn",
        1 => "metalens=debug",
        _ => "debug",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr);

    match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

async fn analyze_target(analyzer: &Analyzer, input: &str) -> Entry {
    let analyzed_at = Utc::now();
    let start = Instant::now();
    let trimmed = input.trim();

    let result = if trimmed.is_empty() {
        AnalysisResult::Failure {
            error: EMPTY_INPUT_MESSAGE.to_string(),
        }
    } else {
        analyzer.analyze(trimmed).await
    };

    Entry {
        input: trimmed.to_string(),
        result,
        analyzed_at,
        processing_time_ms: elapsed_ms(start),
    }
}

fn analyze_file(path: &Path, url: &str) -> anyhow::Result<Entry> {
    let analyzed_at = Utc::now();
    let start = Instant::now();
    let html = fs::read_to_string(path)
        .with_context(|| format!("error reading file {}", path.display()))?;

    Ok(Entry {
        input: url.trim().to_string(),
        result: analyze_html(&html, url).into(),
        analyzed_at,
        processing_time_ms: elapsed_ms(start),
    })
}

fn render_markdown(entries: &[Entry]) -> String {
    entries
        .iter()
        .map(|entry| match &entry.result {
            AnalysisResult::Success(report) => report.format_markdown(),
            AnalysisResult::Failure { error } => {
                format!("# SEO report for {}\n\nError: {}", entry.input, error)
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

fn render_json(entries: &[Entry], compact: bool) -> anyhow::Result<String> {
    let value = if entries.len() == 1 {
        serde_json::to_value(&entries[0])?
    } else {
        let succeeded = entries.iter().filter(|e| e.result.is_success()).count();
        serde_json::to_value(Envelope {
            analyses: entries,
            total: entries.len(),
            succeeded,
            failed: entries.len() - succeeded,
        })?
    };

    let rendered = if compact {
        serde_json::to_string(&value)?
    } else {
        serde_json::to_string_pretty(&value)?
    };
    Ok(rendered)
}

async fn run(args: Args) -> anyhow::Result<bool> {
    let start = Instant::now();

    let entries = if let Some(html_path) = &args.html {
        let url = args
            .url
            .as_deref()
            .context("--url is required when using --html")?;
        vec![analyze_file(html_path, url)?]
    } else {
        let mut builder = Analyzer::builder().timeout(Duration::from_secs(args.timeout));
        if let Some(user_agent) = &args.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        let analyzer = builder.build();

        let mut entries = Vec::with_capacity(args.urls.len());
        for url in &args.urls {
            entries.push(analyze_target(&analyzer, url).await);
        }
        entries
    };

    let mut all_ok = true;
    for entry in &entries {
        if let Some(error) = entry.result.error() {
            eprintln!("error analyzing {}: {}", entry.input, error);
            all_ok = false;
        }
    }

    let output = match args.format {
        OutputFormat::Markdown => render_markdown(&entries),
        OutputFormat::Json => render_json(&entries, args.compact)?,
    };

    match &args.output {
        Some(path) => fs::write(path, &output)
            .with_context(|| format!("error writing to {}", path.display()))?,
        None => println!("{}", output),
    }

    if args.timing {
        let _ = writeln!(io::stderr(), "elapsed: {}ms", start.elapsed().as_millis());
    }

    Ok(all_ok)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if args.html.is_some() && !args.urls.is_empty() {
        eprintln!("error: cannot use both --html and positional URLs");
        return ExitCode::from(1);
    }

    if args.html.is_none() && args.urls.iter().all(|u| u.trim().is_empty()) {
        eprintln!("error: {}", EMPTY_INPUT_MESSAGE);
        return ExitCode::from(1);
    }

    if let Err(e) = init_logging(args.verbose, args.log_format) {
        eprintln!("warning: {:#}", e);
    }

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(1)
        }
    }
}
