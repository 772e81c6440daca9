// ABOUTME: CLI binary for reelsnap.
// ABOUTME: Fetches reel URLs or reads a saved HTML page and prints the extracted media URL.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use reelsnap_core::resource::decode_body;
use reelsnap_core::{Client, ParseError, StrategyMatch};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

const NOT_FOUND_MESSAGE: &str = "video url not found - instagram may block or changed markup";

#[derive(Parser, Debug)]
#[command(name = "reelsnap")]
#[command(about = "Extract the direct video URL from Instagram reel and post pages")]
struct Args {
    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Output JSON records instead of bare URLs
    #[arg(long = "json")]
    json_output: bool,

    /// Saved HTML page to extract from instead of fetching
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// Print elapsed time in ms to stderr
    #[arg(long = "timing")]
    timing: bool,

    /// Allow fetching from private/local networks
    #[arg(long = "allow-private-networks")]
    allow_private_networks: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long = "log-level", default_value = "warn")]
    log_level: String,

    /// Reel or post URLs to fetch
    #[arg()]
    urls: Vec<String>,
}

/// One line of output, also the JSON record shape.
#[derive(Debug, Serialize)]
struct Record {
    target: String,
    video_url: Option<String>,
    strategy: Option<&'static str>,
    error: Option<String>,
}

impl Record {
    fn from_outcome(target: String, outcome: Result<Option<StrategyMatch>, ParseError>) -> Self {
        match outcome {
            Ok(Some(m)) => Self {
                target,
                video_url: Some(m.url),
                strategy: Some(m.strategy),
                error: None,
            },
            Ok(None) => Self::failed(target, NOT_FOUND_MESSAGE.to_string()),
            Err(e) => Self::failed(target, e.to_string()),
        }
    }

    fn failed(target: String, error: String) -> Self {
        Self {
            target,
            video_url: None,
            strategy: None,
            error: Some(error),
        }
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn format_output(records: &[Record], json_output: bool) -> Result<String, serde_json::Error> {
    if json_output {
        if records.len() == 1 {
            serde_json::to_string_pretty(&records[0])
        } else {
            serde_json::to_string_pretty(records)
        }
    } else {
        Ok(records
            .iter()
            .filter_map(|r| r.video_url.as_deref())
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(&args.log_level);

    if args.html.is_none() && args.urls.is_empty() {
        eprintln!("error: at least one URL is required, or use --html");
        return ExitCode::from(1);
    }

    if args.html.is_some() && !args.urls.is_empty() {
        eprintln!("error: cannot use both --html and positional URLs");
        return ExitCode::from(1);
    }

    let client = match Client::builder()
        .allow_private_networks(args.allow_private_networks)
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(1);
        }
    };

    let start = Instant::now();
    let records: Vec<Record> = if let Some(html_path) = &args.html {
        let target = html_path.display().to_string();
        match fs::read(html_path) {
            Ok(bytes) => {
                let page = decode_body(&bytes, None);
                vec![Record::from_outcome(
                    target,
                    Ok(client.pipeline().extract_match(&page)),
                )]
            }
            Err(e) => vec![Record::failed(
                target,
                format!("error reading file {:?}: {}", html_path, e),
            )],
        }
    } else {
        let lookups = args.urls.iter().map(|url| {
            let client = &client;
            async move {
                let outcome = client.fetch_video_match(url).await;
                Record::from_outcome(url.clone(), outcome)
            }
        });
        futures::future::join_all(lookups).await
    };
    let elapsed = start.elapsed();

    let mut had_error = false;
    for record in &records {
        if let Some(error) = &record.error {
            eprintln!("error: {}: {}", record.target, error);
            had_error = true;
        }
    }

    match format_output(&records, args.json_output) {
        Ok(output_str) if !output_str.is_empty() => {
            if let Some(output_path) = &args.output {
                if let Err(e) = fs::write(output_path, &output_str) {
                    eprintln!("error writing to {:?}: {}", output_path, e);
                    had_error = true;
                }
            } else {
                println!("{}", output_str);
            }
        }
        Ok(_) => {}
        Err(e) => {
            eprintln!("error encoding output: {}", e);
            had_error = true;
        }
    }

    if args.timing {
        let _ = writeln!(io::stderr(), "elapsed: {}ms", elapsed.as_millis());
    }

    if had_error {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
