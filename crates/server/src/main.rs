// ABOUTME: Entry point for the reelsnap HTTP server.
// ABOUTME: Parses command-line and environment configuration, initialises tracing and serves.

use std::net::IpAddr;
use std::time::Duration;

use clap::Parser;
use reelsnap_server::{RateLimitConfig, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "reelsnap-server")]
#[command(about = "HTTP API that extracts direct video URLs from Instagram reel pages")]
struct Args {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 4000)]
    port: u16,

    /// Requests allowed per client IP per window (0 disables limiting)
    #[arg(long, env = "REELSNAP_RATE_LIMIT", default_value_t = 20)]
    rate_limit: u32,

    /// Rate limit window length in seconds
    #[arg(long, env = "REELSNAP_RATE_WINDOW_SECS", default_value_t = 60)]
    rate_window_secs: u64,

    /// Upstream page fetch timeout in seconds
    #[arg(long, env = "REELSNAP_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "REELSNAP_LOG", default_value = "info")]
    log_level: String,
}

impl From<&Args> for ServerConfig {
    fn from(args: &Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            timeout: Duration::from_secs(args.timeout_secs),
            rate_limit: RateLimitConfig {
                max_requests: args.rate_limit,
                window: Duration::from_secs(args.rate_window_secs),
            },
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    reelsnap_server::serve(ServerConfig::from(&args)).await
}
