// ABOUTME: Runtime configuration for the reelsnap server.
// ABOUTME: Holds the listen address, upstream timeout and rate limit budget.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Requests admitted per client IP per window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 20,
            window: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Budget for one upstream page fetch.
    pub timeout: Duration,
    pub rate_limit: RateLimitConfig,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 4000,
            timeout: Duration::from_secs(30),
            rate_limit: RateLimitConfig::default(),
        }
    }
}
