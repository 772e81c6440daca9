// ABOUTME: Configuration options for the reelsnap client: Options and the fluent ClientBuilder.
// ABOUTME: Defaults mimic a desktop browser so the page is served with its usual markup.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::client::Client;
use crate::error::ParseError;
use crate::extractors::ExtractionPipeline;

/// Desktop Chrome user agent sent with every page request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115 Safari/537.36";

/// Accept-Language sent with every page request.
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Configuration options for the reelsnap client.
#[derive(Clone)]
pub struct Options {
    pub timeout: Duration,
    pub user_agent: String,
    pub allow_private_networks: bool,
    pub http_client: Option<reqwest::Client>,
    pub headers: HashMap<String, String>,
    pub pipeline: Option<Arc<ExtractionPipeline>>,
}

impl Default for Options {
    fn default() -> Self {
        let mut headers = HashMap::new();
        headers.insert(
            "Accept-Language".to_string(),
            DEFAULT_ACCEPT_LANGUAGE.to_string(),
        );
        Self {
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            allow_private_networks: false,
            http_client: None,
            headers,
            pipeline: None,
        }
    }
}

impl std::fmt::Debug for Options {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Options")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("allow_private_networks", &self.allow_private_networks)
            .field("http_client", &self.http_client.is_some())
            .field("headers", &self.headers)
            .field(
                "pipeline",
                &self.pipeline.as_ref().map(|p| p.strategy_names()),
            )
            .finish()
    }
}

/// Builder for constructing Client instances with custom configuration.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    opts: Options,
}

impl ClientBuilder {
    /// Create a new ClientBuilder with default options.
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

    /// Allow or disallow requests to private networks.
    pub fn allow_private_networks(mut self, allow: bool) -> Self {
        self.opts.allow_private_networks = allow;
        self
    }

    /// Use a custom HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Add a custom header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Use a custom extraction pipeline instead of the default strategy order.
    pub fn pipeline(mut self, pipeline: ExtractionPipeline) -> Self {
        self.opts.pipeline = Some(Arc::new(pipeline));
        self
    }

    /// Build the Client with the configured options.
    pub fn build(self) -> Result<Client, ParseError> {
        Client::new(self.opts)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
