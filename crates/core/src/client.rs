// ABOUTME: The main Client struct for reelsnap: validates a page URL, fetches it, and runs the extraction pipeline.
// ABOUTME: Provides async fetch_video() for URLs and a synchronous extract_html() for already downloaded markup.

use std::collections::HashMap;
use std::net::ToSocketAddrs;
use std::sync::Arc;

use crate::error::ParseError;
use crate::extractors::ExtractionPipeline;
use crate::options::{ClientBuilder, Options};
use crate::resource::{fetch, FetchOptions};
use crate::result::{ExtractionResult, StrategyMatch};
use crate::target::validate_target_url;

/// Fetches reel pages and extracts the direct media URL.
///
/// Cheap to clone; clones share the HTTP connection pool and pipeline.
#[derive(Debug, Clone)]
pub struct Client {
    opts: Options,
    http_client: reqwest::Client,
    pipeline: Arc<ExtractionPipeline>,
}

/// Redirect policy that refuses hops onto private addresses.
fn redirect_policy(allow_private: bool) -> reqwest::redirect::Policy {
    reqwest::redirect::Policy::custom(move |attempt| {
        if attempt.previous().len() >= 10 {
            return attempt.error("too many redirects");
        }
        if allow_private {
            return attempt.follow();
        }
        let next = attempt.url().clone();
        let Some(host) = next.host_str() else {
            return attempt.follow();
        };
        let bare = host.trim_start_matches('[').trim_end_matches(']');
        if let Ok(ip) = bare.parse::<std::net::IpAddr>() {
            if crate::resource::is_private_ip(&ip) {
                return attempt.error("redirect to private IP blocked");
            }
            return attempt.follow();
        }
        // synchronous DNS resolution to avoid async in redirect policy
        let port = next.port_or_known_default().unwrap_or(80);
        match (host, port).to_socket_addrs() {
            Ok(addrs) => {
                for sa in addrs {
                    if crate::resource::is_private_ip(&sa.ip()) {
                        return attempt.error("redirect to private IP blocked");
                    }
                }
                attempt.follow()
            }
            Err(_) => attempt.error("DNS lookup failed during redirect"),
        }
    })
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Client with the given options.
    pub fn new(opts: Options) -> Result<Self, ParseError> {
        let http_client = match opts.http_client.clone() {
            Some(client) => client,
            None => reqwest::Client::builder()
                .redirect(redirect_policy(opts.allow_private_networks))
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .cookie_store(true)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .map_err(|e| {
                    ParseError::internal(
                        "",
                        "Build",
                        Some(anyhow::anyhow!("failed to build HTTP client: {}", e)),
                    )
                })?,
        };

        let pipeline = opts
            .pipeline
            .clone()
            .unwrap_or_else(|| Arc::new(ExtractionPipeline::new()));

        Ok(Self {
            opts,
            http_client,
            pipeline,
        })
    }

    /// The options this client was built with.
    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// The extraction pipeline this client runs.
    pub fn pipeline(&self) -> &ExtractionPipeline {
        &self.pipeline
    }

    /// Fetch a reel or post page and extract its media URL.
    ///
    /// Validation errors are returned before any network activity. A page
    /// that was retrieved but exposes no media URL is `Ok(NotFound)`.
    pub async fn fetch_video(&self, url: &str) -> Result<ExtractionResult, ParseError> {
        Ok(self.fetch_video_match(url).await?.into())
    }

    /// Like [`Client::fetch_video`], but also reports which strategy matched.
    pub async fn fetch_video_match(&self, url: &str) -> Result<Option<StrategyMatch>, ParseError> {
        let target = validate_target_url(url)?;

        let fetch_opts = FetchOptions {
            headers: self.request_headers(),
            allow_private_networks: self.opts.allow_private_networks,
            parse_non_200: false,
        };
        let fetched = fetch(&self.http_client, target.as_str(), &fetch_opts).await?;
        let page = fetched.text_utf8(None);

        // Html is !Send, so parsing and matching stay on a blocking thread.
        let pipeline = Arc::clone(&self.pipeline);
        let found = tokio::task::spawn_blocking(move || pipeline.extract_match(&page))
            .await
            .map_err(|e| {
                ParseError::internal(
                    url,
                    "Extract",
                    Some(anyhow::anyhow!("extraction task failed: {}", e)),
                )
            })?;

        match &found {
            Some(m) => tracing::info!(%url, strategy = m.strategy, "media url extracted"),
            None => tracing::info!(%url, "no media url on page"),
        }
        Ok(found)
    }

    /// Run the extraction pipeline over markup that was obtained elsewhere.
    pub fn extract_html(&self, html: &str) -> ExtractionResult {
        self.pipeline.extract(html)
    }

    /// Headers for a page request: the user agent first, then configured headers.
    ///
    /// The user agent travels per request so a caller-supplied http client
    /// still identifies as a browser.
    fn request_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::with_capacity(self.opts.headers.len() + 1);
        headers.insert("User-Agent".to_string(), self.opts.user_agent.clone());
        for (key, value) in &self.opts.headers {
            if key.eq_ignore_ascii_case("user-agent") {
                headers.remove("User-Agent");
            }
            headers.insert(key.clone(), value.clone());
        }
        headers
    }
}
