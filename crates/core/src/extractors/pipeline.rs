// ABOUTME: ExtractionPipeline runs strategies in a fixed priority order and returns the first valid URL.
// ABOUTME: Candidates that are blank or lack an http/https scheme are rejected and the next strategy runs.

//! Ordered strategy chain.
//!
//! Default order: meta tags, first `<video>` element, inline script pattern.
//! More structured signals come first. The pipeline holds no mutable state,
//! so one instance can be shared across threads.

use url::Url;

use super::{
    Document, MetaTagStrategy, ScriptPatternStrategy, Strategy, VideoTagStrategy,
};
use crate::result::{ExtractionResult, StrategyMatch};

/// Runs an ordered list of strategies over a document.
pub struct ExtractionPipeline {
    strategies: Vec<Box<dyn Strategy>>,
}

impl ExtractionPipeline {
    /// Pipeline with the default strategy order.
    pub fn new() -> Self {
        Self::with_strategies(vec![
            Box::new(MetaTagStrategy),
            Box::new(VideoTagStrategy),
            Box::new(ScriptPatternStrategy),
        ])
    }

    /// Pipeline with a caller-supplied strategy order.
    pub fn with_strategies(strategies: Vec<Box<dyn Strategy>>) -> Self {
        Self { strategies }
    }

    /// Names of the configured strategies, in the order they run.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Extract a media URL from raw page text.
    pub fn extract(&self, raw: &str) -> ExtractionResult {
        self.extract_match(raw).into()
    }

    /// Extract a media URL, reporting which strategy produced it.
    pub fn extract_match(&self, raw: &str) -> Option<StrategyMatch> {
        let doc = Document::parse(raw);
        self.extract_document_match(&doc)
    }

    /// Extract a media URL from an already parsed document.
    pub fn extract_document(&self, doc: &Document<'_>) -> ExtractionResult {
        self.extract_document_match(doc).into()
    }

    fn extract_document_match(&self, doc: &Document<'_>) -> Option<StrategyMatch> {
        for strategy in &self.strategies {
            let Some(candidate) = strategy.attempt(doc) else {
                continue;
            };
            match validate_candidate(&candidate) {
                Some(url) => {
                    tracing::debug!(strategy = strategy.name(), %url, "media url found");
                    return Some(StrategyMatch {
                        strategy: strategy.name(),
                        url,
                    });
                }
                None => {
                    tracing::debug!(
                        strategy = strategy.name(),
                        %candidate,
                        "candidate rejected"
                    );
                }
            }
        }
        tracing::debug!(bytes = doc.raw().len(), "no strategy matched");
        None
    }
}

impl std::fmt::Debug for ExtractionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionPipeline")
            .field("strategies", &self.strategy_names())
            .finish()
    }
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Accept a candidate only if it is a non-blank absolute http(s) URL.
///
/// The text must spell out `http://` or `https://`; the URL parser alone
/// would also accept forms like `http:host`.
///
/// Returns the trimmed candidate text, not the re-serialized `Url`, so the
/// caller gets exactly what the page published.
fn validate_candidate(candidate: &str) -> Option<String> {
    let trimmed = candidate.trim();
    if trimmed.is_empty() {
        return None;
    }
    if !has_absolute_http_prefix(trimmed) {
        return None;
    }
    let parsed = Url::parse(trimmed).ok()?;
    match parsed.scheme() {
        "http" | "https" if parsed.has_host() => Some(trimmed.to_string()),
        _ => None,
    }
}

fn has_absolute_http_prefix(text: &str) -> bool {
    ["http://", "https://"].iter().any(|prefix| {
        text.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}
