// ABOUTME: Media URL extraction strategies and the ordered pipeline that runs them.
// ABOUTME: Defines the Document wrapper and the Strategy trait shared by every strategy.

//! Media URL extraction.
//!
//! A [`Document`] is parsed once per invocation and handed to each
//! [`Strategy`] in turn by the [`ExtractionPipeline`]. Strategies are pure:
//! they read the document and return a candidate URL or `None`.
//!
//! Submodules:
//! - `meta`: OpenGraph `og:video` / `og:video:secure_url` meta tags.
//! - `video`: the `src` of the first `<video>` element.
//! - `script`: a `"video_url"` key inside inline script blobs.
//! - `pipeline`: ordering, candidate validation and short-circuiting.

pub mod meta;
pub mod pipeline;
pub mod script;
pub mod video;

use scraper::Html;

pub use meta::MetaTagStrategy;
pub use pipeline::ExtractionPipeline;
pub use script::ScriptPatternStrategy;
pub use video::VideoTagStrategy;

/// A fetched page, parsed once and shared by all strategies of one run.
///
/// Parsing never fails: plain text, truncated markup and garbage all yield a
/// (possibly empty) DOM.
pub struct Document<'a> {
    raw: &'a str,
    html: Html,
}

impl<'a> Document<'a> {
    /// Parse raw page text.
    pub fn parse(raw: &'a str) -> Self {
        Self {
            raw,
            html: Html::parse_document(raw),
        }
    }

    /// The original page text.
    pub fn raw(&self) -> &str {
        self.raw
    }

    /// The parsed DOM.
    pub fn html(&self) -> &Html {
        &self.html
    }
}

/// One extraction attempt with a uniform input/output contract.
pub trait Strategy: Send + Sync {
    /// Short stable identifier, used in logs and CLI output.
    fn name(&self) -> &'static str;

    /// Return a candidate media URL, or `None` when this strategy has nothing.
    ///
    /// Candidates are already trimmed and never empty. Scheme validation is
    /// left to the pipeline.
    fn attempt(&self, doc: &Document<'_>) -> Option<String>;
}

/// Trim a raw attribute or text value, treating blank values as absent.
pub(crate) fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
