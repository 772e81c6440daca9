// ABOUTME: ExtractionResult, the tagged outcome of running the extraction pipeline over a page.
// ABOUTME: StrategyMatch records which strategy produced a found URL.

use serde::{Deserialize, Serialize};

/// Outcome of one pipeline run.
///
/// `NotFound` is an ordinary outcome: the page was readable but no strategy
/// produced a usable media URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "url", rename_all = "snake_case")]
pub enum ExtractionResult {
    Found(String),
    NotFound,
}

impl ExtractionResult {
    /// Returns true if a media URL was found.
    pub fn is_found(&self) -> bool {
        matches!(self, ExtractionResult::Found(_))
    }

    /// Borrow the found URL, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            ExtractionResult::Found(url) => Some(url),
            ExtractionResult::NotFound => None,
        }
    }

    /// Consume the result, yielding the found URL, if any.
    pub fn into_url(self) -> Option<String> {
        match self {
            ExtractionResult::Found(url) => Some(url),
            ExtractionResult::NotFound => None,
        }
    }
}

impl From<Option<StrategyMatch>> for ExtractionResult {
    fn from(m: Option<StrategyMatch>) -> Self {
        match m {
            Some(m) => ExtractionResult::Found(m.url),
            None => ExtractionResult::NotFound,
        }
    }
}

/// A validated media URL together with the name of the strategy that found it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyMatch {
    pub strategy: &'static str,
    pub url: String,
}
