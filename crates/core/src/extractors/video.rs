// ABOUTME: Media element strategy: the src attribute of the first <video> element.
// ABOUTME: Only the first element in document order is consulted.

use once_cell::sync::Lazy;
use scraper::Selector;

use super::{non_empty, Document, Strategy};

static VIDEO_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("video").unwrap());

/// Reads the `src` attribute of the first `<video>` element.
#[derive(Debug, Clone, Copy, Default)]
pub struct VideoTagStrategy;

impl Strategy for VideoTagStrategy {
    fn name(&self) -> &'static str {
        "video"
    }

    fn attempt(&self, doc: &Document<'_>) -> Option<String> {
        let video = doc.html().select(&VIDEO_SELECTOR).next()?;
        video.value().attr("src").and_then(non_empty)
    }
}
