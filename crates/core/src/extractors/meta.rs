// ABOUTME: OpenGraph video meta tag strategy (og:video, then og:video:secure_url).
// ABOUTME: Highest-priority strategy since page authors publish these tags to describe embeddable media.

use once_cell::sync::Lazy;
use scraper::Selector;

use super::{non_empty, Document, Strategy};

/// Video meta tag selectors in priority order.
static VIDEO_META_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    [
        r#"meta[property="og:video"]"#,
        r#"meta[property="og:video:secure_url"]"#,
    ]
    .iter()
    .map(|s| Selector::parse(s).unwrap())
    .collect()
});

/// Reads the `content` of the `og:video` meta tag, falling back to
/// `og:video:secure_url`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetaTagStrategy;

impl Strategy for MetaTagStrategy {
    fn name(&self) -> &'static str {
        "meta"
    }

    fn attempt(&self, doc: &Document<'_>) -> Option<String> {
        VIDEO_META_SELECTORS.iter().find_map(|sel| {
            doc.html()
                .select(sel)
                .find_map(|el| el.value().attr("content").and_then(non_empty))
        })
    }
}
