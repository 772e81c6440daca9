// ABOUTME: Inline script strategy: finds a "video_url" key serialized inside <script> JSON blobs.
// ABOUTME: Decodes the unicode-escaped ampersand that JSON serializers emit inside string values.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Selector;

use super::{non_empty, Document, Strategy};

static SCRIPT_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("script").unwrap());

/// `"video_url"` key followed by a quoted value starting with `https:`.
/// The value runs to the next quote or the end of the text.
static VIDEO_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""video_url"\s*:\s*"(https:[^"]*)"#).unwrap());

/// The only escape decoded in script values.
const ESCAPED_AMPERSAND: &str = "\\u0026";

/// Searches the concatenated text of all `<script>` elements for a
/// `"video_url":"https:..."` pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptPatternStrategy;

impl ScriptPatternStrategy {
    /// Find the first `video_url` value in a blob of script text.
    pub fn find_in_text(text: &str) -> Option<String> {
        let caps = VIDEO_URL_RE.captures(text)?;
        let value = caps.get(1)?.as_str().replace(ESCAPED_AMPERSAND, "&");
        non_empty(&value)
    }
}

/// Text of every `<script>` element in document order, joined by newlines.
fn script_text(doc: &Document<'_>) -> String {
    doc.html()
        .select(&SCRIPT_SELECTOR)
        .map(|el| el.text().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

impl Strategy for ScriptPatternStrategy {
    fn name(&self) -> &'static str {
        "script"
    }

    fn attempt(&self, doc: &Document<'_>) -> Option<String> {
        Self::find_in_text(&script_text(doc))
    }
}
