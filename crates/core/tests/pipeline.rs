// ABOUTME: Integration tests for the extraction pipeline over realistic and hostile page markup.
// ABOUTME: Covers strategy priority, escape decoding, garbage input, idempotence and concurrent use.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use reelsnap_core::{ExtractionPipeline, ExtractionResult, StrategyMatch};

fn found(url: &str) -> ExtractionResult {
    ExtractionResult::Found(url.to_string())
}

const FULL_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta property="og:type" content="video">
<meta property="og:video:secure_url" content="https://scontent.cdninstagram.com/v/secure.mp4">
<meta property="og:video" content="https://scontent.cdninstagram.com/v/t50/reel.mp4?_nc_ht=x&amp;oh=00_AbC">
<title>Instagram</title>
</head>
<body>
<video src="https://scontent.cdninstagram.com/v/element.mp4"></video>
<script type="application/json">{"video_url":"https://scontent.cdninstagram.com/v/script.mp4"}</script>
</body>
</html>"#;

#[test]
fn og_video_wins_and_is_returned_verbatim() {
    assert_eq!(
        ExtractionPipeline::new().extract(FULL_PAGE),
        found("https://scontent.cdninstagram.com/v/t50/reel.mp4?_nc_ht=x&oh=00_AbC")
    );
}

#[test]
fn secure_url_used_when_og_video_absent() {
    let html = r#"<head><meta property="og:video:secure_url" content="https://cdn.example.com/s.mp4"></head>
        <body><video src="https://cdn.example.com/element.mp4"></video></body>"#;
    assert_eq!(
        ExtractionPipeline::new().extract_match(html),
        Some(StrategyMatch {
            strategy: "meta",
            url: "https://cdn.example.com/s.mp4".to_string(),
        })
    );
}

#[test]
fn video_element_fallback() {
    let html = r#"<html><body><div><video playsinline src="https://cdn.example.com/v.mp4"></video></div></body></html>"#;
    assert_eq!(
        ExtractionPipeline::new().extract(html),
        found("https://cdn.example.com/v.mp4")
    );
}

#[test]
fn script_pattern_decodes_ampersand_escape() {
    let html = r#"<html><body><script type="text/javascript">window._sharedData = {"entry_data":{"PostPage":[{"graphql":{"shortcode_media":{"is_video":true,"video_url":"https://example.com/x\u0026y"}}}]}};</script></body></html>"#;
    assert_eq!(
        ExtractionPipeline::new().extract_match(html),
        Some(StrategyMatch {
            strategy: "script",
            url: "https://example.com/x&y".to_string(),
        })
    );
}

#[test]
fn empty_and_unrelated_input_is_not_found() {
    let pipeline = ExtractionPipeline::new();
    for input in [
        "",
        "   \n\t",
        "just some plain text, no markup at all",
        "<html><head><title>Login</title></head><body><form></form></body></html>",
        r#"<meta property="og:image" content="https://cdn.example.com/thumb.jpg">"#,
        r#"<script>{"display_url":"https://cdn.example.com/thumb.jpg"}</script>"#,
        r#"<meta property="og:video" content="http:foo">"#,
        r#"<video src="https:cdn.example.com"></video>"#,
    ] {
        assert_eq!(pipeline.extract(input), ExtractionResult::NotFound, "input: {:?}", input);
    }
}

#[test]
fn garbage_and_truncated_input_never_panics() {
    let pipeline = ExtractionPipeline::new();
    let lossy = String::from_utf8_lossy(&[0x3c, 0xff, 0x76, 0x69, 0xfe, 0x64, 0x65, 0x6f, 0x00, 0x3e]);
    let inputs = [
        lossy.into_owned(),
        "<<<>>><//><video src=".to_string(),
        "<meta property=\"og:video\" content=\"https://cdn.exa".to_string(),
        "<script>{\"video_url\":\"https:".to_string(),
        "\u{0}\u{1}\u{fffd}<video".repeat(100),
        "<div>".repeat(1_000),
    ];
    for input in &inputs {
        let _ = pipeline.extract(input);
    }
}

#[test]
fn truncated_script_value_still_matches() {
    assert_eq!(
        ExtractionPipeline::new().extract(r#"<script>{"video_url":"https://cdn.example.com/cut"#),
        found("https://cdn.example.com/cut")
    );
}

#[test]
fn extraction_is_idempotent() {
    let pipeline = ExtractionPipeline::new();
    let first = pipeline.extract(FULL_PAGE);
    for _ in 0..5 {
        assert_eq!(pipeline.extract(FULL_PAGE), first);
    }
}

#[test]
fn concurrent_extraction_matches_sequential() {
    let pipeline = Arc::new(ExtractionPipeline::new());
    let pages = vec![
        FULL_PAGE.to_string(),
        r#"<video src="https://cdn.example.com/v.mp4"></video>"#.to_string(),
        r#"<script>{"video_url":"https://example.com/a\u0026b"}</script>"#.to_string(),
        "<p>nothing here</p>".to_string(),
    ];
    let sequential: Vec<ExtractionResult> = pages.iter().map(|p| pipeline.extract(p)).collect();

    let concurrent: Vec<ExtractionResult> = std::thread::scope(|scope| {
        let handles: Vec<_> = pages
            .iter()
            .map(|page| {
                let pipeline = Arc::clone(&pipeline);
                scope.spawn(move || pipeline.extract(page))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(concurrent, sequential);
    assert_eq!(sequential[2], found("https://example.com/a&b"));
    assert_eq!(sequential[3], ExtractionResult::NotFound);
}
