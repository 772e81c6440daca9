// ABOUTME: Integration tests for the reelsnap CLI binary.
// ABOUTME: Tests saved-page extraction, JSON and file output, and rejection of unsupported URLs.

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use httpmock::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn reelsnap_cmd() -> Command {
    Command::cargo_bin("reelsnap").unwrap()
}

const REEL_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta property="og:title" content="A reel">
<meta property="og:video" content="https://cdn.example.com/reel.mp4?efg=1&amp;oh=2">
</head>
<body><video src="https://cdn.example.com/other.mp4"></video></body>
</html>"#;

#[test]
fn extract_from_html_file() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("reel.html");
    fs::write(&html_path, REEL_PAGE).unwrap();

    reelsnap_cmd()
        .arg("--html")
        .arg(&html_path)
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "https://cdn.example.com/reel.mp4?efg=1&oh=2\n",
        ));
}

#[test]
fn page_without_video_fails() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("login.html");
    fs::write(&html_path, "<html><body><p>Log in to continue</p></body></html>").unwrap();

    reelsnap_cmd()
        .arg("--html")
        .arg(&html_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("video url not found"));
}

#[test]
fn non_utf8_file_is_decoded() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("latin1.html");
    let mut bytes = b"<html><head><title>caf".to_vec();
    bytes.push(0xe9);
    bytes.extend_from_slice(
        br#"</title></head><body><video src="https://cdn.example.com/latin.mp4"></video></body></html>"#,
    );
    fs::write(&html_path, bytes).unwrap();

    reelsnap_cmd()
        .arg("--html")
        .arg(&html_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("https://cdn.example.com/latin.mp4"));
}

#[test]
fn json_output_names_strategy() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("reel.html");
    fs::write(&html_path, REEL_PAGE).unwrap();

    let output = reelsnap_cmd()
        .arg("--html")
        .arg(&html_path)
        .arg("--json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let record: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(
        record["video_url"],
        "https://cdn.example.com/reel.mp4?efg=1&oh=2"
    );
    assert_eq!(record["strategy"], "meta");
    assert!(record["error"].is_null());
}

#[test]
fn unsupported_urls_fail_without_fetching() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.any_request();
        then.status(200).body(REEL_PAGE);
    });

    let output = reelsnap_cmd()
        .arg("--allow-private-networks")
        .arg("--json")
        .arg(server.url("/reel/one/"))
        .arg("https://example.com/reel/two/")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported host"))
        .get_output()
        .stdout
        .clone();

    assert_eq!(mock.hits(), 0);

    let records: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let records = records.as_array().expect("multiple targets print an array");
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r["video_url"].is_null()));
    assert_eq!(records[1]["target"], "https://example.com/reel/two/");
}

#[test]
fn timing_flag_prints_elapsed() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("reel.html");
    fs::write(&html_path, REEL_PAGE).unwrap();

    reelsnap_cmd()
        .arg("--html")
        .arg(&html_path)
        .arg("--timing")
        .assert()
        .success()
        .stderr(predicate::str::contains("elapsed:"))
        .stderr(predicate::str::contains("ms"));
}

#[test]
fn output_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("reel.html");
    let output_path = temp_dir.path().join("output.json");
    fs::write(&html_path, REEL_PAGE).unwrap();

    reelsnap_cmd()
        .arg("--html")
        .arg(&html_path)
        .arg("--json")
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let output_content = fs::read_to_string(&output_path).unwrap();
    assert!(
        output_content.contains("\"video_url\":"),
        "output file should contain JSON with video_url field"
    );
}

#[test]
fn html_and_urls_conflict() {
    let temp_dir = TempDir::new().unwrap();
    let html_path = temp_dir.path().join("reel.html");
    fs::write(&html_path, REEL_PAGE).unwrap();

    reelsnap_cmd()
        .arg("--html")
        .arg(&html_path)
        .arg("https://www.instagram.com/reel/abc/")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot use both"));
}

#[test]
fn no_args_fails() {
    reelsnap_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least one URL is required"));
}
