// ABOUTME: Validation of caller-supplied page URLs before any network activity.
// ABOUTME: Accepts only http(s) URLs whose host is an Instagram domain.

use url::Url;

use crate::error::ParseError;

/// Hosts whose pages may be fetched, compared case-insensitively.
pub const ACCEPTED_HOSTS: &[&str] = &[
    "instagram.com",
    "www.instagram.com",
    "instagr.am",
    "www.instagr.am",
];

/// Returns true if `host` is one of [`ACCEPTED_HOSTS`].
pub fn is_accepted_host(host: &str) -> bool {
    let host = host.trim_end_matches('.');
    ACCEPTED_HOSTS
        .iter()
        .any(|accepted| host.eq_ignore_ascii_case(accepted))
}

/// Validate a caller-supplied page URL.
///
/// Blank input and URLs that do not parse or do not use http/https are
/// `InvalidUrl`; a well-formed URL on any other host is `UnsupportedHost`.
pub fn validate_target_url(raw: &str) -> Result<Url, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::invalid_url(
            raw,
            "Validate",
            Some(anyhow::anyhow!("no url provided")),
        ));
    }

    let url = Url::parse(trimmed).map_err(|e| {
        ParseError::invalid_url(raw, "Validate", Some(anyhow::anyhow!("invalid URL: {}", e)))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ParseError::invalid_url(
            raw,
            "Validate",
            Some(anyhow::anyhow!("scheme must be http or https")),
        ));
    }

    match url.host_str() {
        Some(host) if is_accepted_host(host) => Ok(url),
        Some(host) => Err(ParseError::unsupported_host(
            raw,
            "Validate",
            Some(anyhow::anyhow!("host {} is not supported", host)),
        )),
        None => Err(ParseError::invalid_url(
            raw,
            "Validate",
            Some(anyhow::anyhow!("URL has no host")),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn accepts_instagram_hosts() {
        for url in [
            "https://www.instagram.com/reel/C0ffee123/",
            "https://instagram.com/p/C0ffee123/",
            "http://instagr.am/p/C0ffee123/",
            "https://WWW.Instagram.COM/reel/C0ffee123/?igsh=abc",
            "https://www.instagr.am/reel/C0ffee123/",
        ] {
            assert!(validate_target_url(url).is_ok(), "expected {} to be accepted", url);
        }
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let url = validate_target_url("  https://www.instagram.com/reel/abc/\n").unwrap();
        assert_eq!(url.as_str(), "https://www.instagram.com/reel/abc/");
    }

    #[test]
    fn rejects_blank_as_invalid() {
        assert_eq!(validate_target_url("").unwrap_err().code, ErrorCode::InvalidUrl);
        assert_eq!(validate_target_url("   ").unwrap_err().code, ErrorCode::InvalidUrl);
    }

    #[test]
    fn rejects_malformed_and_non_http() {
        assert_eq!(
            validate_target_url("instagram.com/reel/abc").unwrap_err().code,
            ErrorCode::InvalidUrl
        );
        assert_eq!(
            validate_target_url("ftp://www.instagram.com/reel/abc").unwrap_err().code,
            ErrorCode::InvalidUrl
        );
    }

    #[test]
    fn rejects_lookalike_hosts() {
        for url in [
            "https://example.com/reel/abc/",
            "https://instagramXcom/reel/abc/",
            "https://www.instagram.com.evil.test/reel/abc/",
            "https://evilinstagram.com/reel/abc/",
            "https://cdn.instagram.com/reel/abc/",
        ] {
            let err = validate_target_url(url).unwrap_err();
            assert_eq!(err.code, ErrorCode::UnsupportedHost, "for {}", url);
        }
    }

    #[test]
    fn explicit_port_is_allowed() {
        assert!(validate_target_url("http://www.instagram.com:8080/reel/abc/").is_ok());
    }
}
