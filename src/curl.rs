//! cURL command translation
//!
//! Derives an HTTP request descriptor from a pasted cURL command. This is a
//! best-effort heuristic parser, not a shell grammar: quoted segments are
//! atomic tokens, escaped quotes inside quotes are not supported, and only
//! GET requests with `-H` headers are modeled.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Token grammar: single-quoted segment, double-quoted segment, or a bare word
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"'[^']*'|"[^"]*"|\S+"#).expect("token regex is valid"));

/// An HTTP request derived from a cURL command
///
/// The method is always GET; `-X`, `-d`/`--data`, and cookie flags are
/// ignored by the translator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurlRequest {
    /// Target URL
    pub url: String,
    /// Header name -> value
    pub headers: HashMap<String, String>,
}

/// Translate a cURL command string into a request descriptor
///
/// Scans tokens left to right: a token beginning with `http` is taken as the
/// URL (the last such token wins when several appear), and each `-H` token
/// pairs with the following token, split on the first `:` into a trimmed
/// header name/value.
///
/// # Examples
///
/// ```
/// use dashsource::curl::translate;
///
/// let req = translate("curl 'https://api.example.com/data' -H 'Accept: application/json'").unwrap();
/// assert_eq!(req.url, "https://api.example.com/data");
/// assert_eq!(req.headers.get("Accept").unwrap(), "application/json");
/// ```
pub fn translate(curl_text: &str) -> Result<CurlRequest> {
    let tokens: Vec<String> = TOKEN_RE
        .find_iter(curl_text)
        .map(|m| strip_quotes(m.as_str()).to_string())
        .collect();

    let mut url: Option<String> = None;
    let mut headers = HashMap::new();

    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];

        if token.starts_with("http") {
            // last URL-looking token wins
            url = Some(token.clone());
        } else if token == "-H" {
            if let Some(raw) = tokens.get(i + 1) {
                if let Some((name, value)) = raw.split_once(':') {
                    headers.insert(name.trim().to_string(), value.trim().to_string());
                }
                i += 1;
            }
        }

        i += 1;
    }

    let url = url.ok_or_else(|| Error::translation("no URL found in cURL command"))?;

    Ok(CurlRequest { url, headers })
}

/// Strip one layer of surrounding single or double quotes
fn strip_quotes(token: &str) -> &str {
    let bytes = token.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if (first == b'\'' && last == b'\'') || (first == b'"' && last == b'"') {
            return &token[1..token.len() - 1];
        }
    }
    token
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_translate_basic_get() {
        let req = translate(
            "curl -X GET 'https://api.example.com/data' -H 'Authorization: Bearer T'",
        )
        .unwrap();

        assert_eq!(req.url, "https://api.example.com/data");
        assert_eq!(req.headers.len(), 1);
        assert_eq!(req.headers.get("Authorization").unwrap(), "Bearer T");
    }

    #[test]
    fn test_translate_double_quotes() {
        let req = translate(r#"curl "https://api.example.com/v2" -H "Accept: application/json""#)
            .unwrap();

        assert_eq!(req.url, "https://api.example.com/v2");
        assert_eq!(req.headers.get("Accept").unwrap(), "application/json");
    }

    #[test]
    fn test_translate_unquoted_url() {
        let req = translate("curl https://api.example.com/plain").unwrap();
        assert_eq!(req.url, "https://api.example.com/plain");
        assert!(req.headers.is_empty());
    }

    #[test]
    fn test_translate_multiple_headers() {
        let req = translate(
            "curl 'https://x.io' -H 'Accept: application/json' -H 'X-Api-Key: abc123'",
        )
        .unwrap();

        assert_eq!(req.headers.len(), 2);
        assert_eq!(req.headers.get("Accept").unwrap(), "application/json");
        assert_eq!(req.headers.get("X-Api-Key").unwrap(), "abc123");
    }

    #[test]
    fn test_translate_header_value_with_colon() {
        // split happens on the first colon only
        let req = translate("curl 'https://x.io' -H 'Referer: https://origin.example'").unwrap();
        assert_eq!(
            req.headers.get("Referer").unwrap(),
            "https://origin.example"
        );
    }

    #[test]
    fn test_translate_header_whitespace_trimmed() {
        let req = translate("curl 'https://x.io' -H '  X-Trace :  abc  '").unwrap();
        assert_eq!(req.headers.get("X-Trace").unwrap(), "abc");
    }

    #[test]
    fn test_translate_last_url_wins() {
        let req = translate("curl https://first.example https://second.example").unwrap();
        assert_eq!(req.url, "https://second.example");
    }

    #[test]
    fn test_translate_no_url() {
        let err = translate("curl -H 'Accept: application/json'").unwrap_err();
        assert!(matches!(err, Error::Translation { .. }));
        assert!(err.to_string().contains("no URL found"));
    }

    #[test]
    fn test_translate_empty_input() {
        assert!(translate("").is_err());
    }

    #[test]
    fn test_translate_trailing_header_flag() {
        // a dangling -H with no following token is ignored
        let req = translate("curl 'https://x.io' -H").unwrap();
        assert_eq!(req.url, "https://x.io");
        assert!(req.headers.is_empty());
    }

    #[test]
    fn test_translate_malformed_header_without_colon() {
        let req = translate("curl 'https://x.io' -H 'NoColonHere'").unwrap();
        assert!(req.headers.is_empty());
    }

    #[test]
    fn test_translate_http_prefix_is_case_sensitive() {
        assert!(translate("curl HTTPS://example.com").is_err());
    }
}
