//! Parser for raw proxy-exported request transcripts
//!
//! Format: request line, `Name: Value` header lines up to the first blank
//! line, then the body. Only the first two tokens of the request line are
//! used. Line endings may be LF or CRLF.

use super::{decode_query, find_header, BodyParams, CapturedRequest};
use crate::error::{Result, SsrfError};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;
use url::Url;

/// Reads and parses a transcript file
pub fn parse_transcript_file(path: &Path) -> Result<CapturedRequest> {
    let content = std::fs::read_to_string(path)?;
    parse_transcript(&content)
}

/// Parses transcript text into a [`CapturedRequest`]
pub fn parse_transcript(content: &str) -> Result<CapturedRequest> {
    let mut lines = content.trim().lines();

    let request_line = lines
        .next()
        .filter(|line| !line.trim().is_empty())
        .ok_or_else(|| SsrfError::ParseError("empty request".to_string()))?;
    let mut tokens = request_line.split_whitespace();
    let (method, path_with_params) = match (tokens.next(), tokens.next()) {
        (Some(method), Some(path)) => (method, path),
        _ => {
            return Err(SsrfError::ParseError(format!(
                "malformed request line: {request_line:?}"
            )))
        }
    };

    let mut headers = HashMap::new();
    let mut body_lines = Vec::new();
    let mut in_body = false;

    for line in lines {
        if in_body {
            body_lines.push(line);
        } else if line.trim().is_empty() {
            in_body = true;
        } else if let Some((key, value)) = line.split_once(':') {
            headers.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    let body = body_lines.join("\n").trim().to_string();

    let host = find_header(&headers, "Host")
        .filter(|h| !h.is_empty())
        .ok_or(SsrfError::MissingHost)?;

    let full_url = format!("{}://{host}{path_with_params}", scheme_for_host(host));
    let parsed = Url::parse(&full_url)
        .map_err(|e| SsrfError::ParseError(format!("invalid URL {full_url:?}: {e}")))?;

    let url_params = decode_query(&parsed);
    let body_params = BodyParams::from_body(&body, find_header(&headers, "Content-Type"));

    debug!(
        "Parsed transcript: {method} {full_url} ({} headers, {} body bytes)",
        headers.len(),
        body.len()
    );

    Ok(CapturedRequest {
        method: method.to_uppercase(),
        full_url,
        headers,
        body,
        url_params,
        body_params,
    })
}

/// `https` when the Host header ends in `:443`, otherwise `http`.
/// Other TLS ports are not recognised.
pub fn scheme_for_host(host: &str) -> &'static str {
    if host.ends_with(":443") {
        "https"
    } else {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{ParamValue, RAW_DATA_KEY};

    #[test]
    fn test_parse_get_transcript() {
        let raw = "GET /search?q=test&id=5 HTTP/1.1\nHost: victim.com\n\n";
        let request = parse_transcript(raw).expect("valid transcript");
        assert_eq!(request.method, "GET");
        assert_eq!(request.full_url, "http://victim.com/search?q=test&id=5");
        assert_eq!(request.url_params.keys().collect::<Vec<_>>(), vec!["q", "id"]);
        assert_eq!(request.body, "");
        assert_eq!(request.body_params, BodyParams::Empty);
    }

    #[test]
    fn test_lowercase_method_is_uppercased() {
        let request = parse_transcript("post /x?a=1 HTTP/1.1\nHost: h\n").expect("valid transcript");
        assert_eq!(request.method, "POST");
    }

    #[test]
    fn test_scheme_from_host_port() {
        let tls = parse_transcript("GET / HTTP/1.1\nHost: victim.com:443\n").expect("valid");
        assert!(tls.full_url.starts_with("https://victim.com:443/"));

        let plain = parse_transcript("GET / HTTP/1.1\nHost: victim.com\n").expect("valid");
        assert!(plain.full_url.starts_with("http://victim.com/"));

        assert_eq!(scheme_for_host("victim.com:8443"), "http");
    }

    #[test]
    fn test_missing_host() {
        let result = parse_transcript("GET /a?b=c HTTP/1.1\nAccept: */*\n\n");
        assert!(matches!(result, Err(SsrfError::MissingHost)));
    }

    #[test]
    fn test_empty_and_malformed_transcripts() {
        assert!(matches!(parse_transcript(""), Err(SsrfError::ParseError(_))));
        assert!(matches!(parse_transcript("   \n\n"), Err(SsrfError::ParseError(_))));
        assert!(matches!(
            parse_transcript("GET\nHost: a.com\n"),
            Err(SsrfError::ParseError(_))
        ));
    }

    #[test]
    fn test_host_lookup_is_case_insensitive() {
        let request = parse_transcript("GET /x HTTP/2\nhost: victim.com\n").expect("valid");
        assert_eq!(request.full_url, "http://victim.com/x");
        assert_eq!(request.header("HOST"), Some("victim.com"));
    }

    #[test]
    fn test_form_body_with_crlf() {
        let raw = "POST /fetch HTTP/1.1\r\nHost: victim.com\r\nContent-Type: application/x-www-form-urlencoded\r\nContent-Length: 31\r\n\r\nurl=http%3A%2F%2Fx.com&mode=get\r\n";
        let request = parse_transcript(raw).expect("valid transcript");
        assert_eq!(request.method, "POST");
        assert_eq!(request.body, "url=http%3A%2F%2Fx.com&mode=get");
        match &request.body_params {
            BodyParams::Form(params) => {
                assert_eq!(params.get("url"), Some(&ParamValue::Single("http://x.com".into())));
                assert_eq!(params.len(), 2);
            }
            other => panic!("expected form body, got {other:?}"),
        }
        assert_eq!(request.header("content-length"), Some("31"));
    }

    #[test]
    fn test_json_body_kept_raw() {
        let raw = "POST /api HTTP/1.1\nHost: victim.com\nContent-Type: application/json\n\n{\"url\":\"test\"}\n";
        let request = parse_transcript(raw).expect("valid transcript");
        assert_eq!(request.body_params, BodyParams::Raw("{\"url\":\"test\"}".into()));
        assert!(!request.body_params.names().contains(&RAW_DATA_KEY));
    }

    #[test]
    fn test_multiline_body_and_header_values_with_colons() {
        let raw = "PUT /doc HTTP/1.1\nHost: victim.com:8080\nReferer: http://victim.com/a\n\nline one\n\nline two\n";
        let request = parse_transcript(raw).expect("valid transcript");
        assert_eq!(request.header("Referer"), Some("http://victim.com/a"));
        assert_eq!(request.body, "line one\n\nline two");
        assert_eq!(request.full_url, "http://victim.com:8080/doc");
    }
}
