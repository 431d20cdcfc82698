//! Builds a request from a bare URL plus optional method, headers and body

use super::{decode_query, find_header, BodyParams, CapturedRequest};
use crate::error::{Result, SsrfError};
use crate::models::DEFAULT_USER_AGENT;
use std::collections::HashMap;
use url::Url;

/// Parses a direct URL request.
///
/// `full_url` is kept exactly as given. When `headers` is empty a minimal
/// default set (User-Agent and `Accept: */*`) is used instead.
pub fn parse_url_request(
    url: &str,
    method: &str,
    headers: &[(String, String)],
    body: Option<&str>,
) -> Result<CapturedRequest> {
    parse_url_request_with_agent(url, method, headers, body, DEFAULT_USER_AGENT)
}

/// Same as [`parse_url_request`] with a configurable default User-Agent
pub fn parse_url_request_with_agent(
    url: &str,
    method: &str,
    headers: &[(String, String)],
    body: Option<&str>,
    user_agent: &str,
) -> Result<CapturedRequest> {
    let parsed = Url::parse(url).map_err(|e| SsrfError::ParseError(format!("{url:?}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(SsrfError::ParseError(format!(
            "{url:?}: unsupported scheme '{}'",
            parsed.scheme()
        )));
    }

    let mut header_map: HashMap<String, String> = headers.iter().cloned().collect();
    let body = body.unwrap_or_default().to_string();
    let body_params = BodyParams::from_body(&body, find_header(&header_map, "Content-Type"));

    if header_map.is_empty() {
        header_map.insert("User-Agent".to_string(), user_agent.to_string());
        header_map.insert("Accept".to_string(), "*/*".to_string());
    }

    Ok(CapturedRequest {
        method: method.trim().to_uppercase(),
        full_url: url.to_string(),
        headers: header_map,
        body,
        url_params: decode_query(&parsed),
        body_params,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::ParamValue;

    #[test]
    fn test_direct_url_defaults() {
        let request = parse_url_request("https://example.com/api?url=test&endpoint=data", "get", &[], None)
            .expect("valid url");
        assert_eq!(request.method, "GET");
        assert_eq!(request.full_url, "https://example.com/api?url=test&endpoint=data");
        assert_eq!(request.header("user-agent"), Some(DEFAULT_USER_AGENT));
        assert_eq!(request.header("Accept"), Some("*/*"));
        assert_eq!(request.url_params.keys().collect::<Vec<_>>(), vec!["url", "endpoint"]);
        assert_eq!(request.body_params, BodyParams::Empty);
    }

    #[test]
    fn test_direct_form_body() {
        let headers = vec![(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        )];
        let request = parse_url_request("http://a.com/hook", "POST", &headers, Some("target=x&n=1"))
            .expect("valid url");
        assert_eq!(request.headers.len(), 1, "supplied headers replace the defaults");
        match request.body_params {
            BodyParams::Form(params) => {
                assert_eq!(params.get("target"), Some(&ParamValue::Single("x".into())));
            }
            other => panic!("expected form body, got {other:?}"),
        }
    }

    #[test]
    fn test_direct_body_without_form_header_is_raw() {
        let request = parse_url_request("http://a.com/", "POST", &[], Some("url=x")).expect("valid url");
        assert_eq!(request.body_params, BodyParams::Raw("url=x".into()));
    }

    #[test]
    fn test_invalid_urls_rejected() {
        assert!(matches!(
            parse_url_request("not a url", "GET", &[], None),
            Err(SsrfError::ParseError(_))
        ));
        assert!(matches!(
            parse_url_request("ftp://a.com/x?r=1", "GET", &[], None),
            Err(SsrfError::ParseError(_))
        ));
    }
}
