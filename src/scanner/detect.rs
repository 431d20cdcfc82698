//! Candidate parameter detection and target resolution

use crate::request::CapturedRequest;

/// Query parameter names followed by form body parameter names.
///
/// Raw (non-form) bodies contribute nothing. A name present in both the
/// query and the body appears twice.
pub fn detect_parameters(request: &CapturedRequest) -> Vec<String> {
    request
        .url_params
        .keys()
        .chain(request.body_params.names())
        .map(str::to_string)
        .collect()
}

/// Parameters a probe will target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Targets {
    /// Supplied on the command line
    Explicit(Vec<String>),
    /// Found by [`detect_parameters`]
    Detected(Vec<String>),
}

impl Targets {
    pub fn names(&self) -> &[String] {
        match self {
            Targets::Explicit(names) | Targets::Detected(names) => names,
        }
    }
}

/// Uses the explicit list when non-empty, otherwise auto-detects.
/// Returns `None` when there is nothing to inject.
pub fn resolve_targets(request: &CapturedRequest, explicit: &[String]) -> Option<Targets> {
    if !explicit.is_empty() {
        return Some(Targets::Explicit(explicit.to_vec()));
    }
    let detected = detect_parameters(request);
    if detected.is_empty() {
        None
    } else {
        Some(Targets::Detected(detected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{parse_transcript, parse_url_request, RAW_DATA_KEY};

    #[test]
    fn test_detect_query_and_form_params() {
        let raw = "POST /a?q=1 HTTP/1.1\nHost: h.com\nContent-Type: application/x-www-form-urlencoded\n\nurl=x&q=2";
        let request = parse_transcript(raw).expect("valid transcript");
        assert_eq!(detect_parameters(&request), vec!["q", "url", "q"]);
    }

    #[test]
    fn test_raw_body_yields_no_candidates() {
        let request = parse_url_request("http://h.com/api", "POST", &[], Some(r#"{"url":"test"}"#))
            .expect("valid url");
        let detected = detect_parameters(&request);
        assert!(detected.is_empty());
        assert!(!detected.iter().any(|p| p == RAW_DATA_KEY));
    }

    #[test]
    fn test_resolve_prefers_explicit() {
        let request = parse_url_request("http://h.com/?a=1&b=2", "GET", &[], None).expect("valid url");
        assert_eq!(
            resolve_targets(&request, &["b".to_string()]),
            Some(Targets::Explicit(vec!["b".to_string()]))
        );
        assert_eq!(
            resolve_targets(&request, &[]),
            Some(Targets::Detected(vec!["a".to_string(), "b".to_string()]))
        );
    }

    #[test]
    fn test_resolve_nothing_to_inject() {
        let request = parse_url_request("http://h.com/plain", "GET", &[], None).expect("valid url");
        assert_eq!(resolve_targets(&request, &[]), None);
    }
}
