//! URL list loader: one URL per line, `#` comments and blank lines ignored

use super::{direct::parse_url_request_with_agent, CapturedRequest};
use crate::error::Result;
use crate::models::DEFAULT_USER_AGENT;
use std::path::Path;
use tracing::warn;

/// Reads a URL list file and parses every usable line.
///
/// Lines that fail to parse are dropped with a warning; only an unreadable
/// file is an error.
pub fn load_url_list(path: &Path, user_agent: &str) -> Result<Vec<CapturedRequest>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_url_list_with_agent(&content, user_agent))
}

/// Parses URL list content with the default User-Agent
pub fn parse_url_list(content: &str) -> Vec<CapturedRequest> {
    parse_url_list_with_agent(content, DEFAULT_USER_AGENT)
}

fn parse_url_list_with_agent(content: &str, user_agent: &str) -> Vec<CapturedRequest> {
    content
        .lines()
        .filter(|line| !line.starts_with('#'))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            match parse_url_request_with_agent(line, "GET", &[], None, user_agent) {
                Ok(request) => Some(request),
                Err(e) => {
                    warn!("Skipping unparsable URL {line:?}: {e}");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let content = "http://a.com/x?r=1\n# comment\n\nhttp://b.com/y?r=2\n";
        let requests = parse_url_list(content);
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].full_url, "http://a.com/x?r=1");
        assert_eq!(requests[1].full_url, "http://b.com/y?r=2");
        assert!(requests.iter().all(|r| r.method == "GET"));
    }

    #[test]
    fn test_bad_lines_do_not_abort_batch() {
        let content = "not-a-url\r\nhttps://c.com/z?next=/home\r\n   \r\n";
        let requests = parse_url_list(content);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].full_url, "https://c.com/z?next=/home");
    }
}
