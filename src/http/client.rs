//! HTTP client wrapper used for replaying injected requests

use crate::error::{Result, SsrfError};
use crate::models::ProbeConfig;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_LENGTH};
use reqwest::{Client, Method, Response};
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client wrapper.
///
/// Built once per run; connections are pooled across probes.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HttpClient from probe configuration
    pub fn from_config(config: &ProbeConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(10)
            } else {
                reqwest::redirect::Policy::none()
            })
            .danger_accept_invalid_certs(config.accept_invalid_certs);

        if let Some(ref proxy_url) = config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| SsrfError::ConfigError(format!("Invalid proxy URL: {e}")))?;
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Sends a single request. No retries.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        headers: &[(String, String)],
        body: Option<String>,
    ) -> Result<Response> {
        let mut req = self.client.request(method, url).headers(build_headers(headers));
        if let Some(b) = body {
            req = req.body(b);
        }

        let response = req.send().await?;
        debug!("Response: {} for {}", response.status(), response.url());
        Ok(response)
    }
}

/// Converts captured headers into a HeaderMap.
///
/// Content-Length is dropped because the body may have been rewritten.
/// Invalid names or values are skipped.
fn build_headers(headers: &[(String, String)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (key, value) in headers {
        let name = match HeaderName::from_bytes(key.as_bytes()) {
            Ok(name) => name,
            Err(_) => {
                warn!("Skipping invalid header name {key:?}");
                continue;
            }
        };
        if name == CONTENT_LENGTH {
            continue;
        }
        match HeaderValue::from_str(value) {
            Ok(v) => {
                map.insert(name, v);
            }
            Err(_) => warn!("Skipping invalid value for header {key}"),
        }
    }
    map
}
