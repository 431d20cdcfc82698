//! Reassembles injected requests and sends them

use super::inject::inject_callback;
use crate::error::{Result, SsrfError};
use crate::http::HttpClient;
use crate::models::ProbeOutcome;
use crate::request::{BodyParams, CapturedRequest};
use reqwest::Method;
use std::time::Instant;
use tracing::{debug, warn};
use url::Url;

/// A concrete request ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedProbe {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Injects the callback into query and form body parameters and rebuilds
/// the request. Scheme, host, path and fragment are kept; raw bodies are
/// forwarded untouched.
pub fn prepare_probe(
    request: &CapturedRequest,
    callback_host: &str,
    targets: Option<&[String]>,
) -> Result<PreparedProbe> {
    let mut url = Url::parse(&request.full_url)
        .map_err(|e| SsrfError::ParseError(format!("{}: {e}", request.full_url)))?;

    let query = inject_callback(&request.url_params, callback_host, targets).encode();
    url.set_query(if query.is_empty() { None } else { Some(query.as_str()) });

    let body = match &request.body_params {
        BodyParams::Form(params) => inject_callback(params, callback_host, targets).encode(),
        BodyParams::Empty | BodyParams::Raw(_) => request.body.clone(),
    };

    let mut headers: Vec<(String, String)> = request
        .headers
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    headers.sort();

    Ok(PreparedProbe {
        method: request.method.clone(),
        url: url.to_string(),
        headers,
        body,
    })
}

/// Sends a prepared probe. Transport failures are captured in the outcome.
pub async fn send_probe(
    client: &HttpClient,
    probe: &PreparedProbe,
    request_number: usize,
    targets: &[String],
) -> ProbeOutcome {
    let mut outcome = ProbeOutcome {
        request_number,
        method: probe.method.clone(),
        target_url: probe.url.clone(),
        target_parameters: targets.to_vec(),
        status: None,
        error: None,
        elapsed_ms: 0,
    };

    let method = match Method::from_bytes(probe.method.as_bytes()) {
        Ok(m) => m,
        Err(e) => {
            outcome.error = Some(format!("invalid HTTP method {:?}: {e}", probe.method));
            return outcome;
        }
    };

    let body = (!probe.body.is_empty()).then(|| probe.body.clone());
    let start = Instant::now();
    match client.request(method, &probe.url, &probe.headers, body).await {
        Ok(response) => {
            outcome.status = Some(response.status().as_u16());
        }
        Err(e) => {
            warn!("Request to {} failed: {e}", probe.url);
            outcome.error = Some(e.to_string());
        }
    }
    outcome.elapsed_ms = start.elapsed().as_millis() as u64;
    debug!(
        "Probe #{request_number} finished in {}ms (status {:?})",
        outcome.elapsed_ms, outcome.status
    );
    outcome
}

/// Outcome for a request that could not be reassembled
pub fn unsent_outcome(
    request: &CapturedRequest,
    request_number: usize,
    targets: &[String],
    error: &SsrfError,
) -> ProbeOutcome {
    ProbeOutcome {
        request_number,
        method: request.method.clone(),
        target_url: request.full_url.clone(),
        target_parameters: targets.to_vec(),
        status: None,
        error: Some(error.to_string()),
        elapsed_ms: 0,
    }
}
