//! Core data models for ssrfblind

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default User-Agent used when a direct URL is probed without headers
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Input source selected on the command line
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Captured proxy request transcript
    Transcript,
    /// Single URL given on the command line
    Url,
    /// File with one URL per line
    List,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Transcript => write!(f, "transcript"),
            RunMode::Url => write!(f, "url"),
            RunMode::List => write!(f, "list"),
        }
    }
}

/// Result of dispatching one injected request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeOutcome {
    /// 1-based position in the run
    pub request_number: usize,
    /// HTTP method used
    pub method: String,
    /// Rebuilt URL carrying the callback
    pub target_url: String,
    /// Parameters that were targeted (empty when every parameter was)
    pub target_parameters: Vec<String>,
    /// Response status, if a response was received
    pub status: Option<u16>,
    /// Transport or reassembly error, if the request failed
    pub error: Option<String>,
    /// Round-trip time in milliseconds
    pub elapsed_ms: u64,
}

impl ProbeOutcome {
    /// A probe counts as successful when the target answered at all
    pub fn is_success(&self) -> bool {
        self.status.is_some()
    }
}

/// Summary of a complete run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Unique run identifier
    pub run_id: String,
    /// Input mode
    pub mode: RunMode,
    /// Callback URL injected into parameters
    pub callback_url: String,
    /// Run start time (local timezone)
    pub started_at: DateTime<Local>,
    /// Run end time (local timezone)
    pub finished_at: Option<DateTime<Local>>,
    /// Requests attempted
    pub total_requests: usize,
    /// Requests that received a response
    pub successful_requests: usize,
    /// One entry per dispatched probe
    pub outcomes: Vec<ProbeOutcome>,
}

impl RunSummary {
    /// Creates an empty summary for a run
    pub fn new(mode: RunMode, callback_url: impl Into<String>) -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            mode,
            callback_url: callback_url.into(),
            started_at: Local::now(),
            finished_at: None,
            total_requests: 0,
            successful_requests: 0,
            outcomes: Vec::new(),
        }
    }

    /// Records a dispatched probe and updates the counters
    pub fn record(&mut self, outcome: ProbeOutcome) {
        self.total_requests += 1;
        if outcome.is_success() {
            self.successful_requests += 1;
        }
        self.outcomes.push(outcome);
    }

    /// Requests that did not receive a response
    pub fn failed_requests(&self) -> usize {
        self.total_requests - self.successful_requests
    }

    /// Marks the run as finished
    pub fn finish(&mut self) {
        self.finished_at = Some(Local::now());
    }
}

/// Configuration for a probing session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Callback host injected as `http://{host}/`
    pub callback_host: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Delay between requests in list mode, in seconds
    pub delay_secs: f64,
    /// User-Agent for synthesised direct-URL headers
    pub user_agent: String,
    /// Skip TLS certificate verification
    pub accept_invalid_certs: bool,
    /// Whether to follow HTTP redirects
    pub follow_redirects: bool,
    /// HTTP/HTTPS proxy URL
    pub proxy: Option<String>,
    /// Explicit parameter names to inject; empty means auto-detect
    pub target_parameters: Vec<String>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            callback_host: String::new(),
            timeout_secs: 10,
            delay_secs: 0.0,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_invalid_certs: true,
            follow_redirects: false,
            proxy: None,
            target_parameters: Vec::new(),
        }
    }
}

impl ProbeConfig {
    /// The URL written into targeted parameters
    pub fn callback_url(&self) -> String {
        crate::scanner::inject::callback_url(&self.callback_host)
    }
}
