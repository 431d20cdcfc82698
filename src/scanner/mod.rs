//! Probe engine: drives one input mode end to end

pub mod detect;
pub mod dispatch;
pub mod inject;

use crate::error::{Result, SsrfError};
use crate::http::HttpClient;
use crate::models::{ProbeConfig, ProbeOutcome, RunMode, RunSummary};
use crate::report::console;
use crate::request::{self, CapturedRequest};
use detect::{resolve_targets, Targets};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

/// Where the requests to probe come from
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Proxy-exported request transcript file
    Transcript(PathBuf),
    /// Single URL with optional method, headers and body
    Url {
        url: String,
        method: String,
        headers: Vec<(String, String)>,
        data: Option<String>,
    },
    /// File with one URL per line
    List(PathBuf),
}

impl InputSource {
    pub fn mode(&self) -> RunMode {
        match self {
            InputSource::Transcript(_) => RunMode::Transcript,
            InputSource::Url { .. } => RunMode::Url,
            InputSource::List(_) => RunMode::List,
        }
    }
}

/// Runs probes sequentially and owns the run counters
pub struct ProbeEngine {
    client: HttpClient,
    config: ProbeConfig,
}

impl ProbeEngine {
    /// Creates an engine with a client built from `config`
    pub fn new(config: ProbeConfig) -> Result<Self> {
        let client = HttpClient::from_config(&config)?;
        Ok(Self { client, config })
    }

    /// Runs the selected input mode.
    ///
    /// In transcript and URL mode, a parse failure or a request with nothing
    /// to inject is returned as an error. In list mode only an unreadable or
    /// empty list is an error; individual items are skipped.
    pub async fn run(&self, source: &InputSource) -> Result<RunSummary> {
        let mut summary = RunSummary::new(source.mode(), self.config.callback_url());

        match source {
            InputSource::Transcript(path) => {
                let request = request::parse_transcript_file(path)?;
                self.run_single(&request, "request", &mut summary).await?;
            }
            InputSource::Url {
                url,
                method,
                headers,
                data,
            } => {
                let request = request::direct::parse_url_request_with_agent(
                    url,
                    method,
                    headers,
                    data.as_deref(),
                    &self.config.user_agent,
                )?;
                self.run_single(&request, "URL", &mut summary).await?;
            }
            InputSource::List(path) => {
                self.run_list(path, &mut summary).await?;
            }
        }

        summary.finish();
        info!(
            "Run {} finished: {}/{} requests answered",
            summary.run_id, summary.successful_requests, summary.total_requests
        );
        Ok(summary)
    }

    async fn run_single(
        &self,
        request: &CapturedRequest,
        kind: &str,
        summary: &mut RunSummary,
    ) -> Result<()> {
        let targets = resolve_targets(request, &self.config.target_parameters)
            .ok_or_else(|| SsrfError::NoParameters(kind.to_string()))?;
        if let Targets::Detected(names) = &targets {
            console::print_warning(&format!(
                "No specific parameters provided. Testing all detected parameters: {}",
                names.join(", ")
            ));
        }

        let outcome = self.probe(request, &targets, 1, None).await;
        summary.record(outcome);
        Ok(())
    }

    async fn run_list(&self, path: &Path, summary: &mut RunSummary) -> Result<()> {
        let requests = request::load_url_list(path, &self.config.user_agent)?;
        if requests.is_empty() {
            return Err(SsrfError::EmptyUrlList(path.display().to_string()));
        }
        let total = requests.len();
        console::print_info(&format!("Loaded {total} URLs from file: {}", path.display()));

        for (index, request) in requests.iter().enumerate() {
            let number = index + 1;
            let targets = match resolve_targets(request, &self.config.target_parameters) {
                Some(targets) => targets,
                None => {
                    console::print_warning(&format!(
                        "No parameters detected in URL {number}, skipping..."
                    ));
                    continue;
                }
            };
            if let Targets::Detected(names) = &targets {
                console::print_warning(&format!(
                    "Auto-detected parameters for URL {number}: {}",
                    names.join(", ")
                ));
            }

            let outcome = self.probe(request, &targets, number, Some(total)).await;
            summary.record(outcome);

            if number < total {
                self.pause().await;
            }
        }
        Ok(())
    }

    async fn pause(&self) {
        let Ok(delay) = Duration::try_from_secs_f64(self.config.delay_secs) else {
            return;
        };
        if delay.is_zero() {
            return;
        }
        console::print_info(&format!(
            "Waiting {} seconds before next request...",
            self.config.delay_secs
        ));
        sleep(delay).await;
    }

    async fn probe(
        &self,
        request: &CapturedRequest,
        targets: &Targets,
        number: usize,
        total: Option<usize>,
    ) -> ProbeOutcome {
        let names = targets.names();
        let callback_url = self.config.callback_url();
        debug!("Probing {} {} with targets {names:?}", request.method, request.full_url);

        let outcome = match dispatch::prepare_probe(request, &self.config.callback_host, Some(names)) {
            Ok(prepared) => {
                console::print_probe_header(&prepared, &callback_url, names, number, total);
                dispatch::send_probe(&self.client, &prepared, number, names).await
            }
            Err(e) => dispatch::unsent_outcome(request, number, names, &e),
        };
        console::print_probe_result(&outcome);
        outcome
    }
}
