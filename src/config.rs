//! Configuration management for ssrfblind

use crate::error::{Result, SsrfError};
use crate::models::ProbeConfig;
use serde::Deserialize;
use std::path::Path;

/// File-based configuration structure
#[derive(Debug, Deserialize)]
struct FileConfig {
    request: Option<RequestSection>,
    list: Option<ListSection>,
}

#[derive(Debug, Deserialize)]
struct RequestSection {
    timeout_secs: Option<u64>,
    user_agent: Option<String>,
    proxy: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListSection {
    delay_secs: Option<f64>,
}

/// Loads configuration from a TOML file and merges with defaults
pub fn load_config(path: &Path) -> Result<ProbeConfig> {
    let content = std::fs::read_to_string(path).map_err(SsrfError::IoError)?;
    parse_config(&content)
}

fn parse_config(content: &str) -> Result<ProbeConfig> {
    let file_config: FileConfig = toml::from_str(content)?;

    let mut config = ProbeConfig::default();

    if let Some(request) = file_config.request {
        if let Some(timeout) = request.timeout_secs {
            config.timeout_secs = timeout;
        }
        if let Some(ua) = request.user_agent {
            config.user_agent = ua;
        }
        if request.proxy.is_some() {
            config.proxy = request.proxy;
        }
    }

    if let Some(list) = file_config.list {
        if let Some(delay) = list.delay_secs {
            config.delay_secs = delay;
        }
    }

    validate(&config)?;
    Ok(config)
}

/// Merges CLI arguments into an existing ProbeConfig
pub fn merge_cli_args(
    config: &mut ProbeConfig,
    callback: String,
    parameters: Option<Vec<String>>,
    delay: Option<f64>,
    timeout: Option<u64>,
    proxy: Option<String>,
) -> Result<()> {
    config.callback_host = callback.trim().to_string();

    if let Some(params) = parameters {
        config.target_parameters = split_parameters(&params);
    }
    if let Some(d) = delay {
        config.delay_secs = d;
    }
    if let Some(t) = timeout {
        config.timeout_secs = t;
    }
    if let Some(p) = proxy {
        config.proxy = Some(p);
    }

    validate(config)
}

/// Flattens repeated, comma-separated parameter selectors into a name list
pub fn split_parameters(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|p| p.split(','))
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses `Name: Value` header strings, ignoring entries without a colon
pub fn parse_header_args(headers: &[String]) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|header| header.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}

fn validate(config: &ProbeConfig) -> Result<()> {
    if !config.delay_secs.is_finite() || config.delay_secs < 0.0 {
        return Err(SsrfError::ConfigError(format!(
            "delay must be a non-negative number of seconds, got {}",
            config.delay_secs
        )));
    }
    if config.timeout_secs == 0 {
        return Err(SsrfError::ConfigError(
            "timeout must be at least one second".to_string(),
        ));
    }
    Ok(())
}
