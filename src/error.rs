//! Error types for ssrfblind

use thiserror::Error;

/// Main error type for ssrfblind operations
#[derive(Debug, Error)]
pub enum SsrfError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("No Host header found in request")]
    MissingHost,

    #[error("Request parse error: {0}")]
    ParseError(String),

    #[error("No parameters detected in the {0} and none specified")]
    NoParameters(String),

    #[error("No valid URLs found in {0}")]
    EmptyUrlList(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for ssrfblind operations
pub type Result<T> = std::result::Result<T, SsrfError>;
