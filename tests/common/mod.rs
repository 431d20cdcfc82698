#![allow(dead_code)]

//! Common test utilities

use ssrfblind::models::ProbeConfig;
use std::io::Write;
use tempfile::NamedTempFile;

/// Creates a test ProbeConfig injecting `http://{callback}/`
pub fn test_config(callback: &str) -> ProbeConfig {
    ProbeConfig {
        callback_host: callback.to_string(),
        timeout_secs: 5,
        delay_secs: 0.0,
        user_agent: "ssrfblind-test/0.1.0".to_string(),
        ..ProbeConfig::default()
    }
}

/// Writes `content` to a temporary file that lives as long as the handle
pub fn temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file
}

/// `host:port` of a wiremock server URI
pub fn authority(uri: &str) -> String {
    uri.trim_start_matches("http://").to_string()
}

/// A local port with nothing listening on it
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    port
}
