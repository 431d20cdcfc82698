//! HTTP client module for ssrfblind

pub mod client;
pub use client::HttpClient;
