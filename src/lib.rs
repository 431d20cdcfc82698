//! ssrfblind - Blind SSRF validation tool
//!
//! Parses a captured request (proxy transcript, single URL or URL list),
//! picks candidate parameters, rewrites them to point at a callback host
//! and replays the request. Whether the callback was hit is observed
//! out of band; this crate only triggers the requests.

pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod report;
pub mod request;
pub mod scanner;
