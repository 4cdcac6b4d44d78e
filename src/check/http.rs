// src/check/http.rs
//! HTTP/HTTPS check - a single GET, status below 400 is up

use std::time::Duration;
use reqwest::redirect::Policy;

use crate::{
    error::{Result, ServiceCheckError},
    log_debug,
};

pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Client shared by every HTTP(S) check.
///
/// Redirects are reported rather than followed, and idle connections are not
/// kept, so every probe opens a fresh connection.
pub fn build_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .redirect(Policy::none())
        .pool_max_idle_per_host(0)
        .build()?;

    Ok(client)
}

pub fn build_url(scheme: &str, host: &str, port: u16, path: &str) -> String {
    // Bare IPv6 literals need brackets inside a URL
    let host = if host.contains(':') && !host.starts_with('[') {
        format!("[{}]", host)
    } else {
        host.to_string()
    };
    let separator = if path.starts_with('/') { "" } else { "/" };

    format!("{}://{}:{}{}{}", scheme, host, port, separator, path)
}

pub async fn probe(client: &reqwest::Client, url: &str) -> Result<()> {
    let response = client.get(url).send().await?;
    let status = response.status();
    log_debug!("HTTP check for {} returned: {}", url, status.as_u16());

    // Read and throw away
    let _ = response.bytes().await;

    if status.as_u16() < 400 {
        Ok(())
    } else {
        Err(ServiceCheckError::HttpStatus(status.as_u16()))
    }
}
