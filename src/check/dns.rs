// src/check/dns.rs
//! DNS check - resolves a host through the system resolver

use std::time::Duration;
use tokio::time::timeout;

use crate::{
    error::{Result, ServiceCheckError},
    log_debug,
};

pub const DNS_TIMEOUT: Duration = Duration::from_secs(10);

/// Any answer counts as success, even one with no addresses
pub async fn probe(host: &str) -> Result<()> {
    let addresses = timeout(DNS_TIMEOUT, tokio::net::lookup_host((host, 0)))
        .await
        .map_err(|_| ServiceCheckError::Timeout(DNS_TIMEOUT))??;

    let addresses: Vec<String> = addresses.map(|addr| addr.ip().to_string()).collect();
    log_debug!("DNS check for '{}' returned: {:?}", host, addresses);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_localhost_resolves() {
        assert!(probe("localhost").await.is_ok());
    }

    #[tokio::test]
    async fn test_reserved_name_fails() {
        // .invalid is guaranteed never to resolve
        assert!(probe("service-check.invalid").await.is_err());
    }
}
