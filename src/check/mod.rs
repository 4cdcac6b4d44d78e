// src/check/mod.rs
//! Protocol checkers - one probe per invocation, collapsed into up/down

pub mod dns;
pub mod http;
pub mod tcp;

use std::fmt;
use std::time::Duration;

use crate::{
    config::{PayloadConfig, ServiceDescriptor},
    error::{Result, ServiceCheckError},
    log_debug, log_error, log_warn,
    util::io::publisher::StatusPublisher,
};

pub const DEFAULT_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Dns,
    Http,
    Https,
    Tcp,
}

impl Protocol {
    /// Pick a checker from the configured protocol string.
    ///
    /// `dns` and `tcp` match anywhere in the string, `http` and `https` only
    /// exactly. Checked in that order, so `"dns-over-tcp"` is DNS.
    pub fn detect(protocol: &str) -> Option<Self> {
        if protocol.contains("dns") {
            Some(Protocol::Dns)
        } else if protocol == "http" {
            Some(Protocol::Http)
        } else if protocol == "https" {
            Some(Protocol::Https)
        } else if protocol.contains("tcp") {
            Some(Protocol::Tcp)
        } else {
            None
        }
    }

    pub fn default_port(&self) -> Option<u16> {
        match self {
            Protocol::Http => Some(80),
            Protocol::Https => Some(443),
            Protocol::Dns | Protocol::Tcp => None,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Protocol::Dns => "DNS",
            Protocol::Http => "HTTP",
            Protocol::Https => "HTTPS",
            Protocol::Tcp => "TCP",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    Up,
    Down,
}

impl ServiceStatus {
    pub fn payload<'a>(&self, payloads: &'a PayloadConfig) -> &'a str {
        match self {
            ServiceStatus::Up => &payloads.success,
            ServiceStatus::Down => &payloads.failure,
        }
    }
}

/// What a resolved check connects to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckTarget {
    Dns { host: String },
    Http { url: String },
    /// Without a port the check can't connect and always reports down
    Tcp { host: String, port: Option<u16> },
}

impl fmt::Display for CheckTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckTarget::Dns { host } => write!(f, "{}", host),
            CheckTarget::Http { url } => write!(f, "{}", url),
            CheckTarget::Tcp { host, port: Some(port) } => write!(f, "{}:{}", host, port),
            CheckTarget::Tcp { host, port: None } => write!(f, "{}", host),
        }
    }
}

/// A service descriptor with its protocol picked and defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledCheck {
    pub name: String,
    pub protocol: Protocol,
    pub target: CheckTarget,
    pub interval: Duration,
}

impl ScheduledCheck {
    /// Resolve a descriptor. Errors describe why the entry can't be scheduled.
    ///
    /// Zero values for port and interval and an empty path count as unset.
    pub fn resolve(descriptor: &ServiceDescriptor) -> Result<Self> {
        let raw_protocol = descriptor.protocol.as_deref().unwrap_or("");
        let protocol = Protocol::detect(raw_protocol).ok_or_else(|| {
            ServiceCheckError::ConfigError(format!(
                "service '{}' has unrecognised protocol '{}'",
                descriptor.name, raw_protocol
            ))
        })?;

        let port = descriptor
            .port
            .filter(|port| *port != 0)
            .or_else(|| protocol.default_port());

        let path = descriptor
            .path
            .as_deref()
            .filter(|path| !path.is_empty())
            .unwrap_or(DEFAULT_PATH);

        let interval = descriptor
            .interval
            .filter(|secs| *secs != 0)
            .unwrap_or(DEFAULT_INTERVAL_SECS);

        let target = match protocol {
            Protocol::Dns => CheckTarget::Dns {
                host: descriptor.host.clone(),
            },
            Protocol::Http | Protocol::Https => {
                let scheme = if protocol == Protocol::Https { "https" } else { "http" };
                // Default ports were filled in above, so this is always Some
                let port = port.unwrap_or(80);
                CheckTarget::Http {
                    url: http::build_url(scheme, &descriptor.host, port, path),
                }
            }
            Protocol::Tcp => {
                if port.is_none() {
                    log_warn!("TCP service '{}' has no port and will always report down", descriptor.name);
                }
                CheckTarget::Tcp {
                    host: descriptor.host.clone(),
                    port,
                }
            }
        };

        Ok(Self {
            name: descriptor.name.clone(),
            protocol,
            target,
            interval: Duration::from_secs(interval),
        })
    }

    /// Run the probe without publishing
    pub async fn probe(&self, client: &reqwest::Client) -> Result<()> {
        match &self.target {
            CheckTarget::Dns { host } => dns::probe(host).await,
            CheckTarget::Http { url } => http::probe(client, url).await,
            CheckTarget::Tcp { host, port: Some(port) } => tcp::probe(host, *port).await,
            CheckTarget::Tcp { host, port: None } => Err(ServiceCheckError::ConfigError(format!(
                "no port configured for TCP host {}",
                host
            ))),
        }
    }

    /// One full cycle: probe, then publish exactly one status
    pub async fn run(&self, client: &reqwest::Client, publisher: &StatusPublisher) -> ServiceStatus {
        let status = match self.probe(client).await {
            Ok(()) => {
                log_debug!("{} check for {} succeeded", self.protocol, self.target);
                ServiceStatus::Up
            }
            Err(e) => {
                log_debug!("{} check for {} failed: {}", self.protocol, self.target, e);
                ServiceStatus::Down
            }
        };

        if let Err(e) = publisher.publish(&self.name, status) {
            log_error!("Failed to publish status for {}: {}", self.name, e);
        }

        status
    }
}
