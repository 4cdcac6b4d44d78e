// src/config/mod.rs
//! Configuration - broker settings, status payloads and the services to check

mod broker_config;
mod load_from_path;
mod payload_config;
mod service_descriptor;

use serde::{Deserialize, Serialize};

pub use broker_config::BrokerConfig;
pub use load_from_path::DEFAULT_CONFIG_PATH;
pub use payload_config::PayloadConfig;
pub use service_descriptor::ServiceDescriptor;

/// Whole configuration file. Built once at startup and shared read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub mqtt_connect: BrokerConfig,

    #[serde(default, alias = "statusMsg")]
    pub payload: PayloadConfig,

    #[serde(default)]
    pub services: Vec<ServiceDescriptor>,
}

impl Config {
    /// Topic a service's status is published on
    pub fn state_topic(&self, service_name: &str) -> String {
        format!("{}/{}", self.mqtt_connect.topic_root, service_name)
    }
}
