// src/util/io/discovery.rs
//! Auto-discovery - announces every checked service once at startup so a
//! home-automation platform can register it as a binary sensor

use serde::{Deserialize, Serialize};

use crate::{
    check::ScheduledCheck,
    config::Config,
    error::Result,
    log_debug,
    util::io::bus::{BusMessage, MessageBus},
};

pub const DEVICE_CLASS: &str = "running";

/// Body of a `{discoveryPrefix}/{topicRoot}/{name}/config` message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryPayload {
    pub name: String,
    pub device_class: String,
    pub state_topic: String,
    pub payload_on: String,
    pub payload_off: String,
}

/// Retained discovery messages for `checks`; empty without a discovery prefix
pub fn discovery_messages(config: &Config, checks: &[ScheduledCheck]) -> Result<Vec<BusMessage>> {
    let Some(prefix) = config.mqtt_connect.discovery_prefix() else {
        return Ok(Vec::new());
    };

    let mut messages = Vec::with_capacity(checks.len());
    for check in checks {
        let topic = format!("{}/{}/{}/config", prefix, config.mqtt_connect.topic_root, check.name);
        let payload = DiscoveryPayload {
            name: check.name.clone(),
            device_class: DEVICE_CLASS.to_string(),
            state_topic: config.state_topic(&check.name),
            payload_on: config.payload.success.clone(),
            payload_off: config.payload.failure.clone(),
        };

        log_debug!(
            "Publishing discovery topic: {}\n{}",
            topic,
            serde_json::to_string_pretty(&payload).unwrap_or_default()
        );

        messages.push(BusMessage::retained(topic, serde_json::to_string(&payload)?));
    }

    Ok(messages)
}

/// Queue the discovery messages, returning how many were sent
pub fn announce(config: &Config, checks: &[ScheduledCheck], bus: &MessageBus) -> Result<usize> {
    let messages = discovery_messages(config, checks)?;
    let count = messages.len();

    for message in messages {
        bus.publish(message)?;
    }

    Ok(count)
}
