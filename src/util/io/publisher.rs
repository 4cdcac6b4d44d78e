// src/util/io/publisher.rs
//! Status Publisher - maps a service status onto its state topic

use std::sync::Arc;

use crate::{
    check::ServiceStatus,
    config::Config,
    error::Result,
    log_debug,
    util::io::bus::{BusMessage, MessageBus},
};

#[derive(Debug, Clone)]
pub struct StatusPublisher {
    bus: MessageBus,
    config: Arc<Config>,
}

impl StatusPublisher {
    pub fn new(bus: MessageBus, config: Arc<Config>) -> Self {
        Self { bus, config }
    }

    /// Queue `{topicRoot}/{service_name}` = status payload, not retained
    pub fn publish(&self, service_name: &str, status: ServiceStatus) -> Result<()> {
        let topic = self.config.state_topic(service_name);
        let payload = status.payload(&self.config.payload).to_string();

        log_debug!(
            "Publishing to server: {}, topic: {}, message: {}",
            self.config.mqtt_connect.url, topic, payload
        );

        self.bus.publish(BusMessage::new(topic, payload))
    }
}
