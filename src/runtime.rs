use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::scheduler::Scheduler;
use crate::util::io::{
    bus::MessageBus,
    discovery,
    publisher::StatusPublisher,
    transport::MqttTransport,
};
use crate::{log_info, log_warn};

/// How long startup waits for the broker before scheduling anyway
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Runtime {
    config: Arc<Config>,
}

impl Runtime {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Connect, announce, schedule, then run until Ctrl-C
    pub async fn run(self) -> color_eyre::Result<()> {
        let (bus, receiver) = MessageBus::new();
        let transport = MqttTransport::connect(&self.config.mqtt_connect, receiver);

        if let Some(transport) = &transport {
            if !transport.wait_connected(CONNECT_TIMEOUT).await {
                log_warn!(
                    "No connection to {} yet; status updates are dropped until it comes up",
                    self.config.mqtt_connect.url
                );
            }
        }

        let publisher = StatusPublisher::new(bus.clone(), self.config.clone());
        let scheduler = Scheduler::new(&self.config, publisher)?;

        if let Some(prefix) = self.config.mqtt_connect.discovery_prefix() {
            log_info!("Publishing discovery topics to: {}", prefix);
            discovery::announce(&self.config, scheduler.checks(), &bus)?;
        }

        log_info!("Publishing state topics to: {}", self.config.mqtt_connect.topic_root);
        let handle = scheduler.start();
        if handle.is_empty() {
            log_warn!("No services to check");
        }

        tokio::signal::ctrl_c().await?;

        log_info!("Shutting down");
        handle.shutdown();
        if let Some(transport) = transport {
            transport.shutdown().await;
        }

        Ok(())
    }
}
