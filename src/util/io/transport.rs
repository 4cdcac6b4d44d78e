// src/util/io/transport.rs
//! Broker Transport - one persistent MQTT connection fed by the publish queue

use rumqttc::{AsyncClient, ConnectReturnCode, Event, EventLoop, MqttOptions, Outgoing, Packet, QoS, Transport};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::{
    config::BrokerConfig,
    error::{Result, ServiceCheckError},
    util::io::bus::BusReceiver,
};
use crate::{log_debug, log_error, log_info, log_warn};

pub const DEFAULT_MQTT_PORT: u16 = 1883;
pub const DEFAULT_MQTTS_PORT: u16 = 8883;
const KEEP_ALIVE: Duration = Duration::from_secs(30);
const RECONNECT_DELAY: Duration = Duration::from_secs(5);
const REQUEST_CAPACITY: usize = 64;

/// Owns the broker connection and the tasks driving it
pub struct MqttTransport {
    client: AsyncClient,
    connected: watch::Receiver<bool>,
    event_loop_task: JoinHandle<()>,
    outbound_task: JoinHandle<()>,
}

impl MqttTransport {
    /// Build client options from `mqtt://host[:port]` (or `tcp://`), or
    /// `mqtts://` / `tls://` for a TLS connection
    pub fn mqtt_options(broker: &BrokerConfig) -> Result<MqttOptions> {
        let url = reqwest::Url::parse(&broker.url)
            .map_err(|e| ServiceCheckError::ConfigError(format!("broker url '{}': {}", broker.url, e)))?;

        let secure = match url.scheme() {
            "mqtt" | "tcp" => false,
            "mqtts" | "tls" | "ssl" => true,
            scheme => {
                return Err(ServiceCheckError::ConfigError(format!(
                    "broker url '{}': unsupported scheme '{}'",
                    broker.url, scheme
                )))
            }
        };

        let host = url
            .host_str()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| ServiceCheckError::ConfigError(format!("broker url '{}' has no host", broker.url)))?;
        let port = url
            .port()
            .unwrap_or(if secure { DEFAULT_MQTTS_PORT } else { DEFAULT_MQTT_PORT });

        let client_id = format!("service-check-{}", Uuid::new_v4().simple());
        let mut options = MqttOptions::new(client_id, host, port);
        options.set_keep_alive(KEEP_ALIVE);

        if secure {
            options.set_transport(Transport::tls_with_default_config());
        }

        if let Some((username, password)) = broker.credentials() {
            options.set_credentials(username, password);
        }

        Ok(options)
    }

    /// Start the transport, or, when the broker settings are unusable, log
    /// the problem and discard every queued message so the checks keep running
    pub fn connect(broker: &BrokerConfig, receiver: BusReceiver) -> Option<Self> {
        match Self::mqtt_options(broker) {
            Ok(options) => Some(Self::start(options, &broker.url, receiver)),
            Err(e) => {
                log_error!("{}; status updates will not be published", e);
                tokio::spawn(discard_messages(receiver));
                None
            }
        }
    }

    /// Connect to the broker and start forwarding queued messages
    pub fn start(options: MqttOptions, url: &str, receiver: BusReceiver) -> Self {
        let (client, event_loop) = AsyncClient::new(options, REQUEST_CAPACITY);
        let (connected_tx, connected) = watch::channel(false);

        log_info!("Starting broker transport for {}", url);

        let event_loop_task = tokio::spawn(drive_event_loop(event_loop, connected_tx, url.to_string()));
        let outbound_task = tokio::spawn(forward_messages(
            client.clone(),
            connected.clone(),
            receiver,
            url.to_string(),
        ));

        Self {
            client,
            connected,
            event_loop_task,
            outbound_task,
        }
    }

    pub fn is_connected(&self) -> bool {
        *self.connected.borrow()
    }

    /// Wait up to `limit` for the first successful connection
    pub async fn wait_connected(&self, limit: Duration) -> bool {
        let mut connected = self.connected.clone();
        let up = matches!(
            tokio::time::timeout(limit, connected.wait_for(|up| *up)).await,
            Ok(Ok(_))
        );
        up
    }

    pub async fn shutdown(self) {
        self.outbound_task.abort();

        if self.is_connected() {
            if let Err(e) = self.client.disconnect().await {
                log_warn!("Failed to disconnect from broker: {}", e);
            }
        }

        let mut event_loop_task = self.event_loop_task;
        if tokio::time::timeout(Duration::from_secs(2), &mut event_loop_task).await.is_err() {
            event_loop_task.abort();
        }

        log_info!("Broker transport stopped");
    }
}

/// Poll the MQTT event loop forever, tracking whether the broker is reachable.
/// Polling again after an error reconnects.
async fn drive_event_loop(mut event_loop: EventLoop, connected: watch::Sender<bool>, url: String) {
    loop {
        match event_loop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                if ack.code == ConnectReturnCode::Success {
                    log_info!("🔌 Connected to broker {}", url);
                    connected.send_replace(true);
                } else {
                    log_error!("Broker {} refused the connection: {:?}", url, ack.code);
                    connected.send_replace(false);
                }
            }
            Ok(Event::Outgoing(Outgoing::Disconnect)) => {
                connected.send_replace(false);
                break;
            }
            Ok(event) => {
                log_debug!("MQTT event: {:?}", event);
            }
            Err(e) => {
                if connected.send_replace(false) {
                    log_error!("Lost connection to {}: {}", url, e);
                } else {
                    log_error!("Error connecting to {}: {}", url, e);
                }
                tokio::time::sleep(RECONNECT_DELAY).await;
            }
        }
    }
}

/// Hand queued messages to the client. Anything queued while the broker is
/// unreachable is dropped.
async fn forward_messages(
    client: AsyncClient,
    connected: watch::Receiver<bool>,
    mut receiver: BusReceiver,
    url: String,
) {
    while let Some(message) = receiver.recv().await {
        if !*connected.borrow() {
            log_warn!("Broker {} unavailable, dropping {} = {}", url, message.topic, message.payload);
            continue;
        }

        log_debug!("📤 {} = {} (retain: {})", message.topic, message.payload, message.retain);

        if let Err(e) = client
            .publish(message.topic.clone(), QoS::AtMostOnce, message.retain, message.payload)
            .await
        {
            log_error!("Failed to publish {}: {}", message.topic, e);
        }
    }

    log_debug!("Publish queue closed");
}

async fn discard_messages(mut receiver: BusReceiver) {
    while let Some(message) = receiver.recv().await {
        log_warn!("No usable broker, dropping {} = {}", message.topic, message.payload);
    }
}
