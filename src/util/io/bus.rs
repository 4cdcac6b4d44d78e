use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::error::{Result, ServiceCheckError};

/// A message waiting for the broker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusMessage {
    pub topic: String,
    pub payload: String,
    pub retain: bool,
}

impl BusMessage {
    pub fn new(topic: String, payload: String) -> Self {
        Self {
            topic,
            payload,
            retain: false,
        }
    }

    pub fn retained(topic: String, payload: String) -> Self {
        Self {
            topic,
            payload,
            retain: true,
        }
    }
}

pub type BusReceiver = mpsc::UnboundedReceiver<BusMessage>;
pub type BusSender = mpsc::UnboundedSender<BusMessage>;

/// The single publish queue in front of the broker connection.
///
/// Cloned into every check task; the transport owns the receiving end.
#[derive(Debug, Clone)]
pub struct MessageBus {
    sender: BusSender,
}

impl MessageBus {
    pub fn new() -> (Self, BusReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();

        (Self { sender }, receiver)
    }

    pub fn publish(&self, message: BusMessage) -> Result<()> {
        self.sender
            .send(message)
            .map_err(|_| ServiceCheckError::BrokerError("publish queue closed".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_messages_arrive_in_order() {
        let (bus, mut receiver) = MessageBus::new();
        let other = bus.clone();

        bus.publish(BusMessage::retained("a/config".to_string(), "{}".to_string())).unwrap();
        other.publish(BusMessage::new("a".to_string(), "ON".to_string())).unwrap();

        let first = receiver.recv().await.unwrap();
        assert_eq!(first.topic, "a/config");
        assert!(first.retain);

        let second = receiver.recv().await.unwrap();
        assert_eq!(second.payload, "ON");
        assert!(!second.retain);
    }

    #[tokio::test]
    async fn test_publish_fails_once_receiver_is_gone() {
        let (bus, receiver) = MessageBus::new();
        drop(receiver);

        assert!(bus.publish(BusMessage::new("a".to_string(), "OFF".to_string())).is_err());
    }
}
