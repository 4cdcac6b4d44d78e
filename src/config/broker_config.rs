use serde::{Deserialize, Serialize};

/// MQTT connection settings (`mqttConnect`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerConfig {
    pub url: String,

    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,

    /// Older config files call this `statePrefix`
    #[serde(alias = "statePrefix")]
    pub topic_root: String,

    #[serde(default)]
    pub discovery_prefix: Option<String>,
}

impl BrokerConfig {
    /// Discovery prefix, treating an empty string as unset
    pub fn discovery_prefix(&self) -> Option<&str> {
        self.discovery_prefix
            .as_deref()
            .filter(|prefix| !prefix.is_empty())
    }

    /// Username/password pair, only when a username is configured
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let username = self.username.as_deref().filter(|u| !u.is_empty())?;
        Some((username, self.password.as_deref().unwrap_or("")))
    }
}
