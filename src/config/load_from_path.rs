use std::{fs, path::Path};

use crate::{
    config::Config,
    error::{Result, ServiceCheckError},
    log_debug, log_warn,
};

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Configuration compiled into the binary, used when the file can't be read
const BUNDLED_CONFIG: &str = include_str!("../../config-default.json");

impl Config {
    /// Load `path`, falling back to the bundled default configuration.
    ///
    /// Only fails when the bundled configuration itself is broken.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        log_debug!("Reading configuration from {}", path.display());

        let config = match Self::load_from_path(path) {
            Ok(config) => config,
            Err(e) => {
                log_warn!("{}. Using the bundled default configuration instead.", e);
                Self::bundled_default()?
            }
        };

        log_debug!(
            "Read the following configuration:\n{}",
            serde_json::to_string_pretty(&config).unwrap_or_default()
        );

        Ok(config)
    }

    /// Parse a config file; `.yml`/`.yaml` as YAML, anything else as JSON
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ServiceCheckError::ConfigError(format!("{}: {}", path.display(), e)))?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"));

        let parsed = if is_yaml {
            Self::from_yaml_str(&content)
        } else {
            Self::from_json_str(&content)
        };

        parsed.map_err(|e| ServiceCheckError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn bundled_default() -> Result<Self> {
        Self::from_json_str(BUNDLED_CONFIG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_bundled_default_parses() {
        let config = Config::bundled_default().unwrap();

        assert_eq!(config.mqtt_connect.topic_root, "servicecheck");
        assert!(!config.services.is_empty());
        assert_eq!(config.payload.success, "ON");
        assert_eq!(config.payload.failure, "OFF");
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        assert!(Config::load_from_path(&path).is_err());

        let config = Config::load_or_default(&path).unwrap();
        let bundled = Config::bundled_default().unwrap();
        assert_eq!(config.services, bundled.services);
    }

    #[test]
    fn test_malformed_file_falls_back_to_default() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ this is not json").unwrap();

        let err = Config::load_from_path(file.path()).unwrap_err();
        assert!(matches!(err, ServiceCheckError::ConfigError(_)));

        let config = Config::load_or_default(file.path()).unwrap();
        assert_eq!(config.mqtt_connect.topic_root, "servicecheck");
    }

    #[test]
    fn test_legacy_keys_and_payload_defaults() {
        let config = Config::from_json_str(r#"{
            "mqttConnect": {
                "url": "mqtt://broker.lan",
                "statePrefix": "home/services",
                "discoveryPrefix": "homeassistant"
            },
            "services": [
                { "name": "Router", "host": "192.168.1.1", "protocol": "http" }
            ]
        }"#).unwrap();

        assert_eq!(config.mqtt_connect.topic_root, "home/services");
        assert_eq!(config.mqtt_connect.discovery_prefix(), Some("homeassistant"));
        assert_eq!(config.payload, crate::config::PayloadConfig::default());
        assert_eq!(config.state_topic("Router"), "home/services/Router");
        assert_eq!(config.services[0].port, None);
    }

    #[test]
    fn test_status_msg_alias_and_empty_credentials() {
        let config = Config::from_json_str(r#"{
            "mqttConnect": {
                "url": "mqtt://broker.lan",
                "username": "",
                "password": "",
                "topicRoot": "svc",
                "discoveryPrefix": ""
            },
            "statusMsg": { "success": "up", "failure": "down" },
            "services": []
        }"#).unwrap();

        assert_eq!(config.payload.success, "up");
        assert_eq!(config.payload.failure, "down");
        assert_eq!(config.mqtt_connect.credentials(), None);
        assert_eq!(config.mqtt_connect.discovery_prefix(), None);
    }

    #[test]
    fn test_yaml_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yml");
        std::fs::write(&path, "\
mqttConnect:
  url: mqtt://broker.lan:1884
  username: monitor
  password: secret
  topicRoot: svc
services:
  - name: SSH
    host: nas.lan
    protocol: tcp
    port: 22
    interval: 60
").unwrap();

        let config = Config::load_from_path(&path).unwrap();

        assert_eq!(config.mqtt_connect.credentials(), Some(("monitor", "secret")));
        assert_eq!(config.services.len(), 1);
        assert_eq!(config.services[0].port, Some(22));
        assert_eq!(config.services[0].interval, Some(60));
    }
}
