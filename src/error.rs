use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceCheckError {
    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Broker error: {0}")]
    BrokerError(String),
}

pub type Result<T> = std::result::Result<T, ServiceCheckError>;
