use serde::{Deserialize, Serialize};

/// Strings published for an up or down service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadConfig {
    pub success: String,
    pub failure: String,
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            success: "ON".to_string(),
            failure: "OFF".to_string(),
        }
    }
}
