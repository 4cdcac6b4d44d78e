use serde::{Deserialize, Serialize};

/// One entry of `services`.
///
/// Kept exactly as written in the file; defaults are filled in when the
/// scheduler resolves it into a [`crate::check::ScheduledCheck`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Unique, used as the topic suffix
    pub name: String,
    pub host: String,

    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub path: Option<String>,
    /// Seconds between checks
    #[serde(default)]
    pub interval: Option<u64>,
}
