use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub path: String,

    /// Periodic re-read of the filter file; 0 disables it.
    #[serde(default)]
    pub reload_interval_secs: u64,
}
