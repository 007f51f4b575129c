use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub verbose: bool,
}

impl LoggingConfig {
    /// Verbose mode lifts the level to at least `debug` so per-query traces show.
    pub fn effective_level(&self) -> &str {
        if self.verbose && !matches!(self.level.as_str(), "trace" | "debug") {
            "debug"
        } else {
            &self.level
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            verbose: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
