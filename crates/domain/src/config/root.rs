use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::filter::FilterConfig;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;

/// Resolved proxy configuration. Immutable once `load` returns.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listening port and bind addresses
    #[serde(default)]
    pub server: ServerConfig,

    /// Where allowed queries are forwarded
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Blocked-domain list
    #[serde(default)]
    pub filter: FilterConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from an optional TOML file, then apply command-line
    /// overrides and validate the result.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(server) = overrides.upstream_server {
            self.upstream.server = server;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(path) = overrides.filter_path {
            self.filter.path = path;
        }
        if overrides.verbose {
            self.logging.verbose = true;
        }
        if let Some(timeout_ms) = overrides.timeout_ms {
            self.upstream.timeout_ms = timeout_ms;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.upstream.server.trim().is_empty() {
            return Err(ConfigError::Missing("upstream server (-s)"));
        }
        if self.filter.path.trim().is_empty() {
            return Err(ConfigError::Missing("filter file (-f)"));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "Port must be in range 1-65535".to_string(),
            ));
        }
        if self.upstream.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Upstream timeout cannot be 0".to_string(),
            ));
        }
        self.upstream.addr().map_err(ConfigError::Validation)?;
        Ok(())
    }

    pub fn verbose(&self) -> bool {
        self.logging.verbose
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub upstream_server: Option<String>,
    pub port: Option<u16>,
    pub filter_path: Option<String>,
    pub verbose: bool,
    pub timeout_ms: Option<u64>,
    pub log_level: Option<String>,
}
