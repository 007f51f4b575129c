use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_bind_v4")]
    pub bind_v4: String,

    /// Empty disables the IPv6 listener.
    #[serde(default = "default_bind_v6")]
    pub bind_v6: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_v4: default_bind_v4(),
            bind_v6: default_bind_v6(),
        }
    }
}

fn default_port() -> u16 {
    53
}

fn default_bind_v4() -> String {
    "0.0.0.0".to_string()
}

fn default_bind_v6() -> String {
    "::".to_string()
}
