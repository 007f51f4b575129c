use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("Transport connection refused by {server}")]
    TransportConnectionRefused { server: String },

    #[error("Transport connection reset by {server}")]
    TransportConnectionReset { server: String },
}

impl DomainError {
    /// Maps a socket error on the upstream path to the matching transport variant.
    pub fn from_upstream_io(err: &std::io::Error, server: impl Into<String>) -> Self {
        let server = server.into();
        match err.kind() {
            std::io::ErrorKind::TimedOut => Self::TransportTimeout { server },
            std::io::ErrorKind::ConnectionRefused => Self::TransportConnectionRefused { server },
            std::io::ErrorKind::ConnectionReset => Self::TransportConnectionReset { server },
            _ => Self::IoError(format!("{}: {}", server, err)),
        }
    }
}
