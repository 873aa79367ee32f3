use thiserror::Error;

/// Problems with the run configuration. Any of these stops the run before a
/// single packet is sent.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid network '{0}': expected the form a.b.c.d/n")]
    InvalidCidr(String),

    #[error("invalid prefix length in '{0}': must be between 0 and 32")]
    InvalidPrefix(String),

    #[error("no ports to scan")]
    EmptyPortList,

    #[error("port {0} is not a valid TCP port")]
    InvalidPort(u16),

    #[error("connect timeout must be a positive number of seconds, got {0}")]
    InvalidTimeout(String),

    #[error("at least one worker is required")]
    NoWorkers,
}
