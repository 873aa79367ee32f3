use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;

/// How a single TCP connect attempt ended.
///
/// Only [`ConnectOutcome::Connected`] counts as an open port; the other
/// variants are kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectOutcome {
    Connected,
    /// The peer answered with a reset.
    Refused,
    /// Nothing happened before the deadline (filtered or black-holed).
    TimedOut,
    /// No route, host down, or any other transport error.
    Unreachable,
}

impl ConnectOutcome {
    pub fn is_open(self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl fmt::Display for ConnectOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Connected => "connected",
            Self::Refused => "refused",
            Self::TimedOut => "timed out",
            Self::Unreachable => "unreachable",
        };
        f.write_str(s)
    }
}

/// Network probes used by the port scanner.
///
/// Implementations must honour `timeout` and release their sockets on every
/// exit path. Neither method reports errors: every network condition maps to
/// an outcome.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn connect(&self, addr: SocketAddr, timeout: Duration) -> ConnectOutcome;

    /// `true` if an HTTP response of any status comes back from `addr`.
    async fn probe_http(&self, addr: SocketAddr, timeout: Duration) -> bool;
}
