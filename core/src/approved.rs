//! # Approved Hosts
//!
//! The operator's allowlist, resolved once before the sweep starts.
//!
//! Membership is decided on resolved IPv4 addresses only. A token that does not
//! resolve can never match, and a name with several addresses (round-robin,
//! CDN) is represented by the first IPv4 address the resolver returns.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use tokio::net::lookup_host;
use tokio::time::timeout;
use tracing::{debug, warn};

const RESOLVE_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolved IPv4 address -> the token it came from. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct ApprovedSet {
    entries: HashMap<Ipv4Addr, String>,
}

impl ApprovedSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Resolves each token. Tokens without an IPv4 address are dropped.
    pub async fn build<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: HashMap<Ipv4Addr, String> = HashMap::new();

        for token in tokens {
            let token: &str = token.as_ref().trim();
            if token.is_empty() {
                continue;
            }
            match resolve_ipv4(token).await {
                Some(ip) => {
                    debug!("approved host '{token}' resolved to {ip}");
                    entries.entry(ip).or_insert_with(|| token.to_string());
                }
                None => warn!("approved host '{token}' did not resolve to an IPv4 address and will not be excluded"),
            }
        }

        Self { entries }
    }

    /// Builds a set from addresses that are already resolved.
    pub fn from_resolved<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Ipv4Addr, S)>,
        S: Into<String>,
    {
        let mut map: HashMap<Ipv4Addr, String> = HashMap::new();
        for (ip, token) in entries {
            map.entry(ip).or_insert_with(|| token.into());
        }
        Self { entries: map }
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        self.entries.contains_key(&addr)
    }

    /// The token `addr` was approved under.
    pub fn token_for(&self, addr: Ipv4Addr) -> Option<&str> {
        self.entries.get(&addr).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

async fn resolve_ipv4(token: &str) -> Option<Ipv4Addr> {
    if let Ok(ip) = token.parse::<IpAddr>() {
        return match ip {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        };
    }

    let addrs = match timeout(RESOLVE_TIMEOUT, lookup_host((token, 0))).await {
        Ok(Ok(addrs)) => addrs,
        Ok(Err(e)) => {
            debug!("lookup of '{token}' failed: {e}");
            return None;
        }
        Err(_elapsed) => {
            debug!("lookup of '{token}' timed out");
            return None;
        }
    };

    addrs
        .filter_map(|sock| match sock.ip() {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        })
        .next()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
