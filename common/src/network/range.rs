//! # Address Range Model
//!
//! Expands CIDR notation (`a.b.c.d/n`) into the ordered sequence of IPv4 host
//! addresses it covers.
//!
//! The sequence is lazy and restartable: every call to [`AddressRange::iter`]
//! starts again from the lowest address, and nothing is allocated per address.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;
use tracing::warn;

use crate::error::ConfigError;

/// Whether the network and broadcast addresses of a block are part of the sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Sweep every address in the block.
    #[default]
    Include,
    /// Skip the first (network) and last (broadcast) address.
    Exclude,
}

/// Represents a continuous range of IPv4 addresses, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    pub fn iter(&self) -> Addresses {
        let start: u64 = u32::from(self.start_addr) as u64;
        let end: u64 = u32::from(self.end_addr) as u64 + 1;
        Addresses {
            next: start,
            end: end.max(start),
        }
    }

    pub fn len(&self) -> u64 {
        let start: u64 = u32::from(self.start_addr) as u64;
        let end: u64 = u32::from(self.end_addr) as u64;
        if end < start { 0 } else { end - start + 1 }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ascending iterator over an [`Ipv4Range`].
///
/// Counts in `u64` so that `255.255.255.255` can be yielded without wrapping.
#[derive(Debug, Clone)]
pub struct Addresses {
    next: u64,
    end: u64,
}

impl Iterator for Addresses {
    type Item = Ipv4Addr;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let addr = Ipv4Addr::from(self.next as u32);
        self.next += 1;
        Some(addr)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// A validated CIDR block such as `10.14.0.0/16`.
///
/// Host bits in the address part are allowed and masked off, so
/// `192.168.1.77/24` denotes the same block as `192.168.1.0/24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cidr {
    network: Ipv4Network,
}

impl Cidr {
    pub fn prefix(&self) -> u8 {
        self.network.prefix()
    }

    pub fn network_addr(&self) -> Ipv4Addr {
        self.network.network()
    }

    pub fn broadcast_addr(&self) -> Ipv4Addr {
        self.network.broadcast()
    }

    /// Number of addresses in the block, `2^(32 - prefix)`.
    pub fn address_count(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix()))
    }

    pub fn range(&self) -> Ipv4Range {
        Ipv4Range::new(self.network_addr(), self.broadcast_addr())
    }
}

impl FromStr for Cidr {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some((ip_str, prefix_str)) = s.split_once('/') else {
            return Err(ConfigError::InvalidCidr(s.to_string()));
        };

        let ip: Ipv4Addr = ip_str
            .parse()
            .map_err(|_| ConfigError::InvalidCidr(s.to_string()))?;

        if prefix_str.is_empty() || !prefix_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::InvalidCidr(s.to_string()));
        }
        let prefix: u8 = prefix_str
            .parse()
            .map_err(|_| ConfigError::InvalidPrefix(s.to_string()))?;

        let network = Ipv4Network::new(ip, prefix)
            .map_err(|_| ConfigError::InvalidPrefix(s.to_string()))?;

        Ok(Self { network })
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network_addr(), self.prefix())
    }
}

/// The host addresses a run sweeps: a [`Cidr`] block filtered by a [`BoundaryPolicy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRange {
    cidr: Cidr,
    policy: BoundaryPolicy,
    hosts: Ipv4Range,
}

impl AddressRange {
    pub fn new(cidr: Cidr, policy: BoundaryPolicy) -> Self {
        let full: Ipv4Range = cidr.range();
        let hosts: Ipv4Range = match policy {
            BoundaryPolicy::Include => full,
            BoundaryPolicy::Exclude => strip_boundaries(full, cidr),
        };
        Self {
            cidr,
            policy,
            hosts,
        }
    }

    /// Parses `cidr` and enumerates every address in the block, network and
    /// broadcast included.
    pub fn expand(cidr: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(cidr.parse()?, BoundaryPolicy::Include))
    }

    pub fn iter(&self) -> Addresses {
        self.hosts.iter()
    }

    pub fn len(&self) -> u64 {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn cidr(&self) -> Cidr {
        self.cidr
    }

    pub fn policy(&self) -> BoundaryPolicy {
        self.policy
    }
}

impl IntoIterator for &AddressRange {
    type Item = Ipv4Addr;
    type IntoIter = Addresses;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn strip_boundaries(full: Ipv4Range, cidr: Cidr) -> Ipv4Range {
    let net_u32: u32 = u32::from(full.start_addr);
    let broadcast_u32: u32 = u32::from(full.end_addr);

    let start_u32 = net_u32.saturating_add(1);
    let end_u32 = broadcast_u32.saturating_sub(1);

    if start_u32 <= end_u32 {
        Ipv4Range::new(Ipv4Addr::from(start_u32), Ipv4Addr::from(end_u32))
    } else {
        warn!("{cidr} is too small to strip network and broadcast, scanning full range");
        full
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
