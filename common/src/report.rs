//! # Findings Report
//!
//! The result model of a run. A [`Report`] holds one [`HostFinding`] per host
//! that answered on at least one configured port, in ascending address order.
//! Rendering and persistence belong to the caller.

use std::fmt;
use std::net::Ipv4Addr;

use chrono::{DateTime, Local};

/// Suffix appended to a port number when an HTTP server answered on it.
pub const HTTP_MARKER: char = '*';

/// One open port on a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortResult {
    pub port: u16,
    pub http_responsive: bool,
}

impl PortResult {
    pub fn open(port: u16) -> Self {
        Self {
            port,
            http_responsive: false,
        }
    }

    pub fn with_http(self, http_responsive: bool) -> Self {
        Self {
            http_responsive,
            ..self
        }
    }
}

impl fmt::Display for PortResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.http_responsive {
            write!(f, "{}{}", self.port, HTTP_MARKER)
        } else {
            write!(f, "{}", self.port)
        }
    }
}

/// A host that answered on at least one port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostFinding {
    pub host: Ipv4Addr,
    pub timestamp: DateTime<Local>,
    pub ports: Vec<PortResult>,
}

impl HostFinding {
    /// Returns `None` when `ports` is empty: silent hosts are never recorded.
    pub fn new(host: Ipv4Addr, ports: Vec<PortResult>) -> Option<Self> {
        if ports.is_empty() {
            return None;
        }
        Some(Self {
            host,
            timestamp: Local::now(),
            ports,
        })
    }

    /// Ports rendered for display, e.g. `80*, 443`.
    pub fn ports_display(&self) -> String {
        self.ports
            .iter()
            .map(PortResult::to_string)
            .collect::<Vec<String>>()
            .join(", ")
    }

    /// `true` when at least one port answered an HTTP request.
    pub fn has_http(&self) -> bool {
        self.ports.iter().any(|p| p.http_responsive)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    findings: Vec<HostFinding>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when no host answered. Presentation shows a "no findings"
    /// placeholder in that case rather than an empty table.
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn find(&self, host: Ipv4Addr) -> Option<&HostFinding> {
        self.findings.iter().find(|f| f.host == host)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HostFinding> {
        self.findings.iter()
    }
}

impl From<Vec<HostFinding>> for Report {
    fn from(mut findings: Vec<HostFinding>) -> Self {
        findings.sort_by_key(|f| f.host);
        Self { findings }
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a HostFinding;
    type IntoIter = std::slice::Iter<'a, HostFinding>;

    fn into_iter(self) -> Self::IntoIter {
        self.findings.iter()
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
