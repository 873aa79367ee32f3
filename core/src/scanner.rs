//! Per-host port probing.
//!
//! [`PortScanner`] walks the configured ports of one host in order and turns
//! the [`Prober`] outcomes into [`PortResult`]s. A port that fails in any way
//! is simply absent from the result; it never stops the remaining ports.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use netscan_common::config::ScanConfig;
use netscan_common::report::PortResult;
use netscan_common::scanning::{ConnectOutcome, Prober};
use tracing::debug;

pub struct PortScanner {
    prober: Arc<dyn Prober>,
}

impl PortScanner {
    pub fn new(prober: Arc<dyn Prober>) -> Self {
        Self { prober }
    }

    /// Returns the responsive ports of `host`, in configured order.
    pub async fn scan_host(&self, host: Ipv4Addr, cfg: &ScanConfig) -> Vec<PortResult> {
        let mut found: Vec<PortResult> = Vec::new();

        for &port in cfg.ports() {
            let addr = SocketAddr::from((host, port));
            let outcome: ConnectOutcome = self.prober.connect(addr, cfg.timeout()).await;
            debug!("{addr} {outcome}");

            if !outcome.is_open() {
                continue;
            }

            let mut result = PortResult::open(port);
            if cfg.test_http() {
                result = result.with_http(self.prober.probe_http(addr, cfg.timeout()).await);
            }
            found.push(result);
        }

        found
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
