use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use netscan_common::scanning::{ConnectOutcome, Prober};

/// In-memory [`Prober`]: ports listed in `open` connect, everything else is refused.
#[derive(Default)]
pub struct FakeProber {
    /// Open ports and whether they speak HTTP.
    open: HashMap<SocketAddr, bool>,
    /// How long an open port takes to accept. Slower than the caller's
    /// timeout means `TimedOut`.
    latency: Duration,
    pub connects: Mutex<Vec<SocketAddr>>,
    pub http_checks: Mutex<Vec<SocketAddr>>,
    pub timeouts: Mutex<Vec<Duration>>,
}

impl FakeProber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_open(mut self, host: Ipv4Addr, port: u16, http: bool) -> Self {
        self.open.insert(SocketAddr::from((host, port)), http);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn connected_hosts(&self) -> Vec<Ipv4Addr> {
        self.connects
            .lock()
            .unwrap()
            .iter()
            .filter_map(|addr| match addr {
                SocketAddr::V4(v4) => Some(*v4.ip()),
                SocketAddr::V6(_) => None,
            })
            .collect()
    }

    pub fn http_check_count(&self) -> usize {
        self.http_checks.lock().unwrap().len()
    }
}

#[async_trait]
impl Prober for FakeProber {
    async fn connect(&self, addr: SocketAddr, timeout: Duration) -> ConnectOutcome {
        self.connects.lock().unwrap().push(addr);
        self.timeouts.lock().unwrap().push(timeout);
        if !self.open.contains_key(&addr) {
            return ConnectOutcome::Refused;
        }
        if self.latency > timeout {
            tokio::time::sleep(timeout).await;
            return ConnectOutcome::TimedOut;
        }
        tokio::time::sleep(self.latency).await;
        ConnectOutcome::Connected
    }

    async fn probe_http(&self, addr: SocketAddr, _timeout: Duration) -> bool {
        self.http_checks.lock().unwrap().push(addr);
        self.open.get(&addr).copied().unwrap_or(false)
    }
}
