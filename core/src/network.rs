//! Socket-level probes and the [`NetProber`] adapter that exposes them
//! through the [`Prober`] trait.

pub mod http;
pub mod tcp;

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use netscan_common::scanning::{ConnectOutcome, Prober};

use http::HttpProbe;

/// [`Prober`] backed by real sockets.
pub struct NetProber {
    http: HttpProbe,
}

impl NetProber {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            http: HttpProbe::new()?,
        })
    }
}

#[async_trait]
impl Prober for NetProber {
    async fn connect(&self, addr: SocketAddr, timeout: Duration) -> ConnectOutcome {
        tcp::connect_probe(addr, timeout).await
    }

    async fn probe_http(&self, addr: SocketAddr, timeout: Duration) -> bool {
        self.http.probe(addr, timeout).await
    }
}
