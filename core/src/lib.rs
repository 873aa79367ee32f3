//! # netscan core
//!
//! The scan engine: TCP and HTTP probes, the approved-host allowlist, the
//! per-host [`scanner::PortScanner`] and the concurrent [`engine::ScanEngine`].

pub mod approved;
pub mod engine;
pub mod network;
pub mod scanner;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use netscan_common::config::ScanConfig;
use tracing::info;

use approved::ApprovedSet;
use engine::ScanEngine;
use network::NetProber;

/// Resolves the allowlist and wires the socket-backed prober into an engine.
pub async fn prepare_engine(config: Arc<ScanConfig>) -> anyhow::Result<ScanEngine> {
    let approved = ApprovedSet::build(config.approved()).await;
    if !config.approved().is_empty() {
        info!(
            "{} of {} approved hosts resolved",
            approved.len(),
            config.approved().len()
        );
    }

    let prober = Arc::new(NetProber::new()?);
    Ok(ScanEngine::new(config, approved, prober))
}
