//! # Scan Engine
//!
//! Drives a full sweep: every address of the configured range is drawn by one
//! of a bounded set of workers, checked against the [`ApprovedSet`], probed
//! with the [`PortScanner`] and, if anything answered, recorded.
//!
//! Besides read-only state, workers share only the address iterator and a
//! channel. All bookkeeping happens in the collector loop inside
//! [`ScanEngine::run`], which is the only writer of the [`Report`]. The report is sorted by address before
//! it is handed out, so its order does not depend on worker scheduling.

use std::net::Ipv4Addr;
use std::sync::Arc;

use netscan_common::config::ScanConfig;
use netscan_common::network::range::Addresses;
use netscan_common::report::{HostFinding, Report};
use netscan_common::scanning::Prober;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::approved::ApprovedSet;
use crate::scanner::PortScanner;

/// Log target of the per-host "answered" events, so a frontend can tell them
/// apart from diagnostics.
pub const FINDING_TARGET: &str = "netscan::finding";

pub type ProgressCallback = Box<dyn Fn(ScanProgress) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Idle,
    Running,
    Done,
}

/// Snapshot passed to the progress callback after every host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanProgress {
    pub scanned: u64,
    pub total: u64,
    pub skipped: u64,
    pub findings: usize,
}

/// What happened to a single address.
#[derive(Debug)]
enum HostOutcome {
    Approved,
    Silent,
    Found(HostFinding),
}

pub struct ScanEngine {
    config: Arc<ScanConfig>,
    approved: Arc<ApprovedSet>,
    scanner: Arc<PortScanner>,
    report: Report,
    phase: ScanPhase,
    on_progress: Option<ProgressCallback>,
}

impl ScanEngine {
    pub fn new(config: Arc<ScanConfig>, approved: ApprovedSet, prober: Arc<dyn Prober>) -> Self {
        Self {
            config,
            approved: Arc::new(approved),
            scanner: Arc::new(PortScanner::new(prober)),
            report: Report::new(),
            phase: ScanPhase::Idle,
            on_progress: None,
        }
    }

    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ScanProgress) + Send + Sync + 'static,
    {
        self.on_progress = Some(Box::new(callback));
        self
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    pub fn approved(&self) -> &ApprovedSet {
        &self.approved
    }

    /// The report of the last completed run; empty before the first one.
    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Sweeps the whole range once. A later call starts from scratch and
    /// replaces the previous report.
    pub async fn run(&mut self) -> &Report {
        self.phase = ScanPhase::Running;

        let total: u64 = self.config.range().len();
        let worker_count: usize = worker_count(self.config.workers(), total);
        info!(
            "Sweeping {} ({total} addresses, {} ports each) with {worker_count} workers",
            self.config.network(),
            self.config.ports().len()
        );

        let addresses = Arc::new(Mutex::new(self.config.range().iter()));
        let (tx, mut rx) = mpsc::unbounded_channel::<HostOutcome>();

        let mut workers: JoinSet<()> = JoinSet::new();
        for _ in 0..worker_count {
            let worker = Worker {
                addresses: addresses.clone(),
                approved: self.approved.clone(),
                scanner: self.scanner.clone(),
                config: self.config.clone(),
                tx: tx.clone(),
            };
            workers.spawn(worker.run());
        }
        drop(tx);

        let mut findings: Vec<HostFinding> = Vec::new();
        let mut progress = ScanProgress {
            scanned: 0,
            total,
            skipped: 0,
            findings: 0,
        };

        while let Some(outcome) = rx.recv().await {
            progress.scanned += 1;
            match outcome {
                HostOutcome::Approved => progress.skipped += 1,
                HostOutcome::Silent => {}
                HostOutcome::Found(finding) => {
                    info!(
                        target: FINDING_TARGET,
                        "{} answered on {}",
                        finding.host,
                        finding.ports_display()
                    );
                    findings.push(finding);
                    progress.findings = findings.len();
                }
            }
            if let Some(callback) = &self.on_progress {
                callback(progress);
            }
        }

        while let Some(res) = workers.join_next().await {
            if let Err(e) = res {
                error!("Scan worker stopped unexpectedly: {e}");
            }
        }

        self.report = Report::from(findings);
        self.phase = ScanPhase::Done;
        &self.report
    }
}

fn worker_count(configured: usize, total: u64) -> usize {
    let total: usize = usize::try_from(total).unwrap_or(usize::MAX);
    configured.min(total).max(1)
}

struct Worker {
    addresses: Arc<Mutex<Addresses>>,
    approved: Arc<ApprovedSet>,
    scanner: Arc<PortScanner>,
    config: Arc<ScanConfig>,
    tx: mpsc::UnboundedSender<HostOutcome>,
}

impl Worker {
    async fn run(self) {
        loop {
            let next: Option<Ipv4Addr> = self.addresses.lock().await.next();
            let Some(host) = next else {
                break;
            };

            let outcome = self.inspect(host).await;
            if self.tx.send(outcome).is_err() {
                break;
            }
        }
    }

    async fn inspect(&self, host: Ipv4Addr) -> HostOutcome {
        if let Some(token) = self.approved.token_for(host) {
            debug!("Skipping {host}, approved as '{token}'");
            return HostOutcome::Approved;
        }

        let ports = self.scanner.scan_host(host, &self.config).await;
        match HostFinding::new(host, ports) {
            Some(finding) => HostOutcome::Found(finding),
            None => HostOutcome::Silent,
        }
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
