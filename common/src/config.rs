use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::network::range::{AddressRange, BoundaryPolicy, Cidr};

pub const DEFAULT_PORT: u16 = 80;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);
pub const DEFAULT_WORKERS: usize = 64;
pub const DEFAULT_OUTPUT: &str = "netscan.log";

/// Everything a run needs, validated once and read-only afterwards.
///
/// Built through [`ScanConfig::builder`]; components receive it by reference
/// (or behind an `Arc` when shared with workers) and never mutate it.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    range: AddressRange,
    ports: Vec<u16>,
    approved: Vec<String>,
    test_http: bool,
    verbose: bool,
    timeout: Duration,
    workers: usize,
    output: PathBuf,
}

impl ScanConfig {
    pub fn builder(network: impl Into<String>) -> ScanConfigBuilder {
        ScanConfigBuilder::new(network)
    }

    pub fn range(&self) -> &AddressRange {
        &self.range
    }

    pub fn network(&self) -> Cidr {
        self.range.cidr()
    }

    /// Ports in probing order. Never empty.
    pub fn ports(&self) -> &[u16] {
        &self.ports
    }

    /// Allowlist tokens as the operator typed them.
    pub fn approved(&self) -> &[String] {
        &self.approved
    }

    pub fn test_http(&self) -> bool {
        self.test_http
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Upper bound for a single connect attempt, and for a single HTTP check.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

#[derive(Debug, Clone)]
pub struct ScanConfigBuilder {
    network: String,
    ports: Option<Vec<u16>>,
    approved: Vec<String>,
    test_http: bool,
    verbose: bool,
    timeout_secs: f64,
    workers: usize,
    boundary: BoundaryPolicy,
    output: PathBuf,
}

impl ScanConfigBuilder {
    fn new(network: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            ports: None,
            approved: Vec::new(),
            test_http: false,
            verbose: false,
            timeout_secs: DEFAULT_TIMEOUT.as_secs_f64(),
            workers: DEFAULT_WORKERS,
            boundary: BoundaryPolicy::Include,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }

    /// Ports to probe. Never set, the run falls back to port 80.
    pub fn ports(mut self, ports: impl IntoIterator<Item = u16>) -> Self {
        self.ports = Some(ports.into_iter().collect());
        self
    }

    /// Allowlist tokens (hostnames or IP literals). Blank tokens are dropped.
    pub fn approved<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.approved = tokens
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        self
    }

    pub fn test_http(mut self, enabled: bool) -> Self {
        self.test_http = enabled;
        self
    }

    pub fn verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    pub fn timeout_secs(mut self, secs: f64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs_f64();
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn boundary(mut self, policy: BoundaryPolicy) -> Self {
        self.boundary = policy;
        self
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = path.into();
        self
    }

    pub fn build(self) -> Result<ScanConfig, ConfigError> {
        let cidr: Cidr = self.network.parse()?;

        let ports: Vec<u16> = self.ports.unwrap_or_else(|| vec![DEFAULT_PORT]);
        if ports.is_empty() {
            return Err(ConfigError::EmptyPortList);
        }
        if let Some(&bad) = ports.iter().find(|&&p| p == 0) {
            return Err(ConfigError::InvalidPort(bad));
        }

        if !self.timeout_secs.is_finite() || self.timeout_secs <= 0.0 {
            return Err(ConfigError::InvalidTimeout(self.timeout_secs.to_string()));
        }
        let timeout = Duration::try_from_secs_f64(self.timeout_secs)
            .map_err(|_| ConfigError::InvalidTimeout(self.timeout_secs.to_string()))?;

        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }

        Ok(ScanConfig {
            range: AddressRange::new(cidr, self.boundary),
            ports,
            approved: self.approved,
            test_http: self.test_http,
            verbose: self.verbose,
            timeout,
            workers: self.workers,
            output: self.output,
        })
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_applied() {
        let cfg = ScanConfig::builder("10.0.0.0/24").build().unwrap();
        assert_eq!(cfg.ports(), &[80]);
        assert!(cfg.approved().is_empty());
        assert!(!cfg.test_http());
        assert_eq!(cfg.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(cfg.workers(), DEFAULT_WORKERS);
        assert_eq!(cfg.output(), Path::new("netscan.log"));
        assert_eq!(cfg.range().len(), 256);
    }

    #[test]
    fn ports_keep_caller_order() {
        let cfg = ScanConfig::builder("10.0.0.0/24")
            .ports([443, 22, 443, 80])
            .build()
            .unwrap();
        assert_eq!(cfg.ports(), &[443, 22, 443, 80]);
    }

    #[test]
    fn blank_approved_tokens_are_dropped() {
        let cfg = ScanConfig::builder("10.0.0.0/24")
            .approved(["web1.example.com", " ", "", " 10.0.0.9 "])
            .build()
            .unwrap();
        assert_eq!(cfg.approved(), &["web1.example.com", "10.0.0.9"]);
    }

    #[test]
    fn invalid_network_is_rejected() {
        let err = ScanConfig::builder("10.0.0/24").build().unwrap_err();
        assert_eq!(err, ConfigError::InvalidCidr("10.0.0/24".into()));
    }

    #[test]
    fn explicit_empty_port_list_is_rejected() {
        let err = ScanConfig::builder("10.0.0.0/24")
            .ports(Vec::new())
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::EmptyPortList);
    }

    #[test]
    fn port_zero_is_rejected() {
        let err = ScanConfig::builder("10.0.0.0/24")
            .ports([80, 0])
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort(0));
    }

    #[test]
    fn timeout_must_be_positive() {
        for secs in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let res = ScanConfig::builder("10.0.0.0/24").timeout_secs(secs).build();
            assert!(matches!(res, Err(ConfigError::InvalidTimeout(_))), "{secs}");
        }

        let cfg = ScanConfig::builder("10.0.0.0/24")
            .timeout_secs(0.25)
            .build()
            .unwrap();
        assert_eq!(cfg.timeout(), Duration::from_millis(250));
    }

    #[test]
    fn zero_workers_is_rejected() {
        let err = ScanConfig::builder("10.0.0.0/24")
            .workers(0)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::NoWorkers);
    }

    #[test]
    fn boundary_policy_reaches_range() {
        let cfg = ScanConfig::builder("10.0.0.0/24")
            .boundary(BoundaryPolicy::Exclude)
            .build()
            .unwrap();
        assert_eq!(cfg.range().len(), 254);
        assert_eq!(cfg.range().policy(), BoundaryPolicy::Exclude);
    }
}
