pub mod scan;

use std::path::PathBuf;

use clap::Parser;
use netscan_common::config::{self, ScanConfig};
use netscan_common::error::ConfigError;
use netscan_common::network::range::BoundaryPolicy;

#[derive(Parser, Debug)]
#[command(name = "netscan")]
#[command(version)]
#[command(about = "Sweep a network for hosts answering on TCP ports.")]
pub struct CommandLine {
    /// Network to scan, as a.b.c.d/n (example: 10.14.0.0/16)
    #[arg(short, long, value_name = "CIDR")]
    pub network: String,

    /// Port to probe. Repeat for several ports [default: 80]
    #[arg(short = 'p', long = "port", value_name = "NUMBER")]
    pub ports: Vec<u16>,

    /// Comma separated list of approved hosts that are never reported
    #[arg(short, long, value_name = "LIST", value_delimiter = ',')]
    pub approved: Vec<String>,

    /// Test for an HTTP response in addition to an open port
    #[arg(short = 't', long = "test")]
    pub test_http: bool,

    /// File to write the report to
    #[arg(short, long, value_name = "FILENAME", default_value = config::DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Connect timeout per port, in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = config::DEFAULT_TIMEOUT.as_secs_f64())]
    pub timeout: f64,

    /// Number of hosts probed concurrently
    #[arg(short, long, value_name = "N", default_value_t = config::DEFAULT_WORKERS)]
    pub workers: usize,

    /// Skip the network and broadcast addresses of the block
    #[arg(long)]
    pub skip_boundary: bool,

    /// Log every probe outcome
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> Result<ScanConfig, ConfigError> {
        let boundary = if self.skip_boundary {
            BoundaryPolicy::Exclude
        } else {
            BoundaryPolicy::Include
        };

        let mut builder = ScanConfig::builder(self.network.as_str())
            .approved(&self.approved)
            .test_http(self.test_http)
            .verbose(self.verbose)
            .timeout_secs(self.timeout)
            .workers(self.workers)
            .boundary(boundary)
            .output(self.output.clone());

        if !self.ports.is_empty() {
            builder = builder.ports(self.ports.iter().copied());
        }

        builder.build()
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
