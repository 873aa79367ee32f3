use std::sync::Arc;
use std::time::{Duration, Instant};

use colored::*;
use tracing::{Instrument, info, info_span, warn};

use crate::nprint;
use crate::output;
use crate::terminal::{colors, print, spinner};
use netscan_common::config::ScanConfig;
use netscan_common::report::{HostFinding, Report};

pub async fn scan(cfg: Arc<ScanConfig>) -> anyhow::Result<()> {
    print_settings(&cfg);

    let mut engine = netscan_core::prepare_engine(cfg.clone())
        .await?
        .with_progress(spinner::report_progress);

    spinner::start("Starting sweep...");
    let start_time: Instant = Instant::now();
    let report: &Report = engine.run().instrument(info_span!("sweep")).await;
    let elapsed: Duration = start_time.elapsed();
    spinner::finish();

    sweep_ends(report, elapsed);

    match output::write_report(cfg.output(), report) {
        Ok(()) => info!("Report written to {}", cfg.output().display()),
        Err(e) => warn!("{e}; results above were not saved"),
    }

    print::end_of_program();
    Ok(())
}

fn print_settings(cfg: &ScanConfig) {
    let ports: String = cfg
        .ports()
        .iter()
        .map(u16::to_string)
        .collect::<Vec<String>>()
        .join(", ");
    let approved: String = if cfg.approved().is_empty() {
        "none".to_string()
    } else {
        cfg.approved().join(", ")
    };

    print::header("sweep settings");
    print::aligned_line("Network", &cfg.network().to_string(), 8);
    print::aligned_line("Hosts", &cfg.range().len().to_string(), 8);
    print::aligned_line("Ports", &ports, 8);
    print::aligned_line("Approved", &approved, 8);
    print::aligned_line("HTTP", if cfg.test_http() { "yes" } else { "no" }, 8);
    print::aligned_line("Timeout", &format!("{:.2}s", cfg.timeout().as_secs_f64()), 8);
    nprint!();
}

fn sweep_ends(report: &Report, total_time: Duration) {
    if report.is_empty() {
        print::header("no hosts answered");
    } else {
        print::header("findings");
    }

    print::findings_table(report);
    if needs_http_legend(report) {
        nprint!();
        print::http_legend();
    }
    print_summary(report.len(), total_time);
}

/// The legend only explains the marker when some port actually carries it.
fn needs_http_legend(report: &Report) -> bool {
    report.iter().any(HostFinding::has_http)
}

fn print_summary(findings: usize, total_time: Duration) {
    let unit: &str = if findings == 1 { "host" } else { "hosts" };
    let found: ColoredString = format!("{findings} {unit}").bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: String = format!("Sweep complete: {found} answering in {total_time}")
        .color(colors::TEXT_DEFAULT)
        .to_string();

    print::fat_separator();
    print::centerln(&output);
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
    use netscan_common::report::PortResult;
    use std::net::Ipv4Addr;

    fn finding(d: u8, ports: Vec<PortResult>) -> HostFinding {
        HostFinding::new(Ipv4Addr::new(10, 0, 0, d), ports).unwrap()
    }

    #[test]
    fn legend_shown_only_when_a_port_answered_http() {
        let plain = Report::from(vec![finding(2, vec![PortResult::open(22)])]);
        assert!(!needs_http_legend(&plain));

        let web = Report::from(vec![
            finding(2, vec![PortResult::open(22)]),
            finding(3, vec![PortResult::open(443), PortResult::open(80).with_http(true)]),
        ]);
        assert!(needs_http_legend(&web));

        assert!(!needs_http_legend(&Report::new()));
    }
}
