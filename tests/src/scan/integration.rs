use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::Duration;

use netscan_common::config::{ScanConfig, ScanConfigBuilder};
use netscan_core::engine::ScanPhase;
use netscan_core::prepare_engine;

use crate::utils::{LoopbackService, closed_port};

fn loopback_config(network: &str, ports: &[u16], test_http: bool) -> ScanConfigBuilder {
    ScanConfig::builder(network)
        .ports(ports.iter().copied())
        .test_http(test_http)
        .timeout(Duration::from_secs(1))
        .workers(4)
}

fn build(builder: ScanConfigBuilder) -> Arc<ScanConfig> {
    Arc::new(builder.build().unwrap())
}

/// Sweeps localhost with one HTTP service, one non-HTTP service and one
/// closed port, through the real socket prober.
#[tokio::test]
async fn sweep_loopback_flags_http_ports() {
    let http = LoopbackService::http().await;
    let ssh = LoopbackService::banner().await;
    let closed = closed_port().await;

    let cfg = build(loopback_config("127.0.0.1/32", &[http.port(), ssh.port(), closed], true));
    let mut engine = prepare_engine(cfg).await.unwrap();
    let report = engine.run().await;

    assert_eq!(report.len(), 1, "expected exactly one finding: {report:?}");
    let finding = report.find(Ipv4Addr::LOCALHOST).unwrap();
    assert_eq!(
        finding.ports_display(),
        format!("{}*, {}", http.port(), ssh.port())
    );
}

#[tokio::test]
async fn sweep_without_http_check_leaves_flag_unset() {
    let http = LoopbackService::http().await;

    let cfg = build(loopback_config("127.0.0.1/32", &[http.port()], false));
    let mut engine = prepare_engine(cfg).await.unwrap();
    let report = engine.run().await;

    let finding = report.find(Ipv4Addr::LOCALHOST).unwrap();
    assert_eq!(finding.ports.len(), 1);
    assert!(!finding.ports[0].http_responsive);
    assert_eq!(finding.ports_display(), http.port().to_string());
}

#[tokio::test]
async fn approved_ip_is_never_reported() {
    let http = LoopbackService::http().await;

    let cfg = build(loopback_config("127.0.0.1/32", &[http.port()], true)
        .approved(["127.0.0.1"]));
    let mut engine = prepare_engine(cfg).await.unwrap();

    assert!(engine.approved().contains(Ipv4Addr::LOCALHOST));
    assert!(engine.run().await.is_empty());
    assert_eq!(engine.phase(), ScanPhase::Done);
}

#[tokio::test]
async fn approved_hostname_matches_by_resolved_address() {
    let http = LoopbackService::http().await;

    let cfg = build(loopback_config("127.0.0.1/32", &[http.port()], false)
        .approved(["localhost"]));
    let mut engine = prepare_engine(cfg).await.unwrap();

    assert!(engine.run().await.is_empty());
}

#[tokio::test]
async fn silent_range_produces_empty_report() {
    let closed = closed_port().await;

    let cfg = build(loopback_config("127.0.0.0/30", &[closed], true));
    let mut engine = prepare_engine(cfg).await.unwrap();
    let report = engine.run().await;

    assert!(report.is_empty(), "unexpected findings: {report:?}");
}
