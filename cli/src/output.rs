//! Report persistence.
//!
//! One line per finding, `<time> | <host> | <ports>`. A run without findings
//! still produces a file, holding a single `no findings` line.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use netscan_common::report::Report;
use thiserror::Error;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const LINE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";
const NO_FINDINGS: &str = "no findings";

#[derive(Debug, Error)]
#[error("could not write report to {}: {source}", .path.display())]
pub struct OutputError {
    path: PathBuf,
    #[source]
    source: io::Error,
}

pub fn render_lines(report: &Report, generated_at: DateTime<Local>) -> Vec<String> {
    if report.is_empty() {
        return vec![format!(
            "{} | {NO_FINDINGS}",
            generated_at.format(LINE_TIMESTAMP_FORMAT)
        )];
    }

    report
        .iter()
        .map(|finding| {
            format!(
                "{} | {} | {}",
                finding.timestamp.format(LINE_TIMESTAMP_FORMAT),
                finding.host,
                finding.ports_display()
            )
        })
        .collect()
}

pub fn write_report(path: &Path, report: &Report) -> Result<(), OutputError> {
    let wrap = |source: io::Error| OutputError {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(wrap)?;
    let mut writer = BufWriter::new(file);
    for line in render_lines(report, Local::now()) {
        writeln!(writer, "{line}").map_err(wrap)?;
    }
    writer.flush().map_err(wrap)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
