use colored::*;
use netscan_common::report::{HTTP_MARKER, HostFinding, PortResult, Report};
use unicode_width::UnicodeWidthStr;

use crate::output::TIMESTAMP_FORMAT;
use crate::terminal::{colors, spinner};

pub const TOTAL_WIDTH: usize = 64;

const TIMESTAMP_WIDTH: usize = 19;
const HOST_WIDTH: usize = 15;

#[macro_export]
macro_rules! nprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

/// Writes a line to stdout without tearing the spinner.
pub fn print(msg: &str) {
    spinner::get_spinner().suspend(|| println!("{msg}"));
}

pub fn banner() {
    let text_content: String = format!("⟦ NETSCAN v{} ⟧ ", env!("CARGO_PKG_VERSION"));
    let text_width: usize = UnicodeWidthStr::width(text_content.as_str());
    let text: ColoredString = text_content.bright_green().bold();
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2).bright_black();
    print(&format!("{}{}{}", sep, text, sep));
}

pub fn header(msg: &str) {
    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    print(&format!("{}", line));
}

pub fn fat_separator() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).bright_black();
    print(&format!("{}", sep));
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    let prefix: ColoredString = ">".color(colors::SEPARATOR);
    let message: String = format!("{} {}", prefix, msg.as_ref().color(colors::TEXT_DEFAULT));
    print(&message);
}

pub fn aligned_line(key: &str, value: &str, key_width: usize) {
    let dots: String = ".".repeat((key_width + 1).saturating_sub(key.len()));
    print_status(format!(
        "{}{}{} {}",
        key.color(colors::PRIMARY),
        dots.color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR),
        value.color(colors::TEXT_DEFAULT)
    ));
}

pub fn centerln(msg: &str) {
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{}{}{}", space, msg, space));
}

/// Renders the findings table. An empty report gets a single placeholder row.
pub fn findings_table(report: &Report) {
    table_row(
        &format!("{:<TIMESTAMP_WIDTH$}", "Timestamp").bold(),
        &format!("{:<HOST_WIDTH$}", "Host").bold(),
        &"Ports".bold(),
    );
    print(&format!("{}", "─".repeat(TOTAL_WIDTH).color(colors::SEPARATOR)));

    if report.is_empty() {
        no_results();
        return;
    }

    for finding in report {
        finding_row(finding);
    }
}

fn finding_row(finding: &HostFinding) {
    let timestamp: String = finding.timestamp.format(TIMESTAMP_FORMAT).to_string();
    let ports: String = finding
        .ports
        .iter()
        .map(colored_port)
        .collect::<Vec<String>>()
        .join(", ");

    table_row(
        &format!("{:<TIMESTAMP_WIDTH$}", timestamp).color(colors::TIMESTAMP),
        &format!("{:<HOST_WIDTH$}", finding.host).color(colors::IPV4_ADDR),
        &ports.normal(),
    );
}

fn colored_port(port: &PortResult) -> String {
    if port.http_responsive {
        format!("{}", port.to_string().color(colors::HTTP).bold())
    } else {
        port.to_string()
    }
}

fn table_row(timestamp: &ColoredString, host: &ColoredString, ports: &ColoredString) {
    let bar: ColoredString = "│".color(colors::SEPARATOR);
    print(&format!("{timestamp} {bar} {host} {bar} {ports}"));
}

pub fn no_results() {
    table_row(
        &format!("{:<TIMESTAMP_WIDTH$}", "-").color(colors::SEPARATOR),
        &format!("{:<HOST_WIDTH$}", "-").color(colors::SEPARATOR),
        &"no findings".red().bold(),
    );
}

pub fn http_legend() {
    print_status(format!(
        "Ports marked with {} answered an HTTP request",
        HTTP_MARKER.to_string().color(colors::HTTP).bold()
    ));
}

pub fn end_of_program() {
    print(&format!(
        "{}",
        "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR)
    ));
}
