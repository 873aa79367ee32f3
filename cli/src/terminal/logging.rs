use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{FmtContext, FormatEvent};
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

use netscan_core::engine::FINDING_TARGET;

use crate::terminal::spinner::SpinnerWriter;

/// HTTP client internals stay quiet even with `--verbose`.
const QUIET_DEPENDENCIES: &str = "hyper=warn,hyper_util=warn,reqwest=warn";

/// Prefixes each event with a bracketed marker. Hosts answering the sweep get
/// their own `[!]` so they stand out between progress and diagnostics.
pub struct NetscanFormatter;

fn marker(level: &Level, target: &str) -> &'static str {
    if target == FINDING_TARGET {
        return "[!]";
    }
    match *level {
        Level::TRACE => "[ ]",
        Level::DEBUG => "[?]",
        Level::INFO => "[+]",
        Level::WARN => "[*]",
        Level::ERROR => "[-]",
    }
}

fn paint(level: &Level, target: &str, text: &str) -> ColoredString {
    if target == FINDING_TARGET {
        return text.bright_cyan().bold();
    }
    match *level {
        Level::TRACE => text.dimmed(),
        Level::DEBUG => text.blue(),
        Level::INFO => text.green().bold(),
        Level::WARN => text.yellow().bold(),
        Level::ERROR => text.red().bold(),
    }
}

impl<S, N> FormatEvent<S, N> for NetscanFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let symbol: &str = marker(meta.level(), meta.target());

        write!(writer, "{} ", paint(meta.level(), meta.target(), symbol))?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `verbose` when set.
pub fn init_logging(verbose: bool) {
    let level: &str = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},{QUIET_DEPENDENCIES}")));

    tracing_subscriber::fmt()
        .event_format(NetscanFormatter)
        .with_env_filter(filter)
        .with_writer(|| SpinnerWriter)
        .init();
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
