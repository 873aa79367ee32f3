mod commands;
mod output;
mod terminal;

use std::sync::Arc;

use commands::{CommandLine, scan};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    let cfg = Arc::new(commands.to_config()?);

    logging::init_logging(cfg.verbose());

    print::banner();
    scan::scan(cfg).await
}
