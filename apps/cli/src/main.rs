//! confscrape CLI — batch export of conference attendee profiles with
//! LinkedIn enrichment.
//!
//! Run once, produce a JSON document, stop.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
