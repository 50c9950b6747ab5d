//! eodb CLI: browse executive orders from the command line.
//!
//! Loads the executive orders and timelines exports, then answers list,
//! detail, and agency queries as JSON or plain text.

mod commands;
mod render;

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
