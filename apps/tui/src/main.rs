//! eodb TUI: interactive terminal browser for executive orders.
//!
//! Loads the dataset once, then offers Browse, Detail, and Agency screens
//! built with `ratatui` + `crossterm`.

mod app;
mod screens;
mod widgets;

use std::fs::File;
use std::sync::Mutex;

use color_eyre::eyre::Result;
use eodb_core::Catalog;
use eodb_shared::{DataSources, load_config};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let config = load_config()?;
    let sources = match std::env::var_os("EODB_DATA_DIR") {
        Some(dir) => DataSources::in_dir(dir, &config.data),
        None => DataSources::from(&config),
    };
    let catalog = Catalog::load(&sources).await?;

    app::run(catalog)
}

/// Log to the file named by `EODB_LOG`, if any. The terminal belongs to the UI.
fn init_tracing() -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let Some(path) = std::env::var_os("EODB_LOG") else {
        return Ok(());
    };
    let file = File::create(&path)?;
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("eodb=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
