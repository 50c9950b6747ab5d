//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use eodb_core::{Catalog, Pager};
use eodb_shared::{AppConfig, DataSources, EodbError, FilterState, init_config, load_config};
use serde::Serialize;
use tracing::info;

use crate::render;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// eodb: browse executive orders, the agencies they involve, and the
/// actions those agencies owe.
#[derive(Parser)]
#[command(
    name = "eodb",
    version,
    about = "Browse executive orders, their agencies, and implementation timelines.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding the CSV exports (overrides the config file).
    #[arg(long, env = "EODB_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Result format on stdout.
    #[arg(short, long, default_value = "json", global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Result output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    Json,
    Text,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// List executive orders, newest first, one page at a time.
    List {
        /// Only orders involving this agency (exact name).
        #[arg(short, long)]
        agency: Option<String>,

        /// Only orders in this category (exact name).
        #[arg(short, long)]
        category: Option<String>,

        /// Case-insensitive text to find in title, number, agencies, or categories.
        #[arg(short, long)]
        search: Option<String>,

        /// 1-based page number.
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Show one executive order and its timeline.
    Show {
        /// Document number, e.g. 2025-02000.
        document_number: String,
    },

    /// Show the orders and required actions for one agency.
    Agency {
        /// Agency name, exactly as listed by `eodb facets`.
        name: String,
    },

    /// Dump every timeline item.
    Timelines,

    /// List the distinct agencies and categories available as filters.
    Facets,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr so stdout
/// carries only results.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "eodb=warn",
        1 => "eodb=info",
        2 => "eodb=debug",
        _ => "eodb=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let output = cli.output;

    if let Command::Config { action } = &cli.command {
        return match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        };
    }

    let config = load_config()?;
    let sources = resolve_sources(&config, cli.data_dir.as_deref());

    match cli.command {
        Command::List {
            agency,
            category,
            search,
            page,
        } => {
            let mut state = FilterState::default();
            state.set_agency(agency);
            state.set_category(category);
            state.set_search_text(search.unwrap_or_default());
            state.set_page(page);
            cmd_list(&sources, &state, output).await
        }
        Command::Show { document_number } => cmd_show(&sources, &document_number, output).await,
        Command::Agency { name } => cmd_agency(&sources, &name, output).await,
        Command::Timelines => cmd_timelines(&sources, output).await,
        Command::Facets => cmd_facets(&sources, output).await,
        Command::Config { .. } => Ok(()),
    }
}

/// CLI `--data-dir` wins over `[data] dir` from the config file.
fn resolve_sources(config: &AppConfig, data_dir: Option<&Path>) -> DataSources {
    match data_dir {
        Some(dir) => DataSources::in_dir(dir, &config.data),
        None => DataSources::from(config),
    }
}

// ---------------------------------------------------------------------------
// Query command handlers
// ---------------------------------------------------------------------------

/// JSON shape of `eodb list`.
#[derive(Serialize)]
struct ListOutput<'a> {
    filters: &'a FilterState,
    #[serde(flatten)]
    page: &'a eodb_core::FilteredPage,
    page_links: Vec<eodb_core::PageLink>,
}

async fn cmd_list(sources: &DataSources, state: &FilterState, output: OutputFormat) -> Result<()> {
    let catalog = Catalog::load_orders(sources).await?;
    let page = catalog.filter_and_paginate(state);
    let pager = Pager::new(page.page, page.total_pages);

    info!(
        total_filtered = page.total_filtered,
        page = page.page,
        total_pages = page.total_pages,
        "listing executive orders"
    );

    match output {
        OutputFormat::Json => print_json(&ListOutput {
            filters: state,
            page: &page,
            page_links: pager.window(),
        }),
        OutputFormat::Text => {
            print!("{}", render::list(&page, &pager, state));
            Ok(())
        }
    }
}

async fn cmd_show(
    sources: &DataSources,
    document_number: &str,
    output: OutputFormat,
) -> Result<()> {
    let catalog = Catalog::load(sources).await?;

    let Some(detail) = catalog.order_detail(document_number) else {
        return report_not_found(
            &EodbError::not_found("executive order", document_number),
            output,
        );
    };

    match output {
        OutputFormat::Json => print_json(&detail),
        OutputFormat::Text => {
            print!("{}", render::detail(&detail));
            Ok(())
        }
    }
}

async fn cmd_agency(sources: &DataSources, name: &str, output: OutputFormat) -> Result<()> {
    let catalog = Catalog::load(sources).await?;
    let view = catalog.agency_view(name);

    info!(
        agency = name,
        orders = view.orders.len(),
        actions = view.timeline.len(),
        "agency view"
    );

    match output {
        OutputFormat::Json => print_json(&view),
        OutputFormat::Text => {
            print!("{}", render::agency(&view));
            Ok(())
        }
    }
}

async fn cmd_timelines(sources: &DataSources, output: OutputFormat) -> Result<()> {
    let catalog = Catalog::load(sources).await?;
    let items = catalog.list_all_timeline_items();

    match output {
        OutputFormat::Json => print_json(&items),
        OutputFormat::Text => {
            let refs: Vec<_> = items.iter().collect();
            print!("{}", render::timeline(&refs));
            Ok(())
        }
    }
}

async fn cmd_facets(sources: &DataSources, output: OutputFormat) -> Result<()> {
    let catalog = Catalog::load_orders(sources).await?;
    let facets = catalog.facets();

    match output {
        OutputFormat::Json => print_json(&facets),
        OutputFormat::Text => {
            print!("{}", render::facets(&facets));
            Ok(())
        }
    }
}

/// A miss is an ordinary outcome: print it and exit successfully.
fn report_not_found(err: &EodbError, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json => print_json(&serde_json::json!({
            "status": "not_found",
            "message": err.to_string(),
        })),
        OutputFormat::Text => {
            println!();
            println!("  {err}");
            println!("  Check the document number or run `eodb list` to browse.");
            println!();
            Ok(())
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Config command handlers
// ---------------------------------------------------------------------------

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_list_filters() {
        let cli = Cli::try_parse_from([
            "eodb", "list", "--agency", "EPA", "--search", "water", "--page", "2",
        ])
        .expect("parse");
        match cli.command {
            Command::List {
                agency,
                category,
                search,
                page,
            } => {
                assert_eq!(agency.as_deref(), Some("EPA"));
                assert!(category.is_none());
                assert_eq!(search.as_deref(), Some("water"));
                assert_eq!(page, 2);
            }
            _ => panic!("expected list"),
        }
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn data_dir_flag_overrides_config() {
        let config = AppConfig::default();
        let sources = resolve_sources(&config, Some(Path::new("/srv/eo")));
        assert!(sources.executive_orders.starts_with("/srv/eo"));

        let sources = resolve_sources(&config, None);
        assert!(sources.executive_orders.starts_with("data"));
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
