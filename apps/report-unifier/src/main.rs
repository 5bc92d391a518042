//! report-unifier binary
//!
//! Logs go to stderr so stdout only carries the prompt, the summary table
//! and the output paths.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use report_extract::BackendKind;
use report_unifier::{run, Config, OnUnreadable, Overrides, RunRequest};
use tracing::{debug, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "report-unifier")]
#[command(
    version,
    about = "Consolidate per-site executive report PDFs into one unified summary"
)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory containing the executive report PDFs
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// File name pattern inside the directory
    #[arg(long)]
    pattern: Option<String>,

    /// Period to consolidate, by label ("March 2025") or 1-based index
    #[arg(short, long)]
    period: Option<String>,

    /// Print the available periods and exit
    #[arg(long)]
    list_periods: bool,

    /// Output PDF path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// PNG logo for the report header
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Also write the extracted data as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// What to do with files that cannot be opened as PDF
    #[arg(long, value_enum)]
    on_unreadable: Option<OnUnreadable>,

    /// Text backend to try, repeat for a fallback order (layout, lopdf, pdf-extract)
    #[arg(long = "backend", value_name = "NAME")]
    backends: Vec<BackendKind>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.apply(Overrides {
        dir: args.dir,
        pattern: args.pattern,
        logo: args.logo,
        on_unreadable: args.on_unreadable,
        backends: args.backends,
    });
    debug!("Configuration: {:?}", config);

    let request = RunRequest {
        period: args.period,
        list_periods: args.list_periods,
        output: args.output,
        json: args.json,
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run(&config, &request, stdin.lock(), stdout.lock()).context("Report consolidation failed")?;

    Ok(())
}
