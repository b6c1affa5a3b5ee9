mod commands;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "caliper", about = "DICOM line measurement tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Viewer config file (TOML, default: ./caliper.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show DICOM file metadata
    Info(commands::info::InfoArgs),
    /// Print the text report for a measurement CSV
    Report(commands::report::ReportArgs),
    /// Render a screenshot of an image with its measurements
    Snapshot(commands::snapshot::SnapshotArgs),
    /// Write a screenshot and PDF report in one step
    Export(commands::export::ExportArgs),
    /// Print the default viewer config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Config(args) => commands::config::run(args),
        Commands::Report(args) => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::report::run(args, &config)
        }
        Commands::Snapshot(args) => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::snapshot::run(args, &config)
        }
        Commands::Export(args) => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::export::run(args, &config)
        }
    }
}
