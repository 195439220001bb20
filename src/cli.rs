use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;
use crate::constants::DEFAULT_LEVELS;
use crate::models::DataSource;
use crate::services::OutputFormat;

#[derive(Parser)]
#[command(name = "chan-export")]
#[command(about = "Export Chan theory analysis data as flat tables", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export fractals, strokes, segments, centers and buy/sell points
    Export(ExportArgs),
    /// List recognized level names
    Levels,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Instrument code, e.g. sh.601799
    #[arg(long)]
    pub code: String,

    /// Start date, e.g. 2024-01-01
    #[arg(long, alias = "begin_time")]
    pub begin_time: String,

    /// End date, e.g. 2024-10-01 (defaults to now)
    #[arg(long, alias = "end_time")]
    pub end_time: Option<String>,

    /// Data source the analysis was run on
    #[arg(long, alias = "data_src", value_enum, ignore_case = true, default_value_t = DataSource::BaoStock)]
    pub data_src: DataSource,

    /// Comma separated levels, e.g. DAY,60M,30M,15M,5M
    #[arg(long, default_value = DEFAULT_LEVELS)]
    pub levels: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Directory for CSV output (default: chan_export)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Snapshot root, overrides CHAN_DATA_DIR
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Print per-level record counts after the tables
    #[arg(long)]
    pub summary: bool,
}

pub fn run() {
    let cli = Cli::parse();

    // Tables go to stdout, logs to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Export(args) => {
            commands::export::run(args);
        }
        Commands::Levels => {
            commands::levels::run();
        }
    }
}
