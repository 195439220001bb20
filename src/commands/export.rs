//! Export command
//!
//! Loads the analysis for one instrument and prints every category in session
//! order.
//!
//! Usage:
//! - Basic: `chan-export export --code sh.601799 --begin-time 2024-01-01`
//! - With options: `chan-export export --code BTC/USDT --begin-time 2024-01-01 --data-src CCXT --levels DAY,60M --format csv`

use crate::cli::ExportArgs;
use crate::constants::DEFAULT_OUTPUT_DIR;
use crate::error::Result;
use crate::models::{AnalysisRequest, Category, Level};
use crate::services::{
    write_summary, ChanEngine, CsvDirWriter, ExportReport, ExportSession, JsonCollector,
    OutputFormat, SnapshotEngine, TableRenderer,
};
use std::io::{self, Write};
use std::path::PathBuf;

pub fn run(args: ExportArgs) {
    let engine = match &args.data_dir {
        Some(dir) => SnapshotEngine::new(dir),
        None => SnapshotEngine::from_env(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = export(&args, &engine, &mut out) {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

/// Build the request, acquire the analysis and render the report to `out`
pub fn export<W: Write>(args: &ExportArgs, engine: &dyn ChanEngine, out: &mut W) -> Result<()> {
    let levels = Level::parse_levels(&args.levels);
    let request = AnalysisRequest::new(
        &args.code,
        &args.begin_time,
        args.end_time.as_deref(),
        args.data_src,
        levels,
    )?;

    if args.format == OutputFormat::Table {
        writeln!(out, "Loading analysis, please wait...")?;
    }
    let analysis = engine.analyze(&request)?;
    let report = ExportSession::new(&analysis).run()?;

    match args.format {
        OutputFormat::Table => {
            write_basic_info(out, &request)?;
            let mut renderer = TableRenderer::new(&mut *out);
            report.visit(&mut renderer)?;
            if args.summary {
                write_summary(out, &report.summary())?;
            }
            writeln!(out, "\n=== Analysis complete ===")?;
        }
        OutputFormat::Json => {
            let mut collector = JsonCollector::new();
            report.visit(&mut collector)?;
            let mut document = serde_json::Map::new();
            document.insert("code".to_string(), request.code.clone().into());
            document.insert(
                "levels".to_string(),
                serde_json::to_value(&request.levels)?,
            );
            document.insert("data".to_string(), collector.into_value());
            serde_json::to_writer_pretty(&mut *out, &document)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let dir = args
                .output_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
            let mut writer = CsvDirWriter::new(&dir)?;
            report.visit(&mut writer)?;
            for path in writer.written() {
                writeln!(out, "📄 Wrote {}", path.display())?;
            }
            write_empty_categories(out, &report)?;
        }
    }

    Ok(())
}

fn write_basic_info<W: Write>(out: &mut W, request: &AnalysisRequest) -> Result<()> {
    writeln!(out, "\n=== Basic Info ===")?;
    writeln!(out, "Code:        {}", request.code)?;
    writeln!(out, "Begin:       {}", request.begin_date)?;
    match request.end_date {
        Some(end) => writeln!(out, "End:         {}", end)?,
        None => writeln!(out, "End:         now")?,
    }
    writeln!(out, "Data source: {}", request.data_source)?;
    writeln!(out, "Levels:      {}", request.level_names())?;
    writeln!(
        out,
        "Analyzed at: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;
    Ok(())
}

/// CSV mode writes no file for an empty category, so say so explicitly
fn write_empty_categories<W: Write>(out: &mut W, report: &ExportReport) -> Result<()> {
    for category in Category::all() {
        if report.outcome_len(category) == 0 {
            writeln!(out, "No {} data found", category.title().to_lowercase())?;
        }
    }
    Ok(())
}
