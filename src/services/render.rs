//! Presentation of export reports
//!
//! Three renderers, each a [`ReportVisitor`]:
//! - [`TableRenderer`]: titled text tables, or a "no data" line per empty category
//! - [`CsvDirWriter`]: one CSV file per non-empty category
//! - [`JsonCollector`]: one JSON object keyed by category, `null` when empty

use crate::error::Result;
use crate::models::FlatRecord;
use crate::services::session::{CategoryOutcome, LevelCounts, ReportVisitor};
use clap::ValueEnum;
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text tables on stdout
    #[default]
    Table,
    /// One CSV file per category in the output directory
    Csv,
    /// Single JSON document on stdout
    Json,
}

/// Writes aligned text tables
pub struct TableRenderer<W: Write> {
    out: W,
}

impl<W: Write> TableRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportVisitor for TableRenderer<W> {
    fn visit<R: FlatRecord>(&mut self, outcome: &CategoryOutcome<R>) -> Result<()> {
        let title = R::CATEGORY.title();
        match outcome {
            CategoryOutcome::NoData => {
                writeln!(self.out, "\nNo {} data found", title.to_lowercase())?;
            }
            CategoryOutcome::Records(records) => {
                writeln!(self.out, "\n=== {} ===", title)?;
                let rows: Vec<Vec<String>> = records
                    .iter()
                    .map(|r| r.values().iter().map(ToString::to_string).collect())
                    .collect();
                write_table(&mut self.out, R::COLUMNS, &rows)?;
            }
        }
        Ok(())
    }
}

/// Right-aligned columns with a leading row number
fn write_table<W: Write>(out: &mut W, columns: &[&str], rows: &[Vec<String>]) -> Result<()> {
    let index_width = rows.len().saturating_sub(1).to_string().len();
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, name)| {
            rows.iter()
                .map(|row| row[i].len())
                .chain(std::iter::once(name.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut line = " ".repeat(index_width);
    for (name, width) in columns.iter().zip(&widths) {
        line.push_str(&format!("  {:>width$}", name, width = width));
    }
    writeln!(out, "{}", line)?;

    for (n, row) in rows.iter().enumerate() {
        let mut line = format!("{:<width$}", n, width = index_width);
        for (cell, width) in row.iter().zip(&widths) {
            line.push_str(&format!("  {:>width$}", cell, width = width));
        }
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Print the per-level count table
pub fn write_summary<W: Write>(out: &mut W, counts: &[LevelCounts]) -> Result<()> {
    writeln!(out, "\n=== Summary ===")?;
    let columns = ["level", "fractals", "strokes", "segments", "centers", "bs_points"];
    let rows: Vec<Vec<String>> = counts
        .iter()
        .map(|c| {
            vec![
                c.level.to_string(),
                c.fractals.to_string(),
                c.strokes.to_string(),
                c.segments.to_string(),
                c.centers.to_string(),
                c.bs_points.to_string(),
            ]
        })
        .collect();
    write_table(out, &columns, &rows)
}

/// Writes `<dir>/<category>.csv` for every category with records
pub struct CsvDirWriter {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl CsvDirWriter {
    pub fn new(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            written: Vec::new(),
        })
    }

    /// Files written so far, in category order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ReportVisitor for CsvDirWriter {
    fn visit<R: FlatRecord>(&mut self, outcome: &CategoryOutcome<R>) -> Result<()> {
        let category = R::CATEGORY;
        if outcome.is_no_data() {
            debug!(category = %category, "No records, skipping CSV");
            return Ok(());
        }

        let path = self.dir.join(format!("{}.csv", category.file_stem()));
        let mut writer = csv::Writer::from_path(&path)?;
        for record in outcome.records() {
            writer.serialize(record)?;
        }
        writer.flush()?;

        debug!(category = %category, path = %path.display(), records = outcome.len(), "Wrote CSV");
        self.written.push(path);
        Ok(())
    }
}

/// Collects the report into one JSON object
#[derive(Default)]
pub struct JsonCollector {
    map: Map<String, Value>,
}

impl JsonCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.map)
    }
}

impl ReportVisitor for JsonCollector {
    fn visit<R: FlatRecord>(&mut self, outcome: &CategoryOutcome<R>) -> Result<()> {
        let value = match outcome {
            CategoryOutcome::NoData => Value::Null,
            CategoryOutcome::Records(records) => serde_json::to_value(records)?,
        };
        self.map.insert(R::CATEGORY.file_stem().to_string(), value);
        Ok(())
    }
}
