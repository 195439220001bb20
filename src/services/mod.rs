pub mod dispatcher;
pub mod engine;
pub mod mapper;
pub mod render;
pub mod session;
pub mod walker;

pub use engine::{ChanEngine, Snapshot, SnapshotEngine};
pub use mapper::LevelContext;
pub use render::{write_summary, CsvDirWriter, JsonCollector, OutputFormat, TableRenderer};
pub use session::{CategoryOutcome, ExportReport, ExportSession, LevelCounts, ReportVisitor};
