//! Acquisition of analysis results
//!
//! The analysis itself happens upstream. [`SnapshotEngine`] reads results
//! that the engine serialized to disk:
//!
//! ```text
//! <CHAN_DATA_DIR>/<data source>/<code>.json
//! {
//!   "code": "sh.601799",
//!   "begin_time": "2024-01-01",
//!   "end_time": null,
//!   "levels": { "DAY": { "units": [...], "klines": [...], "bi_list": [...] } }
//! }
//! ```

use crate::error::{AppError, Result};
use crate::models::{AnalysisRequest, ChanAnalysis, Level, LevelResult};
use crate::utils::get_chan_data_dir;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Source of analysis handles
pub trait ChanEngine {
    /// Build the analysis for `request`, levels in requested order
    fn analyze(&self, request: &AnalysisRequest) -> Result<ChanAnalysis>;
}

/// Serialized engine output for one instrument
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub code: String,
    #[serde(default)]
    pub begin_time: Option<NaiveDate>,
    #[serde(default)]
    pub end_time: Option<NaiveDate>,
    pub levels: BTreeMap<Level, LevelResult>,
}

/// Engine backed by JSON snapshots on disk
pub struct SnapshotEngine {
    root: PathBuf,
}

impl SnapshotEngine {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Use `CHAN_DATA_DIR` (default `chan_data`)
    pub fn from_env() -> Self {
        Self::new(get_chan_data_dir())
    }

    /// Snapshot file for a request; `/` in codes (e.g. `BTC/USDT`) becomes `_`
    pub fn snapshot_path(&self, request: &AnalysisRequest) -> PathBuf {
        let file_name = format!("{}.json", request.code.replace(['/', '\\'], "_"));
        self.root
            .join(request.data_source.dir_name())
            .join(file_name)
    }

    fn load(&self, path: &Path) -> Result<Snapshot> {
        if !path.exists() {
            return Err(AppError::NotFound(format!(
                "no analysis snapshot at {}",
                path.display()
            )));
        }
        let content = fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        Ok(snapshot)
    }
}

impl ChanEngine for SnapshotEngine {
    fn analyze(&self, request: &AnalysisRequest) -> Result<ChanAnalysis> {
        let path = self.snapshot_path(request);
        info!(path = %path.display(), code = %request.code, "Loading analysis snapshot");

        let snapshot = self.load(&path)?;
        if snapshot.code != request.code {
            return Err(AppError::InvalidInput(format!(
                "snapshot {} holds '{}', requested '{}'",
                path.display(),
                snapshot.code,
                request.code
            )));
        }
        warn_on_range_gap(&snapshot, request);

        let mut analysis = ChanAnalysis::new(snapshot.code.clone());
        for &level in &request.levels {
            let result = snapshot.levels.get(&level).ok_or_else(|| {
                AppError::NotFound(format!(
                    "level {} not present in snapshot {}",
                    level,
                    path.display()
                ))
            })?;
            analysis.push_level(level, result.clone());
        }

        Ok(analysis)
    }
}

/// Results are served as analyzed; a range mismatch is only reported
fn warn_on_range_gap(snapshot: &Snapshot, request: &AnalysisRequest) {
    if let Some(begin) = snapshot.begin_time {
        if begin > request.begin_date {
            warn!(
                snapshot_begin = %begin,
                requested_begin = %request.begin_date,
                "Snapshot starts after the requested begin date"
            );
        }
    }

    if let (Some(end), Some(requested_end)) = (snapshot.end_time, request.end_date) {
        if end < requested_end {
            warn!(
                snapshot_end = %end,
                requested_end = %requested_end,
                "Snapshot ends before the requested end date"
            );
        }
    }
}
