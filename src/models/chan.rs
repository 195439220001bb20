//! Read-only view of the analysis engine's output
//!
//! Every level carries its own arenas. Cross references (stroke → combined
//! K-line → K-line unit, segment → stroke, center/buy-sell point → unit) are
//! positions into those arenas, so the whole result is a directed acyclic
//! graph that can be borrowed for one export pass without any shared
//! ownership.
//!
//! Resolving a position that is out of range is reported as
//! [`AppError::Structure`]: the engine promises those references exist.

use crate::error::{AppError, Result};
use crate::models::Level;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fractal classification of a combined K-line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FxType {
    Top,
    Bottom,
    #[default]
    Unknown,
}

impl FxType {
    pub fn name(&self) -> &'static str {
        match self {
            FxType::Top => "TOP",
            FxType::Bottom => "BOTTOM",
            FxType::Unknown => "UNKNOWN",
        }
    }

    /// Only resolved fractals are exported
    pub fn is_resolved(&self) -> bool {
        !matches!(self, FxType::Unknown)
    }
}

impl fmt::Display for FxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Direction of a stroke or segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn name(&self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
        }
    }

    pub fn is_up(&self) -> bool {
        matches!(self, Direction::Up)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Buy/sell point classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BspType {
    #[serde(rename = "1")]
    T1,
    #[serde(rename = "1p")]
    T1P,
    #[serde(rename = "2")]
    T2,
    #[serde(rename = "2s")]
    T2S,
    #[serde(rename = "3a")]
    T3A,
    #[serde(rename = "3b")]
    T3B,
}

impl BspType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BspType::T1 => "1",
            BspType::T1P => "1p",
            BspType::T2 => "2",
            BspType::T2S => "2s",
            BspType::T3A => "3a",
            BspType::T3B => "3b",
        }
    }
}

/// Single raw candle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KLineUnit {
    pub idx: usize,
    pub time: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Candle produced by merging contained raw candles
///
/// Fractals are classified on this sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedKLine {
    pub idx: usize,
    /// Positions of the member units, oldest first
    pub units: Vec<usize>,
    #[serde(default)]
    pub fx: FxType,
    pub high: f64,
    pub low: f64,
}

/// Stroke (bi)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bi {
    pub idx: usize,
    pub dir: Direction,
    /// Position of the combined K-line the stroke starts on
    pub begin_klc: usize,
    /// Position of the combined K-line the stroke ends on
    pub end_klc: usize,
    pub is_sure: bool,
}

/// Segment (seg), bounded by two strokes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seg {
    pub idx: usize,
    pub dir: Direction,
    pub start_bi: usize,
    pub end_bi: usize,
    pub is_sure: bool,
}

/// Center (zhongshu): consolidation range between two units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Center {
    /// Position of the unit the center begins on
    pub begin: usize,
    /// Position of the unit the center ends on
    pub end: usize,
    pub low: f64,
    pub high: f64,
    pub is_sure: bool,
}

/// Buy/sell point anchored on one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuySellPoint {
    pub types: Vec<BspType>,
    pub is_buy: bool,
    /// Position of the anchor unit
    pub klu: usize,
}

impl BuySellPoint {
    /// Comma joined type labels, e.g. `1,1p`
    pub fn type_str(&self) -> String {
        self.types
            .iter()
            .map(BspType::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Everything the engine computed for one level
///
/// Any collection may be absent or empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelResult {
    pub units: Vec<KLineUnit>,
    pub klines: Vec<CombinedKLine>,
    pub bi_list: Vec<Bi>,
    pub seg_list: Vec<Seg>,
    pub zs_list: Vec<Center>,
    pub segzs_list: Vec<Center>,
    pub bs_points: Vec<BuySellPoint>,
    pub seg_bs_points: Vec<BuySellPoint>,
}

impl LevelResult {
    pub fn unit(&self, pos: usize) -> Result<&KLineUnit> {
        self.units.get(pos).ok_or_else(|| {
            AppError::Structure(format!(
                "K-line unit {} referenced but only {} exist",
                pos,
                self.units.len()
            ))
        })
    }

    pub fn kline(&self, pos: usize) -> Result<&CombinedKLine> {
        self.klines.get(pos).ok_or_else(|| {
            AppError::Structure(format!(
                "combined K-line {} referenced but only {} exist",
                pos,
                self.klines.len()
            ))
        })
    }

    pub fn bi(&self, pos: usize) -> Result<&Bi> {
        self.bi_list.get(pos).ok_or_else(|| {
            AppError::Structure(format!(
                "stroke {} referenced but only {} exist",
                pos,
                self.bi_list.len()
            ))
        })
    }

    /// Time of the first unit inside a combined K-line
    pub fn kline_time(&self, klc: &CombinedKLine) -> Result<NaiveDateTime> {
        let first = klc.units.first().ok_or_else(|| {
            AppError::Structure(format!("combined K-line {} has no units", klc.idx))
        })?;
        Ok(self.unit(*first)?.time)
    }

    pub fn bi_begin_time(&self, bi: &Bi) -> Result<NaiveDateTime> {
        self.kline_time(self.kline(bi.begin_klc)?)
    }

    pub fn bi_end_time(&self, bi: &Bi) -> Result<NaiveDateTime> {
        self.kline_time(self.kline(bi.end_klc)?)
    }

    /// Low of the first candle for an up stroke, high for a down stroke
    pub fn bi_begin_val(&self, bi: &Bi) -> Result<f64> {
        let klc = self.kline(bi.begin_klc)?;
        Ok(if bi.dir.is_up() { klc.low } else { klc.high })
    }

    /// High of the last candle for an up stroke, low for a down stroke
    pub fn bi_end_val(&self, bi: &Bi) -> Result<f64> {
        let klc = self.kline(bi.end_klc)?;
        Ok(if bi.dir.is_up() { klc.high } else { klc.low })
    }

    pub fn seg_start_bi(&self, seg: &Seg) -> Result<&Bi> {
        self.bi(seg.start_bi)
    }

    pub fn seg_end_bi(&self, seg: &Seg) -> Result<&Bi> {
        self.bi(seg.end_bi)
    }

    /// Stroke-based buy/sell points in engine order
    pub fn bsp_iter(&self) -> impl Iterator<Item = &BuySellPoint> {
        self.bs_points.iter()
    }

    /// Segment-based buy/sell points in engine order
    pub fn seg_bsp_iter(&self) -> impl Iterator<Item = &BuySellPoint> {
        self.seg_bs_points.iter()
    }
}

/// One analyzed level and its results
#[derive(Debug, Clone, PartialEq)]
pub struct LevelData {
    pub level: Level,
    pub result: LevelResult,
}

/// Handle over the whole engine output for one instrument
#[derive(Debug, Clone, PartialEq)]
pub struct ChanAnalysis {
    pub code: String,
    levels: Vec<LevelData>,
}

impl ChanAnalysis {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            levels: Vec::new(),
        }
    }

    /// Append a level; levels are walked in insertion order
    pub fn push_level(&mut self, level: Level, result: LevelResult) {
        self.levels.push(LevelData { level, result });
    }

    pub fn with_level(mut self, level: Level, result: LevelResult) -> Self {
        self.push_level(level, result);
        self
    }

    pub fn levels(&self) -> &[LevelData] {
        &self.levels
    }

    pub fn level_list(&self) -> Vec<Level> {
        self.levels.iter().map(|l| l.level).collect()
    }
}
