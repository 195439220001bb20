//! Flat export records
//!
//! One record per exported object, one record shape per category. Every
//! record carries the level it came from; centers and buy/sell points also
//! carry the [`Provenance`] of the sub-collection they were read from.

use crate::models::chan::{Direction, FxType};
use crate::models::Level;
use serde::{Serialize, Serializer};
use std::fmt;

/// Export categories, in the order a session emits them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Fractal,
    Stroke,
    Segment,
    Center,
    BuySellPoint,
}

impl Category {
    /// Fixed session order
    pub fn all() -> [Category; 5] {
        [
            Category::Fractal,
            Category::Stroke,
            Category::Segment,
            Category::Center,
            Category::BuySellPoint,
        ]
    }

    /// Human readable title used for table headings
    pub fn title(&self) -> &'static str {
        match self {
            Category::Fractal => "Fractals",
            Category::Stroke => "Strokes",
            Category::Segment => "Segments",
            Category::Center => "Centers",
            Category::BuySellPoint => "Buy/Sell Points",
        }
    }

    /// Stable file stem for CSV output
    pub fn file_stem(&self) -> &'static str {
        match self {
            Category::Fractal => "fractals",
            Category::Stroke => "strokes",
            Category::Segment => "segments",
            Category::Center => "centers",
            Category::BuySellPoint => "bs_points",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Which primitive a center or buy/sell point was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provenance {
    Stroke,
    Segment,
}

impl Provenance {
    pub fn center_label(&self) -> &'static str {
        match self {
            Provenance::Stroke => "stroke-center",
            Provenance::Segment => "segment-center",
        }
    }

    pub fn bsp_label(&self) -> &'static str {
        match self {
            Provenance::Stroke => "stroke-bsp",
            Provenance::Segment => "segment-bsp",
        }
    }
}

/// Cell value of a flat record
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => write!(f, "{}", s),
            Scalar::Int(i) => write!(f, "{}", i),
            // Whole prices keep one decimal, as in the CSV output
            Scalar::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{:.1}", v),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<usize> for Scalar {
    fn from(v: usize) -> Self {
        Scalar::Int(v as i64)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

/// Row-oriented view shared by every record shape
///
/// `values()` is aligned with `COLUMNS`.
pub trait FlatRecord: Serialize {
    const CATEGORY: Category;
    const COLUMNS: &'static [&'static str];

    fn level(&self) -> Level;

    fn values(&self) -> Vec<Scalar>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FractalRecord {
    pub level: Level,
    pub time: String,
    pub idx: usize,
    pub fx_type: FxType,
    pub high: f64,
    pub low: f64,
}

impl FlatRecord for FractalRecord {
    const CATEGORY: Category = Category::Fractal;
    const COLUMNS: &'static [&'static str] = &["level", "time", "idx", "fx_type", "high", "low"];

    fn level(&self) -> Level {
        self.level
    }

    fn values(&self) -> Vec<Scalar> {
        vec![
            self.level.name().into(),
            self.time.clone().into(),
            self.idx.into(),
            self.fx_type.name().into(),
            self.high.into(),
            self.low.into(),
        ]
    }
}

/// Directional primitive (stroke or segment)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineRecord {
    pub level: Level,
    pub idx: usize,
    pub direction: Direction,
    pub start_time: String,
    pub end_time: String,
    pub start_val: f64,
    pub end_val: f64,
    pub is_sure: bool,
}

impl LineRecord {
    fn line_values(&self) -> Vec<Scalar> {
        vec![
            self.level.name().into(),
            self.idx.into(),
            self.direction.name().into(),
            self.start_time.clone().into(),
            self.end_time.clone().into(),
            self.start_val.into(),
            self.end_val.into(),
            self.is_sure.into(),
        ]
    }
}

const LINE_COLUMNS: &[&str] = &[
    "level",
    "idx",
    "direction",
    "start_time",
    "end_time",
    "start_val",
    "end_val",
    "is_sure",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StrokeRecord(pub LineRecord);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SegmentRecord(pub LineRecord);

impl FlatRecord for StrokeRecord {
    const CATEGORY: Category = Category::Stroke;
    const COLUMNS: &'static [&'static str] = LINE_COLUMNS;

    fn level(&self) -> Level {
        self.0.level
    }

    fn values(&self) -> Vec<Scalar> {
        self.0.line_values()
    }
}

impl FlatRecord for SegmentRecord {
    const CATEGORY: Category = Category::Segment;
    const COLUMNS: &'static [&'static str] = LINE_COLUMNS;

    fn level(&self) -> Level {
        self.0.level
    }

    fn values(&self) -> Vec<Scalar> {
        self.0.line_values()
    }
}

fn serialize_center_label<S: Serializer>(p: &Provenance, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(p.center_label())
}

fn serialize_bsp_label<S: Serializer>(p: &Provenance, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(p.bsp_label())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CenterRecord {
    pub level: Level,
    #[serde(rename = "type", serialize_with = "serialize_center_label")]
    pub provenance: Provenance,
    pub start_time: String,
    pub end_time: String,
    pub high: f64,
    pub low: f64,
    pub is_sure: bool,
}

impl FlatRecord for CenterRecord {
    const CATEGORY: Category = Category::Center;
    const COLUMNS: &'static [&'static str] = &[
        "level",
        "type",
        "start_time",
        "end_time",
        "high",
        "low",
        "is_sure",
    ];

    fn level(&self) -> Level {
        self.level
    }

    fn values(&self) -> Vec<Scalar> {
        vec![
            self.level.name().into(),
            self.provenance.center_label().into(),
            self.start_time.clone().into(),
            self.end_time.clone().into(),
            self.high.into(),
            self.low.into(),
            self.is_sure.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BspRecord {
    pub level: Level,
    #[serde(rename = "type", serialize_with = "serialize_bsp_label")]
    pub provenance: Provenance,
    pub bs_type: String,
    pub is_buy: bool,
    pub time: String,
    pub price: f64,
}

impl FlatRecord for BspRecord {
    const CATEGORY: Category = Category::BuySellPoint;
    const COLUMNS: &'static [&'static str] =
        &["level", "type", "bs_type", "is_buy", "time", "price"];

    fn level(&self) -> Level {
        self.level
    }

    fn values(&self) -> Vec<Scalar> {
        vec![
            self.level.name().into(),
            self.provenance.bsp_label().into(),
            self.bs_type.clone().into(),
            self.is_buy.into(),
            self.time.clone().into(),
            self.price.into(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center(provenance: Provenance) -> CenterRecord {
        CenterRecord {
            level: Level::Day,
            provenance,
            start_time: "2024/01/02".to_string(),
            end_time: "2024/01/09".to_string(),
            high: 12.5,
            low: 11.0,
            is_sure: true,
        }
    }

    #[test]
    fn test_category_order() {
        let titles: Vec<_> = Category::all().iter().map(|c| c.title()).collect();
        assert_eq!(
            titles,
            vec!["Fractals", "Strokes", "Segments", "Centers", "Buy/Sell Points"]
        );
    }

    #[test]
    fn test_values_align_with_columns() {
        let rec = center(Provenance::Segment);
        assert_eq!(rec.values().len(), CenterRecord::COLUMNS.len());
        assert_eq!(rec.values()[1], Scalar::Text("segment-center".to_string()));
    }

    #[test]
    fn test_center_serializes_label_as_type() {
        let json = serde_json::to_value(center(Provenance::Stroke)).unwrap();
        assert_eq!(json["type"], "stroke-center");
        assert_eq!(json["level"], "DAY");
    }

    #[test]
    fn test_stroke_record_is_flat() {
        let rec = StrokeRecord(LineRecord {
            level: Level::Minute30,
            idx: 4,
            direction: Direction::Down,
            start_time: "2024/01/02 10:30".to_string(),
            end_time: "2024/01/02 14:00".to_string(),
            start_val: 9.8,
            end_val: 9.1,
            is_sure: false,
        });
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["direction"], "DOWN");
        assert_eq!(json["level"], "30M");
        assert_eq!(json["idx"], 4);
        assert_eq!(rec.values().len(), StrokeRecord::COLUMNS.len());
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::Float(10.5).to_string(), "10.5");
        assert_eq!(Scalar::Float(10.0).to_string(), "10.0");
        assert_eq!(Scalar::Float(-3.0).to_string(), "-3.0");
        assert_eq!(Scalar::Float(12.125).to_string(), "12.125");
        assert_eq!(Scalar::Bool(false).to_string(), "false");
        assert_eq!(Scalar::Int(3).to_string(), "3");
    }
}
