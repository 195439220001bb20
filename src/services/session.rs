use crate::error::Result;
use crate::models::{
    BspRecord, Category, CenterRecord, ChanAnalysis, FlatRecord, FractalRecord, Level,
    SegmentRecord, StrokeRecord,
};
use crate::services::dispatcher;
use tracing::{debug, info};

/// What one category produced
///
/// `NoData` is a normal outcome, distinct from a failed export.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryOutcome<R> {
    /// At least one record
    Records(Vec<R>),
    /// The category ran and found nothing
    NoData,
}

impl<R> CategoryOutcome<R> {
    pub fn from_records(records: Vec<R>) -> Self {
        if records.is_empty() {
            CategoryOutcome::NoData
        } else {
            CategoryOutcome::Records(records)
        }
    }

    /// Records, empty for `NoData`
    pub fn records(&self) -> &[R] {
        match self {
            CategoryOutcome::Records(records) => records,
            CategoryOutcome::NoData => &[],
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, CategoryOutcome::NoData)
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }
}

/// Consumer of an export report, called once per category in session order
pub trait ReportVisitor {
    fn visit<R: FlatRecord>(&mut self, outcome: &CategoryOutcome<R>) -> Result<()>;
}

/// Record counts of one level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCounts {
    pub level: Level,
    pub fractals: usize,
    pub strokes: usize,
    pub segments: usize,
    pub centers: usize,
    pub bs_points: usize,
}

/// Output of one export session
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub code: String,
    pub levels: Vec<Level>,
    pub fractals: CategoryOutcome<FractalRecord>,
    pub strokes: CategoryOutcome<StrokeRecord>,
    pub segments: CategoryOutcome<SegmentRecord>,
    pub centers: CategoryOutcome<CenterRecord>,
    pub bs_points: CategoryOutcome<BspRecord>,
}

impl ExportReport {
    /// Feed every category to `visitor`: fractals, strokes, segments,
    /// centers, buy/sell points
    pub fn visit<V: ReportVisitor>(&self, visitor: &mut V) -> Result<()> {
        visitor.visit(&self.fractals)?;
        visitor.visit(&self.strokes)?;
        visitor.visit(&self.segments)?;
        visitor.visit(&self.centers)?;
        visitor.visit(&self.bs_points)?;
        Ok(())
    }

    pub fn outcome_len(&self, category: Category) -> usize {
        match category {
            Category::Fractal => self.fractals.len(),
            Category::Stroke => self.strokes.len(),
            Category::Segment => self.segments.len(),
            Category::Center => self.centers.len(),
            Category::BuySellPoint => self.bs_points.len(),
        }
    }

    /// Per level record counts, in level order
    pub fn summary(&self) -> Vec<LevelCounts> {
        self.levels
            .iter()
            .map(|&level| LevelCounts {
                level,
                fractals: count_level(&self.fractals, level),
                strokes: count_level(&self.strokes, level),
                segments: count_level(&self.segments, level),
                centers: count_level(&self.centers, level),
                bs_points: count_level(&self.bs_points, level),
            })
            .collect()
    }
}

fn count_level<R: FlatRecord>(outcome: &CategoryOutcome<R>, level: Level) -> usize {
    outcome.records().iter().filter(|r| r.level() == level).count()
}

/// One read pass over an analysis
///
/// The analysis is borrowed, never copied or mutated. Structure errors are
/// returned as-is; the session does not retry or recover.
pub struct ExportSession<'a> {
    analysis: &'a ChanAnalysis,
}

impl<'a> ExportSession<'a> {
    pub fn new(analysis: &'a ChanAnalysis) -> Self {
        Self { analysis }
    }

    pub fn run(&self) -> Result<ExportReport> {
        let analysis = self.analysis;
        info!(
            code = %analysis.code,
            levels = analysis.levels().len(),
            "Exporting analysis"
        );

        let fractals = dispatcher::export_fractals(analysis)?;
        debug!(category = %Category::Fractal, records = fractals.len(), "Category exported");
        let strokes = dispatcher::export_strokes(analysis)?;
        debug!(category = %Category::Stroke, records = strokes.len(), "Category exported");
        let segments = dispatcher::export_segments(analysis)?;
        debug!(category = %Category::Segment, records = segments.len(), "Category exported");
        let centers = dispatcher::export_centers(analysis)?;
        debug!(category = %Category::Center, records = centers.len(), "Category exported");
        let bs_points = dispatcher::export_bsps(analysis)?;
        debug!(category = %Category::BuySellPoint, records = bs_points.len(), "Category exported");

        Ok(ExportReport {
            code: analysis.code.clone(),
            levels: analysis.level_list(),
            fractals: CategoryOutcome::from_records(fractals),
            strokes: CategoryOutcome::from_records(strokes),
            segments: CategoryOutcome::from_records(segments),
            centers: CategoryOutcome::from_records(centers),
            bs_points: CategoryOutcome::from_records(bs_points),
        })
    }
}
