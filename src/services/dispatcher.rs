//! Collection dispatcher
//!
//! Picks the sub-collection(s) of a level result for each category and routes
//! them through the level walker. Centers and buy/sell points exist twice per
//! level (stroke based and segment based); both halves are tagged with their
//! [`Provenance`] as they are selected, stroke half first.

use crate::error::Result;
use crate::models::chan::{Bi, BuySellPoint, Center, CombinedKLine, Seg};
use crate::models::{
    BspRecord, CenterRecord, ChanAnalysis, FractalRecord, LevelResult, Provenance, SegmentRecord,
    StrokeRecord,
};
use crate::services::mapper::{map_bsp, map_center, map_fractal, map_segment, map_stroke};
use crate::services::walker::{include_all, walk_levels};

pub fn select_fractals(level: &LevelResult) -> std::slice::Iter<'_, CombinedKLine> {
    level.klines.iter()
}

/// Unresolved fractals are never exported
pub fn is_fractal(klc: &&CombinedKLine) -> bool {
    klc.fx.is_resolved()
}

pub fn select_strokes(level: &LevelResult) -> std::slice::Iter<'_, Bi> {
    level.bi_list.iter()
}

pub fn select_segments(level: &LevelResult) -> std::slice::Iter<'_, Seg> {
    level.seg_list.iter()
}

pub fn select_centers(
    level: &LevelResult,
) -> impl Iterator<Item = (Provenance, &Center)> + '_ {
    let strokes = level.zs_list.iter().map(|zs| (Provenance::Stroke, zs));
    let segments = level.segzs_list.iter().map(|zs| (Provenance::Segment, zs));
    strokes.chain(segments)
}

pub fn select_bsps(
    level: &LevelResult,
) -> impl Iterator<Item = (Provenance, &BuySellPoint)> + '_ {
    let strokes = level.bsp_iter().map(|bsp| (Provenance::Stroke, bsp));
    let segments = level.seg_bsp_iter().map(|bsp| (Provenance::Segment, bsp));
    strokes.chain(segments)
}

pub fn export_fractals(analysis: &ChanAnalysis) -> Result<Vec<FractalRecord>> {
    walk_levels(analysis, select_fractals, is_fractal, map_fractal)
}

pub fn export_strokes(analysis: &ChanAnalysis) -> Result<Vec<StrokeRecord>> {
    walk_levels(analysis, select_strokes, include_all, map_stroke)
}

pub fn export_segments(analysis: &ChanAnalysis) -> Result<Vec<SegmentRecord>> {
    walk_levels(analysis, select_segments, include_all, map_segment)
}

pub fn export_centers(analysis: &ChanAnalysis) -> Result<Vec<CenterRecord>> {
    walk_levels(
        analysis,
        |level| select_centers(level),
        include_all,
        |ctx, (provenance, zs)| map_center(ctx, provenance, zs),
    )
}

pub fn export_bsps(analysis: &ChanAnalysis) -> Result<Vec<BspRecord>> {
    walk_levels(
        analysis,
        |level| select_bsps(level),
        include_all,
        |ctx, (provenance, bsp)| map_bsp(ctx, provenance, bsp),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chan::FxType;
    use crate::models::Level;
    use crate::test_support::{full_level, two_stroke_day};

    fn two_levels() -> ChanAnalysis {
        ChanAnalysis::new("sh.601799")
            .with_level(Level::Day, full_level(10.0))
            .with_level(Level::Minute60, full_level(100.0))
    }

    #[test]
    fn test_fractals_skip_unknown() {
        let records = export_fractals(&two_levels()).unwrap();

        assert_eq!(records.len(), 8);
        assert!(records.iter().all(|r| r.fx_type != FxType::Unknown));
        assert!(records.iter().all(|r| r.idx != 1));
    }

    #[test]
    fn test_every_stroke_and_segment_exported() {
        let analysis = two_levels();
        assert_eq!(export_strokes(&analysis).unwrap().len(), 6);
        assert_eq!(export_segments(&analysis).unwrap().len(), 2);
    }

    #[test]
    fn test_centers_tagged_at_origin_per_level() {
        let records = export_centers(&two_levels()).unwrap();

        let tags: Vec<_> = records.iter().map(|r| (r.level, r.provenance)).collect();
        assert_eq!(
            tags,
            vec![
                (Level::Day, Provenance::Stroke),
                (Level::Day, Provenance::Segment),
                (Level::Minute60, Provenance::Stroke),
                (Level::Minute60, Provenance::Segment),
            ]
        );
        // segment-based center of the 60M level spans units 0..4
        assert_eq!(records[3].low, 102.0);
        assert_eq!(records[3].high, 107.0);
    }

    #[test]
    fn test_bsps_tagged_and_priced() {
        let records = export_bsps(&two_levels()).unwrap();
        assert_eq!(records.len(), 6);

        let day: Vec<_> = records.iter().filter(|r| r.level == Level::Day).collect();
        assert_eq!(day[0].provenance, Provenance::Stroke);
        assert_eq!(day[0].price, 10.0);
        assert_eq!(day[1].provenance, Provenance::Stroke);
        assert_eq!(day[1].bs_type, "2,3b");
        assert_eq!(day[1].price, 18.0);
        assert_eq!(day[2].provenance, Provenance::Segment);
        assert_eq!(day[2].price, 13.0);
    }

    #[test]
    fn test_level_without_collections() {
        let analysis = ChanAnalysis::new("T").with_level(Level::Day, two_stroke_day());

        assert!(export_fractals(&analysis).unwrap().is_empty());
        assert!(export_segments(&analysis).unwrap().is_empty());
        assert!(export_centers(&analysis).unwrap().is_empty());
        assert!(export_bsps(&analysis).unwrap().is_empty());
        assert_eq!(export_strokes(&analysis).unwrap().len(), 2);
    }
}
