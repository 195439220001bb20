//! Record mapper: one analysis object in, one flat record out
//!
//! Pure functions. The only failure is a dangling reference inside the
//! level result, which surfaces as a structure error.

use crate::error::Result;
use crate::models::chan::{BuySellPoint, Center, CombinedKLine, LevelResult, Bi, Seg};
use crate::models::{
    BspRecord, CenterRecord, FractalRecord, Level, LineRecord, Provenance, SegmentRecord,
    StrokeRecord,
};
use crate::utils::format_chan_time;

/// Level being walked together with its result container
#[derive(Debug, Clone, Copy)]
pub struct LevelContext<'a> {
    pub level: Level,
    pub result: &'a LevelResult,
}

pub fn map_fractal(ctx: &LevelContext<'_>, klc: &CombinedKLine) -> Result<FractalRecord> {
    let time = ctx.result.kline_time(klc)?;
    Ok(FractalRecord {
        level: ctx.level,
        time: format_chan_time(&time),
        idx: klc.idx,
        fx_type: klc.fx,
        high: klc.high,
        low: klc.low,
    })
}

pub fn map_stroke(ctx: &LevelContext<'_>, bi: &Bi) -> Result<StrokeRecord> {
    let level = ctx.result;
    Ok(StrokeRecord(LineRecord {
        level: ctx.level,
        idx: bi.idx,
        direction: bi.dir,
        start_time: format_chan_time(&level.bi_begin_time(bi)?),
        end_time: format_chan_time(&level.bi_end_time(bi)?),
        start_val: level.bi_begin_val(bi)?,
        end_val: level.bi_end_val(bi)?,
        is_sure: bi.is_sure,
    }))
}

/// Same shape as a stroke, resolved through the bounding strokes
pub fn map_segment(ctx: &LevelContext<'_>, seg: &Seg) -> Result<SegmentRecord> {
    let level = ctx.result;
    let start_bi = level.seg_start_bi(seg)?;
    let end_bi = level.seg_end_bi(seg)?;
    Ok(SegmentRecord(LineRecord {
        level: ctx.level,
        idx: seg.idx,
        direction: seg.dir,
        start_time: format_chan_time(&level.bi_begin_time(start_bi)?),
        end_time: format_chan_time(&level.bi_end_time(end_bi)?),
        start_val: level.bi_begin_val(start_bi)?,
        end_val: level.bi_end_val(end_bi)?,
        is_sure: seg.is_sure,
    }))
}

pub fn map_center(
    ctx: &LevelContext<'_>,
    provenance: Provenance,
    zs: &Center,
) -> Result<CenterRecord> {
    let level = ctx.result;
    Ok(CenterRecord {
        level: ctx.level,
        provenance,
        start_time: format_chan_time(&level.unit(zs.begin)?.time),
        end_time: format_chan_time(&level.unit(zs.end)?.time),
        high: zs.high,
        low: zs.low,
        is_sure: zs.is_sure,
    })
}

/// Price is the anchor's low for a buy, its high for a sell
pub fn map_bsp(
    ctx: &LevelContext<'_>,
    provenance: Provenance,
    bsp: &BuySellPoint,
) -> Result<BspRecord> {
    let klu = ctx.result.unit(bsp.klu)?;
    Ok(BspRecord {
        level: ctx.level,
        provenance,
        bs_type: bsp.type_str(),
        is_buy: bsp.is_buy,
        time: format_chan_time(&klu.time),
        price: if bsp.is_buy { klu.low } else { klu.high },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::chan::{BspType, Direction, FxType};
    use crate::test_support::{day, full_level, LevelBuilder};

    fn ctx(result: &LevelResult) -> LevelContext<'_> {
        LevelContext {
            level: Level::Day,
            result,
        }
    }

    #[test]
    fn test_map_fractal() {
        let level = full_level(10.0);
        let rec = map_fractal(&ctx(&level), &level.klines[2]).unwrap();

        assert_eq!(rec.level, Level::Day);
        assert_eq!(rec.time, "2024/01/03");
        assert_eq!(rec.idx, 2);
        assert_eq!(rec.fx_type, FxType::Top);
        assert_eq!(rec.high, 18.0);
        assert_eq!(rec.low, 16.0);
    }

    #[test]
    fn test_map_stroke() {
        let level = full_level(10.0);
        let StrokeRecord(rec) = map_stroke(&ctx(&level), &level.bi_list[1]).unwrap();

        assert_eq!(rec.idx, 1);
        assert_eq!(rec.direction, Direction::Down);
        assert_eq!(rec.start_time, "2024/01/03");
        assert_eq!(rec.end_time, "2024/01/04");
        assert_eq!(rec.start_val, 18.0);
        assert_eq!(rec.end_val, 13.0);
        assert!(rec.is_sure);
    }

    #[test]
    fn test_map_segment_resolves_through_strokes() {
        let level = full_level(10.0);
        let SegmentRecord(rec) = map_segment(&ctx(&level), &level.seg_list[0]).unwrap();

        assert_eq!(rec.direction, Direction::Up);
        assert_eq!(rec.start_time, "2024/01/01");
        assert_eq!(rec.end_time, "2024/01/05");
        assert_eq!(rec.start_val, 10.0);
        assert_eq!(rec.end_val, 19.0);
        assert!(!rec.is_sure);
    }

    #[test]
    fn test_map_center_keeps_provenance() {
        let level = full_level(10.0);
        let rec = map_center(&ctx(&level), Provenance::Segment, &level.segzs_list[0]).unwrap();

        assert_eq!(rec.provenance, Provenance::Segment);
        assert_eq!(rec.start_time, "2024/01/01");
        assert_eq!(rec.end_time, "2024/01/05");
        assert_eq!(rec.high, 17.0);
        assert_eq!(rec.low, 12.0);
    }

    #[test]
    fn test_map_bsp_price_side() {
        let mut b = LevelBuilder::new();
        let u = b.unit(day(3), 21.5, 19.25);
        b.bsp(vec![BspType::T1], true, u);
        b.bsp(vec![BspType::T2S, BspType::T3A], false, u);
        let level = b.build();

        let buy = map_bsp(&ctx(&level), Provenance::Stroke, &level.bs_points[0]).unwrap();
        assert!(buy.is_buy);
        assert_eq!(buy.price, 19.25);
        assert_eq!(buy.bs_type, "1");

        let sell = map_bsp(&ctx(&level), Provenance::Stroke, &level.bs_points[1]).unwrap();
        assert!(!sell.is_buy);
        assert_eq!(sell.price, 21.5);
        assert_eq!(sell.bs_type, "2s,3a");
    }

    #[test]
    fn test_segment_with_missing_stroke_fails() {
        let mut b = LevelBuilder::new();
        let k0 = b.kline(day(1), 11.0, 10.0, FxType::Bottom);
        let k1 = b.kline(day(2), 14.0, 13.0, FxType::Top);
        let b0 = b.bi(Direction::Up, k0, k1, true);
        b.seg(Direction::Up, b0, 5, true);
        let level = b.build();

        let err = map_segment(&ctx(&level), &level.seg_list[0]).unwrap_err();
        assert!(matches!(err, AppError::Structure(_)));
    }
}
