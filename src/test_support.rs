//! Fixture builders shared by unit tests

use crate::models::chan::{
    Bi, BspType, BuySellPoint, Center, CombinedKLine, Direction, FxType, KLineUnit, LevelResult,
    Seg,
};
use chrono::{NaiveDate, NaiveDateTime};

/// Midnight of 2024-01-`d`
pub fn day(d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Builds a level result while keeping arena positions consistent
#[derive(Default)]
pub struct LevelBuilder {
    level: LevelResult,
}

impl LevelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unit(&mut self, time: NaiveDateTime, high: f64, low: f64) -> usize {
        let idx = self.level.units.len();
        self.level.units.push(KLineUnit {
            idx,
            time,
            open: low,
            high,
            low,
            close: high,
        });
        idx
    }

    /// Combined K-line holding one fresh unit
    pub fn kline(&mut self, time: NaiveDateTime, high: f64, low: f64, fx: FxType) -> usize {
        let unit = self.unit(time, high, low);
        self.merged_kline(vec![unit], high, low, fx)
    }

    pub fn merged_kline(&mut self, units: Vec<usize>, high: f64, low: f64, fx: FxType) -> usize {
        let idx = self.level.klines.len();
        self.level.klines.push(CombinedKLine {
            idx,
            units,
            fx,
            high,
            low,
        });
        idx
    }

    pub fn bi(&mut self, dir: Direction, begin_klc: usize, end_klc: usize, is_sure: bool) -> usize {
        let idx = self.level.bi_list.len();
        self.level.bi_list.push(Bi {
            idx,
            dir,
            begin_klc,
            end_klc,
            is_sure,
        });
        idx
    }

    pub fn seg(&mut self, dir: Direction, start_bi: usize, end_bi: usize, is_sure: bool) -> usize {
        let idx = self.level.seg_list.len();
        self.level.seg_list.push(Seg {
            idx,
            dir,
            start_bi,
            end_bi,
            is_sure,
        });
        idx
    }

    pub fn zs(&mut self, begin: usize, end: usize, low: f64, high: f64, is_sure: bool) {
        self.level.zs_list.push(Center {
            begin,
            end,
            low,
            high,
            is_sure,
        });
    }

    pub fn seg_zs(&mut self, begin: usize, end: usize, low: f64, high: f64, is_sure: bool) {
        self.level.segzs_list.push(Center {
            begin,
            end,
            low,
            high,
            is_sure,
        });
    }

    pub fn bsp(&mut self, types: Vec<BspType>, is_buy: bool, klu: usize) {
        self.level.bs_points.push(BuySellPoint { types, is_buy, klu });
    }

    pub fn seg_bsp(&mut self, types: Vec<BspType>, is_buy: bool, klu: usize) {
        self.level.seg_bs_points.push(BuySellPoint { types, is_buy, klu });
    }

    pub fn build(self) -> LevelResult {
        self.level
    }
}

/// The two-stroke daily example: up 10 → 15 confirmed, down 15 → 12 pending
pub fn two_stroke_day() -> LevelResult {
    let mut b = LevelBuilder::new();
    let k0 = b.kline(day(2), 11.0, 10.0, FxType::Unknown);
    let k1 = b.kline(day(8), 15.0, 14.0, FxType::Unknown);
    let k2 = b.kline(day(15), 13.0, 12.0, FxType::Unknown);
    b.bi(Direction::Up, k0, k1, true);
    b.bi(Direction::Down, k1, k2, false);
    b.build()
}

/// A level exercising every category
pub fn full_level(base: f64) -> LevelResult {
    let mut b = LevelBuilder::new();
    let k0 = b.kline(day(1), base + 2.0, base, FxType::Bottom);
    let k1 = b.kline(day(2), base + 3.0, base + 1.0, FxType::Unknown);
    let k2 = b.kline(day(3), base + 8.0, base + 6.0, FxType::Top);
    let k3 = b.kline(day(4), base + 5.0, base + 3.0, FxType::Bottom);
    let k4 = b.kline(day(5), base + 9.0, base + 7.0, FxType::Top);

    let b0 = b.bi(Direction::Up, k0, k2, true);
    b.bi(Direction::Down, k2, k3, true);
    let b2 = b.bi(Direction::Up, k3, k4, false);
    b.seg(Direction::Up, b0, b2, false);

    b.zs(1, 3, base + 3.0, base + 6.0, true);
    b.seg_zs(0, 4, base + 2.0, base + 7.0, false);

    b.bsp(vec![BspType::T1], true, 0);
    b.bsp(vec![BspType::T2, BspType::T3B], false, 2);
    b.seg_bsp(vec![BspType::T1P], true, 3);
    b.build()
}
