use crate::constants::{CHAN_DATA_DIR_ENV, DEFAULT_CHAN_DATA_DIR};
use chrono::{NaiveDateTime, Timelike};
use std::path::PathBuf;

/// Get snapshot directory from environment variable or use default
pub fn get_chan_data_dir() -> PathBuf {
    std::env::var(CHAN_DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CHAN_DATA_DIR))
}

/// Format a candle time the way the exported tables show it
///
/// Midnight timestamps (daily and above) drop the clock part:
/// `2024/01/02` vs `2024/01/02 10:30`.
pub fn format_chan_time(time: &NaiveDateTime) -> String {
    if time.hour() == 0 && time.minute() == 0 {
        time.format("%Y/%m/%d").to_string()
    } else {
        time.format("%Y/%m/%d %H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_daily_time() {
        let t = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(format_chan_time(&t), "2024/01/02");
    }

    #[test]
    fn test_format_intraday_time() {
        let t = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(format_chan_time(&t), "2024/01/02 10:30");
    }
}
