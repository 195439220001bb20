use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// K-line level (timeframe) analyzed by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    /// Monthly candles
    #[serde(rename = "MON")]
    Month,
    /// Weekly candles
    #[serde(rename = "WEEK")]
    Week,
    /// Daily candles
    #[serde(rename = "DAY")]
    Day,
    /// 60-minute candles
    #[serde(rename = "60M")]
    Minute60,
    /// 30-minute candles
    #[serde(rename = "30M")]
    Minute30,
    /// 15-minute candles
    #[serde(rename = "15M")]
    Minute15,
    /// 5-minute candles
    #[serde(rename = "5M")]
    Minute5,
}

impl Level {
    /// Parse from the command-line name
    ///
    /// # Arguments
    /// * `s` - String like "DAY", "60M", "WEEK"
    ///
    /// # Returns
    /// Some(Level) if recognized, None otherwise
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim() {
            "DAY" => Some(Level::Day),
            "60M" => Some(Level::Minute60),
            "30M" => Some(Level::Minute30),
            "15M" => Some(Level::Minute15),
            "5M" => Some(Level::Minute5),
            "WEEK" => Some(Level::Week),
            "MON" => Some(Level::Month),
            _ => None,
        }
    }

    /// Name used on the command line, in snapshots and in exported records
    pub fn name(&self) -> &'static str {
        match self {
            Level::Day => "DAY",
            Level::Minute60 => "60M",
            Level::Minute30 => "30M",
            Level::Minute15 => "15M",
            Level::Minute5 => "5M",
            Level::Week => "WEEK",
            Level::Month => "MON",
        }
    }

    /// Get all recognized levels, largest first
    pub fn all() -> Vec<Level> {
        vec![
            Level::Month,
            Level::Week,
            Level::Day,
            Level::Minute60,
            Level::Minute30,
            Level::Minute15,
            Level::Minute5,
        ]
    }

    /// Parse a comma-separated level list
    ///
    /// Unrecognized names are dropped. When nothing is recognized the list
    /// falls back to a single daily level. Order is kept as given; a repeated
    /// level only counts the first time.
    pub fn parse_levels(arg: &str) -> Vec<Level> {
        let mut levels = Vec::new();
        for name in arg.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match Level::from_name(name) {
                Some(level) if levels.contains(&level) => {
                    warn!(level = name, "Dropping repeated level")
                }
                Some(level) => levels.push(level),
                None => warn!(level = name, "Dropping unrecognized level"),
            }
        }

        if levels.is_empty() {
            warn!(arg, "No recognized level, falling back to DAY");
            levels.push(Level::default());
        }
        levels
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::Day
    }
}
