/// Data source the analysis engine pulled its bars from
///
/// Determines which snapshot directory is read.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataSource {
    /// A-share daily and intraday bars (default)
    #[value(name = "BAO_STOCK")]
    BaoStock,

    /// Cryptocurrency exchange bars
    #[value(name = "CCXT")]
    Ccxt,

    /// Local CSV files
    #[value(name = "CSV")]
    Csv,
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::BaoStock
    }
}

impl DataSource {
    /// Snapshot sub-directory for this source
    pub fn dir_name(&self) -> &'static str {
        match self {
            DataSource::BaoStock => "bao_stock",
            DataSource::Ccxt => "ccxt",
            DataSource::Csv => "csv",
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::BaoStock => "BAO_STOCK",
            DataSource::Ccxt => "CCXT",
            DataSource::Csv => "CSV",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
