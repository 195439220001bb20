use crate::error::{AppError, Result};
use crate::models::{DataSource, Level};
use chrono::NaiveDate;

/// Parameters handed to the analysis engine
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    /// Instrument code (e.g., "sh.601799", "BTC/USDT")
    pub code: String,

    /// First day of the analyzed range
    pub begin_date: NaiveDate,

    /// Last day of the analyzed range, None means "up to now"
    pub end_date: Option<NaiveDate>,

    /// Where the engine pulls its bars from
    pub data_source: DataSource,

    /// Levels to analyze, in presentation order
    pub levels: Vec<Level>,
}

impl AnalysisRequest {
    /// Create a validated request
    ///
    /// # Arguments
    /// * `code` - Instrument code, must not be blank
    /// * `begin_date` - YYYY-MM-DD
    /// * `end_date` - Optional YYYY-MM-DD, must not precede `begin_date`
    /// * `data_source` - Engine data source
    /// * `levels` - Non-empty level list
    pub fn new(
        code: &str,
        begin_date: &str,
        end_date: Option<&str>,
        data_source: DataSource,
        levels: Vec<Level>,
    ) -> Result<Self> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AppError::InvalidInput("instrument code is empty".to_string()));
        }
        if levels.is_empty() {
            return Err(AppError::InvalidInput("no level requested".to_string()));
        }

        let begin_date = parse_date(begin_date)?;
        let end_date = end_date.map(parse_date).transpose()?;

        if let Some(end) = end_date {
            if end < begin_date {
                return Err(AppError::InvalidInput(format!(
                    "end date {} is before begin date {}",
                    end, begin_date
                )));
            }
        }

        Ok(Self {
            code: code.to_string(),
            begin_date,
            end_date,
            data_source,
            levels,
        })
    }

    /// Comma joined level names
    pub fn level_names(&self) -> String {
        self.levels
            .iter()
            .map(Level::name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| AppError::Parse(format!("invalid date '{}': {} (expected YYYY-MM-DD)", s, e)))
}
