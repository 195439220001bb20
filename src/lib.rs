//! Flatten Chan theory analysis results into tabular records
//!
//! The analysis engine produces, per K-line level, nested structures that
//! reference each other (segments → strokes → combined candles → candles).
//! [`services::ExportSession`] walks those structures once and yields one
//! uniform record set per category, or an explicit "no data" outcome.

pub mod cli;
pub mod commands;
pub mod constants;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;
