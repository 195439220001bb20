//! Defaults shared by the CLI and the snapshot engine

/// Environment variable holding the snapshot root directory
pub const CHAN_DATA_DIR_ENV: &str = "CHAN_DATA_DIR";

/// Snapshot root used when `CHAN_DATA_DIR` is unset
pub const DEFAULT_CHAN_DATA_DIR: &str = "chan_data";

/// Level list used when `--levels` is not given
pub const DEFAULT_LEVELS: &str = "DAY";

/// Directory for CSV output when `--output-dir` is not given
pub const DEFAULT_OUTPUT_DIR: &str = "chan_export";
