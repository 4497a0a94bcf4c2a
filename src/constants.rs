//! Application constants for sadf reader
//!
//! This module contains the sadf invocation recipe, line markers, field
//! positions and default locations used throughout the application.

// =============================================================================
// sadf Invocation
// =============================================================================

/// Default sadf executable, resolved through `PATH`
pub const DEFAULT_SADF_BINARY: &str = "sadf";

/// sadf options selecting the semicolon-delimited database format
pub const DEVIO_SADF_OPTS: &[&str] = &["-d"];

/// sar options selecting block device activity with pretty device names
pub const DEVIO_SAR_OPTS: &[&str] = &["-dp"];

/// Separator between sadf options and the underlying sar options
pub const SAR_OPTS_SEPARATOR: &str = "--";

/// Target used when none is given; an empty argument is a sadf usage error
pub const DEFAULT_TARGET: &str = "-0";

// =============================================================================
// Data File Discovery
// =============================================================================

/// Directory where sysstat keeps its daily binary files
pub const DEFAULT_DATA_DIR: &str = "/var/log/sysstat";

/// Daily binary data files (`sa01` .. `sa31`)
pub const DATA_FILE_PATTERN: &str = "sa[0-3][0-9]";

// =============================================================================
// Line Format
// =============================================================================

/// Field delimiter in sadf database output
pub const FIELD_DELIMITER: char = ';';

/// Lines starting with this are comments and never carry data
pub const COMMENT_PREFIX: char = '#';

/// Prefix of the column legend line
pub const HEADER_PREFIX: &str = "# host";

/// Position signature of a restart line: non-empty host, then an interval
/// field that is exactly `-1`
pub const RESTART_SIGNATURE_PATTERN: &str = r"^[^;]+;-1(;|$)";

/// Marker sadf places in the fourth field of restart lines
/// (`LINUX-RESTART\t(4 CPU)`); it must stand as its own word
pub const RESTART_MARKER_PATTERN: &str = r"\bRESTART\b";

/// Restart lines have exactly this many fields
pub const RESTART_FIELD_COUNT: usize = 4;

/// Error messages kept per [`crate::ReadStats`]; later errors are only counted
pub const MAX_RECORDED_ERRORS: usize = 100;

/// Field positions shared by data and restart lines
pub mod fields {
    pub const HOSTNAME: usize = 0;
    pub const TIMESTAMP: usize = 2;
    pub const DEVICE: usize = 3;
    pub const RESTART_MARKER: usize = 3;

    /// First numeric field (`tps`)
    pub const FIRST_METRIC: usize = 4;

    /// Number of numeric values an I/O statistics record carries
    pub const METRIC_COUNT: usize = 7;

    /// Field count of an I/O statistics line
    pub const IOSTATS_FIELD_COUNT: usize = 12;

    /// Metric column left out of I/O statistics records
    pub const DROPPED_METRIC: usize = 9;
}

// =============================================================================
// Configuration
// =============================================================================

/// Environment variable overriding the sadf executable
pub const ENV_SADF_BINARY: &str = "SADF_READER_SADF_BIN";

/// Environment variable overriding the data directory
pub const ENV_DATA_DIR: &str = "SADF_READER_DATA_DIR";

/// Environment variable overriding the error policy (`halt` or `skip`)
pub const ENV_ERROR_POLICY: &str = "SADF_READER_ERROR_POLICY";

/// Application directory name under the user config directory
pub const CONFIG_DIR_NAME: &str = "sadf-reader";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Row columns in output order
pub const ROW_COLUMNS: &[&str] = &[
    "hostname",
    "timestamp",
    "dev",
    "tps",
    "read_freq",
    "write_freq",
    "avg_req_size",
    "avg_que_size",
    "await",
    "cpu_util",
];
