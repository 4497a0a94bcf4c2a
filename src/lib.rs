//! sadf reader library
//!
//! A Rust library for turning the output of sysstat's `sadf` formatter into
//! strongly-typed device I/O records.
//!
//! This library provides tools for:
//! - Classifying each raw `sadf -d -- -dp` line as a header, restart or
//!   I/O statistics record, with distinct errors for unrecognised and
//!   ambiguous lines
//! - Filtering ordered line sequences down to I/O statistics rows
//! - Building `sadf` command lines and streaming the subprocess output
//! - Reading stored text dumps of sadf output
//! - Discovering daily `saDD` data files

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod devio_parser;
        pub mod file_discovery;
        pub mod line_source;
        pub mod sadf_command;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{DevIoRecord, HeaderRecord, IoStatsRecord, RecordKind, RestartRecord};
pub use app::services::devio_parser::{
    ClassifyError, DevIoReader, ParseFailure, ReadStats, classify_line,
};
pub use config::{ErrorPolicy, SadfConfig};

/// Result type alias for the sadf reader
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for sadf reading operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// A line could not be classified
    #[error("Line classification failed: {0}")]
    Classification(#[from] ClassifyError),

    /// sadf could not be started or exited unsuccessfully
    #[error("sadf command failed ({command}): {message}")]
    SadfCommand { command: String, message: String },

    /// Target is neither a data file path nor a non-positive day offset
    #[error("Invalid sadf target '{target}': {message}")]
    InvalidTarget { target: String, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Data file discovery failed
    #[error("File discovery error: {message}")]
    FileDiscovery { message: String },

    /// Row or config serialization failed
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a sadf command error
    pub fn sadf_command(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SadfCommand {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Create an invalid target error
    pub fn invalid_target(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTarget {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a file discovery error
    pub fn file_discovery(message: impl Into<String>) -> Self {
        Self::FileDiscovery {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Serialization {
            message: message.into(),
            source: Box::new(source),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<glob::PatternError> for Error {
    fn from(error: glob::PatternError) -> Self {
        Self::FileDiscovery {
            message: format!("Invalid data file pattern: {}", error),
        }
    }
}

impl From<glob::GlobError> for Error {
    fn from(error: glob::GlobError) -> Self {
        Self::FileDiscovery {
            message: format!("Cannot read {}: {}", error.path().display(), error.error()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization("JSON serialization failed", error)
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::serialization("CSV serialization failed", error)
    }
}
