//! Configuration management and validation.
//!
//! Provides the runtime configuration for locating sadf and its data files
//! and for deciding what happens when a line cannot be classified. Values
//! are layered: defaults, then an optional JSON config file, then
//! environment variables, then command-line overrides.

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DATA_FILE_PATTERN, DEFAULT_DATA_DIR, DEFAULT_SADF_BINARY,
    ENV_DATA_DIR, ENV_ERROR_POLICY, ENV_SADF_BINARY,
};
use crate::{ClassifyError, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

/// What to do with a line that cannot be classified
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop reading at the first bad line
    #[default]
    Halt,
    /// Log the bad line and keep reading
    Skip,
}

impl ErrorPolicy {
    /// Apply the policy to a classification error
    ///
    /// `Halt` escalates the error; `Skip` logs it and lets the caller continue.
    pub fn handle(&self, error: ClassifyError) -> Result<()> {
        match self {
            ErrorPolicy::Halt => Err(error.into()),
            ErrorPolicy::Skip => {
                if error.is_ambiguous() {
                    warn!("Skipping line, sadf output format may have changed: {}", error);
                } else {
                    warn!("Skipping line: {}", error);
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPolicy::Halt => f.write_str("halt"),
            ErrorPolicy::Skip => f.write_str("skip"),
        }
    }
}

impl FromStr for ErrorPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "halt" => Ok(ErrorPolicy::Halt),
            "skip" => Ok(ErrorPolicy::Skip),
            other => Err(Error::configuration(format!(
                "Unknown error policy '{}' (expected 'halt' or 'skip')",
                other
            ))),
        }
    }
}

/// Global configuration for sadf reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SadfConfig {
    /// sadf executable name or path
    pub sadf_binary: PathBuf,

    /// Directory holding the daily `saDD` binary files
    pub data_dir: PathBuf,

    /// Glob pattern for data files inside `data_dir`
    pub file_pattern: String,

    /// Policy for unclassifiable lines
    pub error_policy: ErrorPolicy,
}

impl Default for SadfConfig {
    fn default() -> Self {
        Self {
            sadf_binary: PathBuf::from(DEFAULT_SADF_BINARY),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            file_pattern: DATA_FILE_PATTERN.to_string(),
            error_policy: ErrorPolicy::Halt,
        }
    }
}

impl SadfConfig {
    /// Create configuration with a custom sadf executable
    pub fn with_sadf_binary(mut self, sadf_binary: impl Into<PathBuf>) -> Self {
        self.sadf_binary = sadf_binary.into();
        self
    }

    /// Create configuration with a custom data directory
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Create configuration with a custom data file pattern
    pub fn with_file_pattern(mut self, file_pattern: impl Into<String>) -> Self {
        self.file_pattern = file_pattern.into();
        self
    }

    /// Create configuration with a custom error policy
    pub fn with_error_policy(mut self, error_policy: ErrorPolicy) -> Self {
        self.error_policy = error_policy;
        self
    }

    /// Default config file location (`~/.config/sadf-reader/config.json`)
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))
    }

    /// Load a configuration file, filling missing keys with defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;

        serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!("Invalid config file {}: {}", path.display(), e))
        })
    }

    /// Load defaults, then the config file (if any), then environment overrides
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        debug!("Layered configuration: {:?}", config);
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(binary) = lookup(ENV_SADF_BINARY).filter(|v| !v.is_empty()) {
            self.sadf_binary = PathBuf::from(binary);
        }
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|v| !v.is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(policy) = lookup(ENV_ERROR_POLICY).filter(|v| !v.is_empty()) {
            self.error_policy = policy.parse()?;
        }
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.sadf_binary.as_os_str().is_empty() {
            return Err(Error::configuration("sadf binary must not be empty"));
        }
        if self.file_pattern.trim().is_empty() {
            return Err(Error::configuration("data file pattern must not be empty"));
        }
        if self.file_pattern.contains(std::path::MAIN_SEPARATOR) {
            return Err(Error::configuration(format!(
                "data file pattern '{}' must not contain a path separator",
                self.file_pattern
            )));
        }
        glob::Pattern::new(&self.file_pattern).map_err(|e| {
            Error::configuration(format!(
                "Invalid data file pattern '{}': {}",
                self.file_pattern, e
            ))
        })?;
        Ok(())
    }
}
