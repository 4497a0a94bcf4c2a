//! Discovery of daily sysstat data files
//!
//! sysstat keeps one binary file per day of the month (`sa01` .. `sa31`)
//! and overwrites them as the month wraps, so file names alone say nothing
//! about age. Files are ordered by modification time, oldest first.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::SadfConfig;
use crate::{Error, Result};

/// A binary sysstat data file found on disk
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataFile {
    pub path: PathBuf,
    pub modified: DateTime<Local>,
    pub size: u64,
}

impl DataFile {
    /// File name without the directory (`sa20`)
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Finds data files matching a glob pattern inside one directory
#[derive(Debug, Clone)]
pub struct DataFileDiscovery {
    data_dir: PathBuf,
    pattern: String,
}

impl DataFileDiscovery {
    pub fn new(data_dir: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            pattern: pattern.into(),
        }
    }

    pub fn from_config(config: &SadfConfig) -> Self {
        Self::new(config.data_dir.clone(), config.file_pattern.clone())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// List matching regular files sorted by modification time ascending
    ///
    /// Files with equal timestamps keep a stable order by path.
    pub fn discover(&self) -> Result<Vec<DataFile>> {
        if !self.data_dir.is_dir() {
            return Err(Error::file_discovery(format!(
                "Data directory does not exist: {}",
                self.data_dir.display()
            )));
        }

        let escaped_dir = glob::Pattern::escape(&self.data_dir.to_string_lossy());
        let full_pattern = format!("{}/{}", escaped_dir.trim_end_matches('/'), self.pattern);
        debug!("Searching for data files with pattern {}", full_pattern);

        let mut files = Vec::new();
        for entry in glob::glob(&full_pattern)? {
            let path = entry?;
            if !path.is_file() {
                continue;
            }

            let metadata = std::fs::metadata(&path)
                .map_err(|e| Error::io(format!("Failed to stat {}", path.display()), e))?;
            let modified = metadata
                .modified()
                .map_err(|e| Error::io(format!("No modification time for {}", path.display()), e))?;

            files.push(DataFile {
                path,
                modified: DateTime::<Local>::from(modified),
                size: metadata.len(),
            });
        }

        files.sort_by(|a, b| {
            a.modified
                .cmp(&b.modified)
                .then_with(|| a.path.cmp(&b.path))
        });

        if files.is_empty() {
            warn!(
                "No data files matching '{}' in {}",
                self.pattern,
                self.data_dir.display()
            );
        } else {
            debug!("Discovered {} data files", files.len());
            for file in &files {
                debug!("  Found: {} ({})", file.path.display(), file.modified);
            }
        }

        Ok(files)
    }
}
