//! Append-only stage log

use chrono::{DateTime, Local};
use eyre::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Timestamp layout of the GDP job's log (no separator before the seconds)
pub const GDP_TIMESTAMP_FORMAT: &str = "%Y-%b-%d-%H:%M%S";

/// Timestamp layout of the consolidation job's log
pub const CONSOLIDATION_TIMESTAMP_FORMAT: &str = "%Y-%b-%d-%H:%M:%S";

/// Appends `timestamp,message` lines to a log file
///
/// The file is created on first use and never truncated or read back.
#[derive(Debug, Clone)]
pub struct ProgressLog {
    path: PathBuf,
    timestamp_format: String,
}

impl ProgressLog {
    pub fn new(path: impl AsRef<Path>, timestamp_format: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            timestamp_format: timestamp_format.into(),
        }
    }

    /// Log with the GDP job's timestamp layout
    pub fn gdp(path: impl AsRef<Path>) -> Self {
        Self::new(path, GDP_TIMESTAMP_FORMAT)
    }

    /// Log with the consolidation job's timestamp layout
    pub fn consolidation(path: impl AsRef<Path>) -> Self {
        Self::new(path, CONSOLIDATION_TIMESTAMP_FORMAT)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a marker stamped with the current local time
    pub fn log_progress(&self, message: &str) -> Result<()> {
        log::info!("{}", message);
        let line = self.format_line(&Local::now(), message);

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open log file: {}", self.path.display()))?;
        writeln!(file, "{}", line)
            .with_context(|| format!("Failed to append to log file: {}", self.path.display()))?;

        Ok(())
    }

    /// Build one log line (without the trailing newline)
    pub fn format_line(&self, at: &DateTime<Local>, message: &str) -> String {
        format!("{},{}", at.format(&self.timestamp_format), message)
    }
}
