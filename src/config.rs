//! Runtime configuration
//!
//! Resolved from command-line flags and environment variables by the binary;
//! library callers build it directly.

use std::path::PathBuf;

use crate::dupes::{DuplicateDetector, DEFAULT_WINDOW_SECS};

pub const DEFAULT_DB_FILE: &str = "logbook.db";
pub const DB_PATH_ENV: &str = "HAMLOG_DB";
pub const DUPE_WINDOW_ENV: &str = "HAMLOG_DUPE_WINDOW";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogbookConfig {
    /// SQLite database file
    pub db_path: PathBuf,
    /// Duplicate tolerance in seconds
    pub dupe_window_secs: u64,
}

impl Default for LogbookConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE),
            dupe_window_secs: DEFAULT_WINDOW_SECS,
        }
    }
}

impl LogbookConfig {
    pub fn duplicate_detector(&self) -> DuplicateDetector {
        DuplicateDetector::new(self.dupe_window_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LogbookConfig::default();
        assert_eq!(config.db_path, PathBuf::from("logbook.db"));
        assert_eq!(config.duplicate_detector().window_secs(), 300);
    }
}
