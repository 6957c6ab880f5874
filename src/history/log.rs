//! Append-only usage log.
//!
//! One line is appended per finished run: `YYYY-MM-DD,<sessions>,<minutes>`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::debug;

use super::error::HistoryError;

/// Destination for end-of-run usage records.
pub trait UsageLog {
    /// Records a finished run of `total_sessions` sessions of `session_minutes` each.
    ///
    /// # Errors
    ///
    /// Returns an error if the record could not be persisted.
    fn record(&self, total_sessions: u32, session_minutes: u64) -> Result<(), HistoryError>;
}

/// Usage log stored as CSV lines in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvUsageLog {
    path: PathBuf,
}

impl CsvUsageLog {
    /// Creates a log writing to `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Formats one log line (without the trailing newline).
    #[must_use]
    pub fn format_entry(date: NaiveDate, total_sessions: u32, session_minutes: u64) -> String {
        format!(
            "{},{},{}",
            date.format("%Y-%m-%d"),
            total_sessions,
            session_minutes
        )
    }
}

impl UsageLog for CsvUsageLog {
    fn record(&self, total_sessions: u32, session_minutes: u64) -> Result<(), HistoryError> {
        let line = Self::format_entry(Local::now().date_naive(), total_sessions, session_minutes);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| HistoryError::io(&self.path, e))?;
        writeln!(file, "{}", line).map_err(|e| HistoryError::io(&self.path, e))?;

        debug!("Usage recorded to {}: {}", self.path.display(), line);
        Ok(())
    }
}

/// Mock usage log for testing.
#[derive(Debug, Default)]
pub struct MockUsageLog {
    records: std::sync::Mutex<Vec<(u32, u64)>>,
    should_fail: std::sync::atomic::AtomicBool,
}

impl MockUsageLog {
    /// Creates an empty mock that accepts every record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes later `record` calls fail with an I/O error.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail
            .store(should_fail, std::sync::atomic::Ordering::SeqCst);
    }

    /// Number of records accepted so far.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// Accepted records as `(total_sessions, session_minutes)`, oldest first.
    #[must_use]
    pub fn get_records(&self) -> Vec<(u32, u64)> {
        self.records.lock().unwrap().clone()
    }
}

impl UsageLog for MockUsageLog {
    fn record(&self, total_sessions: u32, session_minutes: u64) -> Result<(), HistoryError> {
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(HistoryError::io(
                "mock",
                std::io::Error::other("simulated failure"),
            ));
        }
        self.records
            .lock()
            .unwrap()
            .push((total_sessions, session_minutes));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_entry() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(CsvUsageLog::format_entry(date, 3, 50), "2025-03-07,3,50");
        assert_eq!(CsvUsageLog::format_entry(date, 2, 0), "2025-03-07,2,0");
    }

    #[test]
    fn test_record_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pomolog.csv");
        let log = CsvUsageLog::new(&path);

        log.record(3, 50).unwrap();
        log.record(2, 25).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(",3,50"));
        assert!(lines[1].ends_with(",2,25"));

        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        assert!(lines[1].starts_with(&today));
    }

    #[test]
    fn test_record_unwritable_path() {
        let log = CsvUsageLog::new("/nonexistent/dir/pomolog.csv");
        let result = log.record(1, 25);
        assert!(matches!(result, Err(HistoryError::Io { .. })));
    }

    #[test]
    fn test_mock_usage_log() {
        let mock = MockUsageLog::new();
        mock.record(2, 0).unwrap();
        assert_eq!(mock.record_count(), 1);
        assert_eq!(mock.get_records(), vec![(2, 0)]);

        mock.set_should_fail(true);
        assert!(mock.record(1, 1).is_err());
        assert_eq!(mock.record_count(), 1);
    }
}
