//! Aggregate report over the usage log.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use super::error::HistoryError;

/// One parsed usage log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageEntry {
    /// Date column, kept verbatim
    pub date: String,
    /// Number of sessions in the run
    pub sessions: u32,
    /// Length of each session in minutes
    pub minutes: u64,
}

impl UsageEntry {
    /// Parses a `date,sessions,minutes` line.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::Parse` if the line has fewer than three fields
    /// or the numeric fields are not integers.
    pub fn parse(line: &str) -> Result<Self, HistoryError> {
        let mut fields = line.trim().splitn(3, ',');
        let (Some(date), Some(sessions), Some(minutes)) =
            (fields.next(), fields.next(), fields.next())
        else {
            return Err(HistoryError::Parse(line.to_string()));
        };

        let sessions = sessions
            .trim()
            .parse()
            .map_err(|_| HistoryError::Parse(line.to_string()))?;
        let minutes = minutes
            .trim()
            .parse()
            .map_err(|_| HistoryError::Parse(line.to_string()))?;

        Ok(Self {
            date: date.to_string(),
            sessions,
            minutes,
        })
    }

    /// Focused time of this run in seconds, saturating at `u64::MAX`.
    #[must_use]
    pub fn seconds(&self) -> u64 {
        u64::from(self.sessions)
            .saturating_mul(self.minutes)
            .saturating_mul(60)
    }
}

/// Totals accumulated over every well-formed log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageReport {
    entries: usize,
    total_sessions: u64,
    total_seconds: u64,
}

impl UsageReport {
    /// Loads the report from a log file.
    ///
    /// A missing file yields an empty report.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn load(path: &Path) -> Result<Self, HistoryError> {
        match File::open(path) {
            Ok(file) => Self::from_reader(BufReader::new(file))
                .map_err(|e| HistoryError::io(path, e)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No usage log at {}", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(HistoryError::io(path, e)),
        }
    }

    /// Builds the report from log lines.
    ///
    /// Malformed lines are skipped, including lines that are not valid UTF-8.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from `reader` fails.
    pub fn from_reader(mut reader: impl BufRead) -> std::io::Result<Self> {
        let mut report = Self::default();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            if line.trim().is_empty() {
                continue;
            }
            match UsageEntry::parse(&line) {
                Ok(entry) => report.add(&entry),
                Err(e) => debug!("Skipping usage log line: {}", e),
            }
        }
        Ok(report)
    }

    /// Adds one entry to the totals. Totals saturate instead of overflowing.
    pub fn add(&mut self, entry: &UsageEntry) {
        self.entries = self.entries.saturating_add(1);
        self.total_sessions = self.total_sessions.saturating_add(u64::from(entry.sessions));
        self.total_seconds = self.total_seconds.saturating_add(entry.seconds());
    }

    /// Number of runs counted.
    #[must_use]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Number of sessions over all runs.
    #[must_use]
    pub fn total_sessions(&self) -> u64 {
        self.total_sessions
    }

    /// Focused minutes over all runs.
    #[must_use]
    pub fn total_minutes(&self) -> u64 {
        self.total_seconds / 60
    }

    /// Focused hours over all runs, truncated.
    #[must_use]
    pub fn total_hours(&self) -> u64 {
        self.total_seconds / 3600
    }
}
