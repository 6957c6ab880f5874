//! Usage history error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing the usage log.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The log file could not be opened, read or written.
    #[error("利用履歴ファイルにアクセスできません ({}): {source}", path.display())]
    Io {
        /// Path of the log file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A log line is not of the form `date,sessions,minutes`.
    #[error("利用履歴の形式が不正です: {0}")]
    Parse(String),
}

impl HistoryError {
    /// Creates an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
