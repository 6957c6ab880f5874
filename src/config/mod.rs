//! Persistent settings for the interval timer.
//!
//! Settings are read from `~/.config/pomoterm/config.json` when it exists.
//! Every field is optional in the file; command-line flags override them.
//!
//! ```json
//! {
//!   "session_minutes": 25,
//!   "break_minutes": 5,
//!   "sessions": 4,
//!   "alarm_track": "/home/me/sounds/bell.mp3",
//!   "ambient_track": "/home/me/sounds/rain.mp3",
//!   "log_file": "/home/me/.local/share/pomolog.csv",
//!   "player": "/usr/bin/mpv"
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Default session length in minutes.
fn default_session_minutes() -> u64 {
    50
}

/// Default break length in minutes.
fn default_break_minutes() -> u64 {
    5
}

/// Default number of sessions per run.
fn default_sessions() -> u32 {
    3
}

/// Default alarm track, relative to the working directory.
fn default_alarm_track() -> PathBuf {
    PathBuf::from("./pomoterm.mp3")
}

/// Default usage log, relative to the working directory.
fn default_log_file() -> PathBuf {
    PathBuf::from("./pomolog.csv")
}

/// Errors that can occur while loading the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The file exists but could not be read.
    #[error("設定ファイルを読み込めません ({}): {source}", path.display())]
    Io {
        /// Path of the settings file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid settings JSON.
    #[error("設定ファイルの形式が不正です ({}): {source}", path.display())]
    Parse {
        /// Path of the settings file
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

/// Settings that provide defaults for a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    /// Session length in minutes.
    #[serde(default = "default_session_minutes")]
    pub session_minutes: u64,

    /// Break length in minutes.
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u64,

    /// Number of sessions per run.
    #[serde(default = "default_sessions")]
    pub sessions: u32,

    /// Track played once at every phase change.
    #[serde(default = "default_alarm_track")]
    pub alarm_track: PathBuf,

    /// Track looped during sessions.
    #[serde(default)]
    pub ambient_track: Option<PathBuf>,

    /// Usage log file.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Player executable; discovered automatically when absent.
    #[serde(default)]
    pub player: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            session_minutes: default_session_minutes(),
            break_minutes: default_break_minutes(),
            sessions: default_sessions(),
            alarm_track: default_alarm_track(),
            ambient_track: None,
            log_file: default_log_file(),
            player: None,
        }
    }
}

impl Settings {
    /// Returns the default settings file location, if a config directory exists.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pomoterm").join("config.json"))
    }

    /// Loads settings from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Settings loaded from {}", path.display());
        Ok(settings)
    }

    /// Loads settings from `path`, or from the default location when `None`.
    ///
    /// A missing file at the default location yields the defaults; an
    /// explicitly given path must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, SettingsError> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                debug!("No settings file, using defaults");
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let settings = Settings::default();
        assert_eq!(settings.session_minutes, 50);
        assert_eq!(settings.break_minutes, 5);
        assert_eq!(settings.sessions, 3);
        assert_eq!(settings.alarm_track, PathBuf::from("./pomoterm.mp3"));
        assert_eq!(settings.log_file, PathBuf::from("./pomolog.csv"));
        assert!(settings.ambient_track.is_none());
        assert!(settings.player.is_none());
    }

    #[test]
    fn test_deserialize_empty_object_uses_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_deserialize_partial() {
        let json = r#"{"session_minutes": 25, "ambient_track": "/tmp/rain.mp3"}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.session_minutes, 25);
        assert_eq!(settings.break_minutes, 5);
        assert_eq!(settings.ambient_track, Some(PathBuf::from("/tmp/rain.mp3")));
    }

    #[test]
    fn test_serialize_round_trip() {
        let settings = Settings {
            player: Some(PathBuf::from("/usr/bin/mpv")),
            ..Settings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let restored: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, restored);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"sessions": 4}"#).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.sessions, 4);
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = Settings::load(&path);
        assert!(matches!(result, Err(SettingsError::Parse { .. })));
    }

    #[test]
    fn test_load_or_default_explicit_missing_path() {
        let result = Settings::load_or_default(Some(Path::new("/nonexistent/config.json")));
        match result {
            Err(SettingsError::Io { path, .. }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/config.json"));
            }
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_path_location() {
        if let Some(path) = Settings::default_path() {
            assert!(path.ends_with("pomoterm/config.json"));
        }
    }
}
