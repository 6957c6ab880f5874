//! Sound system error types.
//!
//! This module defines the error types for audio playback through an
//! external player process. Every variant is recoverable: a phase keeps
//! counting down even when no sound can be produced.

use thiserror::Error;

/// Errors that can occur while driving the audio player process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// No audio player executable was found or configured.
    #[error("利用可能なオーディオプレイヤーが見つかりません")]
    PlayerUnavailable,

    /// The track to play does not exist on disk.
    #[error("サウンドファイルが見つかりません: {0}")]
    TrackMissing(String),

    /// The player process could not be launched.
    #[error("オーディオプレイヤー '{0}' の起動に失敗しました: {1}")]
    SpawnFailed(String, String),

    /// The player process could not be killed or reaped.
    #[error("オーディオプレイヤーの停止に失敗しました: {0}")]
    TerminateFailed(String),
}

impl AudioError {
    /// Returns true if playback was simply not attempted.
    ///
    /// Missing players and missing tracks mean "no sound configured", which
    /// is logged at debug level rather than reported as a warning.
    #[must_use]
    pub fn is_not_configured(&self) -> bool {
        matches!(self, Self::PlayerUnavailable | Self::TrackMissing(_))
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::PlayerUnavailable => {
                "mpv, paplay, pw-play, aplay のいずれかをインストールするか --player を指定してください"
            }
            Self::TrackMissing(_) => "--alarm / --ambient のパスを確認してください",
            Self::SpawnFailed(_, _) => "プレイヤーの実行権限とパスを確認してください",
            Self::TerminateFailed(_) => "残っているプレイヤープロセスを手動で終了してください",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AudioError::PlayerUnavailable;
        assert!(err.to_string().contains("オーディオプレイヤー"));

        let err = AudioError::TrackMissing("/path/to/alarm.mp3".to_string());
        assert!(err.to_string().contains("/path/to/alarm.mp3"));

        let err = AudioError::SpawnFailed("mpv".to_string(), "permission denied".to_string());
        assert!(err.to_string().contains("mpv"));
        assert!(err.to_string().contains("permission denied"));

        let err = AudioError::TerminateFailed("no such process".to_string());
        assert!(err.to_string().contains("no such process"));
    }

    #[test]
    fn test_is_not_configured() {
        assert!(AudioError::PlayerUnavailable.is_not_configured());
        assert!(AudioError::TrackMissing("x".into()).is_not_configured());
        assert!(!AudioError::SpawnFailed("x".into(), "y".into()).is_not_configured());
        assert!(!AudioError::TerminateFailed("x".into()).is_not_configured());
    }

    #[test]
    fn test_every_error_has_suggestion() {
        let errors = vec![
            AudioError::PlayerUnavailable,
            AudioError::TrackMissing("x".into()),
            AudioError::SpawnFailed("x".into(), "y".into()),
            AudioError::TerminateFailed("x".into()),
        ];

        for error in errors {
            assert!(!error.suggestion().is_empty());
        }
    }

    #[test]
    fn test_suggestion() {
        assert!(AudioError::PlayerUnavailable.suggestion().contains("--player"));
        assert!(AudioError::TrackMissing("x".into()).suggestion().contains("--alarm"));
    }
}
