//! Terminal error types.

use thiserror::Error;

/// Errors that can occur while switching terminal modes.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// Reading or applying the termios attributes failed.
    #[error("端末設定の取得・変更に失敗しました: {0}")]
    Attributes(#[from] nix::errno::Errno),

    /// Duplicating the descriptor or writing control sequences failed.
    #[error("端末への入出力に失敗しました: {0}")]
    Io(#[from] std::io::Error),
}

impl TerminalError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Attributes(_) => "`stty sane` で端末の設定を元に戻してください",
            Self::Io(_) => "端末から直接実行してください",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TerminalError::Attributes(nix::errno::Errno::ENOTTY);
        assert!(err.to_string().contains("端末設定"));

        let err = TerminalError::Io(std::io::Error::other("broken pipe"));
        assert!(err.to_string().contains("broken pipe"));
    }

    #[test]
    fn test_suggestion() {
        let err = TerminalError::Attributes(nix::errno::Errno::ENOTTY);
        assert!(err.suggestion().contains("stty sane"));
    }

    #[test]
    fn test_from_conversions() {
        let err: TerminalError = nix::errno::Errno::EBADF.into();
        assert!(matches!(err, TerminalError::Attributes(_)));

        let err: TerminalError = std::io::Error::other("x").into();
        assert!(matches!(err, TerminalError::Io(_)));
    }
}
