//! Core data types for the interval timer.
//!
//! This module defines the data structures used for:
//! - Run configuration with validation
//! - Phase identification
//! - Per-phase and per-run outcomes

use std::time::Duration;

// ============================================================================
// TimerConfig
// ============================================================================

/// Immutable configuration for one timer run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    /// Session (work) duration in seconds
    pub session_seconds: u64,
    /// Break duration in seconds
    pub break_seconds: u64,
    /// Number of sessions to run (breaks are placed between them)
    pub total_sessions: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            session_seconds: 50 * 60,
            break_seconds: 5 * 60,
            total_sessions: 3,
        }
    }
}

impl TimerConfig {
    /// Creates a configuration from minute-based durations.
    #[must_use]
    pub fn from_minutes(session_minutes: u64, break_minutes: u64, total_sessions: u32) -> Self {
        Self {
            session_seconds: session_minutes * 60,
            break_seconds: break_minutes * 60,
            total_sessions,
        }
    }

    /// Creates a new configuration with the specified session duration.
    #[must_use]
    pub fn with_session_seconds(mut self, seconds: u64) -> Self {
        self.session_seconds = seconds;
        self
    }

    /// Creates a new configuration with the specified break duration.
    #[must_use]
    pub fn with_break_seconds(mut self, seconds: u64) -> Self {
        self.break_seconds = seconds;
        self
    }

    /// Creates a new configuration with the specified session count.
    #[must_use]
    pub fn with_total_sessions(mut self, sessions: u32) -> Self {
        self.total_sessions = sessions;
        self
    }

    /// Session duration as a `Duration`.
    #[must_use]
    pub fn session_duration(&self) -> Duration {
        Duration::from_secs(self.session_seconds)
    }

    /// Break duration as a `Duration`.
    #[must_use]
    pub fn break_duration(&self) -> Duration {
        Duration::from_secs(self.break_seconds)
    }

    /// Session length in whole minutes, as recorded in the usage log.
    ///
    /// Truncates, so sub-minute sessions are recorded as 0.
    #[must_use]
    pub fn session_minutes(&self) -> u64 {
        self.session_seconds / 60
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.session_seconds == 0 {
            return Err("セッション時間は1以上で指定してください".to_string());
        }
        if self.break_seconds == 0 {
            return Err("休憩時間は1以上で指定してください".to_string());
        }
        if self.total_sessions == 0 {
            return Err("セッション数は1以上で指定してください".to_string());
        }
        Ok(())
    }
}

// ============================================================================
// PhaseKind
// ============================================================================

/// The kind of a timed phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    /// A work session
    Session,
    /// A break between sessions
    Break,
}

impl PhaseKind {
    /// Returns the string representation of the phase kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseKind::Session => "session",
            PhaseKind::Break => "break",
        }
    }

    /// Returns the label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            PhaseKind::Session => "セッション",
            PhaseKind::Break => "休憩",
        }
    }
}

// ============================================================================
// PhaseResult / RunOutcome
// ============================================================================

/// How a single phase ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseResult {
    /// The full duration elapsed
    Completed,
    /// The user pressed the skip key
    SkippedByUser,
    /// The user pressed the quit key; the whole run must end
    QuitByUser,
}

impl PhaseResult {
    /// Returns the string representation of the result.
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseResult::Completed => "completed",
            PhaseResult::SkippedByUser => "skipped",
            PhaseResult::QuitByUser => "quit",
        }
    }

    /// Returns true if the run must stop after this phase.
    pub fn is_quit(&self) -> bool {
        matches!(self, PhaseResult::QuitByUser)
    }
}

/// How a whole run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every phase ran (completed or skipped) and the usage log was written
    Finished {
        /// Number of sessions that were run
        sessions: u32,
    },
    /// The user quit; the usage log was not written
    Quit,
}

// ============================================================================
// Tests
// ============================================================================
