//! Terminal Interval Timer Library
//!
//! This library provides the core functionality for the `pomoterm` CLI.
//! It includes:
//! - Countdown and session sequencing with skip/quit keys
//! - External audio player processes for alarm and ambient tracks
//! - Terminal line-discipline capture and restore
//! - Shutdown signal handling
//! - Usage log and report
//! - CLI command parsing, settings and display utilities

pub mod cli;
pub mod config;
pub mod history;
pub mod sound;
pub mod terminal;
pub mod timer;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{PhaseKind, PhaseResult, RunOutcome, TimerConfig};

// Re-export timer types
pub use timer::{
    CountdownController, CountdownState, PhasePlan, PhaseRecord, SessionOrchestrator, Soundtrack,
};

// Re-export sound types
pub use sound::{
    find_audio_player, AudioError, AudioProcessHandle, AudioTrack, PlaybackMode, PlayerCommand,
};

// Re-export terminal types
pub use terminal::{
    Key, KeySource, ScriptedKeys, ShutdownSignal, ShutdownSignals, StdinKeys, TerminalError,
    TerminalModeGuard,
};

// Re-export history types
pub use history::{CsvUsageLog, HistoryError, MockUsageLog, UsageLog, UsageReport};

// Re-export settings
pub use config::{Settings, SettingsError};
