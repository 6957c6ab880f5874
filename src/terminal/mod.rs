//! Terminal mode management.
//!
//! This module owns every process-wide terminal concern:
//! - `TerminalModeGuard`: non-canonical, no-echo input mode and cursor hiding,
//!   captured once and restored once
//! - `input`: one-keystroke polling with a per-tick timeout
//! - `signal`: asynchronous shutdown requests (SIGINT, SIGTERM, SIGHUP)

pub mod error;
pub mod input;
pub mod signal;

use std::io::{self, IsTerminal, Write};
use std::os::fd::{AsFd, OwnedFd};
use std::sync::atomic::{AtomicBool, Ordering};

use nix::sys::termios::{self, LocalFlags, SetArg, SpecialCharacterIndices, Termios};
use tracing::{debug, warn};

pub use error::TerminalError;
pub use input::{Key, KeyReader, KeySource, ScriptedKeys, StdinKeys, TICK};
pub use signal::{ShutdownSignal, ShutdownSignals};

const HIDE_CURSOR: &[u8] = b"\x1b[?25l";
const SHOW_CURSOR: &[u8] = b"\x1b[?25h";

#[derive(Debug)]
struct Snapshot {
    fd: OwnedFd,
    original: Termios,
    manages_cursor: bool,
}

/// Scoped owner of the terminal's line discipline.
///
/// Acquiring the guard captures the current settings and switches input to
/// non-canonical, no-echo mode (signals stay enabled so Ctrl-C still raises
/// SIGINT). [`restore`](Self::restore) puts the captured settings back; it
/// is idempotent and is also run on drop.
///
/// When stdin is not a terminal the guard is inert and every call is a no-op.
#[derive(Debug)]
pub struct TerminalModeGuard {
    snapshot: Option<Snapshot>,
    restored: AtomicBool,
}

impl TerminalModeGuard {
    /// Captures stdin's settings, enters input mode and hides the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if stdin is a terminal but its attributes cannot be
    /// read or changed.
    pub fn acquire() -> Result<Self, TerminalError> {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            debug!("stdin is not a terminal, leaving terminal mode untouched");
            return Ok(Self::inert());
        }

        let fd = stdin.as_fd().try_clone_to_owned()?;
        Self::enter(fd, true)
    }

    /// Captures the settings of an arbitrary terminal descriptor.
    ///
    /// The cursor is left alone; only the line discipline is managed.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor is not a terminal.
    pub fn from_fd(fd: OwnedFd) -> Result<Self, TerminalError> {
        Self::enter(fd, false)
    }

    /// Creates a guard that manages nothing.
    #[must_use]
    pub fn inert() -> Self {
        Self {
            snapshot: None,
            restored: AtomicBool::new(false),
        }
    }

    fn enter(fd: OwnedFd, manages_cursor: bool) -> Result<Self, TerminalError> {
        let original = termios::tcgetattr(&fd)?;

        let mut raw = original.clone();
        raw.local_flags.remove(LocalFlags::ICANON | LocalFlags::ECHO);
        raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 1;
        raw.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;
        termios::tcsetattr(&fd, SetArg::TCSAFLUSH, &raw)?;

        if manages_cursor {
            if let Err(e) = write_control(HIDE_CURSOR) {
                warn!("Failed to hide cursor: {}", e);
            }
        }

        debug!("Terminal switched to non-canonical, no-echo mode");
        Ok(Self {
            snapshot: Some(Snapshot {
                fd,
                original,
                manages_cursor,
            }),
            restored: AtomicBool::new(false),
        })
    }

    /// Returns true if the terminal is currently in the timer's input mode.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.snapshot.is_some() && !self.restored.load(Ordering::SeqCst)
    }

    /// Returns the settings captured at acquisition, if any.
    #[must_use]
    pub fn original(&self) -> Option<&Termios> {
        self.snapshot.as_ref().map(|s| &s.original)
    }

    /// Restores the captured settings and shows the cursor again.
    ///
    /// Only the first call has an effect.
    ///
    /// # Errors
    ///
    /// Returns an error if the original attributes could not be applied.
    pub fn restore(&self) -> Result<(), TerminalError> {
        let Some(snapshot) = &self.snapshot else {
            return Ok(());
        };
        if self.restored.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        if snapshot.manages_cursor {
            if let Err(e) = write_control(SHOW_CURSOR) {
                warn!("Failed to show cursor: {}", e);
            }
        }
        termios::tcsetattr(&snapshot.fd, SetArg::TCSAFLUSH, &snapshot.original)?;

        debug!("Terminal settings restored");
        Ok(())
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!("{} ({})", e, e.suggestion());
        }
    }
}

fn write_control(sequence: &[u8]) -> io::Result<()> {
    let mut stdout = io::stdout();
    stdout.write_all(sequence)?;
    stdout.flush()
}
