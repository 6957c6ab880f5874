//! Lifecycle of the external audio player process.
//!
//! An [`AudioProcessHandle`] owns at most one child process. The child is
//! killed and reaped by [`AudioProcessHandle::terminate`]; if the handle is
//! dropped without being terminated, `kill_on_drop` still delivers SIGKILL.

use std::process::Stdio;

use tokio::process::{Child, Command};
use tracing::{debug, warn};

use super::error::AudioError;
use super::player::PlayerCommand;
use super::source::{AudioTrack, PlaybackMode};

/// Handle to a (possibly absent) audio player child process.
#[derive(Debug, Default)]
pub struct AudioProcessHandle {
    child: Option<Child>,
    pid: Option<u32>,
    track: Option<AudioTrack>,
}

impl AudioProcessHandle {
    /// Creates a handle with no process behind it.
    #[must_use]
    pub fn inert() -> Self {
        Self::default()
    }

    /// Spawns the player for `track`.
    ///
    /// The player's stdio is detached so it can never consume keystrokes
    /// meant for the timer.
    ///
    /// # Errors
    ///
    /// - `AudioError::PlayerUnavailable` if `command` is `None`
    /// - `AudioError::TrackMissing` if the track was not found
    /// - `AudioError::SpawnFailed` if the process could not be launched
    pub fn spawn(
        command: Option<&PlayerCommand>,
        track: &AudioTrack,
        mode: PlaybackMode,
    ) -> Result<Self, AudioError> {
        let command = command.ok_or(AudioError::PlayerUnavailable)?;
        if !track.exists() {
            return Err(AudioError::TrackMissing(track.path().display().to_string()));
        }

        let child = Command::new(command.executable())
            .args(command.argv(track.path(), mode))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| AudioError::SpawnFailed(command.name().to_string(), e.to_string()))?;

        let pid = child.id();
        debug!(
            "Audio player started: {} (pid {:?}) for {}",
            command.name(),
            pid,
            track.path().display()
        );

        Ok(Self {
            child: Some(child),
            pid,
            track: Some(track.clone()),
        })
    }

    /// Starts playback on a best-effort basis.
    ///
    /// Any failure is logged and an inert handle is returned instead, so the
    /// calling phase always proceeds.
    #[must_use]
    pub fn start(command: Option<&PlayerCommand>, track: &AudioTrack, mode: PlaybackMode) -> Self {
        match Self::spawn(command, track, mode) {
            Ok(handle) => handle,
            Err(e) if e.is_not_configured() => {
                debug!("Playback skipped: {}", e);
                Self::inert()
            }
            Err(e) => {
                warn!("{} ({})", e, e.suggestion());
                Self::inert()
            }
        }
    }

    /// Returns true while a child process is owned by this handle.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.child.is_some()
    }

    /// Returns the process id of the most recently spawned child, if any.
    ///
    /// The id is kept after termination for diagnostics.
    #[must_use]
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Returns the track this handle was started for.
    #[must_use]
    pub fn track(&self) -> Option<&AudioTrack> {
        self.track.as_ref()
    }

    /// Reaps the child if it already exited on its own.
    ///
    /// Returns whether the child is still running afterwards.
    pub fn refresh(&mut self) -> bool {
        if let Some(child) = self.child.as_mut() {
            match child.try_wait() {
                Ok(Some(status)) => {
                    debug!("Audio player exited on its own: {}", status);
                    self.child = None;
                }
                Ok(None) => {}
                Err(e) => warn!("Failed to poll audio player: {}", e),
            }
        }
        self.is_running()
    }

    /// Kills the child with SIGKILL and waits until it has been reaped.
    ///
    /// Safe to call any number of times; only the first call on a running
    /// handle does anything.
    pub async fn terminate(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };

        if let Ok(Some(status)) = child.try_wait() {
            debug!("Audio player already exited: {}", status);
            return;
        }

        match child.kill().await {
            Ok(()) => debug!("Audio player terminated (pid {:?})", self.pid),
            Err(e) => warn!("{}", AudioError::TerminateFailed(e.to_string())),
        }
    }
}
