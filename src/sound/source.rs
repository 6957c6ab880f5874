//! Audio track resolution.
//!
//! Tracks are resolved once at startup. A track that does not exist is
//! kept around (so it can be reported) but is never handed to the player.

use std::path::{Path, PathBuf};

/// How a track should be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackMode {
    /// Play the track once (alarms).
    #[default]
    Once,
    /// Repeat the track until the player is terminated (ambient sound).
    ///
    /// Falls back to a single play when the player has no loop option.
    Loop,
}

/// An audio file on disk and whether it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioTrack {
    path: PathBuf,
    exists: bool,
}

impl AudioTrack {
    /// Resolves a track, recording whether the path is an existing file.
    #[must_use]
    pub fn resolve(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let exists = path.is_file();
        Self { path, exists }
    }

    /// Returns the path of the track.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the track was found when it was resolved.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.exists
    }
}
