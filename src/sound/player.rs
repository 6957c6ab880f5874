//! Audio player command resolution.
//!
//! This module knows how to invoke the common command-line players and
//! builds a fresh argument vector for every spawn, substituting the track
//! path into the `{track}` slot of the player's template.

use std::ffi::OsString;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::source::PlaybackMode;

/// Placeholder in an argument template that is replaced by the track path.
pub const TRACK_PLACEHOLDER: &str = "{track}";

/// A player known to this tool, with its invocation template.
struct KnownPlayer {
    name: &'static str,
    path: &'static str,
    args: &'static [&'static str],
    loop_args: &'static [&'static str],
}

/// Players probed by [`find_audio_player`], in order of preference.
const KNOWN_PLAYERS: &[KnownPlayer] = &[
    KnownPlayer {
        name: "mpv",
        path: "/usr/bin/mpv",
        args: &["--no-terminal", "--really-quiet", TRACK_PLACEHOLDER],
        loop_args: &["--loop=inf"],
    },
    KnownPlayer {
        name: "paplay",
        path: "/usr/bin/paplay",
        args: &[TRACK_PLACEHOLDER],
        loop_args: &[],
    },
    KnownPlayer {
        name: "pw-play",
        path: "/usr/bin/pw-play",
        args: &[TRACK_PLACEHOLDER],
        loop_args: &[],
    },
    KnownPlayer {
        name: "aplay",
        path: "/usr/bin/aplay",
        args: &["-q", TRACK_PLACEHOLDER],
        loop_args: &[],
    },
];

impl KnownPlayer {
    fn command(&self, executable: impl Into<PathBuf>) -> PlayerCommand {
        PlayerCommand {
            name: self.name.to_string(),
            executable: executable.into(),
            args: self.args.iter().map(|s| (*s).to_string()).collect(),
            loop_args: self.loop_args.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

/// An executable plus the argument template used to play one track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerCommand {
    name: String,
    executable: PathBuf,
    args: Vec<String>,
    loop_args: Vec<String>,
}

impl PlayerCommand {
    /// Creates a player command from an explicit template.
    ///
    /// If `args` contains no `{track}` slot the track path is appended.
    #[must_use]
    pub fn custom(
        executable: impl Into<PathBuf>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let executable = executable.into();
        let name = executable
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| executable.display().to_string());
        Self {
            name,
            executable,
            args: args.into_iter().map(Into::into).collect(),
            loop_args: Vec::new(),
        }
    }

    /// Returns the built-in command for a known player name, at its default path.
    #[must_use]
    pub fn known(name: &str) -> Option<Self> {
        KNOWN_PLAYERS
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.command(p.path))
    }

    /// Creates a command for a user-supplied executable.
    ///
    /// Executables named like a known player reuse that player's template;
    /// anything else is invoked as `<executable> <track>`.
    #[must_use]
    pub fn from_executable(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match KNOWN_PLAYERS.iter().find(|p| p.name == file_name) {
            Some(known) => known.command(path),
            None => Self::custom(path, [TRACK_PLACEHOLDER]),
        }
    }

    /// Adds options that make the player repeat the track.
    #[must_use]
    pub fn with_loop_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.loop_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the short name of the player (e.g. "mpv").
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the executable to spawn.
    #[must_use]
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Returns true if the player can repeat a track on its own.
    #[must_use]
    pub fn supports_loop(&self) -> bool {
        !self.loop_args.is_empty()
    }

    /// Builds the argument vector (without the executable) for one spawn.
    #[must_use]
    pub fn argv(&self, track: &Path, mode: PlaybackMode) -> Vec<OsString> {
        let mut argv = Vec::with_capacity(self.args.len() + self.loop_args.len() + 1);

        if mode == PlaybackMode::Loop {
            argv.extend(self.loop_args.iter().map(OsString::from));
        }

        let mut placed = false;
        for arg in &self.args {
            if arg == TRACK_PLACEHOLDER {
                argv.push(track.as_os_str().to_owned());
                placed = true;
            } else {
                argv.push(OsString::from(arg));
            }
        }
        if !placed {
            argv.push(track.as_os_str().to_owned());
        }

        argv
    }
}

/// Finds the first installed known player.
///
/// Returns `None` when none of the known players is installed; playback is
/// then skipped for the whole run.
#[must_use]
pub fn find_audio_player() -> Option<PlayerCommand> {
    find_audio_player_with(is_executable)
}

/// Finds the first known player accepted by `probe`.
pub fn find_audio_player_with(probe: impl Fn(&Path) -> bool) -> Option<PlayerCommand> {
    let found = KNOWN_PLAYERS
        .iter()
        .find(|p| probe(Path::new(p.path)))
        .map(|p| p.command(p.path));

    match &found {
        Some(player) => debug!("Audio player found: {}", player.executable().display()),
        None => debug!("No known audio player installed"),
    }
    found
}

fn is_executable(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
