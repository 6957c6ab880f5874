//! Sound playback for the interval timer.
//!
//! Audio is produced by an external command-line player (mpv, paplay,
//! pw-play or aplay) running as a child process. This module provides:
//!
//! - Player discovery and argument templates
//! - Track resolution
//! - Ownership of the single live player process
//! - Graceful degradation when no player or track is available
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │  AudioProcessHandle  │ ← owned by the running phase
//! └──────────┬───────────┘
//!            │ spawn / kill + reap
//!            ▼
//! ┌──────────────────────┐     ┌──────────────────┐
//! │    PlayerCommand     │────▶│ /usr/bin/mpv ... │
//! │  (argv per spawn)    │     └──────────────────┘
//! └──────────┬───────────┘
//!            │ {track}
//!            ▼
//! ┌──────────────────────┐
//! │      AudioTrack      │
//! └──────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use pomoterm::sound::{find_audio_player, AudioProcessHandle, AudioTrack, PlaybackMode};
//!
//! # async fn example() {
//! let player = find_audio_player();
//! let track = AudioTrack::resolve("./pomoterm.mp3");
//!
//! let mut handle = AudioProcessHandle::start(player.as_ref(), &track, PlaybackMode::Once);
//! // ... phase runs ...
//! handle.terminate().await;
//! # }
//! ```

mod error;
mod player;
mod process;
mod source;

pub use error::AudioError;
pub use player::{find_audio_player, find_audio_player_with, PlayerCommand, TRACK_PLACEHOLDER};
pub use process::AudioProcessHandle;
pub use source::{AudioTrack, PlaybackMode};
