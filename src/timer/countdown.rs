//! Countdown of a single phase.
//!
//! The controller drives `Starting -> Running -> {Completed, Skipped, Quitting}`
//! one tick at a time. Each tick redraws the remaining time and waits up to
//! one second for a control key. Whatever the outcome, the phase's audio
//! process is killed and reaped before `run` returns.
//!
//! Phase boundaries are announced with an alarm started by
//! [`CountdownController::play_alarm`]. The alarm outlives the boundary and
//! plays into the next phase; that phase's own track is held back until the
//! alarm has exited and been reaped, so two players never overlap.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info};

use crate::cli::Display;
use crate::sound::{AudioProcessHandle, AudioTrack, PlaybackMode, PlayerCommand};
use crate::terminal::{Key, KeySource, TICK};
use crate::types::{PhaseKind, PhaseResult};

// ============================================================================
// CountdownState
// ============================================================================

/// State of the countdown state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountdownState {
    /// No phase has been run yet
    #[default]
    Idle,
    /// Audio is being started for a new phase
    Starting,
    /// Counting down
    Running,
    /// The full duration elapsed
    Completed,
    /// The user skipped the phase
    Skipped,
    /// The user quit; the run must end
    Quitting,
}

impl CountdownState {
    /// Returns true if the phase has ended.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CountdownState::Completed | CountdownState::Skipped | CountdownState::Quitting
        )
    }
}

impl From<PhaseResult> for CountdownState {
    fn from(result: PhaseResult) -> Self {
        match result {
            PhaseResult::Completed => CountdownState::Completed,
            PhaseResult::SkippedByUser => CountdownState::Skipped,
            PhaseResult::QuitByUser => CountdownState::Quitting,
        }
    }
}

// ============================================================================
// PhasePlan
// ============================================================================

/// Everything needed to run one phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhasePlan {
    /// Session or break
    pub kind: PhaseKind,
    /// How long the phase lasts
    pub duration: Duration,
    /// Track to start when the phase begins (after any alarm still playing)
    pub track: Option<AudioTrack>,
    /// How the track is played
    pub mode: PlaybackMode,
}

impl PhasePlan {
    /// A work session accompanied by a looping ambient track.
    #[must_use]
    pub fn session(duration: Duration, ambient: Option<AudioTrack>) -> Self {
        Self {
            kind: PhaseKind::Session,
            duration,
            track: ambient,
            mode: PlaybackMode::Loop,
        }
    }

    /// A break. It has no track of its own; the alarm that opened it may
    /// still be playing.
    #[must_use]
    pub fn break_phase(duration: Duration) -> Self {
        Self {
            kind: PhaseKind::Break,
            duration,
            track: None,
            mode: PlaybackMode::Once,
        }
    }
}

// ============================================================================
// CountdownController
// ============================================================================

/// Runs phases one after another, owning the audio process of the current one.
#[derive(Debug)]
pub struct CountdownController<K> {
    keys: K,
    player: Option<PlayerCommand>,
    audio: AudioProcessHandle,
    state: CountdownState,
}

impl<K: KeySource> CountdownController<K> {
    /// Creates a controller reading keys from `keys` and playing audio with `player`.
    pub fn new(keys: K, player: Option<PlayerCommand>) -> Self {
        Self {
            keys,
            player,
            audio: AudioProcessHandle::inert(),
            state: CountdownState::Idle,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> CountdownState {
        self.state
    }

    /// Returns the audio handle of the current (or last) phase.
    pub fn audio(&self) -> &AudioProcessHandle {
        &self.audio
    }

    /// Returns the key source.
    pub fn keys(&self) -> &K {
        &self.keys
    }

    /// Returns the configured player, if any.
    pub fn player(&self) -> Option<&PlayerCommand> {
        self.player.as_ref()
    }

    /// Kills and reaps the current phase's audio, if any.
    ///
    /// Used when the run is cut short from outside `run`.
    pub async fn release_audio(&mut self) {
        self.audio.terminate().await;
    }

    /// Plays `alarm` once to mark a phase boundary.
    ///
    /// Any audio still owned by the controller is reaped first.
    pub async fn play_alarm(&mut self, alarm: &AudioTrack) {
        self.audio.terminate().await;
        debug!("Alarm: {}", alarm.path().display());
        self.audio = AudioProcessHandle::start(self.player.as_ref(), alarm, PlaybackMode::Once);
    }

    /// Lets a playing alarm run to its end.
    ///
    /// Any control key stops it early. Returns immediately when nothing is
    /// playing.
    pub async fn finish_alarm(&mut self) {
        if !self.audio.refresh() {
            return;
        }

        Display::show_alarm_hint();
        while self.audio.refresh() {
            if self.keys.poll_key(TICK).await.is_some() {
                debug!("Alarm stopped by key");
                break;
            }
        }
        Display::clear_countdown();
        self.audio.terminate().await;
    }

    /// Runs one phase to its end and reports how it ended.
    pub async fn run(&mut self, plan: &PhasePlan) -> PhaseResult {
        self.state = CountdownState::Starting;
        info!(
            "Phase started: {} ({}s)",
            plan.kind.as_str(),
            plan.duration.as_secs()
        );

        // Only one player may be alive: a boundary alarm still playing keeps
        // the phase's own track waiting until it has been reaped.
        let mut pending = plan.track.as_ref();
        if !self.audio.refresh() {
            self.start_pending(&mut pending, plan.mode);
        } else if pending.is_some() {
            debug!("Alarm still playing, phase track deferred");
        }

        self.state = CountdownState::Running;
        let started = Instant::now();
        let result = loop {
            let Some(remaining) = plan
                .duration
                .checked_sub(started.elapsed())
                .filter(|r| !r.is_zero())
            else {
                break PhaseResult::Completed;
            };
            Display::show_countdown(remaining);

            match self.keys.poll_key(TICK.min(remaining)).await {
                None => {
                    if !self.audio.refresh() {
                        self.start_pending(&mut pending, plan.mode);
                    }
                }
                Some(Key::Skip) => break PhaseResult::SkippedByUser,
                Some(Key::Quit) => break PhaseResult::QuitByUser,
            }
        };
        Display::clear_countdown();

        self.state = result.into();
        self.audio.terminate().await;
        debug!("Phase audio released");

        info!("Phase ended: {} ({})", plan.kind.as_str(), result.as_str());
        Display::show_phase_end(plan.kind, result);
        result
    }

    fn start_pending(&mut self, pending: &mut Option<&AudioTrack>, mode: PlaybackMode) {
        if let Some(track) = pending.take() {
            self.audio = AudioProcessHandle::start(self.player.as_ref(), track, mode);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
