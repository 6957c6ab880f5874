//! Sequencing of sessions and breaks for a whole run.

use tracing::{debug, info, warn};

use super::countdown::{CountdownController, PhasePlan};
use crate::cli::Display;
use crate::history::UsageLog;
use crate::sound::AudioTrack;
use crate::terminal::{KeySource, TerminalModeGuard};
use crate::types::{PhaseKind, PhaseResult, RunOutcome, TimerConfig};

/// Tracks used by a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Soundtrack {
    /// Played once at every phase boundary
    pub alarm: Option<AudioTrack>,
    /// Looped during sessions
    pub ambient: Option<AudioTrack>,
}

/// One executed phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseRecord {
    /// Session or break
    pub kind: PhaseKind,
    /// 1-based number of the session this phase belongs to
    pub index: u32,
    /// How the phase ended
    pub result: PhaseResult,
}

/// Runs `total_sessions` sessions with a break between each pair.
pub struct SessionOrchestrator<K, L> {
    config: TimerConfig,
    controller: CountdownController<K>,
    soundtrack: Soundtrack,
    usage_log: L,
    phases: Vec<PhaseRecord>,
}

impl<K: KeySource, L: UsageLog> SessionOrchestrator<K, L> {
    /// Creates an orchestrator for one run.
    pub fn new(
        config: TimerConfig,
        controller: CountdownController<K>,
        soundtrack: Soundtrack,
        usage_log: L,
    ) -> Self {
        Self {
            config,
            controller,
            soundtrack,
            usage_log,
            phases: Vec::new(),
        }
    }

    /// Returns the run configuration.
    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Returns the phases executed so far, in order.
    pub fn phases(&self) -> &[PhaseRecord] {
        &self.phases
    }

    /// Returns the countdown controller.
    pub fn controller(&self) -> &CountdownController<K> {
        &self.controller
    }

    /// Returns the usage log.
    pub fn usage_log(&self) -> &L {
        &self.usage_log
    }

    /// Runs every phase of the run.
    ///
    /// Every phase that ends without a quit is followed by the alarm; the
    /// final alarm is allowed to finish before the run returns.
    ///
    /// On normal completion the usage log is written once and the terminal is
    /// restored. On quit the method returns immediately with
    /// `RunOutcome::Quit`, leaving the log untouched; the caller owns the
    /// fast-exit cleanup.
    pub async fn run(&mut self, terminal: &TerminalModeGuard) -> RunOutcome {
        let total = self.config.total_sessions;

        for index in 1..=total {
            Display::show_session_start(index, total);
            let plan = PhasePlan::session(
                self.config.session_duration(),
                self.soundtrack.ambient.clone(),
            );
            if self.run_phase(index, &plan).await.is_quit() {
                debug!("Run quit during session {}, usage log not written", index);
                return RunOutcome::Quit;
            }
            self.sound_alarm().await;

            if index < total {
                Display::show_break_start();
                let plan = PhasePlan::break_phase(self.config.break_duration());
                if self.run_phase(index, &plan).await.is_quit() {
                    debug!("Run quit during break {}, usage log not written", index);
                    return RunOutcome::Quit;
                }
                self.sound_alarm().await;
            }
        }
        self.controller.finish_alarm().await;

        if let Err(e) = self.usage_log.record(total, self.config.session_minutes()) {
            warn!("{}", e);
        }
        if let Err(e) = terminal.restore() {
            warn!("{} ({})", e, e.suggestion());
        }

        info!("Run finished: {} sessions", total);
        RunOutcome::Finished { sessions: total }
    }

    /// Releases any audio still owned by an interrupted run.
    pub async fn abort(&mut self) {
        debug!("Run aborted, releasing audio");
        self.controller.release_audio().await;
    }

    async fn sound_alarm(&mut self) {
        if let Some(alarm) = &self.soundtrack.alarm {
            self.controller.play_alarm(alarm).await;
        }
    }

    async fn run_phase(&mut self, index: u32, plan: &PhasePlan) -> PhaseResult {
        let result = self.controller.run(plan).await;
        self.phases.push(PhaseRecord {
            kind: plan.kind,
            index,
            result,
        });
        result
    }
}
