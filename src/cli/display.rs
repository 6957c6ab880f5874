//! Display utilities for the interval timer.
//!
//! This module provides formatted output for:
//! - Phase banners and phase-end messages
//! - The single, overwritten countdown line
//! - Usage reports
//! - Error messages

use std::io::{self, Write};
use std::time::Duration;

use crate::history::UsageReport;
use crate::types::{PhaseKind, PhaseResult};

/// Clears the current line and returns the cursor to column 0.
const CLEAR_LINE: &str = "\r\x1b[2K";

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the banner for session `index` of `total`.
    pub fn show_session_start(index: u32, total: u32) {
        println!("* セッション {}/{} を開始します...", index, total);
    }

    /// Shows the banner for a break.
    pub fn show_break_start() {
        println!("~ 休憩を開始します...");
    }

    /// Redraws the countdown line in place.
    pub fn show_countdown(remaining: Duration) {
        let mut stdout = io::stdout();
        let _ = write!(stdout, "{}", Self::countdown_line(remaining));
        let _ = stdout.flush();
    }

    /// Erases the countdown line.
    pub fn clear_countdown() {
        let mut stdout = io::stdout();
        let _ = write!(stdout, "{}", CLEAR_LINE);
        let _ = stdout.flush();
    }

    /// Shows how a phase ended. Quits are announced by the farewell instead.
    pub fn show_phase_end(kind: PhaseKind, result: PhaseResult) {
        match result {
            PhaseResult::Completed => println!("{}が終了しました!", kind.label()),
            PhaseResult::SkippedByUser => println!(">> {}をスキップしました", kind.label()),
            PhaseResult::QuitByUser => {}
        }
    }

    /// Shows the prompt while the final alarm plays.
    pub fn show_alarm_hint() {
        let mut stdout = io::stdout();
        let _ = write!(stdout, "{}アラーム再生中... (s: 停止)", CLEAR_LINE);
        let _ = stdout.flush();
    }

    /// Shows the end-of-run message.
    pub fn show_run_finished(sessions: u32) {
        println!("* 全{}セッションが終了しました。お疲れさまでした!", sessions);
    }

    /// Shows the message printed on quit or interrupt.
    pub fn show_farewell() {
        println!("\n終了します。");
    }

    /// Shows the accumulated usage report.
    pub fn show_report(report: &UsageReport) {
        println!("集中した合計時間: {}h", report.total_hours());
        println!("─────────────────────────────");
        println!("記録数: {}", report.entries());
        println!("セッション数: {}", report.total_sessions());
        println!("合計: {}分", report.total_minutes());
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("エラー: {}", message);
    }

    /// Builds the countdown line: carriage return, clear, `M:SS`, hint.
    pub fn countdown_line(remaining: Duration) -> String {
        let (minutes, seconds) = Self::format_time(Self::whole_seconds(remaining));
        format!(
            "{}{}:{:02} 残り... (s: スキップ / q: 終了)",
            CLEAR_LINE, minutes, seconds
        )
    }

    /// Rounds a remaining duration up to whole seconds.
    ///
    /// A phase with 0.3s left still shows `0:01`.
    fn whole_seconds(remaining: Duration) -> u64 {
        remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0)
    }

    /// Formats remaining seconds as (minutes, seconds).
    fn format_time(total_seconds: u64) -> (u64, u64) {
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        (minutes, seconds)
    }
}

// ============================================================================
// Tests
// ============================================================================
