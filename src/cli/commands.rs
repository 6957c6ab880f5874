//! Command definitions for the interval timer CLI.
//!
//! Uses clap derive macro for argument parsing. Running without a
//! subcommand starts the timer; `-r` prints the usage report instead.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Settings;
use crate::sound::{find_audio_player, AudioTrack, PlayerCommand};
use crate::timer::Soundtrack;
use crate::types::TimerConfig;

// ============================================================================
// CLI Structure
// ============================================================================

/// Terminal interval timer
#[derive(Parser, Debug)]
#[command(
    name = "pomoterm",
    version,
    about = "ターミナルで動くシンプルなインターバルタイマー",
    long_about = "作業セッションと休憩を交互に計測するインターバルタイマー。\n\
                  実行中は s でスキップ、q で終了します。",
    args_conflicts_with_subcommands = true,
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Timer options
    #[command(flatten)]
    pub run: RunArgs,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Arguments
// ============================================================================

/// Arguments for a timer run
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Session length in minutes (1-86400)
    #[arg(
        short = 't',
        long = "time",
        value_name = "MINUTES",
        value_parser = clap::value_parser!(u64).range(1..=86_400)
    )]
    pub session: Option<u64>,

    /// Break length in minutes (1-86400)
    #[arg(
        short = 'd',
        long = "break-time",
        value_name = "MINUTES",
        value_parser = clap::value_parser!(u64).range(1..=86_400)
    )]
    pub break_time: Option<u64>,

    /// Number of sessions (1-100)
    #[arg(
        short = 'n',
        long = "sessions",
        value_parser = clap::value_parser!(u32).range(1..=100)
    )]
    pub sessions: Option<u32>,

    /// Interpret -t and -d as seconds instead of minutes
    #[arg(long)]
    pub seconds: bool,

    /// Print total focused time from the usage log and exit
    #[arg(short, long)]
    pub report: bool,

    /// Track played once at every phase change
    #[arg(long, value_name = "PATH")]
    pub alarm: Option<PathBuf>,

    /// Track looped during sessions
    #[arg(long, value_name = "PATH")]
    pub ambient: Option<PathBuf>,

    /// Usage log file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Audio player executable
    #[arg(long, value_name = "PATH")]
    pub player: Option<PathBuf>,

    /// Disable all audio
    #[arg(long)]
    pub no_sound: bool,

    /// Settings file (defaults to ~/.config/pomoterm/config.json)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl RunArgs {
    /// Builds the timer configuration, letting flags override `settings`.
    ///
    /// `--seconds` only changes the unit of values given on the command line.
    #[must_use]
    pub fn timer_config(&self, settings: &Settings) -> TimerConfig {
        let unit = if self.seconds { 1 } else { 60 };
        let session_seconds = self
            .session
            .map(|value| value.saturating_mul(unit))
            .unwrap_or_else(|| settings.session_minutes.saturating_mul(60));
        let break_seconds = self
            .break_time
            .map(|value| value.saturating_mul(unit))
            .unwrap_or_else(|| settings.break_minutes.saturating_mul(60));

        TimerConfig::default()
            .with_session_seconds(session_seconds)
            .with_break_seconds(break_seconds)
            .with_total_sessions(self.sessions.unwrap_or(settings.sessions))
    }

    /// Returns the usage log path.
    #[must_use]
    pub fn log_file(&self, settings: &Settings) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| settings.log_file.clone())
    }

    /// Returns the tracks for this run; empty with `--no-sound`.
    #[must_use]
    pub fn soundtrack(&self, settings: &Settings) -> Soundtrack {
        if self.no_sound {
            return Soundtrack::default();
        }

        let alarm = self
            .alarm
            .clone()
            .unwrap_or_else(|| settings.alarm_track.clone());
        let ambient = self.ambient.clone().or_else(|| settings.ambient_track.clone());

        Soundtrack {
            alarm: Some(AudioTrack::resolve(alarm)),
            ambient: ambient.map(AudioTrack::resolve),
        }
    }

    /// Returns the player to use, discovering one when none is configured.
    #[must_use]
    pub fn player(&self, settings: &Settings) -> Option<PlayerCommand> {
        if self.no_sound {
            return None;
        }

        match self.player.clone().or_else(|| settings.player.clone()) {
            Some(path) => Some(PlayerCommand::from_executable(path)),
            None => find_audio_player(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Cli Tests
    // ------------------------------------------------------------------------

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_no_args() {
            let cli = Cli::parse_from(["pomoterm"]);
            assert!(cli.command.is_none());
            assert!(!cli.verbose);
            assert!(!cli.run.report);
            assert!(cli.run.session.is_none());
        }

        #[test]
        fn test_parse_short_verbose_flag() {
            let cli = Cli::parse_from(["pomoterm", "-v"]);
            assert!(cli.verbose);
        }

        #[test]
        fn test_parse_report_flag() {
            let cli = Cli::parse_from(["pomoterm", "-r"]);
            assert!(cli.run.report);
        }

        #[test]
        fn test_parse_completions_bash() {
            let cli = Cli::parse_from(["pomoterm", "completions", "bash"]);
            match cli.command {
                Some(Commands::Completions { shell }) => {
                    assert_eq!(shell, clap_complete::Shell::Bash);
                }
                _ => panic!("Expected Completions command"),
            }
        }

        #[test]
        fn test_parse_completions_zsh() {
            let cli = Cli::parse_from(["pomoterm", "completions", "zsh"]);
            assert!(matches!(
                cli.command,
                Some(Commands::Completions {
                    shell: clap_complete::Shell::Zsh
                })
            ));
        }
    }

    // ------------------------------------------------------------------------
    // RunArgs Tests
    // ------------------------------------------------------------------------

    mod run_args_tests {
        use super::*;

        #[test]
        fn test_parse_all_options() {
            let cli = Cli::parse_from([
                "pomoterm",
                "-t",
                "25",
                "-d",
                "10",
                "-n",
                "4",
                "--alarm",
                "/tmp/bell.mp3",
                "--ambient",
                "/tmp/rain.mp3",
                "--log-file",
                "/tmp/log.csv",
                "--player",
                "/usr/bin/mpv",
                "--no-sound",
                "--seconds",
                "--config",
                "/tmp/config.json",
            ]);
            let args = cli.run;
            assert_eq!(args.session, Some(25));
            assert_eq!(args.break_time, Some(10));
            assert_eq!(args.sessions, Some(4));
            assert_eq!(args.alarm, Some(PathBuf::from("/tmp/bell.mp3")));
            assert_eq!(args.ambient, Some(PathBuf::from("/tmp/rain.mp3")));
            assert_eq!(args.log_file, Some(PathBuf::from("/tmp/log.csv")));
            assert_eq!(args.player, Some(PathBuf::from("/usr/bin/mpv")));
            assert!(args.no_sound);
            assert!(args.seconds);
            assert_eq!(args.config, Some(PathBuf::from("/tmp/config.json")));
        }

        #[test]
        fn test_timer_config_defaults_from_settings() {
            let args = RunArgs::default();
            let config = args.timer_config(&Settings::default());
            assert_eq!(config.session_seconds, 3000);
            assert_eq!(config.break_seconds, 300);
            assert_eq!(config.total_sessions, 3);
        }

        #[test]
        fn test_timer_config_flags_override_settings() {
            let cli = Cli::parse_from(["pomoterm", "-t", "25", "-n", "2"]);
            let settings = Settings {
                break_minutes: 10,
                ..Settings::default()
            };
            let config = cli.run.timer_config(&settings);
            assert_eq!(config.session_seconds, 1500);
            assert_eq!(config.break_seconds, 600);
            assert_eq!(config.total_sessions, 2);
        }

        #[test]
        fn test_timer_config_seconds_unit() {
            let cli = Cli::parse_from(["pomoterm", "--seconds", "-t", "2", "-d", "1"]);
            let config = cli.run.timer_config(&Settings::default());
            assert_eq!(config.session_seconds, 2);
            assert_eq!(config.break_seconds, 1);
            assert_eq!(config.session_minutes(), 0);
        }

        #[test]
        fn test_log_file_override() {
            let args = RunArgs {
                log_file: Some(PathBuf::from("/tmp/custom.csv")),
                ..RunArgs::default()
            };
            assert_eq!(
                args.log_file(&Settings::default()),
                PathBuf::from("/tmp/custom.csv")
            );
            assert_eq!(
                RunArgs::default().log_file(&Settings::default()),
                PathBuf::from("./pomolog.csv")
            );
        }

        #[test]
        fn test_soundtrack_uses_settings() {
            let settings = Settings {
                ambient_track: Some(PathBuf::from("/nonexistent/rain.mp3")),
                ..Settings::default()
            };
            let soundtrack = RunArgs::default().soundtrack(&settings);
            let alarm = soundtrack.alarm.expect("alarm track");
            assert_eq!(alarm.path(), std::path::Path::new("./pomoterm.mp3"));
            let ambient = soundtrack.ambient.expect("ambient track");
            assert!(!ambient.exists());
        }

        #[test]
        fn test_no_sound_disables_audio() {
            let args = RunArgs {
                no_sound: true,
                player: Some(PathBuf::from("/usr/bin/mpv")),
                ..RunArgs::default()
            };
            assert_eq!(args.soundtrack(&Settings::default()), Soundtrack::default());
            assert!(args.player(&Settings::default()).is_none());
        }

        #[test]
        fn test_explicit_player() {
            let args = RunArgs {
                player: Some(PathBuf::from("/opt/bin/mpv")),
                ..RunArgs::default()
            };
            let player = args.player(&Settings::default()).expect("player");
            assert_eq!(player.executable(), std::path::Path::new("/opt/bin/mpv"));
        }
    }

    // ------------------------------------------------------------------------
    // Error Case Tests (using try_parse)
    // ------------------------------------------------------------------------

    mod error_tests {
        use super::*;

        #[test]
        fn test_parse_session_zero() {
            let result = Cli::try_parse_from(["pomoterm", "-t", "0"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_break_zero() {
            let result = Cli::try_parse_from(["pomoterm", "-d", "0"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_sessions_zero() {
            let result = Cli::try_parse_from(["pomoterm", "-n", "0"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_sessions_too_high() {
            let result = Cli::try_parse_from(["pomoterm", "-n", "101"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_session_not_number() {
            let result = Cli::try_parse_from(["pomoterm", "-t", "abc"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_session_negative() {
            let result = Cli::try_parse_from(["pomoterm", "-t", "-5"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_unknown_command() {
            let result = Cli::try_parse_from(["pomoterm", "unknown"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_parse_completions_invalid_shell() {
            let result = Cli::try_parse_from(["pomoterm", "completions", "invalid"]);
            assert!(result.is_err());
        }
    }
}
