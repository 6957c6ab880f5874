//! pomoterm - a terminal interval timer
//!
//! Alternates focused work sessions with short breaks:
//! - 50 minutes of work, 5 minutes of break, 3 sessions by default
//! - `s` skips the current phase, `q` quits
//! - finished runs are appended to a CSV usage log (`-r` sums it up)

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::info;

use pomoterm::cli::{Cli, Commands, Display, RunArgs};
use pomoterm::config::Settings;
use pomoterm::history::{CsvUsageLog, UsageReport};
use pomoterm::terminal::{ShutdownSignals, StdinKeys, TerminalModeGuard};
use pomoterm::timer::{CountdownController, SessionOrchestrator};
use pomoterm::types::RunOutcome;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    let code = match execute(cli).await {
        Ok(()) => 0,
        Err(e) => {
            Display::show_error(&format!("{:#}", e));
            1
        }
    };

    // Exit explicitly: a pending stdin read would otherwise hold up runtime shutdown.
    std::process::exit(code);
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so they never mix with the countdown line.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "pomoterm", &mut std::io::stdout());
        return Ok(());
    }

    let args = cli.run;
    let settings =
        Settings::load_or_default(args.config.as_deref()).context("設定の読み込みに失敗しました")?;

    if args.report {
        let report = UsageReport::load(&args.log_file(&settings))
            .context("利用記録の読み込みに失敗しました")?;
        Display::show_report(&report);
        return Ok(());
    }

    run_timer(&args, &settings).await
}

/// Runs sessions and breaks until completion, quit, or a shutdown signal.
async fn run_timer(args: &RunArgs, settings: &Settings) -> Result<()> {
    let config = args.timer_config(settings);
    config.validate().map_err(anyhow::Error::msg)?;

    let mut signals = ShutdownSignals::install().context("シグナルハンドラの登録に失敗しました")?;
    let terminal = TerminalModeGuard::acquire().context("端末設定の取得に失敗しました")?;

    let controller = CountdownController::new(StdinKeys::stdin(), args.player(settings));
    let mut orchestrator = SessionOrchestrator::new(
        config,
        controller,
        args.soundtrack(settings),
        CsvUsageLog::new(args.log_file(settings)),
    );

    let interrupted = tokio::select! {
        outcome = orchestrator.run(&terminal) => {
            match outcome {
                RunOutcome::Finished { sessions } => Display::show_run_finished(sessions),
                RunOutcome::Quit => {
                    restore_terminal(&terminal);
                    Display::show_farewell();
                }
            }
            false
        }
        signal = signals.recv() => {
            info!("Received {}, shutting down", signal.as_str());
            restore_terminal(&terminal);
            Display::show_farewell();
            true
        }
    };

    if interrupted {
        orchestrator.abort().await;
    }
    Ok(())
}

/// Restores the terminal, reporting failures without aborting the exit.
fn restore_terminal(terminal: &TerminalModeGuard) {
    if let Err(e) = terminal.restore() {
        tracing::warn!("{} ({})", e, e.suggestion());
    }
}
