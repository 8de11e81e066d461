use std::path::Path;

use clap::Parser;
use team_pulse::cli::commands::Cli;
use team_pulse::cli::handlers;
use team_pulse::io::config_io;
use team_pulse::model::config::LogConfig;
use tracing_appender::non_blocking::WorkerGuard;

fn main() {
    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => fail(e),
    };
    let config = match config_io::load_config(cli.config.as_deref(), &cwd) {
        Ok(config) => config,
        Err(e) => fail(e),
    };

    if cli.command.is_none() {
        // The dashboard owns the terminal, so logs go to a file
        let _guard = init_file_logging(&config.log);
        tracing::info!("starting dashboard");
        if let Err(e) = team_pulse::tui::run(config, cli.seed.as_deref()) {
            fail(e);
        }
    } else {
        init_stderr_logging();
        if let Err(e) = handlers::dispatch(cli, config) {
            fail(e);
        }
    }
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("error: {}", e);
    std::process::exit(1);
}

/// Log to `[log] file` (default: team-pulse.log in the temp dir). `RUST_LOG`
/// overrides the configured level.
fn init_file_logging(config: &LogConfig) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("team-pulse.log");
    let log_path: &Path = config.file.as_deref().unwrap_or(&default_path);

    let log_dir = match log_path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Commands print results on stdout; only warnings reach stderr unless
/// `RUST_LOG` asks for more.
fn init_stderr_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();
}
