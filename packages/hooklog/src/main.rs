//! Hooklog records what Claude Code reads and keeps those records per session.

use std::io;
use std::path::PathBuf;

use color_eyre::Result;
use tracing::{instrument, level_filters::LevelFilter};

mod cmd;

use clap::{Parser, Subcommand};
use hooklog::logs::{DEFAULT_LOG_DIR, LogDir};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Hooklog records what Claude Code reads.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Directory holding the hook logs.
    #[arg(long, global = true, env = "HOOKLOG_DIR", default_value = DEFAULT_LOG_DIR)]
    log_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log, and possibly deny, a tool call (a `PreToolUse` hook).
    ReadMonitor(cmd::read_monitor::Config),

    /// Rotate the logs at session boundaries (a `UserPromptSubmit` hook).
    Session(cmd::session::Config),

    /// Register the hooks in Claude Code's settings.
    Setup(cmd::setup::Config),
}

#[instrument]
fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Claude Code reads the hooks' stdout, so tracing writes to stderr and only
    // logs errors unless `HOOKLOG_LOG` asks for more.
    //
    // Examples:
    // - `HOOKLOG_LOG=debug` to log debug, info, warn, and error messages
    // - `HOOKLOG_LOG=hooklog::session=trace` to trace only log rotation
    tracing_subscriber::registry()
        .with(ErrorLayer::default())
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .with_target(true)
                .pretty(),
        )
        .with(
            EnvFilter::builder()
                .with_env_var("HOOKLOG_LOG")
                .with_default_directive(LevelFilter::ERROR.into())
                .from_env_lossy(),
        )
        .init();

    let logs = LogDir::new(cli.log_dir);
    match cli.command {
        Commands::ReadMonitor(config) => cmd::read_monitor::main(config, &logs),
        Commands::Session(config) => cmd::session::main(config, &logs),
        Commands::Setup(config) => cmd::setup::main(config),
    }
}
