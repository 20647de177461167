//! Upload a series of articles to Qiita through the companion tool.

use std::io;
use std::process::ExitCode;

use color_eyre::Result;
use tracing::{instrument, level_filters::LevelFilter};

mod cmd;

use clap::Parser;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Upload a series of articles to Qiita.
///
/// Articles are published publicly. If any article in the series fails to
/// upload, the companion tool deletes every article uploaded in the same run.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Series to upload; shows a selection menu when omitted.
    series: Option<String>,

    /// List the series available for upload and exit.
    #[arg(long)]
    list: bool,

    #[command(flatten)]
    project: cmd::ProjectArgs,
}

#[instrument]
fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Stdout is the user's view of the upload, so diagnostics go to stderr
    // and stay quiet unless `UPLOAD_TOOL_LOG` asks for more (for example
    // `UPLOAD_TOOL_LOG=debug`).
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
                .with_env_var("UPLOAD_TOOL_LOG")
                .with_default_directive(LevelFilter::ERROR.into())
                .from_env_lossy(),
        )
        .init();

    if cli.list {
        cmd::list::main(cli.project)
    } else {
        cmd::upload::main(cli.project, cli.series)
    }
}
