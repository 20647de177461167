//! Rotates the hook logs when a session starts or ends.

use std::io::{self, Read};

use chrono::Local;
use clap::Args;
use color_eyre::{Result, eyre::Context};
use hooklog::{
    logs::LogDir,
    session::{self, Rotation, SessionSignal},
};
use tracing::instrument;

#[derive(Args, Clone, Debug)]
pub struct Config {}

/// Always succeeds: a failed rotation is reported through tracing, never to
/// Claude Code.
#[instrument(skip(logs))]
pub fn main(_config: Config, logs: &LogDir) -> Result<()> {
    if let Err(error) = rotate(logs) {
        tracing::warn!(?error, "claude_code.hook.session.failed");
    }
    Ok(())
}

fn rotate(logs: &LogDir) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("read hook input")?;

    let signal = session::classify(&input);
    tracing::debug!(?signal, "claude_code.hook.session");

    let now = Local::now();
    match signal {
        SessionSignal::End => {
            let rotation = Rotation::end_session(logs, &now)?;
            if !rotation.backed_up.is_empty() {
                println!("📦 Session logs backed up: {}", rotation.backed_up.join(", "));
            }
            println!("🧹 Log files cleared for next session");
        }
        SessionSignal::Start => {
            let rotation = Rotation::start_session(logs, &now)?;
            if !rotation.backed_up.is_empty() {
                println!(
                    "📦 Previous session logs backed up: {}",
                    rotation.backed_up.join(", ")
                );
            }
            println!("📝 Fresh log files created for new session");
        }
        SessionSignal::Other => {}
    }

    Ok(())
}
