//! Logs tool calls and denies the ones policy forbids.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::Args;
use color_eyre::{Result, eyre::Context};
use hooklog::{
    claude::hook::{DENY_EXIT_CODE, ToolUse},
    logs::{ACTIVITY_LOG, DEBUG_LOG, LogDir},
    monitor::{self, DEFAULT_POLICY_FILE, Policy, Verdict},
};
use serde_json::Value;
use tracing::instrument;

#[derive(Args, Clone, Debug)]
pub struct Config {
    /// Policy file overriding the built-in denylists.
    #[arg(long, env = "HOOKLOG_POLICY", default_value = DEFAULT_POLICY_FILE)]
    policy: PathBuf,
}

#[instrument(skip(logs))]
pub fn main(config: Config, logs: &LogDir) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("read hook input")?;

    // Garbled input must never stop the assistant.
    let Ok(raw) = serde_json::from_str::<Value>(&input) else {
        tracing::debug!(?input, "claude_code.hook.read_monitor.malformed");
        return Ok(());
    };

    let pretty = serde_json::to_string_pretty(&raw).context("format hook input")?;
    logs.append(DEBUG_LOG, &format!("Input data: {pretty}\n"))?;

    let tool = match serde_json::from_value::<ToolUse>(raw) {
        Ok(tool) => tool,
        Err(error) => {
            tracing::debug!(?error, "claude_code.hook.read_monitor.unrecognized");
            return Ok(());
        }
    };
    tracing::debug!(?tool, "claude_code.hook.read_monitor");

    let policy = Policy::load_from(&config.policy)?;
    let Some(assessment) = monitor::assess(&tool, &policy, monitor::file_size) else {
        return Ok(());
    };

    for entry in &assessment.entries {
        logs.append(ACTIVITY_LOG, entry)?;
    }

    match assessment.verdict {
        Verdict::Allow => {
            if let Some(notice) = assessment.notice {
                println!("{notice}");
            }
            Ok(())
        }
        Verdict::Deny(response) => {
            let response = response.to_json()?;
            tracing::debug!(?response, "claude_code.hook.read_monitor.deny");
            println!("{response}");
            process::exit(DENY_EXIT_CODE);
        }
    }
}
