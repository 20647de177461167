//! Register the hooklog hooks with Claude Code.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use color_eyre::{
    Result,
    eyre::{Context, OptionExt, bail},
};
use hooklog::{
    claude::hook::{self, Matcher},
    logs::{ACTIVITY_LOG, BACKUP_DIR, DEFAULT_LOG_DIR},
    monitor::DEFAULT_POLICY_FILE,
};
use serde_json::{Value, json};
use tracing::instrument;

/// Tools the read monitor watches, as a Claude Code matcher.
const MONITORED_TOOLS: &str = "Read|WebFetch|WebSearch|Grep|Glob";

/// Seconds Claude Code waits for a hook before giving up on it.
const HOOK_TIMEOUT_SECS: u32 = 10;

#[derive(Args, Clone, Debug)]
pub struct Config {
    /// Path to the .claude directory.
    #[arg(long, default_value = ".claude")]
    claude_dir: PathBuf,
}

#[instrument]
pub fn main(config: Config) -> Result<()> {
    fs::create_dir_all(&config.claude_dir).context("create .claude directory")?;
    let dotclaude = config
        .claude_dir
        .canonicalize()
        .with_context(|| format!("canonicalize claude dir: {:?}", config.claude_dir))?;
    let settings_file = dotclaude.join("settings.local.json");

    let exe = env::current_exe().context("get current executable path")?;
    let exe = exe
        .to_str()
        .ok_or_eyre("convert current executable path to string")?;

    let mut settings = read_settings(&settings_file)?;
    let added = merge_hooks(&mut settings, hooklog_matchers(exe))?;
    if added == 0 {
        println!("✓ Hooks already registered in {}", settings_file.display());
        return Ok(());
    }

    let settings_json = serde_json::to_string_pretty(&settings).context("serialize settings")?;
    fs::write(&settings_file, settings_json).context("write settings file")?;
    tracing::debug!(?settings_file, added, "setup.settings.written");

    println!("✓ Registered {added} hooks in {}", settings_file.display());
    println!();
    println!("From the next prompt on:");
    println!("- tool calls are logged to {DEFAULT_LOG_DIR}/{ACTIVITY_LOG}");
    println!("- logs are rotated into {DEFAULT_LOG_DIR}/{BACKUP_DIR}/ when a session starts or ends");
    println!("- denylists can be overridden in {DEFAULT_POLICY_FILE}");

    Ok(())
}

/// The hooks hooklog needs, keyed by Claude Code event.
fn hooklog_matchers(exe: &str) -> [(&'static str, Matcher); 2] {
    let monitor = hook::Config::builder()
        .command(format!("{exe} read-monitor"))
        .timeout(HOOK_TIMEOUT_SECS)
        .build();
    let session = hook::Config::builder()
        .command(format!("{exe} session"))
        .timeout(HOOK_TIMEOUT_SECS)
        .build();

    [
        (
            "PreToolUse",
            Matcher::builder()
                .matcher(MONITORED_TOOLS)
                .hooks([monitor])
                .build(),
        ),
        ("UserPromptSubmit", Matcher::builder().hooks([session]).build()),
    ]
}

fn read_settings(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Ok(json!({}));
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("read existing settings: {path:?}"))?;
    serde_json::from_str(&content).with_context(|| format!("parse existing settings: {path:?}"))
}

/// Add each matcher under its event unless an identical one is already
/// there; returns how many were added.
///
/// Settings stay a `Value` so keys we don't know about survive, in their
/// original order (`preserve_order`).
fn merge_hooks(
    settings: &mut Value,
    matchers: impl IntoIterator<Item = (&'static str, Matcher)>,
) -> Result<usize> {
    let Value::Object(settings) = settings else {
        bail!("expected settings to be an object, got: {settings:?}");
    };
    let hooks = settings.entry("hooks").or_insert_with(|| json!({}));
    let Value::Object(hooks) = hooks else {
        bail!("expected hooks to be an object, got: {hooks:?}");
    };

    let mut added = 0;
    for (event, matcher) in matchers {
        let entry = hooks.entry(event).or_insert_with(|| json!([]));
        let Value::Array(registered) = entry else {
            bail!("expected {event} matchers to be an array, got: {entry:?}");
        };

        let matcher = json!(matcher);
        if registered.contains(&matcher) {
            tracing::debug!(?event, "setup.hook.present");
        } else {
            registered.push(matcher);
            added += 1;
        }
    }

    Ok(added)
}
