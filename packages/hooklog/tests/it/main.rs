//! Integration tests for the `hooklog` hooks.
//!
//! Every test runs the real binary inside a throwaway project directory, so
//! the default `.claude/logs` and `.claude/hooks` paths resolve there.

mod session;
mod setup;

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use xshell::{Shell, cmd};

/// A temporary project directory.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create workspace"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn log_dir(&self) -> PathBuf {
        self.root().join(".claude/logs")
    }

    pub fn log(&self, name: &str) -> PathBuf {
        self.log_dir().join(name)
    }

    /// Contents of a log, or an empty string if it was never written.
    pub fn read_log(&self, name: &str) -> String {
        fs::read_to_string(self.log(name)).unwrap_or_default()
    }

    /// Entries of a log with their `[timestamp] ` prefixes removed.
    pub fn entries(&self, name: &str) -> Vec<String> {
        self.read_log(name)
            .lines()
            .map(|line| match line.split_once("] ") {
                Some((_, entry)) => entry.to_string(),
                None => line.to_string(),
            })
            .collect()
    }

    pub fn write_log(&self, name: &str, content: &str) {
        fs::create_dir_all(self.log_dir()).expect("create log dir");
        fs::write(self.log(name), content).expect("write log");
    }

    /// Names of the files in the backup directory, sorted.
    pub fn backups(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(self.log_dir().join("backups")) else {
            return Vec::new();
        };
        let mut names = entries
            .map(|entry| entry.expect("read backup entry").file_name().to_string_lossy().to_string())
            .collect::<Vec<_>>();
        names.sort();
        names
    }
}

/// Run `hooklog {args}` in `workspace` with `stdin`; returns (exit code, stdout).
pub fn run_hooklog(workspace: &Workspace, args: &[&str], stdin: &str) -> (i32, String) {
    let sh = Shell::new().expect("create shell");
    sh.change_dir(workspace.root());

    let bin = env!("CARGO_BIN_EXE_hooklog");
    let output = cmd!(sh, "{bin} {args...}")
        .env_remove("HOOKLOG_DIR")
        .env_remove("HOOKLOG_POLICY")
        .stdin(stdin)
        .ignore_status()
        .output()
        .expect("run hooklog");

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    (exit_code, stdout)
}

/// Build a PreToolUse payload for `tool` with the given input.
pub fn tool_hook(tool: &str, input: serde_json::Value) -> String {
    serde_json::json!({
        "hook_event_name": "PreToolUse",
        "session_id": "test",
        "transcript_path": "/tmp/test",
        "cwd": "/tmp",
        "tool_name": tool,
        "tool_input": input
    })
    .to_string()
}

/// Build a UserPromptSubmit payload.
pub fn prompt_hook(content: &str, is_first_message: bool) -> String {
    serde_json::json!({
        "hook_event_name": "UserPromptSubmit",
        "session_id": "test",
        "message": { "content": content },
        "is_first_message": is_first_message
    })
    .to_string()
}
